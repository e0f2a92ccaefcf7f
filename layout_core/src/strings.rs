//! # String Partitioning
//!
//! Groups tiled panels into series strings. Zones are contiguous runs of the
//! row-major tiling order, so neighbouring panels end up on the same string.
//!
//! The string length itself comes from the module voltage and the inverter's
//! MPPT window; [`StringSizing`] performs that lookup for callers that do not
//! already have a number.
//!
//! ## Example
//!
//! ```rust
//! use layout_core::strings::partition_into_strings;
//!
//! let zones = partition_into_strings(26, 12).unwrap();
//! let sizes: Vec<usize> = zones.iter().map(|z| z.len()).collect();
//! assert_eq!(sizes, vec![12, 12, 2]);
//! assert_eq!(zones[2].label, "S3");
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, LayoutError, LayoutResult};

/// One series string: a contiguous range of panel indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringZone {
    /// 1-based creation order
    pub id: usize,

    /// 0-based indices into the panel layout, half-open
    pub panel_indices: Range<usize>,

    /// Display label ("S1", "S2", ...)
    pub label: String,
}

impl StringZone {
    pub fn len(&self) -> usize {
        self.panel_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panel_indices.is_empty()
    }

    pub fn contains(&self, panel_index: usize) -> bool {
        self.panel_indices.contains(&panel_index)
    }
}

/// Cut `[0, panel_count)` into strings of `panels_per_string`, in order.
///
/// The last zone takes the remainder (or a full group when the count divides
/// evenly). Zero panels give no zones; zero panels per string is a contract
/// violation.
pub fn partition_into_strings(panel_count: usize, panels_per_string: usize) -> LayoutResult<Vec<StringZone>> {
    if panels_per_string == 0 {
        return Err(LayoutError::invalid_input(
            "panels_per_string",
            "0",
            "A string needs at least one panel",
        ));
    }

    Ok((0..panel_count)
        .step_by(panels_per_string)
        .enumerate()
        .map(|(i, start)| {
            let id = i + 1;
            StringZone {
                id,
                panel_indices: start..(start + panels_per_string).min(panel_count),
                label: format!("S{}", id),
            }
        })
        .collect())
}

/// Voltage data used to size a string.
///
/// ## JSON Example
///
/// ```json
/// {
///   "module_voc_v": 49.5,
///   "module_vmp_v": 41.6,
///   "inverter_max_dc_v": 1000.0,
///   "mppt_min_v": 200.0,
///   "mppt_max_v": 850.0,
///   "cold_voc_factor": 1.12
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringSizing {
    /// Module open-circuit voltage at STC (V)
    pub module_voc_v: f64,

    /// Module maximum-power voltage at STC (V)
    pub module_vmp_v: f64,

    /// Inverter absolute DC input limit (V)
    pub inverter_max_dc_v: f64,

    /// Lower edge of the MPPT operating window (V)
    pub mppt_min_v: f64,

    /// Upper edge of the MPPT operating window (V)
    pub mppt_max_v: f64,

    /// Voc rise at the coldest expected cell temperature
    pub cold_voc_factor: f64,
}

impl Default for StringSizing {
    fn default() -> Self {
        StringSizing {
            module_voc_v: 49.5,
            module_vmp_v: 41.6,
            inverter_max_dc_v: 1000.0,
            mppt_min_v: 200.0,
            mppt_max_v: 850.0,
            cold_voc_factor: 1.12,
        }
    }
}

/// Allowed string lengths for a module/inverter pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringWindow {
    pub min_panels: usize,
    pub max_panels: usize,
    /// Longest string that stays inside both the DC limit and the MPPT window
    pub recommended: usize,
}

impl StringSizing {
    pub fn validate(&self) -> LayoutResult<()> {
        require_positive("module_voc_v", self.module_voc_v)?;
        require_positive("module_vmp_v", self.module_vmp_v)?;
        require_positive("inverter_max_dc_v", self.inverter_max_dc_v)?;
        require_positive("mppt_min_v", self.mppt_min_v)?;
        require_positive("mppt_max_v", self.mppt_max_v)?;
        require_positive("cold_voc_factor", self.cold_voc_factor)?;
        Ok(())
    }

    /// Compute the allowed string lengths.
    ///
    /// Fails when the window is empty, i.e. the shortest string that reaches
    /// the MPPT floor already exceeds the inverter's limits.
    pub fn window(&self) -> LayoutResult<StringWindow> {
        self.validate()?;

        let max_panels = (self.inverter_max_dc_v / (self.module_voc_v * self.cold_voc_factor)).floor() as usize;
        let min_panels = ((self.mppt_min_v / self.module_vmp_v).ceil() as usize).max(1);
        let mppt_cap = (self.mppt_max_v / self.module_vmp_v).floor() as usize;
        let recommended = max_panels.min(mppt_cap);

        if recommended < min_panels {
            return Err(LayoutError::invalid_input(
                "string_sizing",
                format!("{}..{}", min_panels, recommended),
                "Module voltage does not fit the inverter MPPT window",
            ));
        }

        Ok(StringWindow {
            min_panels,
            max_panels,
            recommended,
        })
    }
}
