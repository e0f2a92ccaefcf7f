//! # Panel Specification
//!
//! Module datasheet values and the orientation rule that maps them onto the
//! roof axes.
//!
//! Landscape lays the long side (`length_m`) along x and the short side
//! (`width_m`) along z; portrait does the opposite. Rows always run along x,
//! so the z extent is the "depth" that drives row pitch.
//!
//! ## Example
//!
//! ```rust
//! use layout_core::panel::{CellType, Orientation, PanelSpec};
//!
//! let panel = PanelSpec::new(1.0, 1.7, 330.0, 22.0, 20.5, CellType::Monocrystalline);
//! assert!(panel.validate().is_ok());
//!
//! let (along_x, along_z) = panel.footprint(Orientation::Landscape);
//! assert_eq!((along_x, along_z), (1.7, 1.0));
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, require_positive, LayoutError, LayoutResult};
use crate::units::{Kilowatts, Meters, SqMeters, Watts};

/// How the module is turned on the mounting structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Long side along the row (x)
    #[default]
    Landscape,
    /// Long side across the row (z)
    Portrait,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Landscape, Orientation::Portrait];

    pub fn display_name(&self) -> &'static str {
        match self {
            Orientation::Landscape => "Landscape",
            Orientation::Portrait => "Portrait",
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Cell technology of the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
    #[default]
    Monocrystalline,
    Polycrystalline,
    ThinFilm,
    Bifacial,
}

impl CellType {
    pub fn display_name(&self) -> &'static str {
        match self {
            CellType::Monocrystalline => "Monocrystalline",
            CellType::Polycrystalline => "Polycrystalline",
            CellType::ThinFilm => "Thin film",
            CellType::Bifacial => "Bifacial",
        }
    }

    /// Parse from common datasheet spellings ("mono", "poly-Si", "CdTe", ...)
    pub fn from_str_flexible(s: &str) -> LayoutResult<Self> {
        match s.to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "mono" | "monocrystalline" | "monosi" | "perc" => Ok(CellType::Monocrystalline),
            "poly" | "polycrystalline" | "polysi" | "multicrystalline" => Ok(CellType::Polycrystalline),
            "thinfilm" | "cdte" | "cigs" | "asi" => Ok(CellType::ThinFilm),
            "bifacial" | "bifi" => Ok(CellType::Bifacial),
            _ => Err(LayoutError::invalid_input("cell_type", s, "Unknown cell technology")),
        }
    }

    /// Annual-average output factor for operating temperature and, for
    /// bifacial modules, rear-side gain.
    pub fn temperature_derate(&self) -> f64 {
        match self {
            CellType::Monocrystalline => 0.96,
            CellType::Polycrystalline => 0.95,
            CellType::ThinFilm => 0.98,
            CellType::Bifacial => 1.02,
        }
    }
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Module datasheet values.
///
/// ## JSON Example
///
/// ```json
/// {
///   "width_m": 1.134,
///   "length_m": 2.279,
///   "watt_peak": 540.0,
///   "weight_kg": 27.5,
///   "efficiency_pct": 21.0,
///   "cell_type": "monocrystalline"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSpec {
    /// Short side (m)
    pub width_m: f64,

    /// Long side (m)
    pub length_m: f64,

    /// Rated power at STC (W)
    pub watt_peak: f64,

    /// Module mass (kg)
    pub weight_kg: f64,

    /// Module efficiency at STC (%)
    pub efficiency_pct: f64,

    #[serde(default)]
    pub cell_type: CellType,
}

impl PanelSpec {
    pub fn new(
        width_m: f64,
        length_m: f64,
        watt_peak: f64,
        weight_kg: f64,
        efficiency_pct: f64,
        cell_type: CellType,
    ) -> Self {
        PanelSpec {
            width_m,
            length_m,
            watt_peak,
            weight_kg,
            efficiency_pct,
            cell_type,
        }
    }

    /// Validate the datasheet values.
    pub fn validate(&self) -> LayoutResult<()> {
        require_positive("panel.width_m", self.width_m)?;
        require_positive("panel.length_m", self.length_m)?;
        require_positive("panel.watt_peak", self.watt_peak)?;
        require_non_negative("panel.weight_kg", self.weight_kg)?;
        if !(self.efficiency_pct > 0.0 && self.efficiency_pct <= 100.0) {
            return Err(LayoutError::invalid_input(
                "panel.efficiency_pct",
                self.efficiency_pct.to_string(),
                "Efficiency must be in (0, 100]",
            ));
        }
        Ok(())
    }

    /// Footprint as `(extent along x, extent along z)` for an orientation.
    pub fn footprint(&self, orientation: Orientation) -> (f64, f64) {
        match orientation {
            Orientation::Landscape => (self.length_m, self.width_m),
            Orientation::Portrait => (self.width_m, self.length_m),
        }
    }

    /// Module area (m²)
    pub fn area(&self) -> SqMeters {
        Meters(self.width_m) * Meters(self.length_m)
    }

    /// Rated power
    pub fn rated_power(&self) -> Watts {
        Watts(self.watt_peak)
    }

    /// Combined DC capacity of `count` modules
    pub fn capacity_kw(&self, count: usize) -> Kilowatts {
        (self.rated_power() * count as f64).into()
    }

    /// Number of modules needed to reach at least `target_kw`.
    ///
    /// Zero or negative targets need no modules.
    pub fn count_for_capacity(&self, target_kw: f64) -> usize {
        if !(target_kw > 0.0) || !(self.watt_peak > 0.0) {
            return 0;
        }
        let watts: Watts = Kilowatts(target_kw).into();
        // Round first so 3.3 kW / 330 W is exactly 10, not 10.000000000000002
        let exact = watts.0 / self.watt_peak;
        let rounded = exact.round();
        if (exact - rounded).abs() < 1e-9 {
            rounded as usize
        } else {
            exact.ceil() as usize
        }
    }
}

impl Default for PanelSpec {
    /// A common 540 Wp mono-PERC module.
    fn default() -> Self {
        PanelSpec::new(1.134, 2.279, 540.0, 27.5, 21.0, CellType::Monocrystalline)
    }
}
