//! # Metal-Roof Mounting Hardware
//!
//! Bill of quantities for rail-mounted arrays on metal sheet roofs: rails,
//! splices, clamps, purlin attachment points and fasteners.
//!
//! ## Example
//!
//! ```rust
//! use layout_core::rules::hardware::{evaluate, ClampType, HardwareInput};
//! use layout_core::rules::RoofType;
//!
//! let boq = evaluate(&HardwareInput {
//!     roof_type: RoofType::MetalSheet,
//!     panel_count: 20,
//!     row_count: 4,
//!     total_row_length_m: 36.0,
//!     purlin_spacing_m: 1.2,
//!     clamp_type: ClampType::MidClamp,
//! });
//!
//! assert_eq!(boq.clamp_count, 40);
//! assert_eq!(boq.rail_count, 18);
//! ```

use serde::{Deserialize, Serialize};

use super::structural::RoofType;

/// Stock rail length (m)
pub const STANDARD_RAIL_LENGTH_M: f64 = 4.2;

/// Rails under each panel row
pub const RAILS_PER_ROW: usize = 2;

/// Default purlin spacing on metal roofs (m)
pub const DEFAULT_PURLIN_SPACING_M: f64 = 1.2;

/// Clamp topology holding the panels to the rails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampType {
    /// Shared mid clamps between panels, two clamp positions per panel
    #[default]
    MidClamp,
    /// End clamps only, one per panel plus one closing each row
    EndClamp,
}

impl ClampType {
    /// Fasteners per purlin attachment point.
    pub fn fastener_multiplier(&self) -> usize {
        match self {
            ClampType::MidClamp => 2,
            ClampType::EndClamp => 3,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ClampType::MidClamp => "Mid clamp",
            ClampType::EndClamp => "End clamp",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareInput {
    pub roof_type: RoofType,
    pub panel_count: usize,
    pub row_count: usize,
    /// Sum of all row lengths (m)
    pub total_row_length_m: f64,
    pub purlin_spacing_m: f64,
    pub clamp_type: ClampType,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HardwareResult {
    /// Hardware is only bought for metal roofs; quantities are still reported
    pub applicable: bool,
    pub rail_count: usize,
    pub rail_splice_count: usize,
    pub clamp_count: usize,
    pub attachment_points: usize,
    pub fastener_count: usize,
}

/// `ceil(length / unit)` for non-negative lengths; zero for a non-positive unit.
fn pieces(length_m: f64, unit_m: f64) -> usize {
    if !(length_m > 0.0) || !(unit_m > 0.0) {
        return 0;
    }
    (length_m / unit_m).ceil() as usize
}

/// Compute the hardware bill of quantities.
pub fn evaluate(input: &HardwareInput) -> HardwareResult {
    let rail_count = RAILS_PER_ROW * pieces(input.total_row_length_m, STANDARD_RAIL_LENGTH_M);
    let rail_splice_count = rail_count.saturating_sub(RAILS_PER_ROW * input.row_count);

    let clamp_count = match input.clamp_type {
        ClampType::MidClamp => 2 * input.panel_count,
        ClampType::EndClamp => input.panel_count + input.row_count,
    };

    let attachment_points = RAILS_PER_ROW * pieces(input.total_row_length_m, input.purlin_spacing_m);
    let fastener_count = attachment_points * input.clamp_type.fastener_multiplier();

    HardwareResult {
        applicable: input.roof_type == RoofType::MetalSheet,
        rail_count,
        rail_splice_count,
        clamp_count,
        attachment_points,
        fastener_count,
    }
}
