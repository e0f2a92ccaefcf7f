//! # Engineering Rules
//!
//! Deterministic threshold and lookup checks evaluated on every design pass.
//! Each evaluator follows the same pattern:
//!
//! - `*Input` - the scalars it needs (JSON-serializable)
//! - `*Result` - the figures it produces (JSON-serializable)
//! - `evaluate(&input) -> *Result` - a total function, it never fails
//!
//! The four evaluators are independent of each other and of exact panel
//! positions; they only see counts, areas and configuration.
//!
//! ## Available Rules
//!
//! - [`structural`] - dead load on RCC roofs
//! - [`hardware`] - rails, clamps and fasteners for metal roofs
//! - [`earthing`] - earth pits, resistance target, lightning protection
//! - [`compliance`] - walkway and fire-access checks

pub mod compliance;
pub mod earthing;
pub mod hardware;
pub mod structural;

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, require_positive, LayoutResult};

pub use compliance::{ComplianceInput, ComplianceResult, ProjectCategory};
pub use earthing::{EarthingInput, EarthingResult};
pub use hardware::{ClampType, HardwareInput, HardwareResult};
pub use structural::{DeadLoadInput, DeadLoadResult, RoofType, StructureType};

/// Flat engineering configuration for one design.
///
/// Every field has a default, so a partial JSON object is enough:
///
/// ```json
/// {
///   "roof_type": "rcc",
///   "structure_type": "ballast",
///   "project_category": "commercial",
///   "building_height_m": 18.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineeringConfig {
    pub roof_type: RoofType,
    pub structure_type: StructureType,

    /// Allowed distributed dead load on the roof slab (kg/m²)
    pub dead_load_limit_kg_per_m2: f64,

    /// Purlin spacing on metal roofs (m)
    pub purlin_spacing_m: f64,
    pub clamp_type: ClampType,

    pub project_category: ProjectCategory,

    /// Apply fire-access checks even when the category does not require them
    pub force_fire_compliance: bool,

    /// Minimum clear perimeter walkway (m)
    pub min_perimeter_walkway_m: f64,

    /// Minimum central access aisle (m)
    pub min_central_access_m: f64,

    /// Central access aisle provided by the design (m)
    pub central_access_width_m: f64,

    /// Building height above ground (m)
    pub building_height_m: f64,
}

impl Default for EngineeringConfig {
    fn default() -> Self {
        EngineeringConfig {
            roof_type: RoofType::default(),
            structure_type: StructureType::default(),
            dead_load_limit_kg_per_m2: structural::DEFAULT_DEAD_LOAD_LIMIT_KG_PER_M2,
            purlin_spacing_m: hardware::DEFAULT_PURLIN_SPACING_M,
            clamp_type: ClampType::default(),
            project_category: ProjectCategory::default(),
            force_fire_compliance: false,
            min_perimeter_walkway_m: compliance::DEFAULT_MIN_PERIMETER_WALKWAY_M,
            min_central_access_m: compliance::DEFAULT_MIN_CENTRAL_ACCESS_M,
            central_access_width_m: compliance::DEFAULT_MIN_CENTRAL_ACCESS_M,
            building_height_m: 10.0,
        }
    }
}

impl EngineeringConfig {
    /// Validate configuration scalars.
    pub fn validate(&self) -> LayoutResult<()> {
        require_positive("dead_load_limit_kg_per_m2", self.dead_load_limit_kg_per_m2)?;
        require_positive("purlin_spacing_m", self.purlin_spacing_m)?;
        require_non_negative("min_perimeter_walkway_m", self.min_perimeter_walkway_m)?;
        require_non_negative("min_central_access_m", self.min_central_access_m)?;
        require_non_negative("central_access_width_m", self.central_access_width_m)?;
        require_non_negative("building_height_m", self.building_height_m)?;
        Ok(())
    }
}
