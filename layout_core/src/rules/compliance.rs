//! # Walkway & Fire-Access Compliance
//!
//! Commercial and industrial roofs must keep a clear walkway around the
//! array perimeter and a central access aisle for fire fighting. Residential
//! roofs are exempt unless the check is forced.
//!
//! ## Example
//!
//! ```rust
//! use layout_core::rules::compliance::{evaluate, ComplianceInput, ProjectCategory};
//!
//! let result = evaluate(&ComplianceInput {
//!     project_category: ProjectCategory::Commercial,
//!     force_fire_compliance: false,
//!     perimeter_walkway_m: 0.5,
//!     central_access_m: 1.2,
//!     min_perimeter_walkway_m: 0.6,
//!     min_central_access_m: 1.0,
//! });
//!
//! assert!(result.checks_mandatory);
//! assert!(!result.perimeter_walkway_ok);
//! assert!(!result.fire_safe);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{LayoutError, LayoutResult};

/// Minimum clear walkway around the array (m)
pub const DEFAULT_MIN_PERIMETER_WALKWAY_M: f64 = 0.6;

/// Minimum central access aisle (m)
pub const DEFAULT_MIN_CENTRAL_ACCESS_M: f64 = 1.0;

/// Occupancy category of the building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    #[default]
    Residential,
    Commercial,
    Industrial,
}

impl ProjectCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectCategory::Residential => "Residential",
            ProjectCategory::Commercial => "Commercial",
            ProjectCategory::Industrial => "Industrial",
        }
    }

    /// Whether fire-access rules apply to this category by default.
    pub fn requires_fire_checks(&self) -> bool {
        matches!(self, ProjectCategory::Commercial | ProjectCategory::Industrial)
    }

    /// Parse from common spellings ("res", "commercial", "IND", ...).
    pub fn from_str_flexible(s: &str) -> LayoutResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "residential" | "res" | "home" => Ok(ProjectCategory::Residential),
            "commercial" | "com" | "office" => Ok(ProjectCategory::Commercial),
            "industrial" | "ind" | "factory" => Ok(ProjectCategory::Industrial),
            _ => Err(LayoutError::invalid_input("project_category", s, "Unknown project category")),
        }
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceInput {
    pub project_category: ProjectCategory,
    pub force_fire_compliance: bool,
    /// Walkway provided around the array, equal to the roof setback (m)
    pub perimeter_walkway_m: f64,
    /// Central aisle provided by the design (m)
    pub central_access_m: f64,
    pub min_perimeter_walkway_m: f64,
    pub min_central_access_m: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub checks_mandatory: bool,
    pub perimeter_walkway_ok: bool,
    pub central_access_ok: bool,
    pub fire_safe: bool,
    /// Human-readable failures; empty when every check passes
    pub issues: Vec<String>,
}

/// Evaluate walkway and access compliance.
///
/// The individual checks are always computed; `fire_safe` only depends on
/// them when the checks are mandatory.
pub fn evaluate(input: &ComplianceInput) -> ComplianceResult {
    let checks_mandatory = input.project_category.requires_fire_checks() || input.force_fire_compliance;
    let perimeter_walkway_ok = input.perimeter_walkway_m >= input.min_perimeter_walkway_m;
    let central_access_ok = input.central_access_m >= input.min_central_access_m;

    let mut issues = Vec::new();
    if !perimeter_walkway_ok {
        issues.push(format!(
            "Perimeter walkway {:.2} m is below the {:.2} m minimum",
            input.perimeter_walkway_m, input.min_perimeter_walkway_m
        ));
    }
    if !central_access_ok {
        issues.push(format!(
            "Central access {:.2} m is below the {:.2} m minimum",
            input.central_access_m, input.min_central_access_m
        ));
    }

    ComplianceResult {
        checks_mandatory,
        perimeter_walkway_ok,
        central_access_ok,
        fire_safe: !checks_mandatory || (perimeter_walkway_ok && central_access_ok),
        issues,
    }
}
