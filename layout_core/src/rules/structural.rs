//! # Structural Dead Load
//!
//! Checks the distributed weight of the array against the slab's dead-load
//! allowance. Ballasted systems sit on concrete blocks and spread more weight
//! over the roof than anchored ones, so they carry a higher factor.
//!
//! ## Example
//!
//! ```rust
//! use layout_core::rules::structural::{evaluate, DeadLoadInput, RoofType, StructureType};
//!
//! let result = evaluate(&DeadLoadInput {
//!     roof_type: RoofType::Rcc,
//!     structure_type: StructureType::Anchor,
//!     panel_count: 40,
//!     panel_weight_kg: 22.0,
//!     roof_area_m2: 150.0,
//!     dead_load_limit_kg_per_m2: 50.0,
//! });
//!
//! assert_eq!(result.total_load_kg, 880.0);
//! assert!((result.load_per_m2 - 5.87).abs() < 0.01);
//! assert!(result.is_safe);
//! ```

use serde::{Deserialize, Serialize};

use crate::units::{Kilograms, SqMeters};

/// Default slab allowance for panel dead load (kg/m²)
pub const DEFAULT_DEAD_LOAD_LIMIT_KG_PER_M2: f64 = 50.0;

/// Roof construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoofType {
    /// Reinforced cement concrete slab
    #[default]
    Rcc,
    /// Trapezoidal / corrugated metal sheet on purlins
    MetalSheet,
}

impl RoofType {
    pub fn display_name(&self) -> &'static str {
        match self {
            RoofType::Rcc => "RCC slab",
            RoofType::MetalSheet => "Metal sheet",
        }
    }
}

/// Mounting structure on RCC roofs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureType {
    /// Chemically anchored to the slab
    #[default]
    Anchor,
    /// Held down by concrete ballast blocks
    Ballast,
}

impl StructureType {
    /// Multiplier on the bare panel weight for the load the structure
    /// transmits into the slab.
    pub fn structural_factor(&self) -> f64 {
        match self {
            StructureType::Anchor => 1.0,
            StructureType::Ballast => 1.5,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StructureType::Anchor => "Anchored",
            StructureType::Ballast => "Ballasted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadLoadInput {
    pub roof_type: RoofType,
    pub structure_type: StructureType,
    pub panel_count: usize,
    pub panel_weight_kg: f64,
    pub roof_area_m2: f64,
    pub dead_load_limit_kg_per_m2: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeadLoadResult {
    /// The check governs RCC roofs only; figures are still reported otherwise
    pub applicable: bool,
    pub structural_factor: f64,
    pub total_load_kg: f64,
    pub load_per_m2: f64,
    pub limit_kg_per_m2: f64,
    /// `load_per_m2 / limit`
    pub utilization: f64,
    pub is_safe: bool,
}

/// Evaluate the dead-load check.
///
/// With no roof area the load cannot be spread: the per-m² figure is reported
/// as zero and the check only passes if there is no load at all.
pub fn evaluate(input: &DeadLoadInput) -> DeadLoadResult {
    let factor = input.structure_type.structural_factor();
    let total = Kilograms(input.panel_count as f64 * input.panel_weight_kg * factor);

    let (load_per_m2, is_safe) = if input.roof_area_m2 > 0.0 {
        let load = total / SqMeters(input.roof_area_m2);
        (load.value(), load.value() <= input.dead_load_limit_kg_per_m2)
    } else {
        (0.0, total.value() == 0.0)
    };

    let utilization = if input.dead_load_limit_kg_per_m2 > 0.0 {
        load_per_m2 / input.dead_load_limit_kg_per_m2
    } else {
        0.0
    };

    DeadLoadResult {
        applicable: input.roof_type == RoofType::Rcc,
        structural_factor: factor,
        total_load_kg: total.value(),
        load_per_m2,
        limit_kg_per_m2: input.dead_load_limit_kg_per_m2,
        utilization,
        is_safe,
    }
}
