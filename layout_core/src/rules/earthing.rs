//! # Earthing & Lightning Protection
//!
//! Sizes the earthing system and decides whether the building needs a
//! lightning arrestor. Conductor and arrestor selection is a step function
//! over plant capacity; capacities beyond the table use the top bracket.
//!
//! ## Example
//!
//! ```rust
//! use layout_core::rules::earthing::{evaluate, EarthingInput};
//!
//! let result = evaluate(&EarthingInput {
//!     capacity_kw: 25.0,
//!     building_height_m: 12.0,
//!     roof_area_m2: 180.0,
//! });
//!
//! // max(2, 3) + 1 + 1
//! assert_eq!(result.earth_pit_count, 5);
//! assert_eq!(result.target_resistance_ohm, 2.0);
//! assert!(result.lightning_arrestor_required);
//! ```

use serde::{Deserialize, Serialize};

/// Buildings taller than this need an extra pair of pits instead of one (m)
const TALL_BUILDING_HEIGHT_M: f64 = 15.0;

/// Arrestor thresholds
const ARRESTOR_HEIGHT_M: f64 = 10.0;
const ARRESTOR_ROOF_AREA_M2: f64 = 200.0;

/// Maximum spacing between down conductors along the perimeter (m)
const DOWN_CONDUCTOR_SPACING_M: f64 = 20.0;

/// Conductor and arrestor selection for one capacity bracket.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ProtectionBracket {
    max_capacity_kw: f64,
    earthing_conductor: &'static str,
    dc_earth_cable_mm2: f64,
    arrestor_type: &'static str,
}

/// Ordered by capacity; the last row also covers everything above it.
static PROTECTION_BRACKETS: [ProtectionBracket; 4] = [
    ProtectionBracket {
        max_capacity_kw: 10.0,
        earthing_conductor: "GI strip 25x3 mm",
        dc_earth_cable_mm2: 6.0,
        arrestor_type: "Conventional air terminal",
    },
    ProtectionBracket {
        max_capacity_kw: 50.0,
        earthing_conductor: "GI strip 32x6 mm",
        dc_earth_cable_mm2: 10.0,
        arrestor_type: "Conventional air terminal",
    },
    ProtectionBracket {
        max_capacity_kw: 100.0,
        earthing_conductor: "Cu strip 25x3 mm",
        dc_earth_cable_mm2: 16.0,
        arrestor_type: "ESE arrestor, 60 m radius",
    },
    ProtectionBracket {
        max_capacity_kw: 500.0,
        earthing_conductor: "Cu strip 50x6 mm",
        dc_earth_cable_mm2: 25.0,
        arrestor_type: "ESE arrestor, 107 m radius",
    },
];

fn bracket_for(capacity_kw: f64) -> &'static ProtectionBracket {
    PROTECTION_BRACKETS
        .iter()
        .find(|b| capacity_kw <= b.max_capacity_kw)
        .unwrap_or(&PROTECTION_BRACKETS[PROTECTION_BRACKETS.len() - 1])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthingInput {
    pub capacity_kw: f64,
    pub building_height_m: f64,
    pub roof_area_m2: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EarthingResult {
    pub earth_pit_count: usize,
    pub target_resistance_ohm: f64,
    pub lightning_arrestor_required: bool,
    pub down_conductor_count: usize,
    /// `4 * sqrt(area)`, the perimeter of a square of the same area (m)
    pub estimated_perimeter_m: f64,
    pub earthing_conductor: String,
    pub dc_earth_cable_mm2: f64,
    pub arrestor_type: String,
}

/// Earth resistance target for a plant size (Ω).
pub fn target_resistance_ohm(capacity_kw: f64) -> f64 {
    if capacity_kw > 50.0 {
        1.0
    } else if capacity_kw > 10.0 {
        2.0
    } else {
        5.0
    }
}

/// Evaluate earthing and lightning protection.
pub fn evaluate(input: &EarthingInput) -> EarthingResult {
    let capacity = input.capacity_kw.max(0.0);
    let area = input.roof_area_m2.max(0.0);

    let array_pits = ((capacity / 10.0).ceil() as usize).max(2);
    let building_pits = if input.building_height_m > TALL_BUILDING_HEIGHT_M { 2 } else { 1 };
    // One more pit for the inverter / AC side
    let earth_pit_count = array_pits + building_pits + 1;

    let estimated_perimeter_m = 4.0 * area.sqrt();
    let down_conductor_count = ((estimated_perimeter_m / DOWN_CONDUCTOR_SPACING_M).ceil() as usize).max(2);

    let bracket = bracket_for(capacity);

    EarthingResult {
        earth_pit_count,
        target_resistance_ohm: target_resistance_ohm(capacity),
        lightning_arrestor_required: input.building_height_m > ARRESTOR_HEIGHT_M || area > ARRESTOR_ROOF_AREA_M2,
        down_conductor_count,
        estimated_perimeter_m,
        earthing_conductor: bracket.earthing_conductor.to_string(),
        dc_earth_cable_mm2: bracket.dc_earth_cable_mm2,
        arrestor_type: bracket.arrestor_type.to_string(),
    }
}
