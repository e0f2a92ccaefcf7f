//! # Obstacle Model
//!
//! Rooftop obstructions (water tanks, stair heads, vents, parapets) modelled as
//! axis-aligned boxes. The tiler only needs one question answered: does a
//! candidate panel footprint come within the clearance margin of any of them?
//!
//! ## Example
//!
//! ```rust
//! use layout_core::geometry::Point2D;
//! use layout_core::obstacle::{footprint_overlaps, Obstacle, DEFAULT_CLEARANCE_MARGIN_M};
//!
//! let tank = Obstacle::new("Water tank", Point2D::new(5.0, 5.0), 2.0, 2.0, 1.5);
//!
//! // A 1.7 x 1.0 panel right next to the tank is rejected...
//! assert!(footprint_overlaps(Point2D::new(5.0, 6.9), 1.7, 1.0, &tank, DEFAULT_CLEARANCE_MARGIN_M));
//! // ...but one well clear of the margin is fine.
//! assert!(!footprint_overlaps(Point2D::new(5.0, 8.5), 1.7, 1.0, &tank, DEFAULT_CLEARANCE_MARGIN_M));
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Point2D;

/// Clearance kept around every obstacle footprint, on each side.
pub const DEFAULT_CLEARANCE_MARGIN_M: f64 = 0.5;

/// An obstruction on the roof.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "6f1c0b8e-4d4b-4b8e-9a53-3f0f4f8d2a11",
///   "label": "Water tank",
///   "center": { "x": 5.0, "z": 5.0 },
///   "elevation_m": 0.0,
///   "footprint_length_m": 2.0,
///   "footprint_width_m": 2.0,
///   "footprint_height_m": 1.5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Stable identity for move/delete operations
    pub id: Uuid,

    /// User label (e.g., "Water tank", "Stair head")
    pub label: String,

    /// Footprint center on the ground plane
    pub center: Point2D,

    /// Height of the obstacle base above the roof surface (m)
    #[serde(default)]
    pub elevation_m: f64,

    /// Extent along x (m)
    pub footprint_length_m: f64,

    /// Extent along z (m)
    pub footprint_width_m: f64,

    /// Vertical extent (m); carried for downstream shading/rendering
    pub footprint_height_m: f64,
}

impl Obstacle {
    /// Create an obstacle with a fresh id.
    pub fn new(
        label: impl Into<String>,
        center: Point2D,
        footprint_length_m: f64,
        footprint_width_m: f64,
        footprint_height_m: f64,
    ) -> Self {
        Obstacle {
            id: Uuid::new_v4(),
            label: label.into(),
            center,
            elevation_m: 0.0,
            footprint_length_m,
            footprint_width_m,
            footprint_height_m,
        }
    }

    /// Footprint area on the roof (m²)
    pub fn footprint_area_m2(&self) -> f64 {
        self.footprint_length_m.max(0.0) * self.footprint_width_m.max(0.0)
    }
}

/// Axis-aligned overlap between a candidate panel footprint and an obstacle
/// footprint inflated by `clearance_margin` on every side.
///
/// The candidate is `candidate_w` along x and `candidate_h` along z, centered
/// on `candidate_center`, and is not inflated. Rectangles that merely touch do
/// not overlap.
pub fn footprint_overlaps(
    candidate_center: Point2D,
    candidate_w: f64,
    candidate_h: f64,
    obstacle: &Obstacle,
    clearance_margin: f64,
) -> bool {
    let reach_x = candidate_w / 2.0 + obstacle.footprint_length_m / 2.0 + clearance_margin;
    let reach_z = candidate_h / 2.0 + obstacle.footprint_width_m / 2.0 + clearance_margin;

    (candidate_center.x - obstacle.center.x).abs() < reach_x
        && (candidate_center.z - obstacle.center.z).abs() < reach_z
}

/// True if the candidate footprint overlaps any obstacle in the list.
pub fn overlaps_any(
    candidate_center: Point2D,
    candidate_w: f64,
    candidate_h: f64,
    obstacles: &[Obstacle],
    clearance_margin: f64,
) -> bool {
    obstacles
        .iter()
        .any(|o| footprint_overlaps(candidate_center, candidate_w, candidate_h, o, clearance_margin))
}
