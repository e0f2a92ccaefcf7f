//! # Design Session
//!
//! `DesignSession` holds the input snapshot for one roof design and the
//! metadata that travels with it. Sessions serialize to `.sld` files as
//! human-readable JSON (see [`crate::file_io`]).
//!
//! ## Structure
//!
//! ```text
//! DesignSession
//! ├── meta: SessionMetadata (version, designer, job info, timestamps)
//! └── input: DesignInput (roof, panel, obstacles, configuration)
//! ```
//!
//! Obstacles live in an ordered list rather than an id-keyed map: the tiler
//! walks them in creation order, and that order has to survive a save/load.
//!
//! ## Example
//!
//! ```rust
//! use layout_core::geometry::{Point2D, Polygon};
//! use layout_core::session::DesignSession;
//!
//! let mut session = DesignSession::new("Jane Designer", "25-042", "ACME Corp");
//! session.input.roof = Polygon::rectangle(12.0, 8.0);
//!
//! let tank = session.add_obstacle("Water tank", Point2D::new(6.0, 4.0), 2.0, 2.0, 1.8);
//! assert!(session.move_obstacle(tank, Point2D::new(3.0, 4.0)));
//!
//! let design = session.compute().unwrap();
//! println!("{} panels", design.stats.panel_count);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::design::{compute_design, Design, DesignInput};
use crate::errors::LayoutResult;
use crate::geometry::Point2D;
use crate::obstacle::Obstacle;

/// Current schema version for .sld files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root session container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSession {
    pub meta: SessionMetadata,
    pub input: DesignInput,
}

impl DesignSession {
    /// Create a new session with default inputs and an empty roof.
    pub fn new(designer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        DesignSession {
            meta: SessionMetadata {
                version: SCHEMA_VERSION.to_string(),
                designer: designer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            input: DesignInput::default(),
        }
    }

    /// Place a new obstacle and return its id.
    pub fn add_obstacle(
        &mut self,
        label: impl Into<String>,
        center: Point2D,
        footprint_length_m: f64,
        footprint_width_m: f64,
        footprint_height_m: f64,
    ) -> Uuid {
        let obstacle = Obstacle::new(label, center, footprint_length_m, footprint_width_m, footprint_height_m);
        let id = obstacle.id;
        self.input.obstacles.push(obstacle);
        self.touch();
        id
    }

    /// Move an obstacle in place. Size, label and list position are kept.
    ///
    /// Returns `false` if no obstacle has this id.
    pub fn move_obstacle(&mut self, id: Uuid, center: Point2D) -> bool {
        match self.input.obstacles.iter_mut().find(|o| o.id == id) {
            Some(obstacle) => {
                obstacle.center = center;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Remove an obstacle by id, keeping the order of the rest.
    pub fn remove_obstacle(&mut self, id: Uuid) -> Option<Obstacle> {
        let index = self.input.obstacles.iter().position(|o| o.id == id)?;
        let removed = self.input.obstacles.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn obstacle(&self, id: Uuid) -> Option<&Obstacle> {
        self.input.obstacles.iter().find(|o| o.id == id)
    }

    pub fn obstacle_count(&self) -> usize {
        self.input.obstacles.len()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Recompute the design from the current inputs.
    pub fn compute(&self) -> LayoutResult<Design> {
        compute_design(&self.input)
    }
}

impl Default for DesignSession {
    fn default() -> Self {
        DesignSession::new("", "", "")
    }
}

/// Session metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Person responsible for the layout
    pub designer: String,

    pub job_id: String,
    pub client: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}
