//! # layout_core - Rooftop Solar Layout & Compliance Engine
//!
//! `layout_core` takes a roof outline, a panel datasheet, tilt, obstacles and
//! setback rules, and produces a physically valid panel arrangement, its
//! partition into electrical strings, and the structural, electrical and
//! regulatory figures that go with it. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every operation is a pure function of its inputs
//! - **Full recompute**: any input change means a fresh [`design::Design`]
//! - **Graceful degradation**: degenerate geometry gives empty results, not errors
//! - **Rich Errors**: contract violations are structured [`LayoutError`]s
//!
//! ## Quick Start
//!
//! ```rust
//! use layout_core::geometry::{Point2D, Polygon};
//! use layout_core::session::DesignSession;
//!
//! let mut session = DesignSession::new("Jane Designer", "25-001", "Acme Warehousing");
//! session.input.roof = Polygon::rectangle(24.0, 15.0);
//! session.input.target_capacity_kw = Some(20.0);
//! session.add_obstacle("Stair head", Point2D::new(3.0, 12.0), 3.0, 2.5, 2.4);
//!
//! let design = session.compute().unwrap();
//! // 20 kW of 540 Wp modules
//! assert_eq!(design.stats.target_panel_count, 38);
//! assert!(design.stats.panel_count <= 38);
//!
//! let json = serde_json::to_string_pretty(&design.stats).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - Polygon area, containment, inward offset, safety boundary
//! - [`obstacle`] - Obstacle footprints and clearance tests
//! - [`panel`] - Panel datasheet and orientation
//! - [`tiler`] - Row-pitched panel placement
//! - [`strings`] - String partitioning and string sizing
//! - [`rules`] - Structural, hardware, earthing and compliance evaluators
//! - [`yield_model`] - Energy and financial estimate
//! - [`design`] - The full design pass and its snapshot
//! - [`session`] - Session container with obstacle lifecycle
//! - [`file_io`] - Session files with atomic saves
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod design;
pub mod errors;
pub mod file_io;
pub mod geometry;
pub mod obstacle;
pub mod panel;
pub mod rules;
pub mod session;
pub mod strings;
pub mod tiler;
pub mod units;
pub mod yield_model;

// Re-export commonly used types at crate root for convenience
pub use design::{compute_design, Design, DesignInput, DesignStats};
pub use errors::{LayoutError, LayoutResult};
pub use file_io::{load_session, save_session};
pub use geometry::{Point2D, Polygon};
pub use obstacle::Obstacle;
pub use panel::{CellType, Orientation, PanelSpec};
pub use session::{DesignSession, SessionMetadata};
pub use strings::{partition_into_strings, StringZone};
pub use tiler::{tile_panels, PanelLayout, PanelSlot, TileRequest};
