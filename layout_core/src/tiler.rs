//! # Panel Tiler
//!
//! Places panel footprints inside the usable roof polygon.
//!
//! Tilted panels shade the row behind them, so rows are spaced by the panel
//! depth plus the tilt-induced shadow length (never less than
//! [`MIN_ROW_GAP_M`]). Tiling then runs in up to three phases:
//!
//! 1. **Candidate scan** - walk the bounding box (inset by
//!    [`SCAN_MARGIN_M`]) row by row, keeping every slot whose center is inside
//!    the polygon and which clears all obstacles. Empty rows are dropped.
//! 2. **Uniform block** - take the median row length as the target, discard
//!    shorter rows, and lay the survivors out as a rectangular block centered
//!    on the widest row horizontally and on the polygon's mid-z vertically.
//!    Each normalized slot is re-checked and dropped if it no longer fits.
//! 3. **Simple grid** - if the first two phases produce nothing, tile the
//!    raw bounding box with no normalization at all.
//!
//! The result is row-major (rows by ascending z, then ascending x within a
//! row). String partitioning depends on that order.
//!
//! ## Example
//!
//! ```rust
//! use layout_core::geometry::Polygon;
//! use layout_core::panel::{CellType, Orientation, PanelSpec};
//! use layout_core::tiler::{tile_panels, TileRequest};
//!
//! let roof = Polygon::rectangle(10.0, 10.0);
//! let panel = PanelSpec::new(1.0, 1.7, 330.0, 22.0, 20.0, CellType::Monocrystalline);
//!
//! let request = TileRequest::new(&roof, &panel)
//!     .with_orientation(Orientation::Landscape)
//!     .with_tilt_deg(0.0);
//! let layout = tile_panels(&request).unwrap();
//!
//! assert_eq!(layout.row_count(), 7);
//! assert_eq!(layout.panels_per_row(), 5);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, LayoutError, LayoutResult};
use crate::geometry::{Bounds, Point2D, Polygon};
use crate::obstacle::{overlaps_any, Obstacle, DEFAULT_CLEARANCE_MARGIN_M};
use crate::panel::{Orientation, PanelSpec};
use crate::units::{Degrees, Radians};

/// Default spacing between neighbouring panels within a row (m)
pub const DEFAULT_INTER_PANEL_GAP_M: f64 = 0.15;

/// Minimum clear gap between rows regardless of tilt (m)
pub const MIN_ROW_GAP_M: f64 = 0.3;

/// Inset applied to the bounding box before the candidate scan (m)
pub const SCAN_MARGIN_M: f64 = 0.3;

/// Tolerance for the inclusive end of a scan line and for row grouping.
const POSITION_EPSILON: f64 = 1e-9;

/// One placed panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelSlot {
    /// Footprint center
    pub position: Point2D,

    /// Extent along x (m)
    pub footprint_width_m: f64,

    /// Extent along z (m)
    pub footprint_height_m: f64,
}

impl PanelSlot {
    fn new(position: Point2D, grid: &Grid) -> Self {
        PanelSlot {
            position,
            footprint_width_m: grid.panel_w,
            footprint_height_m: grid.panel_d,
        }
    }

    pub fn footprint_area_m2(&self) -> f64 {
        self.footprint_width_m * self.footprint_height_m
    }
}

/// Which phase produced a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TilingStrategy {
    /// No panel fits
    #[default]
    Empty,
    /// Normalized rectangular block (phase 2)
    UniformBlock,
    /// Unnormalized bounding-box grid (phase 3 fallback)
    SimpleGrid,
}

/// Ordered panel placement, row-major.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelLayout {
    pub slots: Vec<PanelSlot>,

    /// Center-to-center row spacing (m)
    pub row_pitch_m: f64,

    /// Center-to-center column spacing (m)
    pub column_pitch_m: f64,

    pub strategy: TilingStrategy,
}

impl PanelLayout {
    fn empty(grid: &Grid) -> Self {
        PanelLayout {
            slots: Vec::new(),
            row_pitch_m: grid.row_pitch,
            column_pitch_m: grid.col_pitch,
            strategy: TilingStrategy::Empty,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Consecutive runs of slots sharing a row.
    pub fn rows(&self) -> Vec<&[PanelSlot]> {
        let mut rows = Vec::new();
        let mut start = 0;
        for i in 1..=self.slots.len() {
            let row_ends = i == self.slots.len()
                || (self.slots[i].position.z - self.slots[start].position.z).abs() > POSITION_EPSILON;
            if row_ends {
                rows.push(&self.slots[start..i]);
                start = i;
            }
        }
        rows
    }

    pub fn row_count(&self) -> usize {
        self.rows().len()
    }

    /// Length of the longest row
    pub fn panels_per_row(&self) -> usize {
        self.rows().iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// Summed physical length of all rows, gaps between panels included (m)
    pub fn total_row_length_m(&self) -> f64 {
        self.rows()
            .iter()
            .map(|row| {
                let width = row[0].footprint_width_m;
                (row.len() - 1) as f64 * self.column_pitch_m + width
            })
            .sum()
    }

    /// Ground area covered by panel footprints (m²)
    pub fn footprint_area_m2(&self) -> f64 {
        self.slots.iter().map(PanelSlot::footprint_area_m2).sum()
    }

    /// Keep at most `target` slots, by prefix.
    pub fn truncated(mut self, target: usize) -> Self {
        self.slots.truncate(target);
        if self.slots.is_empty() {
            self.strategy = TilingStrategy::Empty;
        }
        self
    }
}

/// Everything the tiler reads. Borrowed so a session can tile without cloning
/// its obstacle list.
#[derive(Debug, Clone)]
pub struct TileRequest<'a> {
    /// Usable polygon (safety boundary, or the roof when there is no setback)
    pub polygon: &'a Polygon,
    pub panel: &'a PanelSpec,
    pub orientation: Orientation,
    pub tilt_deg: f64,
    pub inter_panel_gap_m: f64,
    pub obstacles: &'a [Obstacle],
    pub clearance_margin_m: f64,
    /// Optional cap on the number of panels
    pub target_count: Option<usize>,
}

impl<'a> TileRequest<'a> {
    pub fn new(polygon: &'a Polygon, panel: &'a PanelSpec) -> Self {
        TileRequest {
            polygon,
            panel,
            orientation: Orientation::default(),
            tilt_deg: 0.0,
            inter_panel_gap_m: DEFAULT_INTER_PANEL_GAP_M,
            obstacles: &[],
            clearance_margin_m: DEFAULT_CLEARANCE_MARGIN_M,
            target_count: None,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_tilt_deg(mut self, tilt_deg: f64) -> Self {
        self.tilt_deg = tilt_deg;
        self
    }

    pub fn with_gap(mut self, inter_panel_gap_m: f64) -> Self {
        self.inter_panel_gap_m = inter_panel_gap_m;
        self
    }

    pub fn with_obstacles(mut self, obstacles: &'a [Obstacle]) -> Self {
        self.obstacles = obstacles;
        self
    }

    pub fn with_clearance_margin(mut self, clearance_margin_m: f64) -> Self {
        self.clearance_margin_m = clearance_margin_m;
        self
    }

    pub fn with_target_count(mut self, target_count: Option<usize>) -> Self {
        self.target_count = target_count;
        self
    }

    /// Validate the contract inputs. Geometry is never rejected.
    pub fn validate(&self) -> LayoutResult<()> {
        self.panel.validate()?;
        require_non_negative("inter_panel_gap_m", self.inter_panel_gap_m)?;
        require_non_negative("clearance_margin_m", self.clearance_margin_m)?;
        if !(self.tilt_deg >= 0.0 && self.tilt_deg < 90.0) {
            return Err(LayoutError::invalid_input(
                "tilt_deg",
                self.tilt_deg.to_string(),
                "Tilt must be in [0, 90) degrees",
            ));
        }
        Ok(())
    }
}

/// Panel footprint and pitches for one request.
#[derive(Debug, Clone, Copy)]
struct Grid {
    panel_w: f64,
    panel_d: f64,
    col_pitch: f64,
    row_pitch: f64,
}

impl Grid {
    fn for_request(request: &TileRequest) -> Self {
        let (panel_w, panel_d) = request.panel.footprint(request.orientation);
        Grid {
            panel_w,
            panel_d,
            col_pitch: panel_w + request.inter_panel_gap_m,
            row_pitch: row_pitch_m(panel_d, request.tilt_deg),
        }
    }
}

/// Row pitch for a panel of `depth_m` at `tilt_deg`: depth plus the shadow
/// it casts, with at least [`MIN_ROW_GAP_M`] between rows.
pub fn row_pitch_m(depth_m: f64, tilt_deg: f64) -> f64 {
    let tilt: Radians = Degrees(tilt_deg).into();
    depth_m + (depth_m * tilt.0.tan()).max(MIN_ROW_GAP_M)
}

/// A phase 1 row: its z and the accepted x positions, ascending.
#[derive(Debug)]
struct ScanRow {
    z: f64,
    xs: Vec<f64>,
}

/// Positions `start, start + pitch, ...` up to and including `end`.
///
/// Computed from the integer step so long scans do not accumulate error.
fn scan_line(start: f64, end: f64, pitch: f64) -> impl Iterator<Item = f64> {
    (0u32..)
        .map(move |i| start + i as f64 * pitch)
        .take_while(move |&v| v <= end + POSITION_EPSILON)
}

/// Tile `request.polygon` with panels.
///
/// Returns `Err` only for contract violations (see [`TileRequest::validate`]).
/// An unusable polygon (fewer than three vertices, zero area) gives an empty
/// layout.
pub fn tile_panels(request: &TileRequest) -> LayoutResult<PanelLayout> {
    request.validate()?;
    let grid = Grid::for_request(request);

    let bounds = match request.polygon.bounds() {
        Some(b) if request.polygon.is_usable() => b,
        _ => {
            tracing::debug!("usable polygon is degenerate, no panels placed");
            return Ok(PanelLayout::empty(&grid));
        }
    };

    let rows = scan_candidates(request, &bounds, &grid);
    tracing::debug!(
        rows = rows.len(),
        candidates = rows.iter().map(|r| r.xs.len()).sum::<usize>(),
        "candidate scan finished"
    );

    let block = if rows.is_empty() {
        Vec::new()
    } else {
        normalize_block(request, &rows, &bounds, &grid)
    };

    let layout = if block.is_empty() {
        let slots = simple_grid(request, &bounds, &grid);
        tracing::debug!(panels = slots.len(), "falling back to simple grid");
        PanelLayout {
            strategy: if slots.is_empty() {
                TilingStrategy::Empty
            } else {
                TilingStrategy::SimpleGrid
            },
            slots,
            row_pitch_m: grid.row_pitch,
            column_pitch_m: grid.col_pitch,
        }
    } else {
        PanelLayout {
            slots: block,
            row_pitch_m: grid.row_pitch,
            column_pitch_m: grid.col_pitch,
            strategy: TilingStrategy::UniformBlock,
        }
    };

    Ok(match request.target_count {
        Some(target) => layout.truncated(target),
        None => layout,
    })
}

/// A slot is usable when its center is inside the polygon and its footprint
/// clears every obstacle.
fn slot_fits(request: &TileRequest, grid: &Grid, center: Point2D) -> bool {
    request.polygon.contains(center)
        && !overlaps_any(
            center,
            grid.panel_w,
            grid.panel_d,
            request.obstacles,
            request.clearance_margin_m,
        )
}

/// Phase 1: scan the inset bounding box; rows with no accepted slot are dropped.
fn scan_candidates(request: &TileRequest, bounds: &Bounds, grid: &Grid) -> Vec<ScanRow> {
    let half_w = grid.panel_w / 2.0;
    let half_d = grid.panel_d / 2.0;

    let z_start = bounds.min_z + half_d + SCAN_MARGIN_M;
    let z_end = bounds.max_z - half_d - SCAN_MARGIN_M;
    let x_start = bounds.min_x + half_w + SCAN_MARGIN_M;
    let x_end = bounds.max_x - half_w - SCAN_MARGIN_M;

    scan_line(z_start, z_end, grid.row_pitch)
        .filter_map(|z| {
            let xs: Vec<f64> = scan_line(x_start, x_end, grid.col_pitch)
                .filter(|&x| slot_fits(request, grid, Point2D::new(x, z)))
                .collect();
            (!xs.is_empty()).then_some(ScanRow { z, xs })
        })
        .collect()
}

/// Upper median of the row lengths (`sorted[len / 2]`).
fn median_row_length(rows: &[ScanRow]) -> usize {
    let mut counts: Vec<usize> = rows.iter().map(|r| r.xs.len()).collect();
    counts.sort_unstable();
    counts[counts.len() / 2]
}

/// Phase 2: rebuild the surviving rows as a centered rectangular block.
fn normalize_block(request: &TileRequest, rows: &[ScanRow], bounds: &Bounds, grid: &Grid) -> Vec<PanelSlot> {
    let per_row = median_row_length(rows);
    let survivors: Vec<&ScanRow> = rows.iter().filter(|r| r.xs.len() >= per_row).collect();

    // First row with the largest raw count wins ties
    let Some(reference) = survivors
        .iter()
        .copied()
        .reduce(|best, row| if row.xs.len() > best.xs.len() { row } else { best })
    else {
        return Vec::new();
    };

    let first_x = reference.xs[0];
    let last_x = reference.xs[reference.xs.len() - 1];
    let center_x = (first_x + last_x) / 2.0;
    let row_span = (survivors.len() - 1) as f64;
    let col_span = (per_row - 1) as f64;

    tracing::debug!(
        per_row,
        surviving_rows = survivors.len(),
        reference_z = reference.z,
        "normalizing uniform block"
    );

    let mut slots = Vec::with_capacity(survivors.len() * per_row);
    for i in 0..survivors.len() {
        let z = bounds.mid_z() + (i as f64 - row_span / 2.0) * grid.row_pitch;
        for j in 0..per_row {
            let x = center_x + (j as f64 - col_span / 2.0) * grid.col_pitch;
            let center = Point2D::new(x, z);
            if slot_fits(request, grid, center) {
                slots.push(PanelSlot::new(center, grid));
            }
        }
    }
    slots
}

/// Phase 3: plain grid over the raw bounding box, no normalization.
fn simple_grid(request: &TileRequest, bounds: &Bounds, grid: &Grid) -> Vec<PanelSlot> {
    let half_w = grid.panel_w / 2.0;
    let half_d = grid.panel_d / 2.0;

    let mut slots = Vec::new();
    for z in scan_line(bounds.min_z + half_d, bounds.max_z - half_d, grid.row_pitch) {
        for x in scan_line(bounds.min_x + half_w, bounds.max_x - half_w, grid.col_pitch) {
            let center = Point2D::new(x, z);
            if slot_fits(request, grid, center) {
                slots.push(PanelSlot::new(center, grid));
            }
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacle::footprint_overlaps;
    use crate::panel::CellType;

    fn panel() -> PanelSpec {
        PanelSpec::new(1.0, 1.7, 330.0, 22.0, 20.0, CellType::Monocrystalline)
    }

    fn square() -> Polygon {
        Polygon::rectangle(10.0, 10.0)
    }

    #[test]
    fn test_row_pitch() {
        // Flat panels use the minimum gap
        assert!((row_pitch_m(1.0, 0.0) - 1.3).abs() < 1e-12);
        // 45 degrees: shadow equals depth
        assert!((row_pitch_m(1.0, 45.0) - 2.0).abs() < 1e-9);
        // Shallow tilt whose shadow is below the minimum
        assert!((row_pitch_m(1.0, 10.0) - 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_square_roof_block() {
        let roof = square();
        let p = panel();
        let layout = tile_panels(&TileRequest::new(&roof, &p)).unwrap();

        assert_eq!(layout.strategy, TilingStrategy::UniformBlock);
        assert_eq!(layout.row_count(), 7);
        assert_eq!(layout.panels_per_row(), 5);
        assert_eq!(layout.len(), 35);

        // Block is centered on mid-z with 1.3 m pitch
        let first = layout.slots[0].position;
        assert!((first.z - 1.1).abs() < 1e-9);
        assert!((first.x - 1.15).abs() < 1e-9);
        for slot in &layout.slots {
            assert!(slot.position.x > 0.0 && slot.position.x < 10.0);
            assert!(slot.position.z > 0.0 && slot.position.z < 10.0);
            assert_eq!(slot.footprint_width_m, 1.7);
            assert_eq!(slot.footprint_height_m, 1.0);
        }
    }

    #[test]
    fn test_row_major_order() {
        let roof = square();
        let p = panel();
        let layout = tile_panels(&TileRequest::new(&roof, &p)).unwrap();
        for pair in layout.slots.windows(2) {
            let (a, b) = (pair[0].position, pair[1].position);
            assert!(a.z < b.z || (a.z == b.z && a.x < b.x));
        }
    }

    #[test]
    fn test_portrait_changes_grid() {
        let roof = square();
        let p = panel();
        let layout = tile_panels(&TileRequest::new(&roof, &p).with_orientation(Orientation::Portrait)).unwrap();
        // 2.0 m row pitch gives 4 rows; 1.15 m column pitch gives 8 columns
        assert_eq!(layout.row_count(), 4);
        assert_eq!(layout.panels_per_row(), 8);
        assert_eq!(layout.slots[0].footprint_height_m, 1.7);
    }

    #[test]
    fn test_obstacle_reduces_count_and_is_cleared() {
        let roof = square();
        let p = panel();
        let obstacles = vec![Obstacle::new("Tank", Point2D::new(5.0, 5.0), 2.0, 2.0, 1.5)];

        let free = tile_panels(&TileRequest::new(&roof, &p)).unwrap();
        let blocked = tile_panels(&TileRequest::new(&roof, &p).with_obstacles(&obstacles)).unwrap();

        assert!(blocked.len() < free.len());
        assert!(!blocked.is_empty());
        for slot in &blocked.slots {
            assert!(!footprint_overlaps(
                slot.position,
                slot.footprint_width_m,
                slot.footprint_height_m,
                &obstacles[0],
                DEFAULT_CLEARANCE_MARGIN_M
            ));
        }
    }

    fn row_positions(layout: &PanelLayout) -> Vec<(f64, Vec<f64>)> {
        layout
            .rows()
            .iter()
            .map(|row| (row[0].position.z, row.iter().map(|s| s.position.x).collect()))
            .collect()
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{:?} vs {:?}", actual, expected);
        }
    }

    #[test]
    fn test_irregular_polygon_drops_short_rows() {
        // Trapezoid: scan rows hold 6, 6, 5, 4, 4 candidates
        let roof = Polygon::from_pairs(&[(0.0, 0.0), (12.0, 0.0), (9.0, 8.0), (3.0, 8.0)]);
        let p = panel();
        let layout = tile_panels(&TileRequest::new(&roof, &p)).unwrap();

        // Upper median is 5, so the two 4-wide rows go and the 5-wide row is kept
        assert_eq!(layout.strategy, TilingStrategy::UniformBlock);
        assert_eq!(layout.row_count(), 3);
        assert_eq!(layout.len(), 15);

        // Rows re-centered on mid-z = 4.0 at 1.3 m pitch
        let rows = row_positions(&layout);
        let zs: Vec<f64> = rows.iter().map(|(z, _)| *z).collect();
        assert_close(&zs, &[2.7, 4.0, 5.3]);

        // Columns centered on the first 6-wide row: (1.15 + 10.4) / 2 = 5.775
        for (_, xs) in &rows {
            assert_close(xs, &[2.075, 3.925, 5.775, 7.625, 9.475]);
        }
    }

    #[test]
    fn test_tied_widest_rows_center_on_first() {
        // Lower band spans x 0..10, upper band x 3.5..13.5. Both scan to 5
        // slots per row but with centers 4.85 and 8.55.
        let roof = Polygon::from_pairs(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 4.5),
            (13.5, 4.5),
            (13.5, 8.0),
            (3.5, 8.0),
            (3.5, 4.5),
            (0.0, 4.5),
        ]);
        let p = panel();
        let layout = tile_panels(&TileRequest::new(&roof, &p)).unwrap();
        assert_eq!(layout.strategy, TilingStrategy::UniformBlock);

        let rows = row_positions(&layout);
        let zs: Vec<f64> = rows.iter().map(|(z, _)| *z).collect();
        assert_close(&zs, &[1.4, 2.7, 4.0, 5.3, 6.6]);

        // Block follows the lower band; the upper rows keep only the
        // columns that are still inside the roof
        let lower = [1.15, 3.0, 4.85, 6.7, 8.55];
        for (_, xs) in &rows[..3] {
            assert_close(xs, &lower);
        }
        for (_, xs) in &rows[3..] {
            assert_close(xs, &lower[2..]);
        }
        assert_eq!(layout.len(), 21);
    }

    #[test]
    fn test_fallback_grid_for_tiny_roof() {
        // Too small for the inset scan, but one panel fits in the raw box
        let roof = Polygon::rectangle(2.0, 1.2);
        let p = panel();
        let layout = tile_panels(&TileRequest::new(&roof, &p)).unwrap();
        assert_eq!(layout.strategy, TilingStrategy::SimpleGrid);
        assert_eq!(layout.len(), 1);
        assert!((layout.slots[0].position.x - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_nothing_fits() {
        let roof = Polygon::rectangle(1.0, 1.0);
        let p = panel();
        let layout = tile_panels(&TileRequest::new(&roof, &p)).unwrap();
        assert!(layout.is_empty());
        assert_eq!(layout.strategy, TilingStrategy::Empty);
        assert_eq!(layout.row_count(), 0);
        assert_eq!(layout.panels_per_row(), 0);
        assert_eq!(layout.total_row_length_m(), 0.0);
    }

    #[test]
    fn test_degenerate_polygons() {
        let p = panel();
        for roof in [
            Polygon::empty(),
            Polygon::from_pairs(&[(0.0, 0.0), (10.0, 10.0)]),
            Polygon::from_pairs(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]),
        ] {
            let layout = tile_panels(&TileRequest::new(&roof, &p)).unwrap();
            assert!(layout.is_empty());
        }
    }

    #[test]
    fn test_target_truncation() {
        let roof = square();
        let p = panel();
        let full = tile_panels(&TileRequest::new(&roof, &p)).unwrap();
        for target in [0, 1, 12, 35, 100] {
            let capped = tile_panels(&TileRequest::new(&roof, &p).with_target_count(Some(target))).unwrap();
            assert_eq!(capped.len(), full.len().min(target));
            assert_eq!(capped.slots[..], full.slots[..capped.len()]);
        }
    }

    #[test]
    fn test_deterministic() {
        let roof = Polygon::from_pairs(&[(0.0, 0.0), (14.0, 1.0), (13.0, 9.0), (2.0, 11.0)]);
        let p = panel();
        let obstacles = vec![
            Obstacle::new("Vent", Point2D::new(4.0, 4.0), 0.4, 0.4, 0.6),
            Obstacle::new("Tank", Point2D::new(10.0, 6.0), 1.5, 1.5, 1.2),
        ];
        let request = TileRequest::new(&roof, &p).with_tilt_deg(15.0).with_obstacles(&obstacles);
        let a = tile_panels(&request).unwrap();
        let b = tile_panels(&request).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_contract_violations() {
        let roof = square();
        let mut bad = panel();
        bad.length_m = -1.7;
        assert!(tile_panels(&TileRequest::new(&roof, &bad)).is_err());

        let p = panel();
        assert!(tile_panels(&TileRequest::new(&roof, &p).with_tilt_deg(90.0)).is_err());
        assert!(tile_panels(&TileRequest::new(&roof, &p).with_gap(-0.1)).is_err());
    }

    #[test]
    fn test_row_length_and_area() {
        let roof = square();
        let p = panel();
        let layout = tile_panels(&TileRequest::new(&roof, &p)).unwrap();
        // 7 rows of 5 panels: 4 pitches of 1.85 plus one panel width
        assert!((layout.total_row_length_m() - 7.0 * (4.0 * 1.85 + 1.7)).abs() < 1e-9);
        assert!((layout.footprint_area_m2() - 35.0 * 1.7).abs() < 1e-9);
    }
}
