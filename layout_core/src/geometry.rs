//! # Geometry Kernel
//!
//! Planar polygon primitives on the local roof frame. Coordinates are meters
//! on the `x`/`z` ground plane (the `y` axis is vertical and never appears
//! here).
//!
//! Every function tolerates degenerate input: polygons with fewer than three
//! vertices have zero area, contain no points, and shrink to themselves.
//! Nothing here loops on bad input or returns an error.
//!
//! ## Example
//!
//! ```rust
//! use layout_core::geometry::{Point2D, Polygon};
//!
//! let roof = Polygon::rectangle(10.0, 10.0);
//! assert_eq!(roof.area_m2(), 100.0);
//! assert!(roof.contains(Point2D::new(5.0, 5.0)));
//!
//! let usable = roof.safety_boundary(1.0);
//! assert!((usable.area_m2() - 64.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

/// Below this magnitude a direction or an area is treated as zero.
const EPSILON: f64 = 1e-9;

/// Smallest half-angle cosine used when offsetting a vertex. Very sharp
/// spikes would otherwise push the vertex arbitrarily far.
const MIN_HALF_ANGLE_COS: f64 = 0.1;

/// A point on the local ground plane, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub z: f64,
}

impl Point2D {
    #[inline]
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point2D) -> f64 {
        edge_length(*self, other)
    }
}

/// A closed polygon given by its vertices in order; the closing edge from the
/// last vertex back to the first is implicit.
///
/// Convexity is not required. Self-intersecting outlines are the caller's
/// responsibility; the kernel will still produce *some* answer for them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    pub vertices: Vec<Point2D>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point2D>) -> Self {
        Self { vertices }
    }

    /// The empty polygon (no usable area).
    pub fn empty() -> Self {
        Self { vertices: Vec::new() }
    }

    /// Axis-aligned rectangle with one corner at the origin.
    pub fn rectangle(width_m: f64, depth_m: f64) -> Self {
        Self::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(width_m, 0.0),
            Point2D::new(width_m, depth_m),
            Point2D::new(0.0, depth_m),
        ])
    }

    /// Build from `(x, z)` pairs.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        Self::new(pairs.iter().map(|&(x, z)| Point2D::new(x, z)).collect())
    }

    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// True when the polygon encloses a usable, non-zero area.
    pub fn is_usable(&self) -> bool {
        self.vertices.len() >= 3 && self.area_m2() > EPSILON
    }

    pub fn area_m2(&self) -> f64 {
        polygon_area_m2(&self.vertices)
    }

    pub fn perimeter_m(&self) -> f64 {
        perimeter_m(&self.vertices)
    }

    pub fn contains(&self, point: Point2D) -> bool {
        point_in_polygon(point, &self.vertices)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(&self.vertices)
    }

    pub fn centroid(&self) -> Option<Point2D> {
        centroid(&self.vertices)
    }

    pub fn shrink(&self, distance: f64) -> Polygon {
        shrink_polygon(&self.vertices, distance)
    }

    pub fn safety_boundary(&self, setback_m: f64) -> Polygon {
        safety_boundary(&self.vertices, setback_m)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Bounds {
    /// Bounding box of a vertex list, `None` when it is empty.
    pub fn of(points: &[Point2D]) -> Option<Bounds> {
        let first = points.first()?;
        let mut bounds = Bounds {
            min_x: first.x,
            max_x: first.x,
            min_z: first.z,
            max_z: first.z,
        };
        for p in &points[1..] {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.min_z = bounds.min_z.min(p.z);
            bounds.max_z = bounds.max_z.max(p.z);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn depth(&self) -> f64 {
        self.max_z - self.min_z
    }

    pub fn mid_x(&self) -> f64 {
        (self.min_x + self.max_x) / 2.0
    }

    pub fn mid_z(&self) -> f64 {
        (self.min_z + self.max_z) / 2.0
    }
}

/// Planar Euclidean distance between two points.
#[inline]
pub fn edge_length(a: Point2D, b: Point2D) -> f64 {
    (b.x - a.x).hypot(b.z - a.z)
}

/// Sum of all edge lengths including the closing edge. Zero below two vertices.
pub fn perimeter_m(polygon: &[Point2D]) -> f64 {
    let n = polygon.len();
    if n < 2 {
        return 0.0;
    }
    (0..n).map(|i| edge_length(polygon[i], polygon[(i + 1) % n])).sum()
}

/// Shoelace area with sign: positive for counter-clockwise winding.
pub fn signed_area_m2(polygon: &[Point2D]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        twice_area += a.x * b.z - b.x * a.z;
    }
    twice_area / 2.0
}

/// Enclosed area in m², always ≥ 0. Zero for fewer than three vertices.
pub fn polygon_area_m2(polygon: &[Point2D]) -> f64 {
    signed_area_m2(polygon).abs()
}

/// Even-odd point-in-polygon test.
///
/// Casts a ray towards +x and counts edge crossings; odd means inside. Points
/// exactly on an edge follow the half-open crossing convention, so results are
/// consistent but not guaranteed inclusive.
pub fn point_in_polygon(point: Point2D, polygon: &[Point2D]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, zi) = (polygon[i].x, polygon[i].z);
        let (xj, zj) = (polygon[j].x, polygon[j].z);

        if ((zi > point.z) != (zj > point.z)) && (point.x < (xj - xi) * (point.z - zi) / (zj - zi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Area-weighted centroid. Falls back to the vertex mean for zero-area input
/// and returns `None` only for an empty vertex list.
pub fn centroid(polygon: &[Point2D]) -> Option<Point2D> {
    if polygon.is_empty() {
        return None;
    }
    let area = signed_area_m2(polygon);
    if area.abs() < EPSILON {
        let n = polygon.len() as f64;
        let (sx, sz) = polygon.iter().fold((0.0, 0.0), |(sx, sz), p| (sx + p.x, sz + p.z));
        return Some(Point2D::new(sx / n, sz / n));
    }

    let n = polygon.len();
    let (mut cx, mut cz) = (0.0, 0.0);
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let cross = a.x * b.z - b.x * a.z;
        cx += (a.x + b.x) * cross;
        cz += (a.z + b.z) * cross;
    }
    Some(Point2D::new(cx / (6.0 * area), cz / (6.0 * area)))
}

/// Unit normal of edge `a -> b` pointing into the polygon, `None` for a
/// zero-length edge. `winding` is +1 for counter-clockwise, -1 for clockwise.
fn inward_normal(a: Point2D, b: Point2D, winding: f64) -> Option<(f64, f64)> {
    let (dx, dz) = (b.x - a.x, b.z - a.z);
    let len = dx.hypot(dz);
    if len < EPSILON {
        return None;
    }
    Some((-dz / len * winding, dx / len * winding))
}

/// Inward offset by moving each vertex along its angle bisector.
///
/// Each vertex travels `distance / cos(half-angle)` so that both adjacent
/// edges end up `distance` inside their original lines. This is a simple
/// per-vertex offset, not a straight skeleton: with offsets beyond half the
/// local width, or on strongly concave outlines, the result can invert or
/// self-intersect. Callers only use it for area and containment.
///
/// `distance <= 0` and polygons with fewer than three vertices are returned
/// unchanged.
pub fn shrink_polygon(polygon: &[Point2D], distance: f64) -> Polygon {
    let n = polygon.len();
    if n < 3 || !(distance > 0.0) {
        return Polygon::new(polygon.to_vec());
    }

    let winding = if signed_area_m2(polygon) >= 0.0 { 1.0 } else { -1.0 };
    let mut shrunk = Vec::with_capacity(n);

    for i in 0..n {
        let prev = polygon[(i + n - 1) % n];
        let curr = polygon[i];
        let next = polygon[(i + 1) % n];

        let before = inward_normal(prev, curr, winding);
        let after = inward_normal(curr, next, winding);

        let (reference, sum) = match (before, after) {
            (Some(a), Some(b)) => (a, (a.0 + b.0, a.1 + b.1)),
            (Some(a), None) | (None, Some(a)) => (a, a),
            (None, None) => {
                shrunk.push(curr);
                continue;
            }
        };

        let sum_len = sum.0.hypot(sum.1);
        // Edges folding straight back: move along the incoming normal only.
        let bisector = if sum_len < EPSILON {
            reference
        } else {
            (sum.0 / sum_len, sum.1 / sum_len)
        };

        let cos_half = (bisector.0 * reference.0 + bisector.1 * reference.1).max(MIN_HALF_ANGLE_COS);
        let offset = distance / cos_half;
        shrunk.push(Point2D::new(curr.x + bisector.0 * offset, curr.z + bisector.1 * offset));
    }

    Polygon::new(shrunk)
}

/// Usable region after a perimeter setback.
///
/// Returns the roof unchanged for `setback_m <= 0`. Otherwise the roof is
/// shrunk and checked for collapse: when the offset flips the winding,
/// leaves no area, or leaves fewer than three distinct vertices, the result is
/// the empty polygon. An empty boundary is a normal outcome (the setback is
/// wider than the roof), not an error.
///
/// The collapse test is approximate on concave outlines. A narrow arm can
/// flip the winding and empty the whole boundary while wider strips remain,
/// and an offset that stays above the threshold can self-intersect, leaving
/// points of the boundary inside the setback band.
pub fn safety_boundary(roof: &[Point2D], setback_m: f64) -> Polygon {
    if roof.len() < 3 {
        return Polygon::empty();
    }
    if !(setback_m > 0.0) {
        return Polygon::new(roof.to_vec());
    }

    let original_area = signed_area_m2(roof);
    let shrunk = shrink_polygon(roof, setback_m);
    let distinct = dedup_vertices(&shrunk.vertices);
    if distinct.len() < 3 {
        return Polygon::empty();
    }

    let area = signed_area_m2(&distinct);
    if area.abs() < EPSILON || area.signum() != original_area.signum() {
        return Polygon::empty();
    }
    Polygon::new(distinct)
}

/// Drop consecutive (and wrap-around) vertices that coincide.
fn dedup_vertices(points: &[Point2D]) -> Vec<Point2D> {
    let mut out: Vec<Point2D> = Vec::with_capacity(points.len());
    for &p in points {
        if out.last().map_or(true, |last| edge_length(*last, p) > 1e-6) {
            out.push(p);
        }
    }
    while out.len() > 1 && edge_length(out[0], out[out.len() - 1]) <= 1e-6 {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::rectangle(10.0, 10.0)
    }

    fn l_shape() -> Polygon {
        Polygon::from_pairs(&[(0.0, 0.0), (10.0, 0.0), (10.0, 4.0), (4.0, 4.0), (4.0, 10.0), (0.0, 10.0)])
    }

    #[test]
    fn test_area() {
        assert_eq!(square().area_m2(), 100.0);
        assert_eq!(l_shape().area_m2(), 64.0);

        // Clockwise winding gives the same magnitude
        let mut cw = square();
        cw.vertices.reverse();
        assert_eq!(cw.area_m2(), 100.0);
        assert!(signed_area_m2(&cw.vertices) < 0.0);
    }

    #[test]
    fn test_area_degenerate() {
        assert_eq!(polygon_area_m2(&[]), 0.0);
        assert_eq!(polygon_area_m2(&[Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0)]), 0.0);
    }

    #[test]
    fn test_point_in_polygon() {
        let sq = square();
        assert!(sq.contains(Point2D::new(5.0, 5.0)));
        assert!(!sq.contains(Point2D::new(-1.0, 5.0)));
        assert!(!sq.contains(Point2D::new(5.0, 11.0)));

        let l = l_shape();
        assert!(l.contains(Point2D::new(2.0, 8.0)));
        assert!(l.contains(Point2D::new(8.0, 2.0)));
        assert!(!l.contains(Point2D::new(8.0, 8.0)));
    }

    #[test]
    fn test_point_in_degenerate_polygon() {
        let line = [Point2D::new(0.0, 0.0), Point2D::new(10.0, 10.0)];
        assert!(!point_in_polygon(Point2D::new(5.0, 5.0), &line));
        assert!(!point_in_polygon(Point2D::new(0.0, 0.0), &[]));
    }

    #[test]
    fn test_edge_length_and_perimeter() {
        assert_eq!(edge_length(Point2D::new(0.0, 0.0), Point2D::new(3.0, 4.0)), 5.0);
        assert_eq!(square().perimeter_m(), 40.0);
        assert_eq!(perimeter_m(&[Point2D::new(1.0, 1.0)]), 0.0);
    }

    #[test]
    fn test_shrink_square() {
        let shrunk = square().shrink(1.0);
        assert_eq!(shrunk.len(), 4);
        assert!((shrunk.vertices[0].x - 1.0).abs() < 1e-9);
        assert!((shrunk.vertices[0].z - 1.0).abs() < 1e-9);
        assert!((shrunk.vertices[2].x - 9.0).abs() < 1e-9);
        assert!((shrunk.area_m2() - 64.0).abs() < 1e-9);
    }

    #[test]
    fn test_shrink_clockwise_square_moves_inward() {
        let mut cw = square();
        cw.vertices.reverse();
        let shrunk = cw.shrink(2.0);
        assert!((shrunk.area_m2() - 36.0).abs() < 1e-9);
        for v in shrunk.vertices() {
            assert!(square().contains(*v));
        }
    }

    #[test]
    fn test_shrink_noop_cases() {
        assert_eq!(square().shrink(0.0), square());
        assert_eq!(square().shrink(-3.0), square());
        let two = Polygon::from_pairs(&[(0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(two.shrink(1.0), two);
    }

    #[test]
    fn test_shrink_concave_keeps_vertex_count() {
        let shrunk = l_shape().shrink(0.5);
        assert_eq!(shrunk.len(), 6);
        // Reflex corner at (4, 4) lands where both offset edges meet
        assert!((shrunk.vertices[3].x - 3.5).abs() < 1e-9);
        assert!((shrunk.vertices[3].z - 3.5).abs() < 1e-9);
        assert!(shrunk.area_m2() < l_shape().area_m2());
    }

    #[test]
    fn test_safety_boundary_collapses() {
        // Offset past half the width inverts the square
        assert!(square().safety_boundary(6.0).is_empty());
        // Exactly half the width folds to a point
        assert!(square().safety_boundary(5.0).is_empty());
        // Thin strip collapses before the square does
        assert!(Polygon::rectangle(10.0, 2.0).safety_boundary(1.2).is_empty());
        assert!(!Polygon::rectangle(10.0, 2.0).safety_boundary(0.5).is_empty());
    }

    #[test]
    fn test_safety_boundary_concave_is_approximate() {
        // 10x10 body with a 1 m wide arm on top. A 1 m setback should remove
        // the arm; the offset instead turns it inside out and keeps it.
        let roof = Polygon::from_pairs(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (5.5, 10.0),
            (5.5, 14.0),
            (4.5, 14.0),
            (4.5, 10.0),
            (0.0, 10.0),
        ]);
        let usable = roof.safety_boundary(1.0);
        assert_eq!(usable.len(), 8);
        // 8x8 body minus the inverted 1x4 arm
        assert!((usable.area_m2() - 60.0).abs() < 1e-9);
        assert!(usable.contains(Point2D::new(5.0, 5.0)));
        // Inside the arm's setback band, yet still reported usable
        assert!(usable.contains(Point2D::new(5.0, 12.0)));
    }

    #[test]
    fn test_safety_boundary_zero_setback_is_roof() {
        assert_eq!(square().safety_boundary(0.0), square());
        assert!(safety_boundary(&[Point2D::new(0.0, 0.0)], 1.0).is_empty());
    }

    #[test]
    fn test_bounds_and_centroid() {
        let b = l_shape().bounds().unwrap();
        assert_eq!((b.min_x, b.max_x, b.min_z, b.max_z), (0.0, 10.0, 0.0, 10.0));
        assert_eq!(b.mid_z(), 5.0);
        assert!(Polygon::empty().bounds().is_none());

        let c = square().centroid().unwrap();
        assert!((c.x - 5.0).abs() < 1e-9 && (c.z - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_polygon_serializes_as_vertex_list() {
        let tri = Polygon::from_pairs(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]);
        let json = serde_json::to_string(&tri).unwrap();
        assert!(json.starts_with("[{\"x\":0.0"));
        let roundtrip: Polygon = serde_json::from_str(&json).unwrap();
        assert_eq!(tri, roundtrip);
    }
}
