//! Planar geometry helpers shared by the grid, snapping, and tool modules.

use kurbo::{Affine, Point, Rect};

/// Determinant below which an affine transform is treated as degenerate.
pub const DEGENERATE_DETERMINANT: f64 = 1e-5;

/// Euclidean distance between two points.
pub fn distance(p1: Point, p2: Point) -> f64 {
    distance_squared(p1, p2).sqrt()
}

/// Squared distance between two points (no sqrt, for hot-path comparisons).
pub fn distance_squared(p1: Point, p2: Point) -> f64 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    dx * dx + dy * dy
}

/// Distance from `point` to the infinite line through `line_start` and
/// `line_end`. Falls back to the point-to-point distance when the segment
/// has zero length.
pub fn perpendicular_distance(point: Point, line_start: Point, line_end: Point) -> f64 {
    let dx = line_end.x - line_start.x;
    let dy = line_end.y - line_start.y;

    let line_len_sq = dx * dx + dy * dy;
    if line_len_sq < f64::EPSILON {
        return distance(point, line_start);
    }

    // Twice the triangle area over the base length gives the height.
    let area2 = ((point.x - line_start.x) * dy - (point.y - line_start.y) * dx).abs();
    area2 / line_len_sq.sqrt()
}

/// Area of a polygon via the shoelace formula.
///
/// Returns `0.0` for fewer than 3 points; imprecise pointer input routinely
/// produces such degenerate polygons and they are not an error.
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum.abs() / 2.0
}

/// Axis-aligned bounding box of a point set. `Rect::ZERO` for empty input.
pub fn bounding_box(points: &[Point]) -> Rect {
    if points.is_empty() {
        return Rect::ZERO;
    }

    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::new(min_x, min_y, max_x, max_y)
}

/// Apply an affine transform to a point.
///
/// `Affine`'s coefficient order `[a, b, c, d, tx, ty]` is the standard 2-D
/// affine convention; composition, rotation, translation, and scale come from
/// kurbo directly.
pub fn transform_point(point: Point, affine: Affine) -> Point {
    affine * point
}

/// Invert an affine transform, returning the identity when the determinant is
/// below [`DEGENERATE_DETERMINANT`] instead of a garbage inverse.
pub fn invert_or_identity(affine: Affine) -> Affine {
    if affine.determinant().abs() < DEGENERATE_DETERMINANT {
        return Affine::IDENTITY;
    }
    affine.inverse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let d = distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!((d - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_perpendicular_distance() {
        let d = perpendicular_distance(
            Point::new(5.0, 3.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!((d - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_perpendicular_distance_degenerate_segment() {
        // Zero-length segment falls back to the point distance.
        let d = perpendicular_distance(
            Point::new(3.0, 4.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
        );
        assert!((d - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_polygon_area_square() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert!((polygon_area(&square) - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_polygon_area_winding_independent() {
        let cw = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        ];
        assert!((polygon_area(&cw) - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_polygon_area_degenerate() {
        assert_eq!(polygon_area(&[]), 0.0);
        assert_eq!(polygon_area(&[Point::new(1.0, 1.0)]), 0.0);
        assert_eq!(
            polygon_area(&[Point::new(0.0, 0.0), Point::new(5.0, 5.0)]),
            0.0
        );
    }

    #[test]
    fn test_polygon_area_duplicate_consecutive_points() {
        // Duplicate points contribute nothing to the shoelace sum.
        let poly = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert!((polygon_area(&poly) - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_bounding_box() {
        let bounds = bounding_box(&[
            Point::new(10.0, 20.0),
            Point::new(-5.0, 40.0),
            Point::new(30.0, 0.0),
        ]);
        assert!((bounds.x0 + 5.0).abs() < f64::EPSILON);
        assert!((bounds.y0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 30.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 40.0).abs() < f64::EPSILON);
        assert!((bounds.width() - 35.0).abs() < f64::EPSILON);
        assert!((bounds.height() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounding_box_empty() {
        assert_eq!(bounding_box(&[]), Rect::ZERO);
    }

    #[test]
    fn test_transform_point_translation() {
        let p = transform_point(
            Point::new(1.0, 2.0),
            Affine::translate(kurbo::Vec2::new(10.0, 20.0)),
        );
        assert!((p.x - 11.0).abs() < f64::EPSILON);
        assert!((p.y - 22.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_transform_point_rotation() {
        let p = transform_point(
            Point::new(1.0, 0.0),
            Affine::rotate(std::f64::consts::FRAC_PI_2),
        );
        assert!(p.x.abs() < 1e-10);
        assert!((p.y - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_invert_roundtrip() {
        let affine = Affine::translate(kurbo::Vec2::new(3.0, -7.0)) * Affine::scale(2.0);
        let inverse = invert_or_identity(affine);
        let p = Point::new(12.0, 34.0);
        let back = inverse * (affine * p);
        assert!((back.x - p.x).abs() < 1e-10);
        assert!((back.y - p.y).abs() < 1e-10);
    }

    #[test]
    fn test_invert_degenerate_returns_identity() {
        let collapsed = Affine::scale(0.0);
        assert_eq!(invert_or_identity(collapsed), Affine::IDENTITY);
    }
}
