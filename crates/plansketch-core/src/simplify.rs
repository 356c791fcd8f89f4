//! Freehand stroke processing: Ramer-Douglas-Peucker simplification and
//! straight-stroke detection.

use kurbo::Point;

use crate::geometry::perpendicular_distance;
use crate::snap::snap_to_grid;

/// Default deviation threshold (radians) below which a stroke counts as
/// straight.
pub const STRAIGHTNESS_THRESHOLD: f64 = 0.09;

/// Ramer-Douglas-Peucker polyline simplification.
///
/// Endpoints are always preserved; with two points or fewer the input is
/// returned unchanged.
pub fn simplify(points: &[Point], epsilon: f64) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];

    // Find the point farthest from the chord between the endpoints.
    let mut max_dist = 0.0;
    let mut max_index = 0;
    for (i, point) in points.iter().enumerate().skip(1).take(points.len() - 2) {
        let dist = perpendicular_distance(*point, first, last);
        if dist > max_dist {
            max_dist = dist;
            max_index = i;
        }
    }

    if max_dist > epsilon {
        let mut left = simplify(&points[..=max_index], epsilon);
        let right = simplify(&points[max_index..], epsilon);

        // The split point is in both halves; drop the duplicate.
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

/// Whether a stroke reads as a single straight line.
///
/// Compares each local segment's angle against the base angle from first to
/// last point; the deviation is normalized into `[0, pi]` and the first
/// violation of `angle_threshold` decides. Zero-length local segments carry
/// no direction and are skipped.
pub fn is_straight_path(points: &[Point], angle_threshold: f64) -> bool {
    if points.len() <= 2 {
        return true;
    }

    let first = points[0];
    let last = points[points.len() - 1];
    if first == last {
        return false;
    }
    let base_angle = (last.y - first.y).atan2(last.x - first.x);

    for window in points.windows(2) {
        let dx = window[1].x - window[0].x;
        let dy = window[1].y - window[0].y;
        if dx == 0.0 && dy == 0.0 {
            continue;
        }
        let segment_angle = dy.atan2(dx);
        let mut deviation = (segment_angle - base_angle).abs();
        // Normalize into [0, pi].
        if deviation > std::f64::consts::PI {
            deviation = 2.0 * std::f64::consts::PI - deviation;
        }
        if deviation > angle_threshold {
            return false;
        }
    }
    true
}

/// Collapse a stroke to its endpoints, optionally snapping them to the grid.
/// Returns `None` for an empty stroke.
pub fn straighten_path(
    points: &[Point],
    snap_enabled: bool,
    grid_size: f64,
) -> Option<(Point, Point)> {
    let first = *points.first()?;
    let last = *points.last()?;

    if snap_enabled {
        Some((
            snap_to_grid(first, grid_size),
            snap_to_grid(last, grid_size),
        ))
    } else {
        Some((first, last))
    }
}
