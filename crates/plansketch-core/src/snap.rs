//! Snap functionality for aligning pointer input to the grid and to
//! canonical angles.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::geometry;
use crate::input::InputMethod;

/// Default angle snap increment in degrees.
pub const ANGLE_SNAP_INCREMENT: f64 = 45.0;

/// Default on-grid remainder threshold.
pub const ON_GRID_THRESHOLD: f64 = 1e-3;

/// What a snap operation latched onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SnapKind {
    #[default]
    None,
    Grid,
    Angle,
}

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapResult {
    /// The (possibly adjusted) point.
    pub point: Point,
    /// Whether any snapping occurred.
    pub snapped: bool,
    pub kind: SnapKind,
    /// The snapped angle in degrees (0-360), for angle snaps.
    pub angle_degrees: Option<f64>,
}

impl SnapResult {
    /// A result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped: false,
            kind: SnapKind::None,
            angle_degrees: None,
        }
    }
}

/// Snap configuration for one gesture.
///
/// Tolerance is an explicit input threaded from the pointer's input method,
/// never a hidden constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapSettings {
    /// Snap candidate points to grid intersections.
    pub grid_enabled: bool,
    /// Constrain line endpoints to canonical angles from the start point.
    pub angle_lock: bool,
    /// Grid cell size in pixels.
    pub grid_size: f64,
    /// Angle snap increment in degrees.
    pub angle_step: f64,
    /// Pixel radius within which grid snapping activates.
    pub tolerance: f64,
}

impl SnapSettings {
    pub fn new(grid_size: f64) -> Self {
        Self {
            grid_enabled: true,
            angle_lock: false,
            grid_size,
            angle_step: ANGLE_SNAP_INCREMENT,
            tolerance: InputMethod::Mouse.snap_tolerance(false),
        }
    }

    /// Settings with the tolerance appropriate to an input method.
    pub fn for_input(grid_size: f64, method: InputMethod, coarse: bool) -> Self {
        Self {
            tolerance: method.snap_tolerance(coarse),
            ..Self::new(grid_size)
        }
    }
}

/// Snap a point to the nearest grid intersection by rounding each axis.
/// Idempotent: snapping an already-snapped point is a no-op.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

/// Whether a point lies on a grid line: the remainder on either axis is
/// within `threshold` of 0 or of `grid_size`.
pub fn is_point_on_grid(point: Point, grid_size: f64, threshold: f64) -> bool {
    let on_axis = |value: f64| {
        let rem = value.rem_euclid(grid_size);
        rem < threshold || grid_size - rem < threshold
    };
    on_axis(point.x) || on_axis(point.y)
}

/// Squared-distance proximity test (no sqrt on the pointer-move hot path).
pub fn is_point_near(p1: Point, p2: Point, threshold: f64) -> bool {
    geometry::distance_squared(p1, p2) < threshold * threshold
}

/// Normalize an angle in degrees into `[0, 360)`.
fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if (wrapped - 360.0).abs() < 1e-9 { 0.0 } else { wrapped }
}

/// Snap `raw`'s angle relative to `origin` to the nearest multiple of
/// `step_degrees`, preserving the distance from `origin`.
///
/// A zero-length input cannot define an angle and is returned unsnapped.
pub fn snap_angle(origin: Point, raw: Point, step_degrees: f64) -> SnapResult {
    let dx = raw.x - origin.x;
    let dy = raw.y - origin.y;
    let dist = (dx * dx + dy * dy).sqrt();

    if dist < 1e-3 {
        return SnapResult::none(raw);
    }

    let raw_angle = normalize_degrees(dy.atan2(dx).to_degrees());
    let snapped_angle = normalize_degrees((raw_angle / step_degrees).round() * step_degrees);
    let radians = snapped_angle.to_radians();

    SnapResult {
        point: Point::new(
            origin.x + dist * radians.cos(),
            origin.y + dist * radians.sin(),
        ),
        snapped: true,
        kind: SnapKind::Angle,
        angle_degrees: Some(snapped_angle),
    }
}

/// Snap a free point per the settings. Grid snapping activates only when the
/// point is within the configured tolerance of an intersection.
pub fn snap_point(point: Point, settings: &SnapSettings) -> SnapResult {
    if !settings.grid_enabled {
        return SnapResult::none(point);
    }
    let candidate = snap_to_grid(point, settings.grid_size);
    if is_point_near(point, candidate, settings.tolerance) {
        SnapResult {
            point: candidate,
            snapped: true,
            kind: SnapKind::Grid,
            angle_degrees: None,
        }
    } else {
        SnapResult::none(point)
    }
}

/// Snap a line endpoint during a drawing gesture: grid snap first, then,
/// when the angle lock is active by configuration or by the shift modifier,
/// angle snap relative to the line's start.
///
/// Pure over its inputs; repeated moves to the same raw point produce the
/// same result.
pub fn snap_endpoint(
    start: Point,
    raw: Point,
    settings: &SnapSettings,
    shift_held: bool,
) -> SnapResult {
    let grid_result = snap_point(raw, settings);

    if settings.angle_lock || shift_held {
        let angle_result = snap_angle(start, grid_result.point, settings.angle_step);
        if angle_result.snapped {
            return angle_result;
        }
    }

    grid_result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_grid() {
        let snapped = snap_to_grid(Point::new(14.0, 23.0), 10.0);
        assert_eq!(snapped, Point::new(10.0, 20.0));
    }

    #[test]
    fn test_snap_to_grid_idempotent() {
        for &g in &[1.0, 7.5, 10.0, 20.0] {
            for &(x, y) in &[(14.0, 23.0), (-3.2, 0.4), (101.7, -55.5)] {
                let once = snap_to_grid(Point::new(x, y), g);
                let twice = snap_to_grid(once, g);
                assert_eq!(once, twice, "grid size {g}");
            }
        }
    }

    #[test]
    fn test_is_point_on_grid() {
        assert!(is_point_on_grid(Point::new(20.0, 13.0), 10.0, ON_GRID_THRESHOLD));
        assert!(is_point_on_grid(Point::new(13.0, 29.9999), 10.0, ON_GRID_THRESHOLD));
        assert!(!is_point_on_grid(Point::new(13.0, 27.0), 10.0, ON_GRID_THRESHOLD));
    }

    #[test]
    fn test_is_point_near() {
        assert!(is_point_near(Point::new(0.0, 0.0), Point::new(3.0, 4.0), 5.1));
        assert!(!is_point_near(Point::new(0.0, 0.0), Point::new(3.0, 4.0), 5.0));
    }

    #[test]
    fn test_snap_angle_43_to_45() {
        let origin = Point::ZERO;
        let dist = 100.0;
        let raw_angle = 43.0_f64.to_radians();
        let raw = Point::new(dist * raw_angle.cos(), dist * raw_angle.sin());

        let result = snap_angle(origin, raw, 45.0);
        assert!(result.snapped);
        assert_eq!(result.kind, SnapKind::Angle);
        assert_eq!(result.angle_degrees, Some(45.0));

        let snapped_angle = result.point.y.atan2(result.point.x).to_degrees();
        assert!((snapped_angle - 45.0).abs() < 1e-9);
        assert!((geometry::distance(origin, result.point) - dist).abs() < 1e-9);
    }

    #[test]
    fn test_snap_angle_zero_length() {
        let result = snap_angle(Point::new(5.0, 5.0), Point::new(5.0, 5.0), 45.0);
        assert!(!result.snapped);
        assert_eq!(result.kind, SnapKind::None);
    }

    #[test]
    fn test_snap_angle_wraps_to_zero() {
        let origin = Point::ZERO;
        let raw = Point::new(100.0, -3.0); // just below 0 degrees
        let result = snap_angle(origin, raw, 45.0);
        assert_eq!(result.angle_degrees, Some(0.0));
        assert!(result.point.y.abs() < 1e-9);
    }

    #[test]
    fn test_snap_point_within_tolerance() {
        let settings = SnapSettings::new(10.0);
        let result = snap_point(Point::new(12.0, 19.0), &settings);
        assert!(result.snapped);
        assert_eq!(result.kind, SnapKind::Grid);
        assert_eq!(result.point, Point::new(10.0, 20.0));
    }

    #[test]
    fn test_snap_point_outside_tolerance() {
        // (15, 25) is equidistant from four intersections, ~7.07px away,
        // beyond the 5px mouse tolerance.
        let settings = SnapSettings::new(10.0);
        let result = snap_point(Point::new(15.0, 25.0), &settings);
        assert!(!result.snapped);
        assert_eq!(result.point, Point::new(15.0, 25.0));
    }

    #[test]
    fn test_snap_point_disabled() {
        let settings = SnapSettings {
            grid_enabled: false,
            ..SnapSettings::new(10.0)
        };
        let result = snap_point(Point::new(12.0, 19.0), &settings);
        assert!(!result.snapped);
    }

    #[test]
    fn test_snap_endpoint_shift_applies_angle() {
        let settings = SnapSettings {
            grid_enabled: false,
            ..SnapSettings::new(10.0)
        };
        let result = snap_endpoint(Point::ZERO, Point::new(100.0, 5.0), &settings, true);
        assert_eq!(result.kind, SnapKind::Angle);
        assert_eq!(result.angle_degrees, Some(0.0));
        assert!(result.point.y.abs() < 1e-9);
    }

    #[test]
    fn test_snap_endpoint_grid_then_angle_consistency() {
        let settings = SnapSettings::new(10.0);
        let raw = Point::new(71.0, 2.0);
        let a = snap_endpoint(Point::ZERO, raw, &settings, true);
        let b = snap_endpoint(Point::ZERO, raw, &settings, true);
        assert_eq!(a, b);
    }

    #[test]
    fn test_snap_endpoint_no_lock_keeps_grid() {
        let settings = SnapSettings::new(10.0);
        let result = snap_endpoint(Point::ZERO, Point::new(68.0, 41.0), &settings, false);
        assert_eq!(result.kind, SnapKind::Grid);
        assert_eq!(result.point, Point::new(70.0, 40.0));
    }

    #[test]
    fn test_tolerance_from_input_method() {
        let mouse = SnapSettings::for_input(10.0, InputMethod::Mouse, false);
        let touch = SnapSettings::for_input(10.0, InputMethod::Touch, true);
        assert!(touch.tolerance > mouse.tolerance);
    }
}
