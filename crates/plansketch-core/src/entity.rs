//! Drawable entity definitions for the floor-plan scene.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry;

/// Unique identifier for scene entities.
pub type EntityId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn light_gray() -> Self {
        Self::new(224, 224, 224, 255)
    }

    pub fn gray() -> Self {
        Self::new(176, 176, 176, 255)
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

/// A committed straight wall/measurement line.
///
/// This is the single canonical line record: every boundary that produces a
/// line (tool commit, path straightening, snapshot restore) goes through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: EntityId,
    /// Start point in canvas coordinates.
    pub start: Point,
    /// End point in canvas coordinates.
    pub end: Point,
    /// Stroke color.
    pub color: SerializableColor,
    /// Stroke thickness in pixels.
    pub thickness: f64,
}

impl Line {
    pub const DEFAULT_THICKNESS: f64 = 2.0;

    /// Create a new line with default style.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            color: SerializableColor::black(),
            thickness: Self::DEFAULT_THICKNESS,
        }
    }

    /// Boundary conversion from a bare endpoint pair.
    pub fn from_endpoints(endpoints: (Point, Point)) -> Self {
        Self::new(endpoints.0, endpoints.1)
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Length of the line.
    pub fn length(&self) -> f64 {
        geometry::distance(self.start, self.end)
    }

    /// Midpoint of the line.
    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// A zero-length line carries no geometry and is rejected at commit.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Axis-aligned bounding box.
    pub fn bounds(&self) -> Rect {
        geometry::bounding_box(&[self.start, self.end])
    }

    /// Check if a point hits this line within a tolerance.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let line_vec = kurbo::Vec2::new(self.end.x - self.start.x, self.end.y - self.start.y);
        let point_vec = kurbo::Vec2::new(point.x - self.start.x, point.y - self.start.y);

        let line_len_sq = line_vec.hypot2();
        if line_len_sq < f64::EPSILON {
            return point_vec.hypot() <= tolerance;
        }

        // Project onto the segment, clamped to its extent.
        let t = (point_vec.dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
        let projection = Point::new(self.start.x + t * line_vec.x, self.start.y + t * line_vec.y);

        geometry::distance(point, projection) <= tolerance + self.thickness / 2.0
    }
}

/// Orientation of a grid line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// A single background grid line emitted by the grid model.
///
/// Grid lines are decoration: they are excluded from hit-testing, selection,
/// and scene export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub(crate) id: EntityId,
    pub orientation: Orientation,
    /// Distance from the canvas origin along the perpendicular axis.
    pub offset: f64,
    /// Length of the line (the canvas extent along its own axis).
    pub extent: f64,
    /// Major lines sit on the large-spacing interval.
    pub major: bool,
    pub color: SerializableColor,
}

impl GridLine {
    pub fn new(
        orientation: Orientation,
        offset: f64,
        extent: f64,
        major: bool,
        color: SerializableColor,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            orientation,
            offset,
            extent,
            major,
            color,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }
}

/// Everything the scene surface can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Line(Line),
    Grid(GridLine),
}

impl Entity {
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Line(line) => line.id(),
            Entity::Grid(grid) => grid.id(),
        }
    }

    /// Grid entities are background decoration, not document content.
    pub fn is_grid(&self) -> bool {
        matches!(self, Entity::Grid(_))
    }

    pub fn as_line(&self) -> Option<&Line> {
        match self {
            Entity::Line(line) => Some(line),
            Entity::Grid(_) => None,
        }
    }

    /// Hit test against document content. Grid lines never hit.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Entity::Line(line) => line.hit_test(point, tolerance),
            Entity::Grid(_) => false,
        }
    }
}
