//! PlanSketch Core Library
//!
//! Interactive drawing engine for the PlanSketch floor-plan editor: grid
//! model, snapping, polyline simplification, the straight-line tool state
//! machine, and snapshot-based undo/redo. Rendering and persistence belong
//! to the host, which implements [`scene::SceneSurface`] and feeds
//! normalized pointer input.

pub mod editor;
pub mod entity;
pub mod geometry;
pub mod grid;
pub mod history;
pub mod input;
pub mod scene;
pub mod simplify;
pub mod snap;
pub mod tool;

pub use editor::{Editor, ToolKind};
pub use entity::{Entity, EntityId, GridLine, Line, Orientation, SerializableColor};
pub use grid::{GridConfig, GridConfigError, GridLineCount};
pub use history::History;
pub use input::{InputMethod, Modifiers, PointerEvent, PointerSample};
pub use scene::{MemoryScene, SceneSnapshot, SceneSurface};
pub use simplify::{is_straight_path, simplify, straighten_path};
pub use snap::{SnapKind, SnapResult, SnapSettings, snap_angle, snap_point, snap_to_grid};
pub use tool::{DrawingSession, LineTool, LineToolConfig};
