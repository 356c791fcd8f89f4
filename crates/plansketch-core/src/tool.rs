//! Straight-line drawing tool.
//!
//! A finite state machine over one gesture: `Idle -> Drawing -> Idle`, with
//! the drawing phase ending in a commit or a cancellation. The tool owns the
//! transient session only; committed lines belong to the scene surface.

use kurbo::Point;
use log::{debug, warn};

use crate::entity::{Entity, EntityId, Line, SerializableColor};
use crate::geometry;
use crate::input::{InputMethod, PointerSample};
use crate::scene::SceneSurface;
use crate::snap::{self, SnapResult, SnapSettings};

/// Exponential-moving-average factor for stylus pressure smoothing.
const PRESSURE_SMOOTHING: f64 = 0.3;

/// Stroke appearance and pressure response for new lines.
#[derive(Debug, Clone)]
pub struct LineToolConfig {
    pub color: SerializableColor,
    pub base_thickness: f64,
    /// Multiplier applied to device pressure before scaling thickness.
    /// At the default of 2.0, mid-range pressure (0.5) draws at base width.
    pub pressure_sensitivity: f64,
    /// Pressure-scaled strokes never get thinner than this.
    pub min_thickness: f64,
    /// Treat touch input as coarse (iOS-class surfaces).
    pub coarse_touch: bool,
}

impl Default for LineToolConfig {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
            base_thickness: Line::DEFAULT_THICKNESS,
            pressure_sensitivity: 2.0,
            min_thickness: 0.5,
            coarse_touch: false,
        }
    }
}

/// Transient state of one drawing gesture. Created on pointer-down,
/// destroyed on pointer-up, Escape, or tool switch.
#[derive(Debug, Clone)]
pub struct DrawingSession {
    pub start: Point,
    pub current: Point,
    pub input_method: InputMethod,
    pub shift_locked: bool,
    /// Smoothed device pressure over the gesture.
    pressure: f64,
    /// The live-feedback line already added to the scene.
    provisional: EntityId,
}

#[derive(Debug, Clone, Default)]
enum ToolState {
    #[default]
    Idle,
    Drawing(DrawingSession),
}

/// The straight-line tool.
#[derive(Debug, Clone)]
pub struct LineTool {
    state: ToolState,
    pub config: LineToolConfig,
    snap_enabled: bool,
    angle_lock: bool,
}

impl Default for LineTool {
    fn default() -> Self {
        Self::new(LineToolConfig::default())
    }
}

impl LineTool {
    pub fn new(config: LineToolConfig) -> Self {
        Self {
            state: ToolState::Idle,
            config,
            snap_enabled: true,
            angle_lock: false,
        }
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.snap_enabled = enabled;
    }

    pub fn set_angle_lock_enabled(&mut self, enabled: bool) {
        self.angle_lock = enabled;
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, ToolState::Drawing(_))
    }

    pub fn session(&self) -> Option<&DrawingSession> {
        match &self.state {
            ToolState::Drawing(session) => Some(session),
            ToolState::Idle => None,
        }
    }

    /// Snap settings for one gesture: the caller's grid size, the tool's
    /// snap flags, and the tolerance matching the input method.
    fn settings_with_grid(&self, method: InputMethod, grid_size: f64) -> SnapSettings {
        SnapSettings {
            grid_enabled: self.snap_enabled,
            angle_lock: self.angle_lock,
            ..SnapSettings::for_input(grid_size, method, self.config.coarse_touch)
        }
    }

    /// Pointer-down: start a gesture and add a zero-apparent-length
    /// provisional line for live feedback.
    pub fn begin(&mut self, scene: &mut impl SceneSurface, sample: &PointerSample, grid_size: f64) {
        if self.is_drawing() {
            debug!("line tool: pointer-down while already drawing, ignored");
            return;
        }

        let settings = self.settings_with_grid(sample.input_method, grid_size);
        let start = snap::snap_point(sample.position, &settings).point;

        let mut provisional = Line::new(start, start);
        provisional.color = self.config.color;
        provisional.thickness = self.config.base_thickness;
        let id = provisional.id();
        scene.add(Entity::Line(provisional));
        scene.request_render();

        self.state = ToolState::Drawing(DrawingSession {
            start,
            current: start,
            input_method: sample.input_method,
            shift_locked: sample.modifiers.shift,
            pressure: sample.pressure,
            provisional: id,
        });
    }

    /// Pointer-move: recompute the snapped endpoint and update the
    /// provisional line. Idempotent per raw point.
    pub fn update(
        &mut self,
        scene: &mut impl SceneSurface,
        sample: &PointerSample,
        grid_size: f64,
    ) -> Option<SnapResult> {
        let settings = self.settings_with_grid(sample.input_method, grid_size);
        let ToolState::Drawing(session) = &mut self.state else {
            debug!("line tool: pointer-move without an active gesture, ignored");
            return None;
        };

        let result = snap::snap_endpoint(
            session.start,
            sample.position,
            &settings,
            sample.modifiers.shift,
        );
        session.current = result.point;
        session.shift_locked = sample.modifiers.shift;
        session.pressure = session.pressure * (1.0 - PRESSURE_SMOOTHING)
            + sample.pressure * PRESSURE_SMOOTHING;

        if let Some(Entity::Line(line)) = scene.entity_mut(session.provisional) {
            line.end = result.point;
        } else {
            warn!("line tool: provisional line missing from scene");
        }
        scene.request_render();
        Some(result)
    }

    /// Pointer-up: commit the line, or reject it if it never left its start
    /// point. Returns the committed entity id.
    pub fn end(
        &mut self,
        scene: &mut impl SceneSurface,
        sample: &PointerSample,
        grid_size: f64,
    ) -> Option<EntityId> {
        let settings = self.settings_with_grid(sample.input_method, grid_size);
        let ToolState::Drawing(session) = std::mem::take(&mut self.state) else {
            debug!("line tool: pointer-up without an active gesture, ignored");
            return None;
        };

        let result = snap::snap_endpoint(
            session.start,
            sample.position,
            &settings,
            sample.modifiers.shift,
        );
        let end = result.point;

        if geometry::distance(session.start, end) == 0.0 {
            // Degenerate line: discard instead of persisting.
            scene.remove(session.provisional);
            scene.request_render();
            return None;
        }

        let pressure = session.pressure * (1.0 - PRESSURE_SMOOTHING)
            + sample.pressure * PRESSURE_SMOOTHING;
        let thickness = self.effective_thickness(session.input_method, pressure);

        if let Some(Entity::Line(line)) = scene.entity_mut(session.provisional) {
            line.end = end;
            line.color = self.config.color;
            line.thickness = thickness;
        } else {
            warn!("line tool: provisional line missing at commit, re-adding");
            let mut line = Line::new(session.start, end);
            line.color = self.config.color;
            line.thickness = thickness;
            let id = line.id();
            scene.add(Entity::Line(line));
            scene.request_render();
            return Some(id);
        }
        scene.request_render();
        Some(session.provisional)
    }

    /// Escape or tool switch: drop the gesture and its provisional line.
    /// No history entry is recorded.
    pub fn cancel(&mut self, scene: &mut impl SceneSurface) {
        if let ToolState::Drawing(session) = std::mem::take(&mut self.state) {
            scene.remove(session.provisional);
            scene.request_render();
        }
    }

    /// Stroke thickness after pressure adaptation. Only stylus input scales;
    /// mouse and touch draw at base width.
    pub fn effective_thickness(&self, method: InputMethod, pressure: f64) -> f64 {
        match method {
            InputMethod::Stylus => {
                let factor = (pressure * self.config.pressure_sensitivity).max(0.0);
                (self.config.base_thickness * factor).max(self.config.min_thickness)
            }
            InputMethod::Mouse | InputMethod::Touch => self.config.base_thickness,
        }
    }
}
