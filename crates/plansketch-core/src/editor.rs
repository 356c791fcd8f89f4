//! Editor facade: the explicit context object that owns the scene surface,
//! the line tool, the history, and the grid configuration.
//!
//! Host UI chrome calls these methods from its event loop; everything is
//! synchronous and single-threaded.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::grid::GridConfig;
use crate::history::History;
use crate::input::{PointerEvent, PointerSample};
use crate::scene::SceneSurface;
use crate::snap::SnapResult;
use crate::tool::{LineTool, LineToolConfig};

/// Available editor tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Select,
    Line,
}

pub struct Editor<S: SceneSurface> {
    scene: S,
    tool: LineTool,
    history: History,
    grid: GridConfig,
    active_tool: ToolKind,
    grid_ids: Vec<EntityId>,
}

impl<S: SceneSurface> Editor<S> {
    pub fn new(scene: S, grid: GridConfig) -> Self {
        let history = History::new(&scene);
        Self {
            scene,
            tool: LineTool::new(LineToolConfig::default()),
            history,
            grid,
            active_tool: ToolKind::default(),
            grid_ids: Vec::new(),
        }
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn tool_config_mut(&mut self) -> &mut LineToolConfig {
        &mut self.tool.config
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    /// Switch tools. An in-flight drawing gesture is cancelled first; tool
    /// transitions and drawing state are never independent.
    pub fn set_tool(&mut self, kind: ToolKind) {
        if self.tool.is_drawing() {
            self.tool.cancel(&mut self.scene);
        }
        self.active_tool = kind;
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.tool.set_snap_enabled(enabled);
    }

    pub fn set_angle_lock_enabled(&mut self, enabled: bool) {
        self.tool.set_angle_lock_enabled(enabled);
    }

    /// Replace the background grid entities for the given canvas size and
    /// push them behind the document content.
    pub fn install_grid(&mut self, canvas_width: f64, canvas_height: f64) {
        for id in self.grid_ids.drain(..) {
            self.scene.remove(id);
        }
        for line in self.grid.layout(canvas_width, canvas_height) {
            let id = line.id();
            self.scene.add(Entity::Grid(line));
            self.grid_ids.push(id);
        }
        // Newest-first so grid lines sit below everything else.
        for id in self.grid_ids.iter().rev() {
            self.scene.send_to_back(*id);
        }
        self.scene.request_render();
    }

    // --- tool control -----------------------------------------------------

    pub fn start_drawing(&mut self, sample: &PointerSample) {
        if self.active_tool != ToolKind::Line {
            debug!("pointer-down ignored: active tool is {:?}", self.active_tool);
            return;
        }
        self.tool
            .begin(&mut self.scene, sample, self.grid.small_spacing());
    }

    pub fn continue_drawing(&mut self, sample: &PointerSample) -> Option<SnapResult> {
        self.tool
            .update(&mut self.scene, sample, self.grid.small_spacing())
    }

    /// Finish the gesture. A successful commit records a history snapshot;
    /// a degenerate (zero-length) gesture records nothing.
    pub fn end_drawing(&mut self, sample: &PointerSample) -> Option<EntityId> {
        let committed = self
            .tool
            .end(&mut self.scene, sample, self.grid.small_spacing())?;
        self.history.save_current_state(&self.scene);
        Some(committed)
    }

    pub fn cancel_drawing(&mut self) {
        self.tool.cancel(&mut self.scene);
    }

    pub fn is_drawing(&self) -> bool {
        self.tool.is_drawing()
    }

    /// Route a normalized pointer event to the active tool.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(sample) => self.start_drawing(&sample),
            PointerEvent::Move(sample) => {
                self.continue_drawing(&sample);
            }
            PointerEvent::Up(sample) => {
                self.end_drawing(&sample);
            }
        }
    }

    /// Key handling for the bindings the core owns.
    pub fn handle_key_pressed(&mut self, key: &str) {
        if key == "Escape" {
            self.cancel_drawing();
        }
    }

    // --- history control --------------------------------------------------

    pub fn save_current_state(&mut self) {
        self.history.save_current_state(&self.scene);
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.scene)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.scene)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
