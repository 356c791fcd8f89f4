//! Undo/redo over scene snapshots.
//!
//! Two stacks of [`SceneSnapshot`]; the top of `past` always mirrors the last
//! saved state, and a baseline snapshot is recorded at construction so the
//! first undo returns to the pre-edit scene. Undo and redo move exactly one
//! entry between the stacks, so `past.len() + future.len()` is conserved
//! across any undo/redo sequence.
//!
//! The stacks are unbounded; long sessions grow memory with every saved
//! state. See DESIGN.md.

use crate::scene::{SceneSnapshot, SceneSurface};

#[derive(Debug, Clone)]
pub struct History {
    past: Vec<SceneSnapshot>,
    future: Vec<SceneSnapshot>,
}

impl History {
    /// Create a history whose baseline is the scene's current state.
    pub fn new(scene: &impl SceneSurface) -> Self {
        Self {
            past: vec![scene.to_snapshot()],
            future: Vec::new(),
        }
    }

    /// Record the scene's current state. Any previously redoable states
    /// become unreachable.
    pub fn save_current_state(&mut self, scene: &impl SceneSurface) {
        self.past.push(scene.to_snapshot());
        self.future.clear();
    }

    /// Step back one saved state. Returns false (no-op) when only the
    /// baseline remains.
    pub fn undo(&mut self, scene: &mut impl SceneSurface) -> bool {
        if !self.can_undo() {
            return false;
        }
        if let Some(undone) = self.past.pop() {
            self.future.push(undone);
        }
        if let Some(restored) = self.past.last() {
            scene.load_snapshot(restored);
        }
        true
    }

    /// Step forward one undone state. Returns false (no-op) when there is
    /// nothing to redo.
    pub fn redo(&mut self, scene: &mut impl SceneSurface) -> bool {
        let Some(snapshot) = self.future.pop() else {
            return false;
        };
        scene.load_snapshot(&snapshot);
        self.past.push(snapshot);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.past.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of saved states beyond the baseline.
    pub fn depth(&self) -> usize {
        self.past.len() - 1
    }

    #[cfg(test)]
    pub(crate) fn stack_sizes(&self) -> (usize, usize) {
        (self.past.len(), self.future.len())
    }
}
