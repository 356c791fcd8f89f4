//! Scene surface abstraction: the collaborator that owns drawable entities
//! and the render loop.

use kurbo::Point;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};

/// An immutable snapshot of the scene's drawable entities.
///
/// Grid decoration is excluded; snapshots capture document content only.
/// Entries are cloned entity lists and serde-serializable, so hosts that
/// persist history can round-trip them through JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    entities: Vec<Entity>,
}

impl SceneSnapshot {
    /// Capture the drawable entities from an object list.
    pub fn capture(objects: &[Entity]) -> Self {
        Self {
            entities: objects.iter().filter(|e| !e.is_grid()).cloned().collect(),
        }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Serialize to JSON for external persistence.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The rendering/canvas collaborator the drawing engine mutates.
///
/// `add`/`remove` take effect synchronously in `objects`; `request_render`
/// is idempotent and may be called redundantly.
pub trait SceneSurface {
    /// Add an entity to the scene.
    fn add(&mut self, entity: Entity);

    /// Remove an entity, returning it if present.
    fn remove(&mut self, id: EntityId) -> Option<Entity>;

    /// Whether an entity with this id is in the scene.
    fn contains(&self, id: EntityId) -> bool;

    /// All entities, back to front.
    fn objects(&self) -> &[Entity];

    /// Mutable access to a single entity.
    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity>;

    /// Move an entity to the bottom of the draw order.
    fn send_to_back(&mut self, id: EntityId);

    /// Ask the host to repaint.
    fn request_render(&mut self);

    /// Snapshot the drawable entities.
    fn to_snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::capture(self.objects())
    }

    /// Replace the drawable entities with a snapshot's, preserving grid
    /// decoration.
    fn load_snapshot(&mut self, snapshot: &SceneSnapshot);

    /// Number of drawable (non-grid) entities.
    fn drawable_count(&self) -> usize {
        self.objects().iter().filter(|e| !e.is_grid()).count()
    }

    /// Topmost drawable entity hit by a point, if any.
    fn hit_test(&self, point: Point, tolerance: f64) -> Option<EntityId> {
        self.objects()
            .iter()
            .rev()
            .find(|e| e.hit_test(point, tolerance))
            .map(Entity::id)
    }
}

/// In-process scene surface keeping entities in draw order.
///
/// Hosts with a real canvas implement [`SceneSurface`] themselves; this one
/// backs headless use and the test suite.
#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    entities: Vec<Entity>,
    render_requests: u64,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many repaints have been requested (for tests and diagnostics).
    pub fn render_requests(&self) -> u64 {
        self.render_requests
    }

    /// Restore a scene from externally persisted JSON.
    pub fn from_snapshot_json(json: &str) -> Result<Self, serde_json::Error> {
        let snapshot = SceneSnapshot::from_json(json)?;
        let mut scene = Self::new();
        scene.load_snapshot(&snapshot);
        Ok(scene)
    }
}

impl SceneSurface for MemoryScene {
    fn add(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id() == id)?;
        Some(self.entities.remove(index))
    }

    fn contains(&self, id: EntityId) -> bool {
        self.entities.iter().any(|e| e.id() == id)
    }

    fn objects(&self) -> &[Entity] {
        &self.entities
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    fn send_to_back(&mut self, id: EntityId) {
        if let Some(index) = self.entities.iter().position(|e| e.id() == id) {
            let entity = self.entities.remove(index);
            self.entities.insert(0, entity);
        } else {
            warn!("send_to_back: no entity with id {id}");
        }
    }

    fn request_render(&mut self) {
        self.render_requests += 1;
    }

    fn load_snapshot(&mut self, snapshot: &SceneSnapshot) {
        // Grid decoration survives history navigation.
        self.entities.retain(Entity::is_grid);
        self.entities.extend(snapshot.entities().iter().cloned());
        self.request_render();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{GridLine, Line, Orientation, SerializableColor};

    fn grid_line() -> Entity {
        Entity::Grid(GridLine::new(
            Orientation::Vertical,
            10.0,
            100.0,
            false,
            SerializableColor::light_gray(),
        ))
    }

    #[test]
    fn test_add_remove_synchronous() {
        let mut scene = MemoryScene::new();
        let line = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let id = line.id();

        scene.add(Entity::Line(line));
        assert!(scene.contains(id));
        assert_eq!(scene.objects().len(), 1);

        let removed = scene.remove(id);
        assert!(removed.is_some());
        assert!(!scene.contains(id));
        assert!(scene.objects().is_empty());
    }

    #[test]
    fn test_snapshot_excludes_grid() {
        let mut scene = MemoryScene::new();
        scene.add(grid_line());
        scene.add(Entity::Line(Line::new(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        )));

        let snapshot = scene.to_snapshot();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.entities()[0].as_line().is_some());
    }

    #[test]
    fn test_load_snapshot_preserves_grid() {
        let mut scene = MemoryScene::new();
        scene.add(grid_line());
        scene.add(Entity::Line(Line::new(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        )));

        let empty = SceneSnapshot::capture(&[]);
        scene.load_snapshot(&empty);

        assert_eq!(scene.objects().len(), 1);
        assert!(scene.objects()[0].is_grid());
    }

    #[test]
    fn test_send_to_back() {
        let mut scene = MemoryScene::new();
        let a = Line::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        let b = Line::new(Point::new(0.0, 1.0), Point::new(1.0, 1.0));
        let (id_a, id_b) = (a.id(), b.id());
        scene.add(Entity::Line(a));
        scene.add(Entity::Line(b));

        scene.send_to_back(id_b);
        assert_eq!(scene.objects()[0].id(), id_b);
        assert_eq!(scene.objects()[1].id(), id_a);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut scene = MemoryScene::new();
        let a = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let b = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let id_b = b.id();
        scene.add(Entity::Line(a));
        scene.add(Entity::Line(b));

        assert_eq!(scene.hit_test(Point::new(50.0, 0.0), 2.0), Some(id_b));
        assert_eq!(scene.hit_test(Point::new(50.0, 50.0), 2.0), None);
    }

    #[test]
    fn test_snapshot_json_roundtrip() {
        let mut scene = MemoryScene::new();
        scene.add(Entity::Line(Line::new(
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
        )));

        let json = scene.to_snapshot().to_json().unwrap();
        let restored = MemoryScene::from_snapshot_json(&json).unwrap();
        assert_eq!(restored.objects(), scene.objects());
    }
}
