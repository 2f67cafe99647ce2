//! Registry of spawned objects
//!
//! The registry is the only place bodies are created or destroyed on behalf
//! of the user. Every live object has exactly one record holding its body
//! key, kind and display colour; removing the object removes the record, the
//! body, and any drag or selection that referenced it in one call.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use sandbox_math::Vec2;
use sandbox_physics::{BodyKey, PhysicsWorld};
use slotmap::{new_key_type, SlotMap};

use crate::drag::DragController;
use crate::object::{ObjectKind, ShapeCategory, SpawnParams};
use crate::palette::{random_color, Color};
use crate::progression::{ProgressEvent, ProgressionEngine};

new_key_type! {
    /// Identifier of a spawned object, stable for its lifetime
    pub struct ObjectId;
}

/// Presentation metadata for one spawned object
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectRecord {
    pub body: BodyKey,
    pub kind: ObjectKind,
    pub color: Color,
}

/// Tracks spawned objects, their colours and the current selection
#[derive(Debug)]
pub struct ObjectRegistry {
    objects: SlotMap<ObjectId, ObjectRecord>,
    by_body: HashMap<BodyKey, ObjectId>,
    selected: Option<ObjectId>,
    rng: StdRng,
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectRegistry {
    /// Create an empty registry with a randomly seeded RNG
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create an empty registry with deterministic colours and polygons
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            objects: SlotMap::with_key(),
            by_body: HashMap::new(),
            selected: None,
            rng,
        }
    }

    /// Create an object's body, colour it, and report it to progression
    pub fn spawn(
        &mut self,
        physics: &mut PhysicsWorld,
        progression: &mut ProgressionEngine,
        kind: ObjectKind,
        position: Vec2,
        params: SpawnParams,
    ) -> ObjectId {
        let params = params.clamped();
        let body = physics.add_body(kind.build_body(position, &params, &mut self.rng));
        let color = random_color(&mut self.rng);
        let id = self.objects.insert(ObjectRecord { body, kind, color });
        self.by_body.insert(body, id);

        log::debug!("Spawned {} {:?} at ({:.1}, {:.1})", kind.name(), id, position.x, position.y);
        progression.raise(ProgressEvent::ObjectCreated);
        id
    }

    /// Remove one object
    ///
    /// Releases the drag and clears the selection if either referenced it.
    /// Unknown ids are ignored; returns true if something was removed.
    pub fn remove(&mut self, physics: &mut PhysicsWorld, drag: &mut DragController, id: ObjectId) -> bool {
        let Some(record) = self.objects.get(id).copied() else {
            return false;
        };
        drag.release_if_target(physics, id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        physics.remove_body(record.body);
        self.by_body.remove(&record.body);
        self.objects.remove(id);
        log::debug!("Removed {:?}", id);
        true
    }

    /// Remove every object
    ///
    /// The drag and selection are cleared before any body is destroyed.
    /// Returns the number of objects removed.
    pub fn remove_all(&mut self, physics: &mut PhysicsWorld, drag: &mut DragController) -> usize {
        drag.pointer_up(physics);
        self.selected = None;

        let count = self.objects.len();
        for (_, record) in self.objects.drain() {
            physics.remove_body(record.body);
        }
        self.by_body.clear();
        if count > 0 {
            log::info!("Cleared {} objects", count);
        }
        count
    }

    /// Select the dynamic object under `point`
    ///
    /// A click over nothing selectable keeps the current selection.
    pub fn select_at(&mut self, physics: &PhysicsWorld, point: Vec2) -> Option<ObjectId> {
        let hit = physics
            .point_query_nearest(point, 0.0)
            .filter(|hit| physics.get_body(hit.body).is_some_and(|b| b.is_dynamic()))
            .and_then(|hit| self.id_for_body(hit.body))?;
        self.selected = Some(hit);
        Some(hit)
    }

    /// Select an object directly; unknown ids clear the selection
    pub fn select(&mut self, id: ObjectId) {
        self.selected = self.objects.contains_key(id).then_some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    #[inline]
    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    pub fn get(&self, id: ObjectId) -> Option<&ObjectRecord> {
        self.objects.get(id)
    }

    pub fn body(&self, id: ObjectId) -> Option<BodyKey> {
        self.objects.get(id).map(|r| r.body)
    }

    pub fn color(&self, id: ObjectId) -> Option<Color> {
        self.objects.get(id).map(|r| r.color)
    }

    /// Reverse lookup from a physics body
    pub fn id_for_body(&self, body: BodyKey) -> Option<ObjectId> {
        self.by_body.get(&body).copied()
    }

    /// Current shape category of an object's body
    pub fn category(&self, physics: &PhysicsWorld, id: ObjectId) -> Option<ShapeCategory> {
        let body = physics.get_body(self.body(id)?)?;
        Some(ShapeCategory::classify(body))
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &ObjectRecord)> {
        self.objects.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
