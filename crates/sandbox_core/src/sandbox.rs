//! The sandbox aggregate
//!
//! [`Sandbox`] owns the physics world and every core component, and routes
//! each operation to the component that owns the state it changes.

use sandbox_math::Vec2;
use sandbox_physics::{PhysicsConfig, PhysicsMaterial, PhysicsWorld, StaticCollider};
use serde::{Serialize, Deserialize};

use crate::drag::DragController;
use crate::forces::ForceField;
use crate::object::{ObjectKind, ShapeCategory, SpawnParams};
use crate::progression::{ProgressEvent, ProgressionEngine};
use crate::registry::{ObjectId, ObjectRegistry};
use crate::snapshot::{FrameSnapshot, ObjectView, SelectedInfo, ViewFlags};

/// Speed above which a body counts toward speed tasks
pub const DEFAULT_SPEED_THRESHOLD: f32 = 100.0;

/// Size and material of the static walls around the play area
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    /// Inset of the floor and walls from the screen edges
    pub wall_thickness: f32,
    pub friction: f32,
    pub elasticity: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 700.0,
            wall_thickness: 20.0,
            friction: PhysicsMaterial::BOUNDARY.friction,
            elasticity: PhysicsMaterial::BOUNDARY.restitution,
        }
    }
}

impl ArenaConfig {
    /// Floor, left wall and right wall colliders
    pub fn colliders(&self) -> [StaticCollider; 3] {
        let material = PhysicsMaterial::new(self.friction, self.elasticity);
        [
            StaticCollider::floor(self.height - self.wall_thickness, material),
            StaticCollider::left_wall(self.wall_thickness, material),
            StaticCollider::right_wall(self.width - self.wall_thickness, material),
        ]
    }
}

/// Physics world plus registry, drag, forces and progression
pub struct Sandbox {
    physics: PhysicsWorld,
    registry: ObjectRegistry,
    drag: DragController,
    forces: ForceField,
    progression: ProgressionEngine,
    speed_threshold: f32,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl Sandbox {
    /// Create an empty sandbox without walls
    pub fn new(physics: PhysicsConfig) -> Self {
        Self {
            physics: PhysicsWorld::with_config(physics),
            registry: ObjectRegistry::new(),
            drag: DragController::default(),
            forces: ForceField::default(),
            progression: ProgressionEngine::default(),
            speed_threshold: DEFAULT_SPEED_THRESHOLD,
        }
    }

    /// Add the arena's floor and walls
    pub fn with_arena(mut self, arena: &ArenaConfig) -> Self {
        for collider in arena.colliders() {
            self.physics.add_static_collider(collider);
        }
        self
    }

    pub fn with_forces(mut self, forces: ForceField) -> Self {
        self.forces = forces;
        self
    }

    pub fn with_progression(mut self, progression: ProgressionEngine) -> Self {
        self.progression = progression;
        self
    }

    pub fn with_drag(mut self, drag: DragController) -> Self {
        self.drag = drag;
        self
    }

    /// Seed colour and polygon generation
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.registry = ObjectRegistry::with_seed(seed);
        self
    }

    pub fn with_speed_threshold(mut self, threshold: f32) -> Self {
        self.speed_threshold = threshold;
        self
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn forces(&self) -> &ForceField {
        &self.forces
    }

    pub fn forces_mut(&mut self) -> &mut ForceField {
        &mut self.forces
    }

    pub fn progression(&self) -> &ProgressionEngine {
        &self.progression
    }

    pub fn progression_mut(&mut self) -> &mut ProgressionEngine {
        &mut self.progression
    }

    pub fn spawn(&mut self, kind: ObjectKind, position: Vec2, params: SpawnParams) -> ObjectId {
        self.registry
            .spawn(&mut self.physics, &mut self.progression, kind, position, params)
    }

    pub fn remove(&mut self, id: ObjectId) -> bool {
        self.registry.remove(&mut self.physics, &mut self.drag, id)
    }

    /// Remove every object; returns how many were removed
    pub fn clear(&mut self) -> usize {
        self.registry.remove_all(&mut self.physics, &mut self.drag)
    }

    /// Press the pointer; a successful grab counts toward drag tasks
    pub fn pointer_down(&mut self, point: Vec2) -> Option<ObjectId> {
        let grabbed = self.drag.pointer_down(&mut self.physics, &self.registry, point)?;
        self.progression.raise(ProgressEvent::ObjectDragged);
        Some(grabbed)
    }

    pub fn pointer_moved(&mut self, point: Vec2) {
        self.drag.update_pointer(&mut self.physics, point);
    }

    pub fn pointer_up(&mut self) -> bool {
        self.drag.pointer_up(&mut self.physics)
    }

    pub fn select_at(&mut self, point: Vec2) -> Option<ObjectId> {
        self.registry.select_at(&self.physics, point)
    }

    /// Push the force field onto every dynamic body
    pub fn apply_forces(&mut self) -> usize {
        self.forces.apply(&mut self.physics)
    }

    pub fn step_physics(&mut self, dt: f32) {
        self.physics.step(dt);
    }

    /// Raise speed and shape-usage events for every dynamic body
    pub fn evaluate_tasks(&mut self) {
        let events: Vec<ProgressEvent> = self
            .physics
            .dynamic_bodies()
            .flat_map(|(_, body)| {
                let fast = (body.speed() > self.speed_threshold).then_some(ProgressEvent::SpeedExceeded);
                fast.into_iter()
                    .chain(std::iter::once(ProgressEvent::ShapeUsed(ShapeCategory::classify(body))))
            })
            .collect();
        for event in events {
            self.progression.raise(event);
        }
    }

    /// Per-frame display animation
    pub fn animate(&mut self) {
        self.progression.animate();
    }

    /// Capture the current state for presentation
    pub fn snapshot(&self) -> FrameSnapshot {
        let selected = self.registry.selected();
        let dragged = self.drag.target();

        let objects = self
            .registry
            .iter()
            .filter_map(|(id, record)| {
                let body = self.physics.get_body(record.body)?;
                let mut flags = ViewFlags::NONE;
                flags.set(ViewFlags::SELECTED, selected == Some(id));
                flags.set(ViewFlags::DRAG_TARGET, dragged == Some(id));
                Some(ObjectView {
                    id,
                    kind: record.kind,
                    color: record.color,
                    position: body.position,
                    angle: body.angle,
                    flags,
                })
            })
            .collect();

        let selected = selected.and_then(|id| {
            let body = self.physics.get_body(self.registry.body(id)?)?;
            let material = body.material();
            Some(SelectedInfo {
                id,
                category: ShapeCategory::classify(body),
                mass: body.mass,
                position: body.position,
                velocity: body.velocity,
                elasticity: material.restitution,
                friction: material.friction,
            })
        });

        FrameSnapshot {
            objects,
            progression: (&self.progression).into(),
            forces: (&self.forces).into(),
            selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::{ProgressionConfig, TaskDefinition, TaskTrigger};

    fn sandbox() -> Sandbox {
        Sandbox::default().with_arena(&ArenaConfig::default()).with_seed(4)
    }

    #[test]
    fn test_arena_colliders() {
        let sandbox = sandbox();
        assert_eq!(sandbox.physics().static_colliders().len(), 3);
    }

    #[test]
    fn test_pointer_down_raises_drag_event() {
        let mut sandbox = sandbox().with_progression(ProgressionEngine::new(ProgressionConfig {
            seed: Some(1),
            active_tasks: 1,
            pool: vec![TaskDefinition::new("Drag objects", 3, 40).with_trigger(TaskTrigger::ObjectDragged)],
            ..ProgressionConfig::default()
        }));
        let at = Vec2::new(300.0, 300.0);
        sandbox.spawn(ObjectKind::Ball, at, SpawnParams::default());

        assert!(sandbox.pointer_down(at).is_some());
        assert_eq!(sandbox.progression().active_tasks()[0].progress(), 1);

        // Missing the body raises nothing
        sandbox.pointer_up();
        assert!(sandbox.pointer_down(Vec2::new(1000.0, 100.0)).is_none());
        assert_eq!(sandbox.progression().active_tasks()[0].progress(), 1);
    }

    #[test]
    fn test_snapshot_flags() {
        let mut sandbox = sandbox();
        let a = sandbox.spawn(ObjectKind::Ball, Vec2::new(200.0, 200.0), SpawnParams::default());
        let b = sandbox.spawn(ObjectKind::Box, Vec2::new(500.0, 200.0), SpawnParams::default());
        sandbox.select_at(Vec2::new(200.0, 200.0));
        sandbox.pointer_down(Vec2::new(500.0, 200.0));

        let snapshot = sandbox.snapshot();
        assert_eq!(snapshot.objects.len(), 2);
        let view_a = snapshot.object(a).unwrap();
        let view_b = snapshot.object(b).unwrap();
        assert!(view_a.is_selected() && !view_a.is_drag_target());
        assert!(view_b.is_drag_target() && !view_b.is_selected());

        let info = snapshot.selected.unwrap();
        assert_eq!(info.id, a);
        assert_eq!(info.category, ShapeCategory::Ball);
        assert_eq!(info.mass, SpawnParams::default().mass);
    }

    #[test]
    fn test_evaluate_tasks_counts_each_shape_once() {
        let mut sandbox = sandbox().with_progression(ProgressionEngine::new(ProgressionConfig {
            seed: Some(1),
            active_tasks: 1,
            pool: vec![TaskDefinition::new("Use all shapes", 4, 75)
                .with_trigger(TaskTrigger::ShapeUsed)
                .with_policy(crate::progression::ProgressPolicy::DistinctCategory)],
            ..ProgressionConfig::default()
        }));
        sandbox.spawn(ObjectKind::Ball, Vec2::new(200.0, 200.0), SpawnParams::default());
        sandbox.spawn(ObjectKind::Triangle, Vec2::new(400.0, 200.0), SpawnParams::default());

        for _ in 0..10 {
            sandbox.evaluate_tasks();
        }
        assert_eq!(sandbox.progression().active_tasks()[0].progress(), 2);
    }

    #[test]
    fn test_evaluate_tasks_speed_events() {
        let mut sandbox = sandbox().with_progression(ProgressionEngine::new(ProgressionConfig {
            seed: Some(1),
            active_tasks: 1,
            pool: vec![TaskDefinition::new("Reach speed 100", 5, 100).with_trigger(TaskTrigger::SpeedExceeded)],
            ..ProgressionConfig::default()
        }));
        sandbox.spawn(ObjectKind::Ball, Vec2::new(200.0, 200.0), SpawnParams::default());

        // At rest: nothing
        sandbox.evaluate_tasks();
        assert_eq!(sandbox.progression().active_tasks()[0].progress(), 0);

        // Fall until faster than the threshold (900 px/s² reaches 100 px/s in ~7 frames)
        for _ in 0..10 {
            sandbox.step_physics(1.0 / 60.0);
        }
        sandbox.evaluate_tasks();
        assert_eq!(sandbox.progression().active_tasks()[0].progress(), 1);
    }
}
