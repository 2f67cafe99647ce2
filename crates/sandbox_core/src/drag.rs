//! Single-constraint pointer dragging
//!
//! At most one object is dragged at a time. The grab point stays fixed in
//! the body's frame and a pivot joint pulls it toward the pointer.

use sandbox_math::Vec2;
use sandbox_physics::{JointKey, PhysicsWorld, PivotJoint};

use crate::registry::{ObjectId, ObjectRegistry};

/// Default cap on the force a drag joint may apply
pub const DEFAULT_MAX_DRAG_FORCE: f32 = 50_000.0;

/// Current drag state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        target: ObjectId,
        joint: JointKey,
    },
}

/// Owns the drag constraint; nothing else creates or removes it
#[derive(Debug)]
pub struct DragController {
    state: DragState,
    max_force: f32,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DRAG_FORCE)
    }
}

impl DragController {
    pub fn new(max_force: f32) -> Self {
        Self {
            state: DragState::Idle,
            max_force,
        }
    }

    #[inline]
    pub fn state(&self) -> DragState {
        self.state
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The object being dragged, if any
    pub fn target(&self) -> Option<ObjectId> {
        match self.state {
            DragState::Dragging { target, .. } => Some(target),
            DragState::Idle => None,
        }
    }

    pub fn max_force(&self) -> f32 {
        self.max_force
    }

    /// Press the pointer at `point`
    ///
    /// Grabs the registered dynamic body under the pointer. A press while
    /// already dragging, or over nothing grabbable, does nothing. Returns the
    /// grabbed object.
    pub fn pointer_down(
        &mut self,
        physics: &mut PhysicsWorld,
        registry: &ObjectRegistry,
        point: Vec2,
    ) -> Option<ObjectId> {
        if self.is_dragging() {
            return None;
        }

        let hit = physics.point_query_nearest(point, 0.0)?;
        let body = physics.get_body(hit.body)?;
        if !body.is_dynamic() {
            return None;
        }
        let target = registry.id_for_body(hit.body)?;
        let anchor = body.world_to_local(point);

        let joint = physics.add_joint(PivotJoint::new(hit.body, anchor, point, self.max_force))?;
        self.state = DragState::Dragging { target, joint };
        log::debug!("Drag started on {:?}", target);
        Some(target)
    }

    /// Move the pointer; the dragged object's anchor follows it
    pub fn update_pointer(&mut self, physics: &mut PhysicsWorld, point: Vec2) {
        let DragState::Dragging { target, joint } = self.state else {
            return;
        };
        match physics.get_joint_mut(joint) {
            Some(joint) => joint.target = point,
            None => {
                log::warn!("Drag joint for {:?} vanished; releasing", target);
                self.state = DragState::Idle;
            }
        }
    }

    /// Release the pointer; returns true if a drag ended
    pub fn pointer_up(&mut self, physics: &mut PhysicsWorld) -> bool {
        match self.state {
            DragState::Dragging { target, joint } => {
                physics.remove_joint(joint);
                self.state = DragState::Idle;
                log::debug!("Drag released from {:?}", target);
                true
            }
            DragState::Idle => false,
        }
    }

    /// Release the drag if it holds `id`
    pub fn release_if_target(&mut self, physics: &mut PhysicsWorld, id: ObjectId) -> bool {
        if self.target() == Some(id) {
            self.pointer_up(physics)
        } else {
            false
        }
    }
}
