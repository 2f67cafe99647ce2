//! Pivot joints pinning a point on a body to a world target

use crate::body::{BodyKey, RigidBody2D};
use sandbox_math::Vec2;
use slotmap::new_key_type;

new_key_type! {
    /// Key to a joint in the physics world
    pub struct JointKey;
}

/// Fraction of the positional error corrected per step
const ERROR_BIAS: f32 = 0.2;

/// A pivot joint between a body anchor and a world-space target point
///
/// Each step the joint applies the force needed to bring the anchor's
/// velocity toward closing the gap, capped at `max_force`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PivotJoint {
    /// The constrained body
    pub body: BodyKey,
    /// Anchor in body-local coordinates
    pub anchor_local: Vec2,
    /// World point the anchor is pulled toward
    pub target: Vec2,
    /// Maximum force the joint may apply
    pub max_force: f32,
}

impl PivotJoint {
    /// Create a joint pinning `anchor_local` on `body` to `target`
    pub fn new(body: BodyKey, anchor_local: Vec2, target: Vec2, max_force: f32) -> Self {
        Self {
            body,
            anchor_local,
            target,
            max_force,
        }
    }

    /// Compute the capped corrective force and apply it to the body
    ///
    /// Returns the force applied.
    pub(crate) fn solve(&self, body: &mut RigidBody2D, dt: f32) -> Vec2 {
        if !body.is_dynamic() || dt <= 0.0 {
            return Vec2::ZERO;
        }
        let anchor_world = body.local_to_world(self.anchor_local);
        let error = self.target - anchor_world;
        let desired_velocity = error * (ERROR_BIAS / dt);
        let current_velocity = body.velocity_at_world_point(anchor_world);

        let force = ((desired_velocity - current_velocity) * (body.mass / dt)).clamp_length(self.max_force);
        body.apply_force_at_local_point(force, self.anchor_local);
        force
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::PhysicsMaterial;
    use crate::shapes::Shape;
    use slotmap::SlotMap;

    fn key() -> BodyKey {
        let mut map: SlotMap<BodyKey, ()> = SlotMap::with_key();
        map.insert(())
    }

    #[test]
    fn test_force_is_capped() {
        let mut body = RigidBody2D::new_dynamic(Vec2::ZERO, 10.0, 10.0)
            .with_shape(Shape::circle(1.0, PhysicsMaterial::default()));
        let joint = PivotJoint::new(key(), Vec2::ZERO, Vec2::new(1000.0, 0.0), 500.0);
        let force = joint.solve(&mut body, 1.0 / 60.0);
        assert!((force.length() - 500.0).abs() < 0.01);
        assert!(force.x > 0.0);
    }

    #[test]
    fn test_no_force_at_target_when_still() {
        let mut body = RigidBody2D::new_dynamic(Vec2::new(3.0, 4.0), 1.0, 1.0);
        let joint = PivotJoint::new(key(), Vec2::ZERO, Vec2::new(3.0, 4.0), 500.0);
        let force = joint.solve(&mut body, 1.0 / 60.0);
        assert_eq!(force, Vec2::ZERO);
    }

    #[test]
    fn test_static_body_unaffected() {
        let mut body = RigidBody2D::new_static(Vec2::ZERO);
        let joint = PivotJoint::new(key(), Vec2::ZERO, Vec2::new(10.0, 0.0), 500.0);
        assert_eq!(joint.solve(&mut body, 1.0 / 60.0), Vec2::ZERO);
    }
}
