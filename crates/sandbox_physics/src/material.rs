//! Physical material properties for collision response

use serde::{Serialize, Deserialize};

/// Physical material properties for collision response
///
/// Materials define how shapes interact during collisions: friction (how much
/// they resist sliding) and restitution (elasticity, bounciness).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicsMaterial {
    /// Friction coefficient (0.0 = ice, 1.0 = rubber, up to 2.0 = sticky)
    pub friction: f32,
    /// Restitution/elasticity (0.0 = no bounce, 1.0 = perfect bounce)
    pub restitution: f32,
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self {
            friction: 0.5,
            restitution: 0.5,
        }
    }
}

impl PhysicsMaterial {
    /// Upper bound accepted for friction
    pub const MAX_FRICTION: f32 = 2.0;

    /// Boundary material: grippy and fairly bouncy
    pub const BOUNDARY: Self = Self {
        friction: 1.0,
        restitution: 0.8,
    };

    /// Create a new physics material with custom friction and restitution
    ///
    /// Friction is clamped to [0.0, 2.0], restitution to [0.0, 1.0].
    pub fn new(friction: f32, restitution: f32) -> Self {
        Self {
            friction: friction.clamp(0.0, Self::MAX_FRICTION),
            restitution: restitution.clamp(0.0, 1.0),
        }
    }

    /// Combine two materials for collision response
    ///
    /// Uses geometric mean for friction and maximum for restitution
    /// (most bouncy surface wins).
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            friction: (self.friction * other.friction).sqrt(),
            restitution: self.restitution.max(other.restitution),
        }
    }

    /// Fraction of tangential velocity kept after a contact with this material
    pub fn tangent_retention(&self) -> f32 {
        (1.0 - self.friction).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material() {
        let material = PhysicsMaterial::default();
        assert_eq!(material.friction, 0.5);
        assert_eq!(material.restitution, 0.5);
    }

    #[test]
    fn test_new_clamps_values() {
        let material = PhysicsMaterial::new(2.5, -0.5);
        assert_eq!(material.friction, 2.0);
        assert_eq!(material.restitution, 0.0);

        let material = PhysicsMaterial::new(-1.0, 2.0);
        assert_eq!(material.friction, 0.0);
        assert_eq!(material.restitution, 1.0);
    }

    #[test]
    fn test_combine_geometric_mean_friction() {
        let slick = PhysicsMaterial::new(0.05, 0.1);
        let combined = slick.combine(&PhysicsMaterial::BOUNDARY);
        let expected_friction = (0.05_f32 * 1.0_f32).sqrt();
        assert!((combined.friction - expected_friction).abs() < 0.0001);
        assert_eq!(combined.restitution, 0.8);
    }

    #[test]
    fn test_combine_is_commutative() {
        let a = PhysicsMaterial::new(0.3, 0.5);
        let b = PhysicsMaterial::new(1.7, 0.2);

        let ab = a.combine(&b);
        let ba = b.combine(&a);

        assert!((ab.friction - ba.friction).abs() < 0.0001);
        assert_eq!(ab.restitution, ba.restitution);
    }

    #[test]
    fn test_tangent_retention_never_negative() {
        assert_eq!(PhysicsMaterial::new(2.0, 0.0).tangent_retention(), 0.0);
        assert!((PhysicsMaterial::new(0.25, 0.0).tangent_retention() - 0.75).abs() < 0.0001);
    }
}
