//! Collision detection for 2D bodies
//!
//! Bodies collide with static planes using their exact shapes. Body-body
//! contacts use each body's bounding circle, which is exact for balls and
//! a conservative approximation for polygons.

use crate::body::RigidBody2D;
use crate::shapes::Plane2D;
use sandbox_math::Vec2;

/// Contact information from a collision
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    /// Point of contact
    pub point: Vec2,
    /// Contact normal (see each test function for its direction)
    pub normal: Vec2,
    /// Penetration depth (positive means overlapping)
    pub penetration: f32,
}

impl Contact {
    /// Create a new contact
    pub fn new(point: Vec2, normal: Vec2, penetration: f32) -> Self {
        Self {
            point,
            normal,
            penetration,
        }
    }

    /// Check if this represents an actual collision (positive penetration)
    pub fn is_colliding(&self) -> bool {
        self.penetration > 0.0
    }
}

/// Test a body's shapes against a static plane
///
/// The contact normal is the plane normal (pointing from the plane toward
/// the open side, i.e. the direction the body is pushed out).
pub fn body_vs_plane(body: &RigidBody2D, plane: &Plane2D) -> Option<Contact> {
    let (signed_dist, point) = body.min_signed_distance(plane)?;
    if signed_dist < 0.0 {
        Some(Contact::new(point, plane.normal, -signed_dist))
    } else {
        None
    }
}

/// Circle vs circle test (normal points from A toward B)
pub fn circle_vs_circle(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32) -> Option<Contact> {
    let delta = center_b - center_a;
    let dist_sq = delta.length_squared();
    let min_dist = radius_a + radius_b;

    if dist_sq < min_dist * min_dist && dist_sq > 0.0001 {
        let dist = dist_sq.sqrt();
        let normal = delta / dist;
        let point = center_a + normal * radius_a;
        Some(Contact::new(point, normal, min_dist - dist))
    } else {
        None
    }
}

/// Bounding-circle test between two bodies (normal points from A toward B)
pub fn body_vs_body(a: &RigidBody2D, b: &RigidBody2D) -> Option<Contact> {
    if a.shapes.is_empty() || b.shapes.is_empty() {
        return None;
    }
    circle_vs_circle(a.position, a.bounding_radius(), b.position, b.bounding_radius())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::PhysicsMaterial;
    use crate::shapes::{Polygon, Shape};

    #[test]
    fn test_circle_resting_above_floor_no_contact() {
        let floor = Plane2D::from_point_normal(Vec2::new(0.0, 10.0), -Vec2::Y);
        let body = RigidBody2D::new_dynamic(Vec2::new(0.0, 8.0), 1.0, 1.0)
            .with_shape(Shape::circle(1.0, PhysicsMaterial::default()));
        assert!(body_vs_plane(&body, &floor).is_none());
    }

    #[test]
    fn test_circle_penetrating_floor() {
        let floor = Plane2D::from_point_normal(Vec2::new(0.0, 10.0), -Vec2::Y);
        let body = RigidBody2D::new_dynamic(Vec2::new(0.0, 9.5), 1.0, 1.0)
            .with_shape(Shape::circle(1.0, PhysicsMaterial::default()));
        let contact = body_vs_plane(&body, &floor).expect("should collide");
        assert!((contact.penetration - 0.5).abs() < 0.0001);
        assert_eq!(contact.normal, -Vec2::Y);
    }

    #[test]
    fn test_rotated_box_uses_deepest_corner() {
        let floor = Plane2D::from_point_normal(Vec2::new(0.0, 10.0), -Vec2::Y);
        let mut body = RigidBody2D::new_dynamic(Vec2::new(0.0, 9.0), 1.0, 1.0)
            .with_shape(Shape::polygon(Polygon::rectangle(2.0, 2.0).vertices, PhysicsMaterial::default()));
        // Axis aligned: bottom edge sits exactly at y = 10
        assert!(body_vs_plane(&body, &floor).is_none());

        // Rotated 45 degrees the corner reaches sqrt(2) below the center
        body.angle = std::f32::consts::FRAC_PI_4;
        let contact = body_vs_plane(&body, &floor).expect("corner should penetrate");
        assert!((contact.penetration - (2.0_f32.sqrt() - 1.0)).abs() < 0.001);
    }

    #[test]
    fn test_circle_vs_circle() {
        let contact = circle_vs_circle(Vec2::ZERO, 1.0, Vec2::new(1.5, 0.0), 1.0).unwrap();
        assert!((contact.penetration - 0.5).abs() < 0.0001);
        assert_eq!(contact.normal, Vec2::X);

        assert!(circle_vs_circle(Vec2::ZERO, 1.0, Vec2::new(3.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn test_shapeless_bodies_never_collide() {
        let a = RigidBody2D::new_dynamic(Vec2::ZERO, 1.0, 1.0);
        let b = RigidBody2D::new_dynamic(Vec2::new(0.1, 0.0), 1.0, 1.0);
        assert!(body_vs_body(&a, &b).is_none());
    }
}
