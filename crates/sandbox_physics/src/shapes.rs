//! Collision shapes for 2D physics
//!
//! Shapes are stored in body-local coordinates. Static boundaries use
//! infinite planes expressed in world coordinates.

use crate::material::PhysicsMaterial;
use sandbox_math::{polygon, Vec2};

/// A circle in body-local coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    /// Center offset from the body origin
    pub offset: Vec2,
    pub radius: f32,
}

impl Circle {
    /// Create a circle centered on the body origin
    pub fn new(radius: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            radius,
        }
    }

    /// Check if a local point is inside or on the circle
    pub fn contains(&self, point: Vec2) -> bool {
        (point - self.offset).length_squared() <= self.radius * self.radius
    }
}

/// A polygon in body-local coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vec2>,
}

impl Polygon {
    /// Create a polygon from local vertices
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self { vertices }
    }

    /// Axis-aligned box of the given width and height centered on the origin
    pub fn rectangle(width: f32, height: f32) -> Self {
        let hw = width * 0.5;
        let hh = height * 0.5;
        Self::new(vec![
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ])
    }
}

/// Geometry of a shape attached to a body
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeGeometry {
    Circle(Circle),
    Polygon(Polygon),
}

/// A shape attached to a body: geometry plus surface material
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub geometry: ShapeGeometry,
    pub material: PhysicsMaterial,
}

impl Shape {
    /// Circle shape centered on the body origin
    pub fn circle(radius: f32, material: PhysicsMaterial) -> Self {
        Self {
            geometry: ShapeGeometry::Circle(Circle::new(radius)),
            material,
        }
    }

    /// Polygon shape from local vertices
    pub fn polygon(vertices: Vec<Vec2>, material: PhysicsMaterial) -> Self {
        Self {
            geometry: ShapeGeometry::Polygon(Polygon::new(vertices)),
            material,
        }
    }

    /// Number of polygon vertices, or `None` for circles
    pub fn vertex_count(&self) -> Option<usize> {
        match &self.geometry {
            ShapeGeometry::Circle(_) => None,
            ShapeGeometry::Polygon(p) => Some(p.vertices.len()),
        }
    }

    /// Check if a local point is inside or on the shape
    pub fn contains_local(&self, point: Vec2) -> bool {
        match &self.geometry {
            ShapeGeometry::Circle(c) => c.contains(point),
            ShapeGeometry::Polygon(p) => polygon::contains_point(&p.vertices, point),
        }
    }

    /// Distance from a local point to the shape (0.0 when inside)
    pub fn distance_local(&self, point: Vec2) -> f32 {
        if self.contains_local(point) {
            return 0.0;
        }
        match &self.geometry {
            ShapeGeometry::Circle(c) => ((point - c.offset).length() - c.radius).max(0.0),
            ShapeGeometry::Polygon(p) => polygon::distance_to_edges(&p.vertices, point),
        }
    }

    /// Radius of the smallest origin-centered circle enclosing the shape
    pub fn bounding_radius(&self) -> f32 {
        match &self.geometry {
            ShapeGeometry::Circle(c) => c.offset.length() + c.radius,
            ShapeGeometry::Polygon(p) => polygon::bounding_radius(&p.vertices),
        }
    }
}

/// Moment of inertia for a solid or hollow circle
pub fn moment_for_circle(mass: f32, inner_radius: f32, outer_radius: f32, offset: Vec2) -> f32 {
    mass * (0.5 * (inner_radius * inner_radius + outer_radius * outer_radius) + offset.length_squared())
}

/// Moment of inertia for a solid box centered on the body origin
pub fn moment_for_box(mass: f32, width: f32, height: f32) -> f32 {
    mass * (width * width + height * height) / 12.0
}

/// Moment of inertia for a solid polygon about the body origin
pub fn moment_for_poly(mass: f32, vertices: &[Vec2]) -> f32 {
    if vertices.len() < 3 {
        return mass;
    }
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        let cross = a.cross(b).abs();
        numerator += cross * (a.dot(*a) + a.dot(b) + b.dot(b));
        denominator += cross;
    }
    if denominator <= f32::EPSILON {
        return mass;
    }
    mass * numerator / (6.0 * denominator)
}

/// A 2D infinite plane (a line with a solid side)
///
/// The plane equation is: normal · point = distance.
/// Points with normal · point > distance are on the open side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane2D {
    /// Unit normal pointing to the open side
    pub normal: Vec2,
    /// Signed distance from origin along the normal
    pub distance: f32,
}

impl Plane2D {
    /// Create a new plane from a normal and distance
    ///
    /// The normal will be normalized automatically.
    pub fn new(normal: Vec2, distance: f32) -> Self {
        Self {
            normal: normal.normalized(),
            distance,
        }
    }

    /// Create a plane from a point on the plane and a normal
    pub fn from_point_normal(point: Vec2, normal: Vec2) -> Self {
        let n = normal.normalized();
        Self {
            normal: n,
            distance: n.dot(point),
        }
    }

    /// Calculate the signed distance from a point to the plane
    pub fn signed_distance(&self, point: Vec2) -> f32 {
        self.normal.dot(point) - self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_contains() {
        let shape = Shape::circle(1.0, PhysicsMaterial::default());
        assert!(shape.contains_local(Vec2::ZERO));
        assert!(shape.contains_local(Vec2::new(1.0, 0.0)));
        assert!(!shape.contains_local(Vec2::new(1.1, 0.0)));
        assert_eq!(shape.vertex_count(), None);
    }

    #[test]
    fn test_rectangle_vertices() {
        let rect = Polygon::rectangle(4.0, 2.0);
        assert_eq!(rect.vertices.len(), 4);
        assert_eq!(rect.vertices[0], Vec2::new(-2.0, -1.0));
        assert_eq!(rect.vertices[2], Vec2::new(2.0, 1.0));
    }

    #[test]
    fn test_distance_local() {
        let shape = Shape::circle(1.0, PhysicsMaterial::default());
        assert_eq!(shape.distance_local(Vec2::new(0.5, 0.0)), 0.0);
        assert!((shape.distance_local(Vec2::new(3.0, 0.0)) - 2.0).abs() < 0.0001);

        let square = Shape::polygon(Polygon::rectangle(2.0, 2.0).vertices, PhysicsMaterial::default());
        assert_eq!(square.distance_local(Vec2::ZERO), 0.0);
        assert!((square.distance_local(Vec2::new(0.0, 4.0)) - 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_moment_for_box_matches_poly() {
        let rect = Polygon::rectangle(2.0, 4.0);
        let from_box = moment_for_box(3.0, 2.0, 4.0);
        let from_poly = moment_for_poly(3.0, &rect.vertices);
        assert!((from_box - from_poly).abs() < 0.001);
    }

    #[test]
    fn test_moment_for_circle() {
        // Solid disc: m * r^2 / 2
        assert!((moment_for_circle(2.0, 0.0, 3.0, Vec2::ZERO) - 9.0).abs() < 0.0001);
    }

    #[test]
    fn test_plane_signed_distance() {
        // Floor at y = 10 in a y-down world: open side is above (smaller y)
        let floor = Plane2D::from_point_normal(Vec2::new(0.0, 10.0), -Vec2::Y);
        assert!((floor.signed_distance(Vec2::new(5.0, 4.0)) - 6.0).abs() < 0.0001);
        assert!(floor.signed_distance(Vec2::new(0.0, 12.0)) < 0.0);
    }
}
