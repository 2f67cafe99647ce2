//! Rigid body types for 2D physics simulation

use crate::material::PhysicsMaterial;
use crate::shapes::{Plane2D, Shape};
use sandbox_math::Vec2;
use slotmap::new_key_type;

// Define generational key type for rigid bodies
new_key_type! {
    /// Key to a rigid body in the physics world
    ///
    /// Uses generational indexing to prevent the ABA problem where a handle
    /// could point to a reused slot. If a body is removed and its slot reused,
    /// old keys will return None instead of pointing to the wrong body.
    pub struct BodyKey;
}

/// How a body participates in the simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyType {
    /// Moved by forces, gravity, constraints and collisions
    Dynamic,
    /// Never moves
    Static,
}

/// A 2D rigid body with position, rotation, velocity and a shape list
#[derive(Clone, Debug)]
pub struct RigidBody2D {
    /// Position of the body origin in world coordinates
    pub position: Vec2,
    /// Rotation in radians
    pub angle: f32,
    /// Linear velocity (units per second)
    pub velocity: Vec2,
    /// Angular velocity (radians per second)
    pub angular_velocity: f32,
    /// Mass of the body
    pub mass: f32,
    /// Moment of inertia about the body origin
    pub moment: f32,
    /// Whether this body is affected by gravity
    pub affected_by_gravity: bool,
    /// Collision shapes in body-local coordinates
    pub shapes: Vec<Shape>,
    body_type: BodyType,
    /// Force accumulated since the last step
    force: Vec2,
    /// Torque accumulated since the last step
    torque: f32,
}

impl RigidBody2D {
    /// Create a dynamic body
    ///
    /// Mass and moment are floored at a small positive value so integration
    /// never divides by zero.
    pub fn new_dynamic(position: Vec2, mass: f32, moment: f32) -> Self {
        Self {
            position,
            angle: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            mass: mass.max(f32::EPSILON),
            moment: moment.max(f32::EPSILON),
            affected_by_gravity: true,
            shapes: Vec::new(),
            body_type: BodyType::Dynamic,
            force: Vec2::ZERO,
            torque: 0.0,
        }
    }

    /// Create a static body that doesn't move
    pub fn new_static(position: Vec2) -> Self {
        let mut body = Self::new_dynamic(position, f32::INFINITY, f32::INFINITY);
        body.body_type = BodyType::Static;
        body.affected_by_gravity = false;
        body
    }

    /// Attach a shape
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shapes.push(shape);
        self
    }

    /// Set the velocity of this body
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set whether this body is affected by gravity
    pub fn with_gravity(mut self, affected: bool) -> Self {
        self.affected_by_gravity = affected;
        self
    }

    /// The body's simulation type
    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    /// True for bodies moved by the simulation
    pub fn is_dynamic(&self) -> bool {
        self.body_type == BodyType::Dynamic
    }

    /// Speed (velocity magnitude)
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Material of the first shape, used for whole-body collision response
    pub fn material(&self) -> PhysicsMaterial {
        self.shapes.first().map(|s| s.material).unwrap_or_default()
    }

    /// Convert a body-local point to world coordinates
    pub fn local_to_world(&self, local: Vec2) -> Vec2 {
        self.position + local.rotated(self.angle)
    }

    /// Convert a world point to body-local coordinates
    pub fn world_to_local(&self, world: Vec2) -> Vec2 {
        (world - self.position).rotated(-self.angle)
    }

    /// Velocity of a world point rigidly attached to this body
    pub fn velocity_at_world_point(&self, world: Vec2) -> Vec2 {
        self.velocity + Vec2::cross_scalar(self.angular_velocity, world - self.position)
    }

    /// Accumulate a world-frame force applied at a body-local point
    ///
    /// Takes effect at the next step; static bodies ignore forces.
    pub fn apply_force_at_local_point(&mut self, force: Vec2, local_point: Vec2) {
        if !self.is_dynamic() {
            return;
        }
        let r = local_point.rotated(self.angle);
        self.force += force;
        self.torque += r.cross(force);
    }

    /// Force accumulated since the last step
    pub fn accumulated_force(&self) -> Vec2 {
        self.force
    }

    /// Integrate accumulated forces and gravity into velocity and position
    pub(crate) fn integrate(&mut self, gravity: Vec2, dt: f32) {
        if !self.is_dynamic() {
            self.clear_forces();
            return;
        }
        let mut acceleration = self.force / self.mass;
        if self.affected_by_gravity {
            acceleration += gravity;
        }
        self.velocity += acceleration * dt;
        self.angular_velocity += self.torque / self.moment * dt;

        self.position += self.velocity * dt;
        self.angle += self.angular_velocity * dt;
        self.clear_forces();
    }

    fn clear_forces(&mut self) {
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }

    /// Update the position
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Apply a positional correction (e.g., from collision resolution)
    pub fn apply_correction(&mut self, correction: Vec2) {
        self.position += correction;
    }

    /// Radius of the smallest circle around the body origin enclosing all shapes
    pub fn bounding_radius(&self) -> f32 {
        self.shapes.iter().map(Shape::bounding_radius).fold(0.0, f32::max)
    }

    /// Distance from a world point to the nearest shape (0.0 when inside any)
    ///
    /// Returns `None` for bodies without shapes.
    pub fn distance_to_point(&self, world: Vec2) -> Option<f32> {
        let local = self.world_to_local(world);
        self.shapes
            .iter()
            .map(|s| s.distance_local(local))
            .reduce(f32::min)
    }

    /// Lowest signed distance of any shape point relative to `plane`, with that point
    pub(crate) fn min_signed_distance(&self, plane: &Plane2D) -> Option<(f32, Vec2)> {
        use crate::shapes::ShapeGeometry;
        let mut best: Option<(f32, Vec2)> = None;
        for shape in &self.shapes {
            let candidate = match &shape.geometry {
                ShapeGeometry::Circle(c) => {
                    let center = self.local_to_world(c.offset);
                    let point = center - plane.normal * c.radius;
                    (plane.signed_distance(center) - c.radius, point)
                }
                ShapeGeometry::Polygon(p) => {
                    let mut deepest = (f32::MAX, self.position);
                    for v in &p.vertices {
                        let world = self.local_to_world(*v);
                        let d = plane.signed_distance(world);
                        if d < deepest.0 {
                            deepest = (d, world);
                        }
                    }
                    deepest
                }
            };
            if best.map_or(true, |(d, _)| candidate.0 < d) {
                best = Some(candidate);
            }
        }
        best
    }
}

/// A static collider (floor, wall) that bodies collide with but which never moves
#[derive(Clone, Copy, Debug)]
pub struct StaticCollider {
    pub plane: Plane2D,
    pub material: PhysicsMaterial,
}

impl StaticCollider {
    /// Create a static plane collider
    pub fn plane(normal: Vec2, distance: f32, material: PhysicsMaterial) -> Self {
        Self {
            plane: Plane2D::new(normal, distance),
            material,
        }
    }

    /// Floor surface at the given y (y grows downward, open side above)
    pub fn floor(y: f32, material: PhysicsMaterial) -> Self {
        Self {
            plane: Plane2D::from_point_normal(Vec2::new(0.0, y), -Vec2::Y),
            material,
        }
    }

    /// Left wall surface at the given x (open side to the right)
    pub fn left_wall(x: f32, material: PhysicsMaterial) -> Self {
        Self {
            plane: Plane2D::from_point_normal(Vec2::new(x, 0.0), Vec2::X),
            material,
        }
    }

    /// Right wall surface at the given x (open side to the left)
    pub fn right_wall(x: f32, material: PhysicsMaterial) -> Self {
        Self {
            plane: Plane2D::from_point_normal(Vec2::new(x, 0.0), -Vec2::X),
            material,
        }
    }
}
