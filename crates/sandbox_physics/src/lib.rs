//! 2D Physics simulation for the sandbox
//!
//! This crate provides physics simulation for 2D rigid bodies, including:
//! - Collision shapes (circles, polygons, static planes)
//! - Collision detection
//! - Rigid body dynamics with gravity and applied forces
//! - Pivot joints for pointer dragging
//! - Nearest-point queries

pub mod body;
pub mod collision;
pub mod joint;
pub mod material;
pub mod shapes;
pub mod world;

// Re-export commonly used types
pub use body::{BodyKey, BodyType, RigidBody2D, StaticCollider};
pub use collision::{body_vs_body, body_vs_plane, circle_vs_circle, Contact};
pub use joint::{JointKey, PivotJoint};
pub use material::PhysicsMaterial;
pub use shapes::{moment_for_box, moment_for_circle, moment_for_poly, Circle, Plane2D, Polygon, Shape, ShapeGeometry};
pub use world::{PhysicsConfig, PhysicsWorld, PointQuery};
