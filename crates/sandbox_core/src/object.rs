//! Object kinds, spawn parameters and shape classification
//!
//! An [`ObjectKind`] plus [`SpawnParams`] fully describes the body the
//! registry asks the physics world to create.

use rand::Rng;
use sandbox_math::Vec2;
use sandbox_physics::{
    moment_for_box, moment_for_circle, moment_for_poly, PhysicsMaterial, Polygon, RigidBody2D, Shape,
    ShapeGeometry,
};
use serde::{Serialize, Deserialize};

/// Number of vertices in a generated polygon
pub const POLYGON_VERTEX_COUNT: usize = 5;

/// The kinds of object a user can spawn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Ball,
    Box,
    Polygon,
    Triangle,
}

impl ObjectKind {
    /// All kinds, in selection order
    pub const ALL: [ObjectKind; 4] = [
        ObjectKind::Ball,
        ObjectKind::Box,
        ObjectKind::Polygon,
        ObjectKind::Triangle,
    ];

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Ball => "ball",
            ObjectKind::Box => "box",
            ObjectKind::Polygon => "polygon",
            ObjectKind::Triangle => "triangle",
        }
    }

    /// Build a dynamic body of this kind at `position`
    ///
    /// Polygons get random vertices, so an RNG is needed.
    pub fn build_body<R: Rng + ?Sized>(&self, position: Vec2, params: &SpawnParams, rng: &mut R) -> RigidBody2D {
        let material = params.material();
        let size = params.size;
        let mass = params.mass;

        let (moment, shape) = match self {
            ObjectKind::Ball => (
                moment_for_circle(mass, 0.0, size, Vec2::ZERO),
                Shape::circle(size, material),
            ),
            ObjectKind::Box => (
                moment_for_box(mass, size, size),
                Shape::polygon(Polygon::rectangle(size, size).vertices, material),
            ),
            ObjectKind::Triangle => {
                let vertices = triangle_vertices(size);
                (moment_for_poly(mass, &vertices), Shape::polygon(vertices, material))
            }
            ObjectKind::Polygon => {
                let vertices = random_polygon_vertices(size, rng);
                (moment_for_poly(mass, &vertices), Shape::polygon(vertices, material))
            }
        };

        RigidBody2D::new_dynamic(position, mass, moment).with_shape(shape)
    }
}

/// Vertices of the spawn triangle: apex up, base down
pub fn triangle_vertices(size: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(0.0, -size),
        Vec2::new(size, size),
        Vec2::new(-size, size),
    ]
}

/// Random star-shaped polygon with vertices at radius in `[size/2, size]`
///
/// Vertices are sorted by angle so the outline never self-intersects.
pub fn random_polygon_vertices<R: Rng + ?Sized>(size: f32, rng: &mut R) -> Vec<Vec2> {
    let mut angles: Vec<f32> = (0..POLYGON_VERTEX_COUNT)
        .map(|_| rng.gen_range(0.0..std::f32::consts::TAU))
        .collect();
    angles.sort_by(f32::total_cmp);
    angles
        .into_iter()
        .map(|angle| {
            let radius = rng.gen_range(size * 0.5..=size);
            Vec2::from_angle(angle) * radius
        })
        .collect()
}

/// Parameters applied to the next spawned object
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnParams {
    /// Radius for balls, edge length for boxes, extent for polygons/triangles
    pub size: f32,
    pub mass: f32,
    pub elasticity: f32,
    pub friction: f32,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            size: 30.0,
            mass: 45.0,
            elasticity: 0.5,
            friction: 0.5,
        }
    }
}

impl SpawnParams {
    pub const SIZE_RANGE: (f32, f32) = (10.0, 100.0);
    pub const MASS_RANGE: (f32, f32) = (1.0, 100.0);
    pub const ELASTICITY_RANGE: (f32, f32) = (0.0, 1.0);
    pub const FRICTION_RANGE: (f32, f32) = (0.0, 2.0);

    /// Clamp every parameter into its allowed range
    pub fn clamped(self) -> Self {
        Self {
            size: self.size.clamp(Self::SIZE_RANGE.0, Self::SIZE_RANGE.1),
            mass: self.mass.clamp(Self::MASS_RANGE.0, Self::MASS_RANGE.1),
            elasticity: self.elasticity.clamp(Self::ELASTICITY_RANGE.0, Self::ELASTICITY_RANGE.1),
            friction: self.friction.clamp(Self::FRICTION_RANGE.0, Self::FRICTION_RANGE.1),
        }
    }

    /// Surface material for the spawned shape
    pub fn material(&self) -> PhysicsMaterial {
        PhysicsMaterial::new(self.friction, self.elasticity)
    }
}

/// Shape classification of a body, as seen by the shape-usage task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeCategory {
    Ball,
    Box,
    Polygon,
    Triangle,
    Unknown,
}

impl ShapeCategory {
    /// Classify a body by its first shape
    ///
    /// Circles are balls; polygons are classified by vertex count
    /// (3 = triangle, 4 = box, anything else = polygon).
    pub fn classify(body: &RigidBody2D) -> Self {
        match body.shapes.first().map(|s| &s.geometry) {
            None => ShapeCategory::Unknown,
            Some(ShapeGeometry::Circle(_)) => ShapeCategory::Ball,
            Some(ShapeGeometry::Polygon(p)) => match p.vertices.len() {
                3 => ShapeCategory::Triangle,
                4 => ShapeCategory::Box,
                _ => ShapeCategory::Polygon,
            },
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            ShapeCategory::Ball => "Ball",
            ShapeCategory::Box => "Box",
            ShapeCategory::Polygon => "Polygon",
            ShapeCategory::Triangle => "Triangle",
            ShapeCategory::Unknown => "Unknown",
        }
    }
}

impl From<ObjectKind> for ShapeCategory {
    fn from(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Ball => ShapeCategory::Ball,
            ObjectKind::Box => ShapeCategory::Box,
            ObjectKind::Polygon => ShapeCategory::Polygon,
            ObjectKind::Triangle => ShapeCategory::Triangle,
        }
    }
}
