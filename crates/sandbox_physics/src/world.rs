//! Physics world and simulation

use crate::body::{BodyKey, RigidBody2D, StaticCollider};
use crate::collision::{body_vs_body, body_vs_plane, Contact};
use crate::joint::{JointKey, PivotJoint};
use sandbox_math::Vec2;
use slotmap::SlotMap;

/// Configuration for the physics simulation
#[derive(Clone, Debug)]
pub struct PhysicsConfig {
    /// Gravity acceleration (y grows downward, so positive y = down)
    pub gravity: Vec2,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 900.0),
        }
    }
}

impl PhysicsConfig {
    /// Create a new physics config with the given gravity vector
    pub fn new(gravity: Vec2) -> Self {
        Self { gravity }
    }
}

/// Result of a nearest-point query
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointQuery {
    /// The body hit
    pub body: BodyKey,
    /// Distance from the query point to the body's shapes (0.0 = inside)
    pub distance: f32,
}

/// The physics world containing all rigid bodies, static boundaries and joints
pub struct PhysicsWorld {
    /// All rigid bodies in the world (using generational keys)
    bodies: SlotMap<BodyKey, RigidBody2D>,
    /// Static colliders (floors, walls)
    static_colliders: Vec<StaticCollider>,
    /// Pivot joints
    joints: SlotMap<JointKey, PivotJoint>,
    /// Physics configuration
    pub config: PhysicsConfig,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            static_colliders: Vec::new(),
            joints: SlotMap::with_key(),
            config,
        }
    }

    /// Add a static collider to the world
    pub fn add_static_collider(&mut self, collider: StaticCollider) {
        self.static_colliders.push(collider);
    }

    /// Get immutable access to static colliders
    pub fn static_colliders(&self) -> &[StaticCollider] {
        &self.static_colliders
    }

    /// Add a body to the world and return its key
    pub fn add_body(&mut self, body: RigidBody2D) -> BodyKey {
        self.bodies.insert(body)
    }

    /// Remove a body from the world and return it
    ///
    /// Joints attached to the body are removed with it.
    pub fn remove_body(&mut self, key: BodyKey) -> Option<RigidBody2D> {
        let body = self.bodies.remove(key)?;
        let joints_before = self.joints.len();
        self.joints.retain(|_, joint| joint.body != key);
        let dropped = joints_before - self.joints.len();
        if dropped > 0 {
            log::debug!("Removed body {:?} with {} attached joint(s)", key, dropped);
        }
        Some(body)
    }

    /// Get an immutable reference to a body by key
    pub fn get_body(&self, key: BodyKey) -> Option<&RigidBody2D> {
        self.bodies.get(key)
    }

    /// Get a mutable reference to a body by key
    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut RigidBody2D> {
        self.bodies.get_mut(key)
    }

    /// Get the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Iterate over all body keys
    pub fn body_keys(&self) -> impl Iterator<Item = BodyKey> + '_ {
        self.bodies.keys()
    }

    /// Iterate over all bodies with their keys
    pub fn bodies(&self) -> impl Iterator<Item = (BodyKey, &RigidBody2D)> {
        self.bodies.iter()
    }

    /// Iterate over dynamic bodies with their keys
    pub fn dynamic_bodies(&self) -> impl Iterator<Item = (BodyKey, &RigidBody2D)> {
        self.bodies.iter().filter(|(_, body)| body.is_dynamic())
    }

    /// Find the body nearest to `point` within `max_distance`
    ///
    /// A `max_distance` of 0.0 only reports bodies whose shapes contain the point.
    pub fn point_query_nearest(&self, point: Vec2, max_distance: f32) -> Option<PointQuery> {
        self.bodies
            .iter()
            .filter_map(|(key, body)| {
                body.distance_to_point(point)
                    .filter(|d| *d <= max_distance)
                    .map(|distance| PointQuery { body: key, distance })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Accumulate a world-frame force at a body-local point
    ///
    /// Returns false if the body does not exist.
    pub fn apply_force_at_local_point(&mut self, key: BodyKey, force: Vec2, local_point: Vec2) -> bool {
        match self.bodies.get_mut(key) {
            Some(body) => {
                body.apply_force_at_local_point(force, local_point);
                true
            }
            None => false,
        }
    }

    /// Add a joint; returns `None` if the joint's body does not exist
    pub fn add_joint(&mut self, joint: PivotJoint) -> Option<JointKey> {
        if !self.bodies.contains_key(joint.body) {
            return None;
        }
        Some(self.joints.insert(joint))
    }

    /// Remove a joint and return it
    pub fn remove_joint(&mut self, key: JointKey) -> Option<PivotJoint> {
        self.joints.remove(key)
    }

    /// Get a joint by key
    pub fn get_joint(&self, key: JointKey) -> Option<&PivotJoint> {
        self.joints.get(key)
    }

    /// Get a mutable joint by key
    pub fn get_joint_mut(&mut self, key: JointKey) -> Option<&mut PivotJoint> {
        self.joints.get_mut(key)
    }

    /// Get the number of joints in the world
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// Step the physics simulation forward by dt seconds
    ///
    /// This performs:
    /// 1. Joint forces accumulated onto their bodies
    /// 2. Force, gravity and velocity integration
    /// 3. Static collider collision detection and resolution
    /// 4. Body-body collision detection and resolution
    pub fn step(&mut self, dt: f32) {
        // Phase 1: Joints add their corrective forces
        for joint in self.joints.values() {
            if let Some(body) = self.bodies.get_mut(joint.body) {
                joint.solve(body, dt);
            }
        }

        // Phase 2: Integrate
        let gravity = self.config.gravity;
        for body in self.bodies.values_mut() {
            body.integrate(gravity, dt);
        }

        // Phase 3: Resolve static collider collisions
        self.resolve_static_collisions();

        // Phase 4: Resolve body-body collisions
        self.resolve_body_collisions();
    }

    /// Resolve collisions between bodies and static colliders
    fn resolve_static_collisions(&mut self) {
        for body in self.bodies.values_mut() {
            if !body.is_dynamic() {
                continue;
            }

            for static_col in &self.static_colliders {
                let Some(contact) = body_vs_plane(body, &static_col.plane) else {
                    continue;
                };
                if !contact.is_colliding() {
                    continue;
                }

                // Push the body out of the static collider
                body.apply_correction(contact.normal * contact.penetration);

                let combined = body.material().combine(&static_col.material);

                let velocity_along_normal = body.velocity.dot(contact.normal);
                if velocity_along_normal < 0.0 {
                    // Remove the normal component of velocity and bounce
                    let normal_velocity = contact.normal * velocity_along_normal;
                    body.velocity -= normal_velocity * (1.0 + combined.restitution);

                    // Friction on the tangent component
                    let tangent_velocity = body.velocity - contact.normal * body.velocity.dot(contact.normal);
                    if tangent_velocity.length() > 0.0001 {
                        body.velocity = contact.normal * body.velocity.dot(contact.normal)
                            + tangent_velocity * combined.tangent_retention();
                        body.angular_velocity *= combined.tangent_retention();
                    }
                }
            }
        }
    }

    /// Resolve collisions between bodies
    fn resolve_body_collisions(&mut self) {
        // Collect all keys first (needed because we can't iterate and mutate)
        let keys: Vec<BodyKey> = self.bodies.keys().collect();

        for i in 0..keys.len() {
            for j in (i + 1)..keys.len() {
                let (key_a, key_b) = (keys[i], keys[j]);
                let (is_dynamic_a, is_dynamic_b) = (self.bodies[key_a].is_dynamic(), self.bodies[key_b].is_dynamic());
                if !is_dynamic_a && !is_dynamic_b {
                    continue;
                }

                // Normal points from A toward B
                let contact = body_vs_body(&self.bodies[key_a], &self.bodies[key_b]);
                if let Some(contact) = contact.filter(Contact::is_colliding) {
                    self.resolve_body_pair_collision(key_a, key_b, &contact, is_dynamic_a, is_dynamic_b);
                }
            }
        }
    }

    /// Resolve collision between two specific bodies
    fn resolve_body_pair_collision(
        &mut self,
        key_a: BodyKey,
        key_b: BodyKey,
        contact: &Contact,
        is_dynamic_a: bool,
        is_dynamic_b: bool,
    ) {
        let push = contact.normal * contact.penetration;
        let (correction_a, correction_b) = match (is_dynamic_a, is_dynamic_b) {
            (false, _) => (Vec2::ZERO, push),
            (_, false) => (-push, Vec2::ZERO),
            _ => {
                // Split based on mass
                let mass_a = self.bodies[key_a].mass;
                let mass_b = self.bodies[key_b].mass;
                let total_mass = mass_a + mass_b;
                (-push * (mass_b / total_mass), push * (mass_a / total_mass))
            }
        };

        if is_dynamic_a {
            self.bodies[key_a].apply_correction(correction_a);
        }
        if is_dynamic_b {
            self.bodies[key_b].apply_correction(correction_b);
        }

        let combined = self.bodies[key_a].material().combine(&self.bodies[key_b].material());
        let normal = contact.normal;

        if is_dynamic_a && is_dynamic_b {
            // Impulse exchange along the normal
            let (mass_a, mass_b) = (self.bodies[key_a].mass, self.bodies[key_b].mass);
            let relative = self.bodies[key_b].velocity - self.bodies[key_a].velocity;
            let closing = relative.dot(normal);
            if closing < 0.0 {
                let impulse = -(1.0 + combined.restitution) * closing / (1.0 / mass_a + 1.0 / mass_b);
                self.bodies[key_a].velocity -= normal * (impulse / mass_a);
                self.bodies[key_b].velocity += normal * (impulse / mass_b);
            }
        } else {
            // One side is immovable: reflect the moving body
            let (key, outward) = if is_dynamic_a { (key_a, -normal) } else { (key_b, normal) };
            let body = &mut self.bodies[key];
            let vel_along_normal = body.velocity.dot(outward);
            if vel_along_normal < 0.0 {
                body.velocity -= outward * vel_along_normal * (1.0 + combined.restitution);
            }
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
