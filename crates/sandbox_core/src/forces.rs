//! Uniform environmental forces
//!
//! Wind pushes every dynamic body horizontally, attraction vertically
//! (positive attraction points down, with gravity, in screen space).

use sandbox_math::Vec2;
use sandbox_physics::{BodyKey, PhysicsWorld};
use serde::{Serialize, Deserialize};

/// Tuning for the force field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceFieldConfig {
    /// Whether forces apply at startup
    pub enabled: bool,
    /// Change in wind/attraction per adjustment step
    pub step: f32,
    /// Multiplier turning the scalars into a force
    pub scale: f32,
}

impl Default for ForceFieldConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            step: 0.1,
            scale: 100.0,
        }
    }
}

/// Global wind and attraction applied to every dynamic body each tick
#[derive(Clone, Debug, PartialEq)]
pub struct ForceField {
    wind: f32,
    attraction: f32,
    enabled: bool,
    step: f32,
    scale: f32,
}

impl Default for ForceField {
    fn default() -> Self {
        Self::new(ForceFieldConfig::default())
    }
}

impl ForceField {
    pub fn new(config: ForceFieldConfig) -> Self {
        Self {
            wind: 0.0,
            attraction: 0.0,
            enabled: config.enabled,
            step: config.step,
            scale: config.scale,
        }
    }

    #[inline]
    pub fn wind(&self) -> f32 {
        self.wind
    }

    #[inline]
    pub fn attraction(&self) -> f32 {
        self.attraction
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Change wind by `steps` increments (negative steps blow left)
    pub fn adjust_wind(&mut self, steps: f32) {
        self.wind += steps * self.step;
    }

    /// Change attraction by `steps` increments
    pub fn adjust_attraction(&mut self, steps: f32) {
        self.attraction += steps * self.step;
    }

    /// Flip the enabled flag, returning the new value
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        log::debug!("Force field {}", if self.enabled { "enabled" } else { "disabled" });
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// The force each dynamic body receives this tick
    pub fn force(&self) -> Vec2 {
        Vec2::new(self.wind * self.scale, self.attraction * self.scale)
    }

    /// Push the current force onto every dynamic body at its local origin
    ///
    /// Does nothing while disabled. Returns the number of bodies affected.
    pub fn apply(&self, physics: &mut PhysicsWorld) -> usize {
        if !self.enabled {
            return 0;
        }
        let force = self.force();
        let keys: Vec<BodyKey> = physics.dynamic_bodies().map(|(key, _)| key).collect();
        keys.into_iter()
            .filter(|&key| physics.apply_force_at_local_point(key, force, Vec2::ZERO))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandbox_physics::{PhysicsConfig, RigidBody2D};

    fn zero_gravity_world() -> PhysicsWorld {
        PhysicsWorld::with_config(PhysicsConfig::new(Vec2::ZERO))
    }

    #[test]
    fn test_adjust_in_steps() {
        let mut field = ForceField::default();
        field.adjust_wind(1.0);
        field.adjust_wind(1.0);
        field.adjust_attraction(-1.0);
        assert!((field.wind() - 0.2).abs() < 1e-6);
        assert!((field.attraction() + 0.1).abs() < 1e-6);
        let force = field.force();
        assert!((force.x - 20.0).abs() < 1e-4);
        assert!((force.y + 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_toggle() {
        let mut field = ForceField::default();
        assert!(field.is_enabled());
        assert!(!field.toggle());
        assert!(field.toggle());
    }

    #[test]
    fn test_apply_reaches_dynamic_bodies_only() {
        let mut world = zero_gravity_world();
        let dynamic = world.add_body(RigidBody2D::new_dynamic(Vec2::ZERO, 1.0, 1.0));
        world.add_body(RigidBody2D::new_static(Vec2::ZERO));

        let mut field = ForceField::default();
        field.adjust_wind(1.0);
        assert_eq!(field.apply(&mut world), 1);

        let force = world.get_body(dynamic).unwrap().accumulated_force();
        assert!((force.x - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_disabled_applies_nothing() {
        let mut world = zero_gravity_world();
        let key = world.add_body(RigidBody2D::new_dynamic(Vec2::ZERO, 1.0, 1.0));

        let mut field = ForceField::default();
        field.adjust_wind(5.0);
        field.set_enabled(false);
        assert_eq!(field.apply(&mut world), 0);
        assert_eq!(world.get_body(key).unwrap().accumulated_force(), Vec2::ZERO);
    }

    #[test]
    fn test_disabling_keeps_velocity() {
        let mut world = zero_gravity_world();
        let key = world.add_body(RigidBody2D::new_dynamic(Vec2::ZERO, 1.0, 1.0));

        let mut field = ForceField::default();
        field.adjust_wind(10.0);
        field.apply(&mut world);
        world.step(1.0 / 60.0);
        let moving = world.get_body(key).unwrap().velocity.x;
        assert!(moving > 0.0);

        field.toggle();
        field.apply(&mut world);
        world.step(1.0 / 60.0);
        assert!((world.get_body(key).unwrap().velocity.x - moving).abs() < 1e-4);
    }
}
