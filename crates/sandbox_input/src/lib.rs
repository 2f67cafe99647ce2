//! Sandbox input handling
//!
//! This crate turns keyboard and mouse input into semantic events for the
//! simulation loop, and tracks the spawn settings the user adjusts.

mod controller;
mod events;
mod spawn_settings;

pub use controller::SandboxController;
pub use events::InputEvent;
pub use spawn_settings::{SpawnParam, SpawnSettings};
