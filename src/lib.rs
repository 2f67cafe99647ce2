//! 2D physics sandbox
//!
//! Configuration, the fixed-step simulation loop, the cosmetic day/night
//! clock and a scripted headless session on top of the sandbox crates.

pub mod config;
pub mod session;
pub mod systems;
