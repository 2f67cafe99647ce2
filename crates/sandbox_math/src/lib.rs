//! 2D Mathematics Library
//!
//! This crate provides the vector type shared by the sandbox crates.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector with x, y components
//!
//! ## Geometry helpers
//!
//! - [`polygon`] - signed area, point containment, edge distance and bounding radius

mod vec2;
pub mod polygon;

pub use vec2::Vec2;
