//! Core types for the 2D sandbox
//!
//! This crate glues user interaction to the physics world and drives the
//! progression state machine:
//!
//! - [`ObjectRegistry`] - Spawned objects, their colours and the selection
//! - [`DragController`] - The single pointer-drag constraint
//! - [`ForceField`] - Global wind and attraction
//! - [`ProgressionEngine`] - Experience, levels and tasks
//! - [`Sandbox`] - Owns all of the above plus the physics world
//! - [`FrameSnapshot`] - Read-only view for presentation layers

mod drag;
mod forces;
mod object;
mod palette;
mod progression;
mod registry;
mod sandbox;
mod snapshot;

pub use drag::{DragController, DragState, DEFAULT_MAX_DRAG_FORCE};
pub use forces::{ForceField, ForceFieldConfig};
pub use object::{ObjectKind, ShapeCategory, SpawnParams};
pub use palette::{Color, PALETTE};
pub use progression::{
    default_task_pool, EventPayload, ProgressEvent, ProgressPolicy, ProgressionConfig, ProgressionEngine, Task,
    TaskDefinition, TaskTrigger, LEVEL_UP_FLASH,
};
pub use registry::{ObjectId, ObjectRecord, ObjectRegistry};
pub use sandbox::{ArenaConfig, Sandbox, DEFAULT_SPEED_THRESHOLD};
pub use snapshot::{ForceView, FrameSnapshot, ObjectView, ProgressionView, SelectedInfo, TaskSummary, ViewFlags};

// Re-export physics types for convenient access through sandbox_core
pub use sandbox_math::Vec2;
pub use sandbox_physics::{BodyKey, PhysicsConfig, PhysicsWorld};
