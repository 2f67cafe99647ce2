//! Semantic input events consumed by the simulation loop

use sandbox_core::{ObjectKind, SpawnParams};
use sandbox_math::Vec2;

/// One user intent, already resolved from raw device input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Create an object at a world point
    Spawn {
        kind: ObjectKind,
        position: Vec2,
        params: SpawnParams,
    },
    /// Primary button pressed at a world point
    PointerDown(Vec2),
    /// Pointer moved to a world point
    PointerMoved(Vec2),
    /// Primary button released
    PointerUp,
    /// Secondary click: select the object under a point
    Select(Vec2),
    /// Change wind by a number of steps
    AdjustWind(f32),
    /// Change attraction by a number of steps
    AdjustAttraction(f32),
    ToggleForces,
    /// Remove every object
    ClearAll,
    /// Remove every object and end the session
    Leave,
}
