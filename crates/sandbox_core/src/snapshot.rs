//! Read-only per-frame view for presentation layers

use bitflags::bitflags;
use sandbox_math::Vec2;

use crate::forces::ForceField;
use crate::object::{ObjectKind, ShapeCategory};
use crate::palette::Color;
use crate::progression::{ProgressionEngine, Task};
use crate::registry::ObjectId;

bitflags! {
    /// Interaction state of an object in the current frame
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ViewFlags: u8 {
        const NONE = 0;
        /// The object is selected
        const SELECTED = 1 << 0;
        /// The object is being dragged
        const DRAG_TARGET = 1 << 1;
    }
}

/// One object as a renderer sees it
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectView {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub color: Color,
    pub position: Vec2,
    pub angle: f32,
    pub flags: ViewFlags,
}

impl ObjectView {
    pub fn is_selected(&self) -> bool {
        self.flags.contains(ViewFlags::SELECTED)
    }

    pub fn is_drag_target(&self) -> bool {
        self.flags.contains(ViewFlags::DRAG_TARGET)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TaskSummary {
    pub name: String,
    /// Progress clamped to the target
    pub progress: u32,
    pub target: u32,
    pub reward: u32,
    pub ratio: f32,
}

impl From<&Task> for TaskSummary {
    fn from(task: &Task) -> Self {
        Self {
            name: task.name().to_string(),
            progress: task.progress().min(task.target()),
            target: task.target(),
            reward: task.reward(),
            ratio: task.ratio(),
        }
    }
}

/// Level, experience and task lists
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressionView {
    pub level: u32,
    pub xp: u32,
    pub threshold: u32,
    pub active: Vec<TaskSummary>,
    pub completed: Vec<TaskSummary>,
    /// Level-up flash intensity, 0 when dark
    pub level_up_flash: u8,
}

impl From<&ProgressionEngine> for ProgressionView {
    fn from(engine: &ProgressionEngine) -> Self {
        Self {
            level: engine.level(),
            xp: engine.xp(),
            threshold: engine.threshold(),
            active: engine.active_tasks().iter().map(TaskSummary::from).collect(),
            completed: engine.completed_tasks().iter().map(TaskSummary::from).collect(),
            level_up_flash: engine.level_up_flash(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceView {
    pub wind: f32,
    pub attraction: f32,
    pub enabled: bool,
}

impl From<&ForceField> for ForceView {
    fn from(field: &ForceField) -> Self {
        Self {
            wind: field.wind(),
            attraction: field.attraction(),
            enabled: field.is_enabled(),
        }
    }
}

/// Details for the selected-object panel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectedInfo {
    pub id: ObjectId,
    pub category: ShapeCategory,
    pub mass: f32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub elasticity: f32,
    pub friction: f32,
}

/// Everything a presentation layer needs to draw one frame
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub objects: Vec<ObjectView>,
    pub progression: ProgressionView,
    pub forces: ForceView,
    pub selected: Option<SelectedInfo>,
}

impl FrameSnapshot {
    pub fn object(&self, id: ObjectId) -> Option<&ObjectView> {
        self.objects.iter().find(|o| o.id == id)
    }
}
