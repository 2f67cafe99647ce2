//! Keyboard and mouse handling for the sandbox
//!
//! Controls:
//! - Left click: spawn the current kind at the cursor, then grab what is under it
//! - Right click: select the object under the cursor
//! - W/S: wind right/left (held)
//! - D/A: attraction down/up (held)
//! - G: toggle forces
//! - Space: clear all objects
//! - Escape: clear all objects and leave
//! - 1-4: ball, box, polygon, triangle
//! - +/-: size, Q/E: mass, R/F: elasticity, T/Y: friction (hold Shift for bigger steps)

use sandbox_core::ObjectKind;
use sandbox_math::Vec2;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

use crate::events::InputEvent;
use crate::spawn_settings::{SpawnParam, SpawnSettings};

/// Turns raw device input into [`InputEvent`]s
///
/// Discrete keys produce an event immediately. Wind and attraction keys are
/// held; [`frame_events`](Self::frame_events) turns them into one adjustment
/// step per frame.
#[derive(Debug, Default)]
pub struct SandboxController {
    // Held force keys
    wind_right: bool,
    wind_left: bool,
    attract_down: bool,
    attract_up: bool,

    shift: bool,
    cursor: Vec2,
    spawn: SpawnSettings,
}

impl SandboxController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: start with the given spawn settings
    pub fn with_spawn_settings(mut self, spawn: SpawnSettings) -> Self {
        self.spawn = spawn;
        self
    }

    pub fn spawn_settings(&self) -> &SpawnSettings {
        &self.spawn
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Process keyboard input
    ///
    /// Returns an event for keys that act immediately. Held keys and spawn
    /// parameter keys only update controller state.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> Option<InputEvent> {
        let pressed = state == ElementState::Pressed;

        match key {
            KeyCode::KeyW => { self.wind_right = pressed; return None; }
            KeyCode::KeyS => { self.wind_left = pressed; return None; }
            KeyCode::KeyD => { self.attract_down = pressed; return None; }
            KeyCode::KeyA => { self.attract_up = pressed; return None; }
            KeyCode::ShiftLeft | KeyCode::ShiftRight => { self.shift = pressed; return None; }
            _ => {}
        }

        // Everything below acts on press only
        if !pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputEvent::Leave),
            KeyCode::Space => Some(InputEvent::ClearAll),
            KeyCode::KeyG => Some(InputEvent::ToggleForces),
            KeyCode::Digit1 => self.select_kind(ObjectKind::Ball),
            KeyCode::Digit2 => self.select_kind(ObjectKind::Box),
            KeyCode::Digit3 => self.select_kind(ObjectKind::Polygon),
            KeyCode::Digit4 => self.select_kind(ObjectKind::Triangle),
            KeyCode::Equal | KeyCode::NumpadAdd => self.adjust(SpawnParam::Size, 1.0),
            KeyCode::Minus | KeyCode::NumpadSubtract => self.adjust(SpawnParam::Size, -1.0),
            KeyCode::KeyQ => self.adjust(SpawnParam::Mass, 1.0),
            KeyCode::KeyE => self.adjust(SpawnParam::Mass, -1.0),
            KeyCode::KeyR => self.adjust(SpawnParam::Elasticity, 1.0),
            KeyCode::KeyF => self.adjust(SpawnParam::Elasticity, -1.0),
            KeyCode::KeyT => self.adjust(SpawnParam::Friction, 1.0),
            KeyCode::KeyY => self.adjust(SpawnParam::Friction, -1.0),
            _ => None,
        }
    }

    fn select_kind(&mut self, kind: ObjectKind) -> Option<InputEvent> {
        self.spawn.set_kind(kind);
        None
    }

    fn adjust(&mut self, param: SpawnParam, direction: f32) -> Option<InputEvent> {
        self.spawn.adjust(param, direction, self.shift);
        None
    }

    /// Process mouse button input at the last known cursor position
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) -> Vec<InputEvent> {
        let pressed = state == ElementState::Pressed;

        match (button, pressed) {
            (MouseButton::Left, true) => vec![
                InputEvent::Spawn {
                    kind: self.spawn.kind(),
                    position: self.cursor,
                    params: self.spawn.params(),
                },
                InputEvent::PointerDown(self.cursor),
            ],
            (MouseButton::Left, false) => vec![InputEvent::PointerUp],
            (MouseButton::Right, true) => vec![InputEvent::Select(self.cursor)],
            _ => Vec::new(),
        }
    }

    /// Process cursor movement in window pixels
    pub fn process_cursor_moved(&mut self, x: f64, y: f64) -> InputEvent {
        self.cursor = Vec2::new(x as f32, y as f32);
        InputEvent::PointerMoved(self.cursor)
    }

    /// Continuous adjustments for keys held this frame
    pub fn frame_events(&self) -> Vec<InputEvent> {
        let wind = (self.wind_right as i32 - self.wind_left as i32) as f32;
        let attraction = (self.attract_down as i32 - self.attract_up as i32) as f32;

        let mut events = Vec::new();
        if wind != 0.0 {
            events.push(InputEvent::AdjustWind(wind));
        }
        if attraction != 0.0 {
            events.push(InputEvent::AdjustAttraction(attraction));
        }
        events
    }

    /// Check if any force key is held
    pub fn is_adjusting_forces(&self) -> bool {
        self.wind_right || self.wind_left || self.attract_down || self.attract_up
    }
}
