//! Scripted headless session
//!
//! Stands in for a human at the keyboard: it feeds raw key and mouse input
//! through [`SandboxController`] so the whole input path is exercised, and
//! queues the resulting events on the simulation loop.

use sandbox_input::{InputEvent, SandboxController};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

use crate::systems::SimulationLoop;

/// Frames between scripted spawns
const SPAWN_INTERVAL: u32 = 45;
/// Frames a spawned object is held after the click
const HOLD_FRAMES: u32 = 20;

const KIND_KEYS: [KeyCode; 4] = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4];

/// Deterministic input script over a play area
pub struct ScriptedSession {
    controller: SandboxController,
    width: f32,
    height: f32,
}

impl ScriptedSession {
    pub fn new(controller: SandboxController, width: f32, height: f32) -> Self {
        Self {
            controller,
            width,
            height,
        }
    }

    /// Raw input for one frame, translated into events
    pub fn events_for_frame(&mut self, frame: u32) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let phase = frame % SPAWN_INTERVAL;
        let round = frame / SPAWN_INTERVAL;

        if phase == 0 {
            // Pick the next kind, move over a fresh spot and click
            let key = KIND_KEYS[round as usize % KIND_KEYS.len()];
            self.press(key, &mut events);
            let x = self.width * (0.2 + 0.15 * (round % 5) as f32);
            let y = self.height * 0.3;
            events.push(self.controller.process_cursor_moved(x as f64, y as f64));
            events.extend(self.controller.process_mouse_button(MouseButton::Left, ElementState::Pressed));
        } else if phase < HOLD_FRAMES {
            // Fling the held object sideways
            let cursor = self.controller.cursor();
            let dx = if round % 2 == 0 { 12.0 } else { -12.0 };
            events.push(self.controller.process_cursor_moved((cursor.x + dx) as f64, cursor.y as f64));
        } else if phase == HOLD_FRAMES {
            events.extend(self.controller.process_mouse_button(MouseButton::Left, ElementState::Released));
            events.extend(self.controller.process_mouse_button(MouseButton::Right, ElementState::Pressed));
            events.extend(self.controller.process_mouse_button(MouseButton::Right, ElementState::Released));
        }

        // Gust of wind every few rounds, held for a while
        match (round % 6, phase) {
            (3, 0) => self.press(KeyCode::KeyW, &mut events),
            (3, 30) => self.release(KeyCode::KeyW, &mut events),
            (5, 0) => self.press(KeyCode::KeyS, &mut events),
            (5, 30) => self.release(KeyCode::KeyS, &mut events),
            _ => {}
        }

        events.extend(self.controller.frame_events());
        events
    }

    fn press(&mut self, key: KeyCode, events: &mut Vec<InputEvent>) {
        events.extend(self.controller.process_keyboard(key, ElementState::Pressed));
    }

    fn release(&mut self, key: KeyCode, events: &mut Vec<InputEvent>) {
        events.extend(self.controller.process_keyboard(key, ElementState::Released));
    }

    /// Run the script for `frames` ticks, or until the session is left
    ///
    /// The last frame presses Escape. Returns the number of ticks run.
    pub fn run(&mut self, sim: &mut SimulationLoop, frames: u32) -> u32 {
        for frame in 0..frames {
            let mut events = self.events_for_frame(frame);
            if frame + 1 == frames {
                self.press(KeyCode::Escape, &mut events);
            }
            sim.push_events(events);

            let result = sim.tick();
            if result.levels_gained > 0 {
                let progression = sim.sandbox().progression();
                log::info!(
                    "Frame {}: level {} ({}/{} XP)",
                    frame,
                    progression.level(),
                    progression.xp(),
                    progression.threshold()
                );
            }
            if sim.leave_requested() {
                return frame + 1;
            }
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_spawns_and_grabs() {
        let mut session = ScriptedSession::new(SandboxController::new(), 1000.0, 800.0);
        let events = session.events_for_frame(0);
        assert!(matches!(events[0], InputEvent::PointerMoved(_)));
        assert!(matches!(events[1], InputEvent::Spawn { .. }));
        assert!(matches!(events[2], InputEvent::PointerDown(_)));
    }

    #[test]
    fn test_release_after_hold() {
        let mut session = ScriptedSession::new(SandboxController::new(), 1000.0, 800.0);
        for frame in 0..HOLD_FRAMES {
            session.events_for_frame(frame);
        }
        let events = session.events_for_frame(HOLD_FRAMES);
        assert_eq!(events[0], InputEvent::PointerUp);
        assert!(matches!(events[1], InputEvent::Select(_)));
    }
}
