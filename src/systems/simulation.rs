//! Sandbox simulation loop
//!
//! Runs the sandbox at a fixed timestep. Each tick, in order:
//! - Queued input events are dispatched
//! - The environment clock advances
//! - The force field is applied
//! - Physics steps
//! - Task events are raised from the new body state
//! - Progression display state animates

use std::collections::VecDeque;

use sandbox_core::{FrameSnapshot, Sandbox};
use sandbox_input::InputEvent;

use crate::config::AppConfig;
use crate::systems::EnvironmentClock;

/// Result of one simulation tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationResult {
    /// Input events dispatched this tick
    pub events_dispatched: usize,
    /// Levels gained this tick
    pub levels_gained: u32,
}

/// Scene state plus the environment clock, for presentation
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub scene: FrameSnapshot,
    pub day_time: u32,
    pub is_day: bool,
}

/// Drives the sandbox in lock-step with queued input
pub struct SimulationLoop {
    sandbox: Sandbox,
    environment: EnvironmentClock,
    queue: VecDeque<InputEvent>,
    timestep: f32,
    ticks: u64,
    leave_requested: bool,
}

impl SimulationLoop {
    /// Create a loop around an existing sandbox
    pub fn new(sandbox: Sandbox, timestep: f32) -> Self {
        Self {
            sandbox,
            environment: EnvironmentClock::new(),
            queue: VecDeque::new(),
            timestep,
            ticks: 0,
            leave_requested: false,
        }
    }

    /// Build the sandbox and loop described by a configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let mut sandbox = Sandbox::new(config.physics.to_physics_config())
            .with_arena(&config.world)
            .with_drag(config.physics.drag_controller())
            .with_forces(sandbox_core::ForceField::new(config.forces.clone()))
            .with_progression(config.progression.engine())
            .with_speed_threshold(config.progression.speed_threshold);
        if let Some(seed) = config.session.seed {
            sandbox = sandbox.with_seed(seed);
        }
        Self::new(sandbox, config.physics.timestep)
    }

    /// Builder: start the clock at a given time of day
    pub fn with_environment(mut self, environment: EnvironmentClock) -> Self {
        self.environment = environment;
        self
    }

    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    pub fn sandbox_mut(&mut self) -> &mut Sandbox {
        &mut self.sandbox
    }

    pub fn environment(&self) -> &EnvironmentClock {
        &self.environment
    }

    pub fn timestep(&self) -> f32 {
        self.timestep
    }

    /// Number of ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// True once a leave event has been dispatched
    pub fn leave_requested(&self) -> bool {
        self.leave_requested
    }

    /// Queue an event for the next tick
    pub fn push_event(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    pub fn push_events<I: IntoIterator<Item = InputEvent>>(&mut self, events: I) {
        self.queue.extend(events);
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Run one fixed-step tick
    pub fn tick(&mut self) -> SimulationResult {
        let level_before = self.sandbox.progression().level();

        // 1. Drain input
        let mut events_dispatched = 0;
        while let Some(event) = self.queue.pop_front() {
            self.dispatch(event);
            events_dispatched += 1;
        }

        // 2. Cosmetic clock
        self.environment.tick();

        // 3. Environmental forces, before the step
        self.sandbox.apply_forces();

        // 4. Physics
        self.sandbox.step_physics(self.timestep);

        // 5. Task evaluation on the post-step state
        self.sandbox.evaluate_tasks();

        // 6. Display animation
        self.sandbox.animate();

        self.ticks += 1;
        SimulationResult {
            events_dispatched,
            levels_gained: self.sandbox.progression().level() - level_before,
        }
    }

    fn dispatch(&mut self, event: InputEvent) {
        match event {
            InputEvent::Spawn { kind, position, params } => {
                self.sandbox.spawn(kind, position, params);
            }
            InputEvent::PointerDown(point) => {
                self.sandbox.pointer_down(point);
            }
            InputEvent::PointerMoved(point) => self.sandbox.pointer_moved(point),
            InputEvent::PointerUp => {
                self.sandbox.pointer_up();
            }
            InputEvent::Select(point) => {
                self.sandbox.select_at(point);
            }
            InputEvent::AdjustWind(steps) => self.sandbox.forces_mut().adjust_wind(steps),
            InputEvent::AdjustAttraction(steps) => self.sandbox.forces_mut().adjust_attraction(steps),
            InputEvent::ToggleForces => {
                self.sandbox.forces_mut().toggle();
            }
            InputEvent::ClearAll => {
                self.sandbox.clear();
            }
            InputEvent::Leave => {
                self.sandbox.clear();
                self.leave_requested = true;
                log::info!("Leaving session");
            }
        }
    }

    /// Capture scene and clock state for presentation
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            scene: self.sandbox.snapshot(),
            day_time: self.environment.day_time(),
            is_day: self.environment.is_day(),
        }
    }
}
