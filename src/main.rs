//! Sandbox2D - headless session runner
//!
//! Loads configuration, runs a scripted session through the full input and
//! simulation path, and logs progression as it happens.

use sandbox2d::config::AppConfig;
use sandbox2d::session::ScriptedSession;
use sandbox2d::systems::SimulationLoop;
use sandbox_input::SandboxController;

fn main() {
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.debug.log_level)).init();
    if let Some(e) = load_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!(
        "Starting session: {} frames at {:.4}s per step",
        config.session.frames,
        config.physics.timestep
    );

    let mut sim = SimulationLoop::from_config(&config);
    let controller = SandboxController::new().with_spawn_settings(config.spawn.settings());
    let mut session = ScriptedSession::new(controller, config.world.width, config.world.height);

    let ran = session.run(&mut sim, config.session.frames);

    let progression = sim.sandbox().progression();
    log::info!(
        "Session over after {} frames: level {}, {}/{} XP, {} tasks completed",
        ran,
        progression.level(),
        progression.xp(),
        progression.threshold(),
        progression.completed_tasks().len()
    );
    for task in progression.completed_tasks() {
        log::info!("  completed: {} (+{} XP)", task.name(), task.reward());
    }
    for task in progression.active_tasks() {
        log::info!("  active: {} {}/{}", task.name(), task.progress(), task.target());
    }
}
