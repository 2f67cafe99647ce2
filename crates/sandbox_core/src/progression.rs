//! Experience, levels and tasks
//!
//! The engine keeps a small set of active tasks sampled from a pool.
//! Simulation events are [`raise`](ProgressionEngine::raise)d into it; tasks
//! whose trigger matches advance according to their [`ProgressPolicy`], and
//! completed tasks award experience. Enough experience cascades into
//! level-ups, each of which resamples the active tasks.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Serialize, Deserialize};

use crate::object::ShapeCategory;

/// Value the level-up flash is armed with
pub const LEVEL_UP_FLASH: u8 = 255;

/// How a task turns matching events into progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ProgressPolicy {
    /// Every event adds its delta
    #[default]
    Count,
    /// An event adds one only for a category the task has not seen yet
    DistinctCategory,
}

impl From<String> for ProgressPolicy {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "distinct_category" => ProgressPolicy::DistinctCategory,
            _ => ProgressPolicy::Count,
        }
    }
}

/// Simulation event a task listens for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskTrigger {
    ObjectCreated,
    ObjectDragged,
    SpeedExceeded,
    ShapeUsed,
}

/// Extra data carried by an event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventPayload {
    pub category: Option<ShapeCategory>,
}

impl EventPayload {
    pub fn category(category: ShapeCategory) -> Self {
        Self {
            category: Some(category),
        }
    }
}

/// Something that happened in the simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    ObjectCreated,
    ObjectDragged,
    SpeedExceeded,
    ShapeUsed(ShapeCategory),
}

impl ProgressEvent {
    pub fn trigger(&self) -> TaskTrigger {
        match self {
            ProgressEvent::ObjectCreated => TaskTrigger::ObjectCreated,
            ProgressEvent::ObjectDragged => TaskTrigger::ObjectDragged,
            ProgressEvent::SpeedExceeded => TaskTrigger::SpeedExceeded,
            ProgressEvent::ShapeUsed(_) => TaskTrigger::ShapeUsed,
        }
    }

    pub fn payload(&self) -> EventPayload {
        match self {
            ProgressEvent::ShapeUsed(category) => EventPayload::category(*category),
            _ => EventPayload::default(),
        }
    }
}

/// A task template in the pool
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskDefinition {
    pub name: String,
    /// Progress needed to complete
    pub target: u32,
    /// Experience awarded on completion
    pub reward: u32,
    /// Event that advances the task; `None` means only explicit updates do
    #[serde(default)]
    pub trigger: Option<TaskTrigger>,
    #[serde(default)]
    pub policy: ProgressPolicy,
}

impl TaskDefinition {
    pub fn new(name: impl Into<String>, target: u32, reward: u32) -> Self {
        Self {
            name: name.into(),
            target,
            reward,
            trigger: None,
            policy: ProgressPolicy::Count,
        }
    }

    pub fn with_trigger(mut self, trigger: TaskTrigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    pub fn with_policy(mut self, policy: ProgressPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// The built-in task pool
pub fn default_task_pool() -> Vec<TaskDefinition> {
    vec![
        TaskDefinition::new("Create objects", 5, 50).with_trigger(TaskTrigger::ObjectCreated),
        TaskDefinition::new("Reach speed 100", 5, 100).with_trigger(TaskTrigger::SpeedExceeded),
        TaskDefinition::new("Use all shapes", 4, 75)
            .with_trigger(TaskTrigger::ShapeUsed)
            .with_policy(ProgressPolicy::DistinctCategory),
        TaskDefinition::new("Drag objects", 3, 40).with_trigger(TaskTrigger::ObjectDragged),
    ]
}

/// A live task instance
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    definition: TaskDefinition,
    progress: u32,
    seen_categories: HashSet<ShapeCategory>,
}

impl Task {
    pub fn new(definition: TaskDefinition) -> Self {
        Self {
            definition,
            progress: 0,
            seen_categories: HashSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn definition(&self) -> &TaskDefinition {
        &self.definition
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn target(&self) -> u32 {
        self.definition.target
    }

    pub fn reward(&self) -> u32 {
        self.definition.reward
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.definition.target
    }

    /// Completion fraction in `[0, 1]`
    pub fn ratio(&self) -> f32 {
        if self.definition.target == 0 {
            return 1.0;
        }
        self.progress.min(self.definition.target) as f32 / self.definition.target as f32
    }

    /// Categories already counted, including by earlier tasks with the same name
    pub fn seen_categories(&self) -> &HashSet<ShapeCategory> {
        &self.seen_categories
    }

    /// Apply one update under this task's policy; returns true if progress moved
    fn advance(&mut self, delta: u32, payload: EventPayload) -> bool {
        match self.definition.policy {
            ProgressPolicy::Count => {
                self.progress = self.progress.saturating_add(delta);
                delta > 0
            }
            ProgressPolicy::DistinctCategory => match payload.category {
                Some(category) if category != ShapeCategory::Unknown => {
                    if self.seen_categories.insert(category) {
                        self.progress = self.progress.saturating_add(1);
                        true
                    } else {
                        false
                    }
                }
                _ => false,
            },
        }
    }
}

/// Tuning for the progression engine
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Experience needed for the first level-up
    pub initial_threshold: u32,
    /// Threshold multiplier applied on each level-up (result is floored)
    pub threshold_growth: f32,
    /// Number of tasks sampled into the active list
    pub active_tasks: usize,
    /// Amount the level-up flash fades per frame
    pub flash_decay: u8,
    /// Seed for task sampling; random when absent
    pub seed: Option<u64>,
    pub pool: Vec<TaskDefinition>,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            initial_threshold: 100,
            threshold_growth: 1.5,
            active_tasks: 2,
            flash_decay: 5,
            seed: None,
            pool: default_task_pool(),
        }
    }
}

/// Level, experience and task state machine
#[derive(Debug)]
pub struct ProgressionEngine {
    level: u32,
    xp: u32,
    threshold: u32,
    threshold_growth: f32,
    active_count: usize,
    flash_decay: u8,
    level_up_flash: u8,
    pool: Vec<TaskDefinition>,
    active: Vec<Task>,
    completed: Vec<Task>,
    /// Categories each distinct-category task has counted this session, by task name
    used_categories: HashMap<String, HashSet<ShapeCategory>>,
    /// Bumped every time the active list is resampled
    generation: u64,
    rng: StdRng,
}

impl Default for ProgressionEngine {
    fn default() -> Self {
        Self::new(ProgressionConfig::default())
    }
}

impl ProgressionEngine {
    /// Create an engine at level 1 with freshly sampled tasks
    pub fn new(config: ProgressionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut engine = Self {
            level: 1,
            xp: 0,
            threshold: config.initial_threshold.max(1),
            threshold_growth: config.threshold_growth,
            active_count: config.active_tasks,
            flash_decay: config.flash_decay,
            level_up_flash: 0,
            pool: config.pool,
            active: Vec::new(),
            completed: Vec::new(),
            used_categories: HashMap::new(),
            generation: 0,
            rng,
        };
        engine.resample_tasks();
        engine
    }

    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[inline]
    pub fn xp(&self) -> u32 {
        self.xp
    }

    #[inline]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    #[inline]
    pub fn level_up_flash(&self) -> u8 {
        self.level_up_flash
    }

    pub fn active_tasks(&self) -> &[Task] {
        &self.active
    }

    pub fn completed_tasks(&self) -> &[Task] {
        &self.completed
    }

    pub fn pool(&self) -> &[TaskDefinition] {
        &self.pool
    }

    /// Award experience, cascading through as many level-ups as it pays for
    ///
    /// Returns the number of levels gained.
    pub fn add_xp(&mut self, amount: u32) -> u32 {
        self.xp = self.xp.saturating_add(amount);
        let mut gained = 0;
        while self.xp >= self.threshold {
            self.xp -= self.threshold;
            self.level += 1;
            self.threshold = ((self.threshold as f64 * self.threshold_growth as f64).floor() as u32).max(1);
            gained += 1;
            log::info!("Level up! Now level {} (next at {} XP)", self.level, self.threshold);
        }
        if gained > 0 {
            self.resample_tasks();
            self.level_up_flash = LEVEL_UP_FLASH;
        }
        gained
    }

    /// Advance the active task called `name`
    ///
    /// Unknown names are ignored. Returns true if the task completed.
    pub fn update_task(&mut self, name: &str, delta: u32, payload: Option<EventPayload>) -> bool {
        let Some(index) = self.active.iter().position(|t| t.name() == name) else {
            return false;
        };
        let task = &mut self.active[index];
        let advanced = task.advance(delta, payload.unwrap_or_default());
        if advanced && task.definition.policy == ProgressPolicy::DistinctCategory {
            self.used_categories
                .entry(task.name().to_string())
                .or_default()
                .extend(task.seen_categories.iter().copied());
        }
        if !advanced || !task.is_complete() {
            return false;
        }

        let task = self.active.remove(index);
        let reward = task.reward();
        log::info!("Task completed: {} (+{} XP)", task.name(), reward);
        self.completed.push(task);
        self.add_xp(reward);

        if self.active.is_empty() {
            self.resample_tasks();
        }
        true
    }

    /// Feed a simulation event to every active task listening for it
    pub fn raise(&mut self, event: ProgressEvent) {
        let trigger = event.trigger();
        let names: Vec<String> = self
            .active
            .iter()
            .filter(|t| t.definition.trigger == Some(trigger))
            .map(|t| t.name().to_string())
            .collect();
        let generation = self.generation;
        for name in names {
            // A resample replaced every listener collected above
            if self.generation != generation {
                break;
            }
            self.update_task(&name, 1, Some(event.payload()));
        }
    }

    /// Per-frame display update: fade the level-up flash
    pub fn animate(&mut self) {
        self.level_up_flash = self.level_up_flash.saturating_sub(self.flash_decay);
    }

    /// Replace the active list with distinct tasks drawn from the pool
    ///
    /// Distinct-category tasks start out knowing every category their name
    /// already counted this session.
    fn resample_tasks(&mut self) {
        let used = &self.used_categories;
        self.active = self
            .pool
            .choose_multiple(&mut self.rng, self.active_count)
            .cloned()
            .map(|definition| {
                let mut task = Task::new(definition);
                if task.definition.policy == ProgressPolicy::DistinctCategory {
                    if let Some(seen) = used.get(task.name()) {
                        task.seen_categories = seen.clone();
                    }
                }
                task
            })
            .collect();
        self.generation += 1;
        log::debug!(
            "Active tasks: {:?}",
            self.active.iter().map(Task::name).collect::<Vec<_>>()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ProgressionEngine {
        ProgressionEngine::new(ProgressionConfig {
            seed: Some(11),
            ..ProgressionConfig::default()
        })
    }

    /// Engine whose pool is exactly `pool`, with all of it active
    fn engine_with(pool: Vec<TaskDefinition>) -> ProgressionEngine {
        let count = pool.len();
        ProgressionEngine::new(ProgressionConfig {
            seed: Some(5),
            active_tasks: count,
            pool,
            ..ProgressionConfig::default()
        })
    }

    #[test]
    fn test_initial_state() {
        let engine = engine();
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.xp(), 0);
        assert_eq!(engine.threshold(), 100);
        assert_eq!(engine.active_tasks().len(), 2);
        assert!(engine.completed_tasks().is_empty());
    }

    #[test]
    fn test_add_xp_single_level() {
        let mut engine = engine();
        assert_eq!(engine.add_xp(150), 1);
        assert_eq!(engine.level(), 2);
        assert_eq!(engine.xp(), 50);
        assert_eq!(engine.threshold(), 150);
        assert_eq!(engine.level_up_flash(), LEVEL_UP_FLASH);
    }

    #[test]
    fn test_add_xp_surplus_equal_to_next_threshold_cascades() {
        let mut engine = engine();
        // 250 - 100 leaves exactly the new threshold of 150
        assert_eq!(engine.add_xp(250), 2);
        assert_eq!(engine.level(), 3);
        assert_eq!(engine.xp(), 0);
        assert_eq!(engine.threshold(), 225);
    }

    #[test]
    fn test_add_xp_multiple_levels() {
        let mut engine = engine();
        // 100 + 150 + 225 = 475
        assert_eq!(engine.add_xp(480), 3);
        assert_eq!(engine.level(), 4);
        assert_eq!(engine.xp(), 5);
        assert_eq!(engine.threshold(), 337);
    }

    #[test]
    fn test_xp_below_threshold_invariant() {
        let mut engine = engine();
        for amount in [0, 1, 99, 1, 149, 500, 10_000, 3] {
            engine.add_xp(amount);
            assert!(engine.xp() < engine.threshold());
        }
    }

    #[test]
    fn test_no_level_up_keeps_flash_dark() {
        let mut engine = engine();
        engine.add_xp(99);
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.level_up_flash(), 0);
    }

    #[test]
    fn test_flash_decays_and_saturates() {
        let mut engine = engine();
        engine.add_xp(100);
        engine.animate();
        assert_eq!(engine.level_up_flash(), 250);
        for _ in 0..100 {
            engine.animate();
        }
        assert_eq!(engine.level_up_flash(), 0);
    }

    #[test]
    fn test_sampled_tasks_are_distinct() {
        let mut engine = engine();
        for _ in 0..20 {
            engine.add_xp(engine.threshold());
            let names: HashSet<&str> = engine.active_tasks().iter().map(Task::name).collect();
            assert_eq!(names.len(), 2);
        }
    }

    #[test]
    fn test_count_policy_completes_and_rewards() {
        let mut engine = engine_with(vec![TaskDefinition::new("Create objects", 5, 50)
            .with_trigger(TaskTrigger::ObjectCreated)]);

        for _ in 0..4 {
            assert!(!engine.update_task("Create objects", 1, None));
        }
        assert!(engine.update_task("Create objects", 1, None));
        assert_eq!(engine.xp(), 50);
        assert_eq!(engine.completed_tasks().len(), 1);
        // The list emptied, so it was resampled
        assert_eq!(engine.active_tasks().len(), 1);
        assert_eq!(engine.active_tasks()[0].progress(), 0);
    }

    #[test]
    fn test_distinct_category_counts_each_once() {
        let mut engine = engine_with(vec![TaskDefinition::new("Use all shapes", 4, 75)
            .with_trigger(TaskTrigger::ShapeUsed)
            .with_policy(ProgressPolicy::DistinctCategory)]);

        let ball = Some(EventPayload::category(ShapeCategory::Ball));
        engine.update_task("Use all shapes", 1, ball);
        engine.update_task("Use all shapes", 1, ball);
        engine.update_task("Use all shapes", 1, ball);
        assert_eq!(engine.active_tasks()[0].progress(), 1);

        engine.update_task("Use all shapes", 1, Some(EventPayload::category(ShapeCategory::Box)));
        assert_eq!(engine.active_tasks()[0].progress(), 2);
    }

    #[test]
    fn test_distinct_category_ignores_missing_payload() {
        let mut engine = engine_with(vec![TaskDefinition::new("Use all shapes", 4, 75)
            .with_policy(ProgressPolicy::DistinctCategory)]);

        engine.update_task("Use all shapes", 1, None);
        engine.update_task("Use all shapes", 1, Some(EventPayload::default()));
        engine.update_task("Use all shapes", 1, Some(EventPayload::category(ShapeCategory::Unknown)));
        assert_eq!(engine.active_tasks()[0].progress(), 0);
    }

    #[test]
    fn test_distinct_categories_persist_across_resample() {
        let mut engine = engine_with(vec![TaskDefinition::new("Use all shapes", 2, 10)
            .with_trigger(TaskTrigger::ShapeUsed)
            .with_policy(ProgressPolicy::DistinctCategory)]);

        engine.raise(ProgressEvent::ShapeUsed(ShapeCategory::Ball));
        engine.raise(ProgressEvent::ShapeUsed(ShapeCategory::Box));
        assert_eq!(engine.completed_tasks().len(), 1);

        // The resampled task already knows Ball and Box
        engine.raise(ProgressEvent::ShapeUsed(ShapeCategory::Ball));
        engine.raise(ProgressEvent::ShapeUsed(ShapeCategory::Box));
        assert_eq!(engine.completed_tasks().len(), 1);
        assert_eq!(engine.xp(), 10);
        assert_eq!(engine.active_tasks()[0].progress(), 0);

        engine.raise(ProgressEvent::ShapeUsed(ShapeCategory::Triangle));
        assert_eq!(engine.active_tasks()[0].progress(), 1);
    }

    #[test]
    fn test_unknown_task_name_is_ignored() {
        let mut engine = engine();
        let before: Vec<u32> = engine.active_tasks().iter().map(Task::progress).collect();
        assert!(!engine.update_task("No such task", 10, None));
        let after: Vec<u32> = engine.active_tasks().iter().map(Task::progress).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_raise_routes_by_trigger() {
        let mut engine = engine_with(default_task_pool());
        engine.raise(ProgressEvent::ObjectCreated);
        engine.raise(ProgressEvent::ShapeUsed(ShapeCategory::Triangle));

        let progress = |engine: &ProgressionEngine, name: &str| {
            engine
                .active_tasks()
                .iter()
                .find(|t| t.name() == name)
                .map(Task::progress)
        };
        assert_eq!(progress(&engine, "Create objects"), Some(1));
        assert_eq!(progress(&engine, "Use all shapes"), Some(1));
        assert_eq!(progress(&engine, "Drag objects"), Some(0));
        assert_eq!(progress(&engine, "Reach speed 100"), Some(0));
    }

    #[test]
    fn test_completion_with_other_tasks_active_does_not_resample() {
        let mut engine = engine_with(vec![
            TaskDefinition::new("Drag objects", 1, 10).with_trigger(TaskTrigger::ObjectDragged),
            TaskDefinition::new("Create objects", 5, 10).with_trigger(TaskTrigger::ObjectCreated),
        ]);
        engine.raise(ProgressEvent::ObjectCreated);
        engine.raise(ProgressEvent::ObjectDragged);

        assert_eq!(engine.active_tasks().len(), 1);
        assert_eq!(engine.active_tasks()[0].name(), "Create objects");
        assert_eq!(engine.active_tasks()[0].progress(), 1);
    }

    #[test]
    fn test_level_up_mid_raise_spares_fresh_tasks() {
        let mut engine = engine_with(vec![
            TaskDefinition::new("First", 1, 100).with_trigger(TaskTrigger::ObjectCreated),
            TaskDefinition::new("Second", 1, 100).with_trigger(TaskTrigger::ObjectCreated),
        ]);
        engine.raise(ProgressEvent::ObjectCreated);

        assert_eq!(engine.level(), 2);
        assert_eq!(engine.xp(), 0);
        assert_eq!(engine.completed_tasks().len(), 1);
        assert!(engine.active_tasks().iter().all(|t| t.progress() == 0));
    }

    #[test]
    fn test_unknown_policy_tag_falls_back_to_count() {
        assert_eq!(ProgressPolicy::from("mystery".to_string()), ProgressPolicy::Count);
        assert_eq!(
            ProgressPolicy::from("distinct_category".to_string()),
            ProgressPolicy::DistinctCategory
        );
    }

    #[test]
    fn test_ratio_clamped() {
        let mut task = Task::new(TaskDefinition::new("t", 4, 0));
        task.advance(10, EventPayload::default());
        assert_eq!(task.ratio(), 1.0);
        let mut task = Task::new(TaskDefinition::new("t", 4, 0));
        task.advance(1, EventPayload::default());
        assert_eq!(task.ratio(), 0.25);
    }
}
