//! Day/night clock
//!
//! Purely cosmetic: advanced once per tick and read by presentation, never
//! fed back into the simulation.

/// Length of a full day in clock units
pub const DAY_LENGTH: u32 = 2400;
/// First unit of daytime
pub const SUNRISE: u32 = 600;
/// First unit of night
pub const SUNSET: u32 = 1800;

/// Time of day, one unit per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvironmentClock {
    day_time: u32,
}

impl EnvironmentClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at a specific time of day
    pub fn at(day_time: u32) -> Self {
        Self {
            day_time: day_time.min(DAY_LENGTH),
        }
    }

    /// Advance one unit, wrapping to 0 after the end of the day
    pub fn tick(&mut self) {
        self.day_time += 1;
        if self.day_time > DAY_LENGTH {
            self.day_time = 0;
        }
    }

    #[inline]
    pub fn day_time(&self) -> u32 {
        self.day_time
    }

    pub fn is_day(&self) -> bool {
        (SUNRISE..SUNSET).contains(&self.day_time)
    }

    /// Position through the day in `[0, 1]`
    pub fn fraction(&self) -> f32 {
        self.day_time as f32 / DAY_LENGTH as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_midnight() {
        let clock = EnvironmentClock::new();
        assert_eq!(clock.day_time(), 0);
        assert!(!clock.is_day());
    }

    #[test]
    fn test_day_boundaries() {
        assert!(!EnvironmentClock::at(599).is_day());
        assert!(EnvironmentClock::at(600).is_day());
        assert!(EnvironmentClock::at(1799).is_day());
        assert!(!EnvironmentClock::at(1800).is_day());
    }

    #[test]
    fn test_wraps_after_full_day() {
        let mut clock = EnvironmentClock::at(2399);
        clock.tick();
        assert_eq!(clock.day_time(), 2400);
        clock.tick();
        assert_eq!(clock.day_time(), 0);
    }
}
