//! Frame pacing for the simulation.
//!
//! The tick interval is `500 / velocity` milliseconds. Velocity is an integer
//! scaled by 1.1 or 0.9 per key press and truncated, without bounds: it can
//! reach zero, after which pacing stalls for good.

pub const DEFAULT_VELOCITY: i32 = 50;
const PACING_MS: f64 = 500.0;
const SPEED_UP_FACTOR: f64 = 1.1;
const SLOW_DOWN_FACTOR: f64 = 0.9;

/// Wall-clock source in milliseconds.
pub trait TickSource {
    fn now_ms(&self) -> f64;
}

/// Hand-driven tick source for tests and headless runs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualTicks {
    now_ms: f64,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }
}

impl TickSource for ManualTicks {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    velocity: i32,
    last_tick_ms: f64,
}

impl SimulationClock {
    pub fn new(velocity: i32, start_ms: f64) -> Self {
        Self {
            velocity,
            last_tick_ms: start_ms,
        }
    }

    pub fn velocity(&self) -> i32 {
        self.velocity
    }

    pub fn speed_up(&mut self) {
        self.velocity = (self.velocity as f64 * SPEED_UP_FACTOR) as i32;
    }

    pub fn slow_down(&mut self) {
        self.velocity = (self.velocity as f64 * SLOW_DOWN_FACTOR) as i32;
    }

    /// Infinite at zero velocity, negative below it.
    pub fn interval_ms(&self) -> f64 {
        PACING_MS / self.velocity as f64
    }

    /// Single gate check: true when a full interval has passed since the last
    /// tick, which then restarts the interval from `now`.
    pub fn poll(&mut self, source: &impl TickSource) -> bool {
        let now = source.now_ms();
        if now < self.last_tick_ms + self.interval_ms() {
            return false;
        }
        self.last_tick_ms = now;
        true
    }

    /// Number of ticks owed since the last call, at most `max_ticks`. Falling
    /// further behind than that drops the backlog instead of catching up.
    pub fn due_ticks(&mut self, source: &impl TickSource, max_ticks: u32) -> u32 {
        let now = source.now_ms();
        let interval = self.interval_ms();

        if interval <= 0.0 {
            self.last_tick_ms = now;
            return max_ticks;
        }

        let elapsed = now - self.last_tick_ms;
        if elapsed < interval {
            return 0;
        }

        let owed = (elapsed / interval).floor();
        if owed >= max_ticks as f64 {
            self.last_tick_ms = now;
            return max_ticks;
        }

        self.last_tick_ms += owed * interval;
        owed as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_velocity_ticks_every_ten_ms() {
        let clock = SimulationClock::new(DEFAULT_VELOCITY, 0.0);
        assert_eq!(clock.interval_ms(), 10.0);
    }

    #[test]
    fn poll_gates_on_interval() {
        let mut ticks = ManualTicks::new();
        let mut clock = SimulationClock::new(DEFAULT_VELOCITY, 0.0);

        ticks.advance(9.0);
        assert!(!clock.poll(&ticks));
        ticks.advance(1.0);
        assert!(clock.poll(&ticks));
        assert!(!clock.poll(&ticks));
    }

    #[test]
    fn due_ticks_accumulates_and_caps() {
        let mut ticks = ManualTicks::new();
        let mut clock = SimulationClock::new(DEFAULT_VELOCITY, 0.0);

        ticks.advance(35.0);
        assert_eq!(clock.due_ticks(&ticks, 8), 3);
        ticks.advance(5.0);
        assert_eq!(clock.due_ticks(&ticks, 8), 1);

        ticks.advance(1000.0);
        assert_eq!(clock.due_ticks(&ticks, 8), 8);
        assert_eq!(clock.due_ticks(&ticks, 8), 0);
    }

    #[test]
    fn speed_keys_truncate_velocity() {
        let mut clock = SimulationClock::new(DEFAULT_VELOCITY, 0.0);
        clock.speed_up();
        assert_eq!(clock.velocity(), 55);
        clock.slow_down();
        assert_eq!(clock.velocity(), 49);
    }

    #[test]
    fn velocity_can_drain_to_zero_and_stall() {
        let mut ticks = ManualTicks::new();
        let mut clock = SimulationClock::new(1, 0.0);
        clock.slow_down();
        assert_eq!(clock.velocity(), 0);

        clock.speed_up();
        assert_eq!(clock.velocity(), 0);

        ticks.advance(1_000_000.0);
        assert!(!clock.poll(&ticks));
        assert_eq!(clock.due_ticks(&ticks, 8), 0);
    }

    #[test]
    fn negative_velocity_never_waits() {
        let ticks = ManualTicks::new();
        let mut clock = SimulationClock::new(-5, 0.0);
        assert!(clock.poll(&ticks));
        assert_eq!(clock.due_ticks(&ticks, 4), 4);
    }
}
