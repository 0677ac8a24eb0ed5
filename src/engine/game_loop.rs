/// Fixed-timestep simulation clock
///
/// Frames arrive at whatever rate the window delivers them; the simulation
/// advances only in whole 60 Hz ticks, so everything driven by [`TickTime`]
/// replays identically regardless of frame rate.
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Simulation rate (60 ticks per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const TICK: Duration = Duration::from_micros(16_667);

/// Ticks allowed per frame before the backlog is dropped
const MAX_TICKS_PER_FRAME: u32 = 5;

/// Frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// Simulation clock handed to every tick callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickTime {
    /// Absolute simulation time in milliseconds, at the end of this tick
    pub now_ms: f64,
    /// Time covered by this tick in milliseconds
    pub delta_ms: f64,
}

impl TickTime {
    /// Delta in seconds, for subsystems that work in seconds
    pub fn delta_secs(&self) -> f32 {
        (self.delta_ms / 1000.0) as f32
    }
}

/// Converts wall-clock frames into fixed simulation ticks
pub struct GameLoop {
    /// Wall time not yet consumed by ticks
    accumulator: Duration,
    last_frame: Instant,
    paused: bool,

    recent_frames: VecDeque<Duration>,
    recent_total: Duration,
    frame_count: u64,
    tick_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame: Instant::now(),
            paused: false,
            recent_frames: VecDeque::with_capacity(FPS_WINDOW + 1),
            recent_total: Duration::ZERO,
            frame_count: 0,
            tick_count: 0,
        }
    }

    /// Begin a new frame, returns the number of ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;
        self.record_frame(frame_time);

        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;
        let mut ticks = 0;
        while self.accumulator >= TICK && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= TICK;
            ticks += 1;
        }

        // Drop the backlog instead of trying to catch up on a later frame
        if self.accumulator >= TICK {
            log::warn!(
                "Simulation fell behind by {:?}, skipping ahead",
                self.accumulator
            );
            self.accumulator = Duration::ZERO;
        }

        ticks
    }

    /// Consume one fixed step and return its simulation time
    pub fn advance_tick(&mut self) -> TickTime {
        self.tick_count += 1;
        let delta_ms = f64::from(FIXED_TIMESTEP) * 1000.0;
        TickTime {
            now_ms: self.tick_count as f64 * delta_ms,
            delta_ms,
        }
    }

    fn record_frame(&mut self, frame_time: Duration) {
        self.recent_frames.push_back(frame_time);
        self.recent_total += frame_time;
        if self.recent_frames.len() > FPS_WINDOW {
            if let Some(oldest) = self.recent_frames.pop_front() {
                self.recent_total -= oldest;
            }
        }
    }

    /// Frames per second averaged over the recent window
    pub fn fps(&self) -> f32 {
        let secs = self.recent_total.as_secs_f32();
        if secs > 0.0 {
            self.recent_frames.len() as f32 / secs
        } else {
            0.0
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop or restart the simulation; resuming discards the time spent paused
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if self.paused {
            log::info!("Game paused");
        } else {
            self.accumulator = Duration::ZERO;
            log::info!("Game resumed");
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::thread;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.tick_count(), 0);
        assert_eq!(game_loop.fps(), 0.0);
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_advance_tick_accumulates_simulation_time() {
        let mut game_loop = GameLoop::new();

        let first = game_loop.advance_tick();
        assert_relative_eq!(first.delta_ms, 16.6667, epsilon = 1e-3);
        assert_relative_eq!(first.now_ms, first.delta_ms);

        for _ in 0..59 {
            game_loop.advance_tick();
        }
        let last = game_loop.advance_tick();
        assert_eq!(game_loop.tick_count(), 61);
        assert_relative_eq!(last.now_ms, 61.0 * last.delta_ms, epsilon = 1e-9);
        assert_relative_eq!(last.delta_secs(), FIXED_TIMESTEP, epsilon = 1e-6);
    }

    #[test]
    fn test_toggle_pause() {
        let mut game_loop = GameLoop::new();
        game_loop.toggle_pause();
        assert!(game_loop.is_paused());

        game_loop.toggle_pause();
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_paused_no_ticks() {
        let mut game_loop = GameLoop::new();
        game_loop.toggle_pause();

        thread::sleep(Duration::from_millis(50));

        assert_eq!(game_loop.begin_frame(), 0);
        assert_eq!(game_loop.frame_count(), 1);
    }

    #[test]
    fn test_long_frame_is_capped_and_backlog_dropped() {
        let mut game_loop = GameLoop::new();

        // Simulate a very long frame (300ms)
        thread::sleep(Duration::from_millis(300));

        assert_eq!(game_loop.begin_frame(), MAX_TICKS_PER_FRAME);
        // Nothing carried over into the next frame
        assert_eq!(game_loop.begin_frame(), 0);
    }

    #[test]
    fn test_fps_window_average() {
        let mut game_loop = GameLoop::new();
        for _ in 0..(FPS_WINDOW + 5) {
            game_loop.record_frame(Duration::from_millis(20));
        }

        assert_eq!(game_loop.recent_frames.len(), FPS_WINDOW);
        assert_relative_eq!(game_loop.fps(), 50.0, epsilon = 1e-3);
    }
}
