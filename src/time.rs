//! Frame clock.
//!
//! Turns wall-clock frame intervals into the scaled `delta_time` the layers
//! consume. One unit of `delta_time` is one 60 Hz frame, so motion constants
//! read as "per frame" regardless of the actual refresh rate.
//!
//! The clock is an ordinary value owned by whoever drives the animation and
//! passed into each tick; there is no global instance.
//!
//! # Example
//!
//! ```ignore
//! use driftfield::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//! clock.set_speed(1.5);
//!
//! // In your frame callback:
//! let dt = clock.update();
//! scene.advance(dt);
//! ```

use std::time::Instant;

/// Delta-time units per elapsed millisecond (60 units per second).
pub const DELTA_PER_MS: f64 = 0.06;

/// Longest frame interval honoured, in milliseconds.
///
/// Longer gaps (a backgrounded tab, a debugger pause) count as this much, so
/// the field never lurches forward after a stall.
pub const MAX_FRAME_MS: f64 = 100.0;

/// Scaled frame-delta source.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// When the last frame was taken by [`update`](Self::update).
    last_frame: Instant,
    /// Clamped milliseconds accumulated while running.
    elapsed_ms: f64,
    /// Delta produced by the last tick.
    delta: f64,
    /// Ticks since start or reset.
    frame_count: u64,
    /// While paused every tick yields zero.
    paused: bool,
    /// Delta to use instead of measured time.
    fixed_delta: Option<f64>,
    /// Global speed multiplier.
    speed: f64,
}

impl FrameClock {
    /// A running clock starting now, at normal speed.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            elapsed_ms: 0.0,
            delta: 0.0,
            frame_count: 0,
            paused: false,
            fixed_delta: None,
            speed: 1.0,
        }
    }

    /// Measure the time since the previous call and return the scaled delta.
    pub fn update(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).as_secs_f64() * 1000.0;
        self.last_frame = now;
        self.tick_ms(elapsed)
    }

    /// Advance by an externally measured interval in milliseconds.
    ///
    /// Negative intervals count as zero; intervals above [`MAX_FRAME_MS`]
    /// are clamped to it.
    pub fn tick_ms(&mut self, elapsed_ms: f64) -> f64 {
        if self.paused {
            self.delta = 0.0;
            return self.delta;
        }

        let elapsed = elapsed_ms.clamp(0.0, MAX_FRAME_MS);
        self.delta = self.fixed_delta.unwrap_or(DELTA_PER_MS * elapsed) * self.speed;
        self.elapsed_ms += elapsed;
        self.frame_count += 1;
        self.delta
    }

    /// Delta produced by the last tick.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Clamped running time in milliseconds.
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Ticks since start or reset.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Current speed multiplier.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Whether the clock is paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Set the speed multiplier. Negative values clamp to zero.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.max(0.0);
    }

    /// Use a constant delta per tick instead of measured time.
    ///
    /// The speed multiplier still applies. Pass `None` to go back to
    /// measured time.
    pub fn set_fixed_delta(&mut self, delta: Option<f64>) {
        self.fixed_delta = delta;
    }

    /// Stop producing motion.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after a pause. The paused interval is not counted.
    pub fn resume(&mut self) {
        if self.paused {
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    /// Toggle pause state.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Reset counters, keeping speed and fixed-delta settings.
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
        self.elapsed_ms = 0.0;
        self.delta = 0.0;
        self.frame_count = 0;
        self.paused = false;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
