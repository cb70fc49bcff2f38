//! Fixed-period playback clock.
//!
//! The clock is driven by the host: it reports elapsed wall time through
//! [`PlaybackClock::advance`] (or fires single ticks with [`PlaybackClock::tick`]),
//! and the clock converts that into whole tick periods. Ticking only happens
//! while playing, so stopping or pausing cancels it and dropping the clock leaves
//! nothing running.

use std::time::Duration;

/// Transport state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PlaybackMode {
    /// Not playing, playhead at zero.
    #[default]
    Stopped,
    /// Advancing every tick.
    Playing,
    /// Not playing, playhead kept where it was.
    Paused,
}

/// Serializable view of the clock for the host.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlaybackState {
    /// Whether the clock is ticking.
    pub is_playing: bool,
    /// Playhead position in `[0, total_duration_sec]`.
    pub current_time_sec: f64,
    /// Upper bound of the playhead.
    pub total_duration_sec: f64,
    /// Seconds of timeline per second of wall time.
    pub speed: f64,
}

/// Playhead over `[0, total_duration]` advanced in fixed tick periods.
#[derive(Clone, Debug)]
pub struct PlaybackClock {
    mode: PlaybackMode,
    current_time_sec: f64,
    total_duration_sec: f64,
    speed: f64,
    min_speed: f64,
    max_speed: f64,
    tick_period: Duration,
    // Elapsed wall time not yet consumed by a whole tick.
    carry: Duration,
}

impl PlaybackClock {
    /// Create a stopped clock.
    ///
    /// `tick_period` must be non-zero and `min_speed <= max_speed`; both come
    /// from validated [`crate::EditorOpts`].
    pub fn new(
        total_duration_sec: f64,
        tick_period: Duration,
        min_speed: f64,
        max_speed: f64,
    ) -> Self {
        Self {
            mode: PlaybackMode::Stopped,
            current_time_sec: 0.0,
            total_duration_sec: total_duration_sec.max(0.0),
            speed: 1.0_f64.clamp(min_speed, max_speed),
            min_speed,
            max_speed,
            tick_period,
            carry: Duration::ZERO,
        }
    }

    /// Current transport mode.
    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    /// Whether the clock is ticking.
    pub fn is_playing(&self) -> bool {
        self.mode == PlaybackMode::Playing
    }

    /// Playhead position in seconds.
    pub fn current_time_sec(&self) -> f64 {
        self.current_time_sec
    }

    /// Upper bound of the playhead.
    pub fn total_duration_sec(&self) -> f64 {
        self.total_duration_sec
    }

    /// Speed multiplier.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Fixed tick period.
    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Snapshot for the host.
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            is_playing: self.is_playing(),
            current_time_sec: self.current_time_sec,
            total_duration_sec: self.total_duration_sec,
            speed: self.speed,
        }
    }

    /// Toggle playback: pauses when playing, otherwise starts ticking.
    ///
    /// Starting from the very end rewinds to zero first.
    pub fn play(&mut self) {
        if self.is_playing() {
            self.pause();
            return;
        }
        if self.current_time_sec >= self.total_duration_sec {
            self.current_time_sec = 0.0;
        }
        self.mode = PlaybackMode::Playing;
        self.carry = Duration::ZERO;
        tracing::debug!(time = self.current_time_sec, speed = self.speed, "playback started");
    }

    /// Stop ticking and keep the playhead.
    pub fn pause(&mut self) {
        if self.mode == PlaybackMode::Stopped {
            return;
        }
        self.mode = PlaybackMode::Paused;
        self.carry = Duration::ZERO;
        tracing::debug!(time = self.current_time_sec, "playback paused");
    }

    /// Stop ticking and rewind to zero.
    pub fn stop(&mut self) {
        self.mode = PlaybackMode::Stopped;
        self.current_time_sec = 0.0;
        self.carry = Duration::ZERO;
        tracing::debug!("playback stopped");
    }

    /// Move the playhead, clamped to `[0, total]`.
    ///
    /// Playing stays playing; a stopped clock moved off zero becomes paused.
    pub fn seek(&mut self, time_sec: f64) {
        if time_sec.is_nan() {
            return;
        }
        self.current_time_sec = time_sec.clamp(0.0, self.total_duration_sec);
        if self.mode == PlaybackMode::Stopped && self.current_time_sec > 0.0 {
            self.mode = PlaybackMode::Paused;
        }
        tracing::trace!(time = self.current_time_sec, "seeked");
    }

    /// Change the speed multiplier, clamped to the configured range.
    pub fn set_speed(&mut self, multiplier: f64) {
        if !multiplier.is_finite() {
            return;
        }
        self.speed = multiplier.clamp(self.min_speed, self.max_speed);
        tracing::debug!(speed = self.speed, "playback speed set");
    }

    /// Update the upper bound, re-clamping the playhead when it now lies past it.
    pub fn set_total_duration(&mut self, total_duration_sec: f64) {
        self.total_duration_sec = total_duration_sec.max(0.0);
        if self.current_time_sec > self.total_duration_sec {
            self.current_time_sec = self.total_duration_sec;
        }
        if self.is_playing() && self.current_time_sec >= self.total_duration_sec {
            self.pause();
        }
    }

    /// Run one tick period. Returns `false` when the clock is not playing.
    pub fn tick(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.current_time_sec += self.tick_period.as_secs_f64() * self.speed;
        if self.current_time_sec >= self.total_duration_sec {
            self.current_time_sec = self.total_duration_sec;
            self.pause();
        }
        true
    }

    /// Consume `elapsed` wall time as whole tick periods and return how many ran.
    ///
    /// The remainder is carried into the next call while playback continues.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.is_playing() || self.tick_period.is_zero() {
            return 0;
        }
        self.carry += elapsed;
        let mut ran = 0;
        while self.carry >= self.tick_period && self.is_playing() {
            self.carry -= self.tick_period;
            self.tick();
            ran += 1;
        }
        ran
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/clock.rs"]
mod tests;
