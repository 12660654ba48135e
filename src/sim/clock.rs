//! Scheduler: turns host frame time into fixed ticks and interval firings
//!
//! The host reports real elapsed time once per display frame. The scheduler
//! slices it into fixed [`FRAME_DT`] ticks (capped at [`MAX_SUBSTEPS`]) and
//! counts how many times each interval timer came due. Intervals only
//! accumulate while the scheduler is running and unpaused.

use crate::consts::{FRAME_DT, MAX_SUBSTEPS};
use crate::tuning::Tuning;

/// Slack for float drift when summing many small frame times
const INTERVAL_EPSILON: f64 = 1e-4;

/// A repeating timer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    period: f64,
    elapsed: f64,
    armed: bool,
}

impl Interval {
    pub fn new(period_secs: f32) -> Self {
        Self {
            period: f64::from(period_secs),
            elapsed: 0.0,
            armed: false,
        }
    }

    /// Start counting if not already counting
    pub fn arm(&mut self) {
        if !self.armed {
            self.restart();
        }
    }

    /// Start a fresh period
    pub fn restart(&mut self) {
        self.armed = true;
        self.elapsed = 0.0;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
        self.elapsed = 0.0;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Add elapsed time; returns how many periods completed
    pub fn accumulate(&mut self, secs: f32) -> u32 {
        if !self.armed || self.period <= 0.0 {
            return 0;
        }
        self.elapsed += f64::from(secs.max(0.0));
        let mut fired = 0;
        while self.elapsed + INTERVAL_EPSILON >= self.period {
            self.elapsed = (self.elapsed - self.period).max(0.0);
            fired += 1;
        }
        fired
    }
}

/// What came due during one host frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Firings {
    /// Fixed frame ticks to run
    pub frames: u32,
    /// 1 Hz countdown firings
    pub countdown: u32,
    pub shark_spawn: u32,
    pub shark_steal: u32,
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    running: bool,
    paused: bool,
    frame_accumulator: f32,
    pub countdown: Interval,
    pub shark_spawn: Interval,
    pub shark_steal: Interval,
}

impl Scheduler {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            running: false,
            paused: false,
            frame_accumulator: 0.0,
            countdown: Interval::new(1.0),
            shark_spawn: Interval::new(tuning.shark_spawn_interval),
            shark_steal: Interval::new(tuning.shark_steal_interval),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Begin the frame tick and the countdown. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.paused = false;
        self.frame_accumulator = 0.0;
        self.countdown.restart();
        true
    }

    /// Cancel every timer. Safe to call when not running.
    pub fn stop(&mut self) {
        self.running = false;
        self.paused = false;
        self.frame_accumulator = 0.0;
        self.countdown.disarm();
        self.shark_spawn.disarm();
        self.shark_steal.disarm();
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Unpause and re-arm the frame tick from a clean slate
    pub fn resume(&mut self) {
        self.paused = false;
        self.frame_accumulator = 0.0;
    }

    /// Slice `elapsed` seconds into ticks and timer firings
    pub fn advance(&mut self, elapsed: f32) -> Firings {
        if !self.running || self.paused || elapsed <= 0.0 {
            return Firings::default();
        }

        self.frame_accumulator += elapsed;
        let mut frames = 0;
        while self.frame_accumulator >= FRAME_DT && frames < MAX_SUBSTEPS {
            self.frame_accumulator -= FRAME_DT;
            frames += 1;
        }
        if frames == MAX_SUBSTEPS && self.frame_accumulator >= FRAME_DT {
            log::debug!("Dropping {:.3}s of frame time", self.frame_accumulator);
            self.frame_accumulator = 0.0;
        }

        Firings {
            frames,
            countdown: self.countdown.accumulate(elapsed),
            shark_spawn: self.shark_spawn.accumulate(elapsed),
            shark_steal: self.shark_steal.accumulate(elapsed),
        }
    }
}
