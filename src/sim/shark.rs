//! The shark: a timer-driven adversary that drains score
//!
//! A spawn interval brings it into the tank, a steal interval bites the score
//! while it hunts, and every [`SHARK_HITS_PER_FRAME`] taps push it one frame
//! closer to defeat. On the terminal frame it lingers for a grace window and
//! then leaves.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::state::{GameState, SessionPhase};
use crate::circle_contains;
use crate::consts::*;
use crate::events::GameEvent;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum SharkMode {
    #[default]
    Inactive,
    /// Swimming and stealing
    Hunting,
    /// Terminal frame reached; leaves once the grace window passes
    Defeated { since: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shark {
    pub mode: SharkMode,
    pub pos: Vec2,
    /// Center line of the vertical bob
    pub base_y: f32,
    pub direction: f32,
    pub phase: f32,
    /// 1-based animation frame
    pub frame: u32,
    /// Taps landed this visit
    pub hits: u32,
    /// Points taken this visit
    pub points_stolen: u64,
    /// Horizontal speed (world units/sec)
    pub speed: f32,
    /// Session clock time of the current visit's arrival
    pub spawned_at: f32,
    pub last_steal_at: Option<f32>,
}

impl Default for Shark {
    fn default() -> Self {
        Self {
            mode: SharkMode::Inactive,
            pos: Vec2::ZERO,
            base_y: 0.0,
            direction: 1.0,
            phase: 0.0,
            frame: SHARK_FIRST_FRAME,
            hits: 0,
            points_stolen: 0,
            speed: 0.0,
            spawned_at: 0.0,
            last_steal_at: None,
        }
    }
}

/// Outcome of a tap on the shark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharkHit {
    pub hits: u32,
    /// This hit reached the terminal frame
    pub defeated: bool,
}

impl Shark {
    pub fn active(&self) -> bool {
        self.mode != SharkMode::Inactive
    }

    pub fn hunting(&self) -> bool {
        self.mode == SharkMode::Hunting
    }

    /// Only a hunting shark reacts to taps
    pub fn contains(&self, point: Vec2) -> bool {
        self.hunting() && circle_contains(self.pos, SHARK_HIT_RADIUS, point)
    }

    /// Enter from a random side at a random depth. No-op while already active.
    pub fn spawn(&mut self, rng: &mut impl Rng, now: f32, tuning: &Tuning) -> bool {
        if self.active() {
            return false;
        }
        let from_left = rng.random_bool(0.5);
        let base_y = rng.random_range(-SHARK_ENTRY_Y..=SHARK_ENTRY_Y);
        let (x, direction) = if from_left {
            (-SWIM_BOUND_X, 1.0)
        } else {
            (SWIM_BOUND_X, -1.0)
        };

        *self = Self {
            mode: SharkMode::Hunting,
            pos: Vec2::new(x, base_y),
            base_y,
            direction,
            speed: tuning.shark_base_speed,
            spawned_at: now,
            ..Self::default()
        };
        true
    }

    /// Register one tap. Every few hits the shark escalates a frame and speeds up.
    pub fn register_hit(&mut self, now: f32, tuning: &Tuning) -> Option<SharkHit> {
        if !self.hunting() {
            return None;
        }
        self.hits += 1;
        if self.hits.is_multiple_of(SHARK_HITS_PER_FRAME) && self.frame < SHARK_TERMINAL_FRAME {
            self.frame += 1;
            self.speed += tuning.shark_speed_step;
        }

        let defeated = self.frame >= SHARK_TERMINAL_FRAME;
        if defeated {
            self.mode = SharkMode::Defeated { since: now };
        }
        Some(SharkHit {
            hits: self.hits,
            defeated,
        })
    }

    /// Move the shark. Returns true when it leaves the tank this step.
    pub fn advance(&mut self, dt: f32, now: f32, tuning: &Tuning) -> bool {
        let leaving = match self.mode {
            SharkMode::Inactive => return false,
            SharkMode::Hunting => now - self.spawned_at >= tuning.shark_lifetime,
            SharkMode::Defeated { since } => now - since >= tuning.shark_grace,
        };
        if leaving {
            self.mode = SharkMode::Inactive;
            return true;
        }

        self.pos.x += self.direction * self.speed * dt;
        if self.pos.x > SWIM_BOUND_X {
            self.pos.x = SWIM_BOUND_X;
            self.direction = -1.0;
        } else if self.pos.x < -SWIM_BOUND_X {
            self.pos.x = -SWIM_BOUND_X;
            self.direction = 1.0;
        }

        // Faster sharks bob harder
        let agitation = if tuning.shark_base_speed > 0.0 {
            self.speed / tuning.shark_base_speed
        } else {
            1.0
        };
        self.phase += SHARK_PHASE_RATE * agitation * dt;
        self.pos.y = self.base_y + SHARK_AMPLITUDE * self.phase.sin();
        false
    }
}

impl GameState {
    /// Spawn interval fired. No-op outside active play.
    pub fn shark_spawn_timer(&mut self, tuning: &Tuning) -> bool {
        if self.phase != SessionPhase::Playing {
            return false;
        }
        let now = self.clock;
        let spawned = self.shark.spawn(&mut self.rng, now, tuning);
        if spawned {
            log::info!("Shark spawned at depth {:.2}", self.shark.base_y);
            self.events.push(GameEvent::SharkSpawned);
        }
        spawned
    }

    /// Steal interval fired. Returns the points taken.
    pub fn shark_steal_timer(&mut self, tuning: &Tuning) -> u64 {
        if self.phase != SessionPhase::Playing || !self.shark.hunting() {
            return 0;
        }
        let taken = self.deduct_score(tuning.shark_steal_amount);
        self.shark.points_stolen += taken;
        self.shark.last_steal_at = Some(self.clock);
        self.events.push(GameEvent::SharkStole { amount: taken });
        taken
    }

    /// Tap landed on the shark
    pub fn shark_hit(&mut self, tuning: &Tuning) -> Option<SharkHit> {
        let hit = self.shark.register_hit(self.clock, tuning)?;
        self.events.push(GameEvent::SharkHit { hits: hit.hits });
        if hit.defeated {
            log::info!("Shark defeated after {} hits", hit.hits);
            self.events.push(GameEvent::SharkDefeated);
        }
        Some(hit)
    }

    /// Per-frame shark motion and departure
    pub fn advance_shark(&mut self, dt: f32, tuning: &Tuning) {
        if self.shark.advance(dt, self.clock, tuning) {
            log::info!("Shark left with {} points", self.shark.points_stolen);
            self.events.push(GameEvent::SharkDeparted);
        }
    }
}
