//! Data-driven game balance
//!
//! Every number a designer might want to nudge lives here. Values load from
//! JSON; anything missing falls back to the shipped defaults.

use serde::{Deserialize, Serialize};

/// Balance values for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// RNG seed (the native runner replaces 0 with entropy)
    pub seed: u64,
    /// Starting countdown in seconds
    pub session_seconds: u32,

    // === Bubbles ===
    /// Probability of spawning a bubble on any tick
    pub bubble_spawn_chance: f64,
    /// Bubble radius in world units
    pub bubble_size: f32,
    /// Rise speed range (world units/sec)
    pub bubble_min_speed: f32,
    pub bubble_max_speed: f32,
    /// Lateral drift amplitude around the spawn column
    pub bubble_drift_amplitude: f32,
    /// Lateral drift frequency (radians per world unit of rise)
    pub bubble_drift_frequency: f32,
    /// Points for popping any bubble
    pub pop_base_score: u64,
    /// Extra points per starting strength above 1
    pub pop_strength_bonus: u64,

    // === Shop ===
    /// Price of one portion of fish food
    pub food_cost: u64,
    /// Seconds added per point spent (price / divisor)
    pub time_bonus_divisor: u64,

    // === Fish ===
    /// Evolution animation length in seconds
    pub evolve_duration: f32,

    // === Shark ===
    /// Seconds between spawn checks
    pub shark_spawn_interval: f32,
    /// Seconds between steals while active
    pub shark_steal_interval: f32,
    /// Points taken per steal
    pub shark_steal_amount: u64,
    /// Base horizontal speed (world units/sec)
    pub shark_base_speed: f32,
    /// Speed added per escalation step
    pub shark_speed_step: f32,
    /// Seconds between reaching the terminal frame and despawning
    pub shark_grace: f32,
    /// Seconds an undefeated shark stays before leaving
    pub shark_lifetime: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            seed: 0,
            session_seconds: 30,

            bubble_spawn_chance: 0.03,
            bubble_size: 0.08,
            bubble_min_speed: 0.25,
            bubble_max_speed: 0.6,
            bubble_drift_amplitude: 0.05,
            bubble_drift_frequency: 6.0,
            pop_base_score: 1000,
            pop_strength_bonus: 500,

            food_cost: 50,
            time_bonus_divisor: 10,

            evolve_duration: 1.0,

            shark_spawn_interval: 10.0,
            shark_steal_interval: 5.0,
            shark_steal_amount: 20,
            shark_base_speed: 0.3,
            shark_speed_step: 0.1,
            shark_grace: 2.0,
            shark_lifetime: 30.0,
        }
    }
}

impl Tuning {
    /// Builder: set the RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse tuning from JSON (missing fields use defaults)
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Seconds of countdown bought with a purchase of `cost` points
    pub fn time_bonus(&self, cost: u64) -> u32 {
        if self.time_bonus_divisor == 0 {
            return 0;
        }
        u32::try_from(cost / self.time_bonus_divisor).unwrap_or(u32::MAX)
    }

    /// Score for popping a bubble that spawned with `strength` hit points
    pub fn pop_score(&self, strength: u8) -> u64 {
        self.pop_base_score + self.pop_strength_bonus * u64::from(strength.saturating_sub(1))
    }
}
