//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`GameState`]. Collaborators read it
//! through [`super::Snapshot`] and never mutate entities directly.

use std::fmt;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bubbles::BubblePool;
use super::fish::Aquarium;
use super::shark::Shark;
use crate::events::GameEvent;

/// Top-level session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Title screen, nothing simulated
    #[default]
    Menu,
    /// Instructions shown before the first round
    Tutorial,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Countdown ran out
    GameOver,
    /// Every species evolved
    Won,
}

impl SessionPhase {
    /// True while a round is in progress (playing or paused)
    pub fn in_round(self) -> bool {
        matches!(self, SessionPhase::Playing | SessionPhase::Paused)
    }

    /// True once the round has ended
    pub fn is_over(self) -> bool {
        matches!(self, SessionPhase::GameOver | SessionPhase::Won)
    }
}

/// One step of the fish progression chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Species {
    FishyBoi,
    Speedy,
    BigFish,
    ClownFish,
    SunFish,
}

/// Static per-species data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesInfo {
    /// Stable identifier used by the UI shell
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Shop price
    pub cost: u64,
    /// Horizontal swim speed (world units/sec)
    pub swim_speed: f32,
    /// Render and hitbox scale
    pub scale: f32,
    /// Species unlocked by evolving this one
    pub next: Option<Species>,
}

const SPECIES_TABLE: [SpeciesInfo; Species::COUNT] = [
    SpeciesInfo {
        id: "fishyBoi",
        name: "Fishy Boi",
        cost: 50,
        swim_speed: 0.25,
        scale: 1.0,
        next: Some(Species::Speedy),
    },
    SpeciesInfo {
        id: "speedy",
        name: "Speedy",
        cost: 200,
        swim_speed: 0.5,
        scale: 0.9,
        next: Some(Species::BigFish),
    },
    SpeciesInfo {
        id: "bigFish",
        name: "Big Fish",
        cost: 500,
        swim_speed: 0.2,
        scale: 1.5,
        next: Some(Species::ClownFish),
    },
    SpeciesInfo {
        id: "clownFish",
        name: "Clown Fish",
        cost: 1000,
        swim_speed: 0.3,
        scale: 1.1,
        next: Some(Species::SunFish),
    },
    SpeciesInfo {
        id: "sunFish",
        name: "Sun Fish",
        cost: 2000,
        swim_speed: 0.15,
        scale: 1.8,
        next: None,
    },
];

impl Species {
    pub const COUNT: usize = 5;

    /// Chain order, first to last
    pub const ALL: [Species; Species::COUNT] = [
        Species::FishyBoi,
        Species::Speedy,
        Species::BigFish,
        Species::ClownFish,
        Species::SunFish,
    ];

    /// Position in the chain (also the index into per-species arrays)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn info(self) -> &'static SpeciesInfo {
        &SPECIES_TABLE[self.index()]
    }

    pub fn next(self) -> Option<Species> {
        self.info().next
    }

    pub fn cost(self) -> u64 {
        self.info().cost
    }

    /// Look up a species by its UI identifier (e.g. `"fishyBoi"`)
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.info().id == id)
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().name)
    }
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Currency, never negative
    pub score: u64,
    /// Countdown in whole seconds
    pub time_remaining: u32,
    /// Current phase
    pub phase: SessionPhase,
    /// Seconds of unpaused play this round
    pub clock: f32,
    /// Frame ticks this round
    pub time_ticks: u64,
    /// Bubbles and their pop animations
    pub bubbles: BubblePool,
    /// Fish progression and motion
    pub aquarium: Aquarium,
    /// The adversary
    pub shark: Shark,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a fresh state in the menu phase
    pub fn new(seed: u64, session_seconds: u32) -> Self {
        Self {
            seed,
            score: 0,
            time_remaining: session_seconds,
            phase: SessionPhase::Menu,
            clock: 0.0,
            time_ticks: 0,
            bubbles: BubblePool::default(),
            aquarium: Aquarium::new(),
            shark: Shark::default(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Reset every per-round field, keeping the RNG stream running
    pub fn reset_round(&mut self, session_seconds: u32) {
        self.score = 0;
        self.time_remaining = session_seconds;
        self.clock = 0.0;
        self.time_ticks = 0;
        self.bubbles = BubblePool::default();
        self.aquarium = Aquarium::new();
        self.shark = Shark::default();
    }

    pub fn paused(&self) -> bool {
        self.phase == SessionPhase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    pub fn won(&self) -> bool {
        self.phase == SessionPhase::Won
    }

    /// Overwrite the score, publishing the change
    pub fn set_score(&mut self, score: u64) {
        if self.score != score {
            self.score = score;
            self.events.push(GameEvent::ScoreChanged(score));
        }
    }

    pub fn add_score(&mut self, amount: u64) {
        self.set_score(self.score.saturating_add(amount));
    }

    /// Deduct up to `amount`, flooring at zero. Returns what was actually taken.
    pub fn deduct_score(&mut self, amount: u64) -> u64 {
        let taken = amount.min(self.score);
        self.set_score(self.score - taken);
        taken
    }

    /// Overwrite the countdown, publishing the change
    pub fn set_time_remaining(&mut self, seconds: u32) {
        if self.time_remaining != seconds {
            self.time_remaining = seconds;
            self.events.push(GameEvent::TimeChanged(seconds));
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_chain_is_linear() {
        let mut seen = vec![Species::FishyBoi];
        let mut current = Species::FishyBoi;
        while let Some(next) = current.next() {
            assert_eq!(next.index(), current.index() + 1);
            seen.push(next);
            current = next;
        }
        assert_eq!(seen, Species::ALL.to_vec());
    }

    #[test]
    fn test_species_ids() {
        for species in Species::ALL {
            assert_eq!(Species::from_id(species.info().id), Some(species));
            let json = serde_json::to_string(&species).expect("serializes");
            assert_eq!(json, format!("\"{}\"", species.info().id));
        }
        assert_eq!(Species::from_id("goldenFish"), None);
    }

    #[test]
    fn test_deduct_score_floors_at_zero() {
        let mut state = GameState::new(1, 30);
        state.set_score(15);
        assert_eq!(state.deduct_score(20), 15);
        assert_eq!(state.score, 0);
        assert_eq!(state.deduct_score(20), 0);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ScoreChanged(15), GameEvent::ScoreChanged(0)]
        );
    }
}
