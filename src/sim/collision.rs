//! Tap resolution
//!
//! A tap affects at most one entity. Candidates are checked in priority order:
//! a resting fish ready to evolve, then the shark, then bubbles newest first.
//! All hitboxes are circles in world units.

use glam::Vec2;

use super::bubbles::BubbleTap;
use super::shark::SharkHit;
use super::state::{GameState, Species};
use crate::circle_contains;
use crate::events::GameEvent;
use crate::tuning::Tuning;

/// What a tap hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapResult {
    /// Fully fed fish started evolving
    Evolve(Species),
    Shark(SharkHit),
    Bubble(BubbleTap),
    Miss,
}

/// Resolve a tap at `point` (world units) against every pool
pub fn resolve_tap(state: &mut GameState, point: Vec2, tuning: &Tuning) -> TapResult {
    let now = state.clock;

    let ready_fish = state
        .aquarium
        .iter()
        .find(|f| f.ready_to_evolve() && circle_contains(f.pos, f.hit_radius(), point))
        .map(|f| f.species);
    if let Some(species) = ready_fish {
        if state.aquarium.begin_evolve(species, now).is_ok() {
            log::info!("{species} is evolving");
            state.events.push(GameEvent::EvolutionStarted(species));
            return TapResult::Evolve(species);
        }
    }

    if state.shark.contains(point) {
        if let Some(hit) = state.shark_hit(tuning) {
            return TapResult::Shark(hit);
        }
    }

    match state.bubbles.tap(point, tuning) {
        Some(BubbleTap::Damaged { strength_left }) => {
            state.events.push(GameEvent::BubbleHit { strength_left });
            TapResult::Bubble(BubbleTap::Damaged { strength_left })
        }
        Some(BubbleTap::Popped { score }) => {
            state.add_score(score);
            state.events.push(GameEvent::BubblePopped {
                score_awarded: score,
            });
            TapResult::Bubble(BubbleTap::Popped { score })
        }
        None => TapResult::Miss,
    }
}
