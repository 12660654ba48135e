//! Fixed timestep simulation tick
//!
//! Core game loop pieces that advance the simulation deterministically:
//! the per-frame [`tick`], the 1 Hz [`countdown`] and the end-of-round check.

use super::state::{GameState, SessionPhase};
use crate::events::{GameEvent, WinStats};
use crate::tuning::Tuning;

/// Advance every entity pool by one fixed timestep
pub fn tick(state: &mut GameState, tuning: &Tuning, dt: f32) {
    // Don't tick if paused, over or in the menus
    if state.phase != SessionPhase::Playing {
        return;
    }

    state.time_ticks += 1;

    state.bubbles.maybe_spawn(&mut state.rng, tuning);
    state.bubbles.advance(dt, tuning);

    for evolution in state
        .aquarium
        .advance(dt, state.clock, tuning.evolve_duration)
    {
        state.events.push(GameEvent::SpeciesEvolved(evolution.species));
        if let Some(next) = evolution.unlocked {
            log::info!("{next} unlocked");
            state.events.push(GameEvent::SpeciesUnlocked(next));
        }
    }

    state.advance_shark(dt, tuning);

    check_end_conditions(state);
}

/// One second of countdown
pub fn countdown(state: &mut GameState) {
    if state.phase != SessionPhase::Playing {
        return;
    }
    state.set_time_remaining(state.time_remaining.saturating_sub(1));
    check_end_conditions(state);
}

/// Move to `Won` or `GameOver` if the round just ended. Fires at most once per round.
pub fn check_end_conditions(state: &mut GameState) -> Option<SessionPhase> {
    if state.phase != SessionPhase::Playing {
        return None;
    }

    if state.aquarium.all_evolved() {
        let stats = WinStats {
            score: state.score,
            elapsed_secs: state.clock,
        };
        log::info!("Won with {} points in {:.1}s", stats.score, stats.elapsed_secs);
        state.phase = SessionPhase::Won;
        state.events.push(GameEvent::Won(stats));
        return Some(SessionPhase::Won);
    }

    if state.time_remaining == 0 {
        log::info!("Game over with {} points", state.score);
        state.phase = SessionPhase::GameOver;
        state.events.push(GameEvent::GameOver {
            final_score: state.score,
        });
        return Some(SessionPhase::GameOver);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;

    fn playing_state() -> GameState {
        let mut state = GameState::new(12345, 30);
        state.phase = SessionPhase::Playing;
        state
    }

    #[test]
    fn test_tick_only_while_playing() {
        let tuning = Tuning::default();
        let mut state = GameState::new(12345, 30);
        tick(&mut state, &tuning, FRAME_DT);
        assert_eq!(state.time_ticks, 0);

        state.phase = SessionPhase::Paused;
        tick(&mut state, &tuning, FRAME_DT);
        assert_eq!(state.time_ticks, 0);

        state.phase = SessionPhase::Playing;
        tick(&mut state, &tuning, FRAME_DT);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_countdown_game_over_once() {
        let mut state = playing_state();
        state.time_remaining = 2;
        state.set_score(70);
        state.drain_events();

        countdown(&mut state);
        countdown(&mut state);
        countdown(&mut state);
        assert_eq!(state.time_remaining, 0);
        assert_eq!(state.phase, SessionPhase::GameOver);

        let overs = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect::<Vec<_>>();
        assert_eq!(overs, vec![GameEvent::GameOver { final_score: 70 }]);
    }

    #[test]
    fn test_spawn_rate_roughly_matches_chance() {
        let tuning = Tuning {
            bubble_spawn_chance: 1.0,
            ..Tuning::default()
        };
        let mut state = playing_state();
        for _ in 0..10 {
            tick(&mut state, &tuning, 0.0);
        }
        assert_eq!(state.bubbles.bubbles.len(), 10);

        let tuning = Tuning {
            bubble_spawn_chance: 0.0,
            ..Tuning::default()
        };
        let mut state = playing_state();
        for _ in 0..10 {
            tick(&mut state, &tuning, FRAME_DT);
        }
        assert!(state.bubbles.bubbles.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let tuning = Tuning::default();
        let mut state1 = playing_state();
        let mut state2 = playing_state();

        for _ in 0..600 {
            tick(&mut state1, &tuning, FRAME_DT);
            tick(&mut state2, &tuning, FRAME_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.bubbles.bubbles, state2.bubbles.bubbles);
    }
}
