use std::collections::BTreeMap;

use glam::Vec2;
use proptest::prelude::*;

use bubble_time::consts::EVOLVE_THRESHOLD;
use bubble_time::sim::{Aquarium, GameState, SessionPhase, Species, TapResult};
use bubble_time::{CommandError, Engine, GameEvent, Tuning};

fn species() -> impl Strategy<Value = Species> {
    prop::sample::select(Species::ALL.to_vec())
}

#[derive(Debug, Clone)]
enum Tap {
    Anywhere(f32, f32),
    /// Dead center of the nth live bubble
    Bubble(usize),
    Shark,
}

fn tap() -> impl Strategy<Value = Tap> {
    prop_oneof![
        (-1.0f32..1.0, -1.0f32..1.0).prop_map(|(x, y)| Tap::Anywhere(x, y)),
        (0usize..64).prop_map(Tap::Bubble),
        Just(Tap::Shark),
    ]
}

/// Everything a tap could touch, keyed for diffing
#[derive(Debug, PartialEq)]
struct Touchable {
    bubbles: BTreeMap<u32, u8>,
    shark_hits: u32,
    evolving: usize,
}

impl Touchable {
    fn capture(state: &GameState) -> Self {
        Self {
            bubbles: state
                .bubbles
                .bubbles
                .iter()
                .map(|b| (b.id, b.strength))
                .collect(),
            shark_hits: state.shark.hits,
            evolving: state.aquarium.iter().filter(|f| f.evolving()).count(),
        }
    }

    fn affected_since(&self, before: &Self) -> usize {
        let bubbles = before
            .bubbles
            .iter()
            .filter(|&(id, strength)| self.bubbles.get(id) != Some(strength))
            .count();
        let shark = (self.shark_hits - before.shark_hits) as usize;
        let fish = self.evolving.saturating_sub(before.evolving);
        bubbles + shark + fish
    }
}

#[derive(Debug, Clone)]
enum Step {
    Advance(f32),
    TogglePause,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (0.0f32..2.5).prop_map(Step::Advance),
        1 => Just(Step::TogglePause),
    ]
}

#[derive(Debug, Clone)]
enum Progress {
    Purchase(Species),
    Feed(Species),
    Evolve(Species),
    Wait(f32),
}

fn progress() -> impl Strategy<Value = Progress> {
    prop_oneof![
        1 => species().prop_map(Progress::Purchase),
        4 => species().prop_map(Progress::Feed),
        1 => species().prop_map(Progress::Evolve),
        1 => (0.0f32..1.5).prop_map(Progress::Wait),
    ]
}

proptest! {
    #[test]
    fn tap_touches_at_most_one_entity(
        seed in any::<u64>(),
        warmup in 60u32..600,
        taps in prop::collection::vec(tap(), 1..40),
    ) {
        let tuning = Tuning {
            bubble_spawn_chance: 0.3,
            shark_spawn_interval: 2.0,
            ..Tuning::default().with_seed(seed)
        };
        let mut engine = Engine::headless(tuning, ());
        engine.start_game();
        engine.set_score(10_000);
        engine.purchase_species(Species::FishyBoi);
        for _ in 0..warmup {
            engine.advance(bubble_time::consts::FRAME_DT);
        }

        for tap in taps {
            let point = match tap {
                Tap::Anywhere(x, y) => Vec2::new(x, y),
                Tap::Bubble(n) => {
                    let live = &engine.state().bubbles.bubbles;
                    if live.is_empty() {
                        continue;
                    }
                    live[n % live.len()].pos
                }
                Tap::Shark => engine.state().shark.pos,
            };
            let before = Touchable::capture(engine.state());
            let result = engine.on_tap(point);
            let affected = Touchable::capture(engine.state()).affected_since(&before);
            if result == TapResult::Miss {
                prop_assert_eq!(affected, 0);
            } else {
                prop_assert_eq!(affected, 1, "{:?}", result);
            }
        }
    }

    #[test]
    fn steals_floor_at_zero(
        seed in any::<u64>(),
        start in 0u64..200,
        steals in 0usize..20,
    ) {
        let tuning = Tuning::default();
        let mut state = GameState::new(seed, 30);
        state.phase = SessionPhase::Playing;
        state.set_score(start);
        prop_assert!(state.shark_spawn_timer(&tuning));

        let mut expected = start;
        for _ in 0..steals {
            let taken = state.shark_steal_timer(&tuning);
            prop_assert_eq!(taken, expected.min(tuning.shark_steal_amount));
            expected -= taken;
            prop_assert_eq!(state.score, expected);
        }
        prop_assert_eq!(state.shark.points_stolen, start - expected);
    }

    #[test]
    fn countdown_only_falls_and_ends_once(
        seed in any::<u64>(),
        steps in prop::collection::vec(step(), 0..80),
    ) {
        let mut engine = Engine::headless(Tuning::default().with_seed(seed), Vec::new());
        engine.start_game();
        let mut last = engine.time_remaining();

        for step in steps {
            match step {
                Step::Advance(secs) => engine.advance(secs),
                Step::TogglePause => {
                    engine.toggle_pause();
                }
            }
            prop_assert!(engine.time_remaining() <= last);
            last = engine.time_remaining();
        }

        if engine.paused() {
            engine.toggle_pause();
        }
        for _ in 0..=engine.tuning().session_seconds {
            engine.advance(1.0);
        }

        prop_assert_eq!(engine.phase(), SessionPhase::GameOver);
        prop_assert_eq!(engine.time_remaining(), 0);
        let overs = engine
            .sink()
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        prop_assert_eq!(overs, 1);
    }

    #[test]
    fn feeds_count_up_to_threshold(feeds in 0u32..30) {
        let mut aquarium = Aquarium::new();
        aquarium.purchase(Species::FishyBoi).unwrap();

        for n in 1..=feeds {
            let result = aquarium.feed(Species::FishyBoi);
            if n <= EVOLVE_THRESHOLD {
                prop_assert_eq!(result, Ok(n));
            } else {
                prop_assert_eq!(result, Err(CommandError::FullyFed(Species::FishyBoi)));
            }
            prop_assert!(aquarium.get(Species::FishyBoi).feed_count <= EVOLVE_THRESHOLD);
        }
        prop_assert_eq!(
            aquarium.get(Species::FishyBoi).ready_to_evolve(),
            feeds >= EVOLVE_THRESHOLD
        );
    }

    #[test]
    fn early_evolve_changes_nothing(
        target in species(),
        feeds in 0u32..EVOLVE_THRESHOLD,
        buy in any::<bool>(),
    ) {
        let mut aquarium = Aquarium::new();
        if buy {
            let _ = aquarium.purchase(target);
        }
        for _ in 0..feeds {
            let _ = aquarium.feed(target);
        }

        let before = aquarium.get(target).clone();
        prop_assert!(aquarium.begin_evolve(target, 0.0).is_err());
        prop_assert_eq!(aquarium.get(target), &before);
    }

    #[test]
    fn unlocks_never_revert(ops in prop::collection::vec(progress(), 0..200)) {
        let mut aquarium = Aquarium::new();
        let mut now = 0.0f32;
        let unlocked = |a: &Aquarium| -> Vec<bool> { a.iter().map(|f| f.unlocked()).collect() };
        let mut seen = unlocked(&aquarium);

        for op in ops {
            match op {
                Progress::Purchase(s) => {
                    let _ = aquarium.purchase(s);
                }
                Progress::Feed(s) => {
                    let _ = aquarium.feed(s);
                }
                Progress::Evolve(s) => {
                    let _ = aquarium.begin_evolve(s, now);
                }
                Progress::Wait(dt) => {
                    now += dt;
                    aquarium.advance(dt, now, 1.0);
                }
            }

            let current = unlocked(&aquarium);
            for (was, is) in seen.iter().zip(&current) {
                prop_assert!(!was || *is);
            }
            prop_assert!(aquarium.iter().filter(|f| f.purchased()).count() <= 1);
            seen = current;
        }
    }
}
