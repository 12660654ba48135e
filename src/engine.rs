//! Session controller and public command surface
//!
//! [`Engine`] owns the simulation state, the scheduler and the notification
//! sink. The UI shell drives it with [`Engine::advance`] once per display
//! frame and forwards taps and shop actions. Invalid commands are ignored
//! (logged at debug level), never fatal.

use glam::Vec2;

use crate::assets::AssetManifest;
use crate::consts::FRAME_DT;
use crate::error::{CommandError, CommandResult};
use crate::events::{GameEvent, NotificationSink};
use crate::render::Viewport;
use crate::sim::{
    GameState, Scheduler, SessionPhase, Snapshot, Species, TapResult, check_end_conditions,
    countdown, resolve_tap, tick,
};
use crate::tuning::Tuning;

pub struct Engine<S: NotificationSink = ()> {
    state: GameState,
    tuning: Tuning,
    scheduler: Scheduler,
    assets: AssetManifest,
    sink: S,
}

impl<S: NotificationSink> Engine<S> {
    pub fn new(tuning: Tuning, assets: AssetManifest, sink: S) -> Self {
        Self {
            state: GameState::new(tuning.seed, tuning.session_seconds),
            scheduler: Scheduler::new(&tuning),
            tuning,
            assets,
            sink,
        }
    }

    /// Engine with no assets to wait for
    pub fn headless(tuning: Tuning, sink: S) -> Self {
        Self::new(tuning, AssetManifest::none(), sink)
    }

    // === Published state ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.state.time_remaining
    }

    pub fn paused(&self) -> bool {
        self.state.paused()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn assets(&self) -> &AssetManifest {
        &self.assets
    }

    /// The loading collaborator reports progress here
    pub fn assets_mut(&mut self) -> &mut AssetManifest {
        &mut self.assets
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // === Scheduler ===

    /// Arm the frame tick and countdown. No-op until assets resolve, outside a
    /// round, or when already running.
    pub fn start(&mut self) -> bool {
        if !self.assets.is_resolved() {
            log::debug!("start() ignored: assets still loading");
            return false;
        }
        if self.state.phase != SessionPhase::Playing {
            log::debug!("start() ignored in {:?}", self.state.phase);
            return false;
        }
        if !self.scheduler.start() {
            log::debug!("start() ignored: already running");
            return false;
        }

        log::info!("Game loop started");
        self.state.bubbles.spawn(&mut self.state.rng, &self.tuning);
        self.flush();
        true
    }

    /// Cancel every timer and any in-flight evolution
    pub fn stop(&mut self) {
        if self.scheduler.is_running() {
            log::info!("Game loop stopped");
        }
        self.scheduler.stop();
        self.state.aquarium.cancel_evolutions();
    }

    /// Feed real elapsed seconds since the previous call
    pub fn advance(&mut self, elapsed: f32) {
        if self.state.phase != SessionPhase::Playing || !self.scheduler.is_running() {
            return;
        }

        // The steal clock only runs while the shark hunts
        self.sync_steal_interval();
        let firings = self.scheduler.advance(elapsed);
        self.state.clock += elapsed.max(0.0);

        for _ in 0..firings.frames {
            tick(&mut self.state, &self.tuning, FRAME_DT);
            if self.state.phase != SessionPhase::Playing {
                break;
            }
        }
        for _ in 0..firings.countdown {
            if self.state.phase != SessionPhase::Playing {
                break;
            }
            countdown(&mut self.state);
        }

        self.sync_steal_interval();
        let mut arrived = false;
        for _ in 0..firings.shark_spawn {
            if self.state.phase != SessionPhase::Playing {
                break;
            }
            if self.state.shark_spawn_timer(&self.tuning) {
                self.scheduler.shark_steal.restart();
                arrived = true;
            }
        }
        // A fresh arrival waits a full steal period
        if !arrived {
            for _ in 0..firings.shark_steal {
                if self.state.phase != SessionPhase::Playing {
                    break;
                }
                self.state.shark_steal_timer(&self.tuning);
            }
        }

        if self.state.phase.is_over() {
            self.scheduler.stop();
        }
        self.flush();
    }

    // === Session transitions ===

    pub fn show_tutorial(&mut self) -> bool {
        if self.state.phase != SessionPhase::Menu {
            return false;
        }
        self.state.phase = SessionPhase::Tutorial;
        true
    }

    /// Begin a fresh round
    pub fn start_game(&mut self) -> bool {
        if self.state.phase.in_round() {
            log::debug!("start_game() ignored: round in progress");
            return false;
        }

        self.stop();
        self.state.reset_round(self.tuning.session_seconds);
        self.state.phase = SessionPhase::Playing;
        log::info!("New round: {}s on the clock", self.state.time_remaining);
        self.state.events.extend([
            GameEvent::GameStarted,
            GameEvent::ScoreChanged(self.state.score),
            GameEvent::TimeChanged(self.state.time_remaining),
        ]);
        self.flush();
        self.start();
        true
    }

    /// Playing <-> Paused
    pub fn toggle_pause(&mut self) -> bool {
        let paused = match self.state.phase {
            SessionPhase::Playing => {
                self.scheduler.pause();
                SessionPhase::Paused
            }
            SessionPhase::Paused => {
                self.scheduler.resume();
                SessionPhase::Playing
            }
            _ => return false,
        };
        self.state.phase = paused;
        self.state
            .events
            .push(GameEvent::PauseChanged(paused == SessionPhase::Paused));
        self.flush();
        true
    }

    /// Back to the menu from anywhere, releasing the round
    pub fn quit(&mut self) {
        log::info!("Quitting to menu");
        self.stop();
        self.state.reset_round(self.tuning.session_seconds);
        self.state.phase = SessionPhase::Menu;
        self.state.events.push(GameEvent::Quit);
        self.flush();
    }

    // === Input ===

    /// Tap in world coordinates
    pub fn on_tap(&mut self, point: Vec2) -> TapResult {
        if self.state.phase != SessionPhase::Playing {
            return TapResult::Miss;
        }
        let result = resolve_tap(&mut self.state, point, &self.tuning);
        self.flush();
        result
    }

    /// Tap in pixel coordinates
    pub fn on_screen_tap(&mut self, viewport: &Viewport, x: f32, y: f32) -> TapResult {
        self.on_tap(viewport.screen_to_world(Vec2::new(x, y)))
    }

    // === Progression ===

    pub fn try_purchase_species(&mut self, species: Species) -> CommandResult {
        self.require_playing()?;
        self.state.aquarium.purchase(species)?;
        self.state.events.push(GameEvent::SpeciesPurchased(species));
        if !self.scheduler.shark_spawn.is_armed() {
            log::info!("First purchase: the shark is circling");
            self.scheduler.shark_spawn.arm();
        }
        self.flush();
        Ok(())
    }

    pub fn try_feed_species(&mut self, species: Species) -> CommandResult<u32> {
        self.require_playing()?;
        let feed_count = self.state.aquarium.feed(species)?;
        self.state.events.push(GameEvent::SpeciesFed {
            species,
            feed_count,
        });
        self.flush();
        Ok(feed_count)
    }

    pub fn try_evolve_species(&mut self, species: Species) -> CommandResult {
        self.require_playing()?;
        self.state.aquarium.begin_evolve(species, self.state.clock)?;
        self.state.events.push(GameEvent::EvolutionStarted(species));
        self.flush();
        Ok(())
    }

    pub fn purchase_species(&mut self, species: Species) -> bool {
        ignored(self.try_purchase_species(species)).is_some()
    }

    pub fn feed_species(&mut self, species: Species) -> bool {
        ignored(self.try_feed_species(species)).is_some()
    }

    pub fn evolve_species(&mut self, species: Species) -> bool {
        ignored(self.try_evolve_species(species)).is_some()
    }

    // === External overrides ===

    pub fn set_score(&mut self, score: u64) {
        self.state.set_score(score);
        self.flush();
    }

    pub fn set_time_remaining(&mut self, seconds: u32) {
        self.state.set_time_remaining(seconds);
        check_end_conditions(&mut self.state);
        if self.state.phase.is_over() {
            self.scheduler.stop();
        }
        self.flush();
    }

    fn sync_steal_interval(&mut self) {
        if !self.state.shark.hunting() {
            self.scheduler.shark_steal.disarm();
        }
    }

    fn require_playing(&self) -> CommandResult {
        if self.state.phase == SessionPhase::Playing {
            Ok(())
        } else {
            Err(CommandError::NotPlaying)
        }
    }

    fn flush(&mut self) {
        for event in self.state.drain_events() {
            self.sink.notify(&event);
        }
    }
}

fn ignored<T>(result: CommandResult<T>) -> Option<T> {
    result
        .map_err(|err| log::debug!("Command ignored: {err}"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetId;
    use crate::consts::EVOLVE_THRESHOLD;

    fn engine() -> Engine<Vec<GameEvent>> {
        Engine::headless(Tuning::default().with_seed(42), Vec::new())
    }

    #[test]
    fn test_start_waits_for_assets() {
        let mut engine = Engine::new(
            Tuning::default(),
            AssetManifest::new([AssetId::Shark]),
            Vec::new(),
        );
        engine.start_game();
        assert_eq!(engine.phase(), SessionPhase::Playing);
        assert!(!engine.scheduler().is_running());
        assert!(engine.state().bubbles.bubbles.is_empty());

        engine.assets_mut().mark_loaded(AssetId::Shark);
        assert!(engine.start());
        assert_eq!(engine.state().bubbles.bubbles.len(), 1);
        assert!(!engine.start());
        assert_eq!(engine.state().bubbles.bubbles.len(), 1);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut engine = engine();
        engine.start_game();
        engine.advance(2.0);
        assert_eq!(engine.time_remaining(), 28);

        assert!(engine.toggle_pause());
        let ticks = engine.state().time_ticks;
        let clock = engine.state().clock;
        engine.advance(5.0);
        assert_eq!(engine.time_remaining(), 28);
        assert_eq!(engine.state().time_ticks, ticks);
        assert_eq!(engine.state().clock, clock);
        assert_eq!(engine.on_tap(Vec2::ZERO), TapResult::Miss);

        assert!(engine.toggle_pause());
        engine.advance(1.0);
        assert_eq!(engine.time_remaining(), 27);
        assert!(
            engine
                .sink()
                .iter()
                .any(|e| *e == GameEvent::PauseChanged(true))
        );
    }

    #[test]
    fn test_commands_outside_round_are_ignored() {
        let mut engine = engine();
        assert_eq!(
            engine.try_purchase_species(Species::FishyBoi),
            Err(CommandError::NotPlaying)
        );
        assert!(!engine.toggle_pause());
        assert!(!engine.feed_species(Species::FishyBoi));
    }

    #[test]
    fn test_first_purchase_arms_shark() {
        let mut engine = engine();
        engine.start_game();
        engine.advance(10.0);
        assert!(!engine.state().shark.active());

        assert!(engine.purchase_species(Species::FishyBoi));
        assert!(engine.scheduler().shark_spawn.is_armed());
        engine.advance(10.0);
        assert!(engine.state().shark.active());
    }

    #[test]
    fn test_quit_resets_and_cancels() {
        let mut engine = engine();
        engine.start_game();
        engine.set_score(500);
        engine.purchase_species(Species::FishyBoi);
        for _ in 0..EVOLVE_THRESHOLD {
            engine.feed_species(Species::FishyBoi);
        }
        assert!(engine.evolve_species(Species::FishyBoi));

        engine.quit();
        assert_eq!(engine.phase(), SessionPhase::Menu);
        assert_eq!(engine.score(), 0);
        assert!(!engine.scheduler().is_running());
        assert!(!engine.scheduler().shark_spawn.is_armed());
        assert_eq!(engine.state().aquarium.current(), None);

        engine.advance(5.0);
        assert_eq!(engine.time_remaining(), engine.tuning().session_seconds);
    }

    #[test]
    fn test_set_time_to_zero_ends_round() {
        let mut engine = engine();
        engine.start_game();
        engine.set_score(321);
        engine.set_time_remaining(0);
        assert_eq!(engine.phase(), SessionPhase::GameOver);
        assert!(
            engine
                .sink()
                .contains(&GameEvent::GameOver { final_score: 321 })
        );
        assert!(engine.start_game());
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_start_game_ignored_mid_round() {
        let mut engine = engine();
        assert!(engine.show_tutorial());
        assert_eq!(engine.phase(), SessionPhase::Tutorial);
        assert!(engine.start_game());
        engine.set_score(10);
        assert!(!engine.start_game());
        assert_eq!(engine.score(), 10);
    }
}
