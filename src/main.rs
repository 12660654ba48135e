//! Bubble Time headless runner
//!
//! Plays one round with a simple autopilot and logs what happens. Handy for
//! eyeballing balance changes: pass a tuning JSON file as the first argument
//! and, optionally, a settings JSON file as the second.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use bubble_time::audio::{AudioManager, SilentBackend};
    use bubble_time::events::LogSink;
    use bubble_time::render::{Viewport, build_instances};
    use bubble_time::shop::Shop;
    use bubble_time::sim::{SessionPhase, Species};
    use bubble_time::{Engine, GameEvent, NotificationSink, Settings, Tuning};

    /// Collects the round's headline numbers while forwarding to the log
    struct RoundLog {
        audio: AudioManager<SilentBackend>,
        pops: u32,
        evolutions: Vec<Species>,
        stolen: u64,
        outcome: Option<GameEvent>,
    }

    impl RoundLog {
        fn new(settings: Settings) -> Self {
            Self {
                audio: AudioManager::new(SilentBackend, settings),
                pops: 0,
                evolutions: Vec::new(),
                stolen: 0,
                outcome: None,
            }
        }
    }

    impl NotificationSink for RoundLog {
        fn notify(&mut self, event: &GameEvent) {
            LogSink.notify(event);
            self.audio.notify(event);
            match event {
                GameEvent::BubblePopped { .. } => self.pops += 1,
                GameEvent::SpeciesEvolved(species) => self.evolutions.push(*species),
                GameEvent::SharkStole { amount } => self.stolen += amount,
                GameEvent::GameOver { .. } | GameEvent::Won(_) => self.outcome = Some(event.clone()),
                _ => {}
            }
        }
    }

    /// Read the JSON file named by argument `n`, falling back to defaults
    fn load_arg<T: Default>(
        n: usize,
        what: &str,
        parse: fn(&str) -> serde_json::Result<T>,
    ) -> T {
        let Some(path) = std::env::args().nth(n) else {
            return T::default();
        };
        match std::fs::read_to_string(&path).map(|json| parse(&json)) {
            Ok(Ok(value)) => {
                log::info!("Loaded {what} from {path}");
                value
            }
            Ok(Err(e)) => {
                log::warn!("Bad {what} in {path}: {e}, using defaults");
                T::default()
            }
            Err(e) => {
                log::warn!("Can't read {path}: {e}, using defaults");
                T::default()
            }
        }
    }

    /// One autopilot decision per frame: shop first, then tap something
    fn autopilot(engine: &mut Engine<RoundLog>, viewport: &Viewport) {
        let bought = if engine.state().aquarium.current().is_some() {
            Shop::buy_food(engine).map(|_| ())
        } else if let Some(offer) = Shop::offers(engine)
            .into_iter()
            .find(|o| o.available && o.affordable)
        {
            Shop::buy_species(engine, offer.species).map(|_| ())
        } else {
            Ok(())
        };
        if let Err(err) = bought {
            log::debug!("Autopilot purchase rejected: {err}");
        }

        let snapshot = engine.snapshot();
        let target = snapshot
            .species
            .iter()
            .find(|s| s.ready_to_evolve)
            .and_then(|s| snapshot.fish.iter().find(|(species, _)| *species == s.species))
            .map(|(_, fish)| fish.pos)
            .or_else(|| snapshot.shark.active.then_some(snapshot.shark.sprite.pos))
            .or_else(|| snapshot.bubbles.last().map(|b| b.pos));

        if let Some(pos) = target {
            let screen = viewport.world_to_screen(pos);
            engine.on_screen_tap(viewport, screen.x, screen.y);
        }
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();

        let mut tuning = load_arg(1, "tuning", Tuning::from_json);
        let settings = load_arg(2, "settings", Settings::from_json);
        if tuning.seed == 0 {
            tuning.seed = rand::random();
        }
        log::info!("Seed {}", tuning.seed);

        let viewport = Viewport::new(1280.0, 720.0);
        let show_tutorial = settings.show_tutorial;
        let mut engine = Engine::headless(tuning, RoundLog::new(settings));
        if show_tutorial {
            engine.show_tutorial();
        }
        engine.start_game();

        let frame = bubble_time::consts::FRAME_DT;
        let mut frames = 0u64;
        // Hard stop well past any reachable round length
        while engine.phase() == SessionPhase::Playing && frames < 60 * 60 * 30 {
            engine.advance(frame);
            if frames % 6 == 0 {
                autopilot(&mut engine, &viewport);
            }
            frames += 1;
        }

        let sprites = build_instances(&engine.snapshot(), engine.assets()).len();
        let log = engine.sink();
        log::info!(
            "Round finished after {:.1}s: score {}, {} pops, evolved {:?}, shark stole {}, {} sprites on screen",
            engine.state().clock,
            engine.score(),
            log.pops,
            log.evolutions,
            log.stolen,
            sprites,
        );
        match &log.outcome {
            Some(GameEvent::Won(stats)) => log::info!("Won in {:.1}s", stats.elapsed_secs),
            Some(GameEvent::GameOver { final_score }) => log::info!("Game over at {final_score}"),
            _ => log::info!("Round did not finish"),
        }
        engine.quit();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {}
