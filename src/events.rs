//! Outbound notifications from the engine to its collaborators
//!
//! The UI shell, audio and anything else that reacts to gameplay implement
//! [`NotificationSink`] and get handed to the engine explicitly.

use serde::Serialize;

use crate::sim::Species;

/// End-of-run statistics for a win
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WinStats {
    pub score: u64,
    /// Seconds of unpaused play
    pub elapsed_secs: f32,
}

/// Something observable happened in the simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    ScoreChanged(u64),
    TimeChanged(u32),
    PauseChanged(bool),
    GameStarted,
    GameOver { final_score: u64 },
    Won(WinStats),
    Quit,
    /// Bubble took a hit but survived
    BubbleHit { strength_left: u8 },
    BubblePopped { score_awarded: u64 },
    SpeciesPurchased(Species),
    SpeciesFed { species: Species, feed_count: u32 },
    EvolutionStarted(Species),
    SpeciesEvolved(Species),
    SpeciesUnlocked(Species),
    SharkSpawned,
    SharkHit { hits: u32 },
    SharkStole { amount: u64 },
    /// Shark reached its terminal frame
    SharkDefeated,
    /// Shark left the tank
    SharkDeparted,
}

/// Receiver for engine events
pub trait NotificationSink {
    fn notify(&mut self, event: &GameEvent);
}

/// Discard everything
impl NotificationSink for () {
    fn notify(&mut self, _event: &GameEvent) {}
}

/// Record everything (handy for tests and replays)
impl NotificationSink for Vec<GameEvent> {
    fn notify(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

impl<S: NotificationSink + ?Sized> NotificationSink for Box<S> {
    fn notify(&mut self, event: &GameEvent) {
        (**self).notify(event);
    }
}

/// Sink that writes every event to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ScoreChanged(_) | GameEvent::TimeChanged(_) => log::trace!("{event:?}"),
            _ => log::debug!("{event:?}"),
        }
    }
}

/// Fan an event out to two sinks
impl<A: NotificationSink, B: NotificationSink> NotificationSink for (A, B) {
    fn notify(&mut self, event: &GameEvent) {
        self.0.notify(event);
        self.1.notify(event);
    }
}
