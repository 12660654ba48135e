//! Audio cues for engine events
//!
//! The engine never plays sound itself. [`AudioManager`] listens as a
//! [`NotificationSink`], picks the cue for each event and hands it to an
//! [`AudioBackend`] with the player's volume applied.

use crate::events::{GameEvent, NotificationSink};
use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bubble burst
    BubblePop,
    /// Fish finished evolving
    FishEvolve,
    /// Shop purchase
    StoreBuy,
    /// Fish ate a portion
    FishEat,
    /// Tap landed on the shark
    SharkHit,
    /// Shark reached its terminal frame
    SharkExplode,
}

impl SoundEffect {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BubblePopped { .. } => Some(SoundEffect::BubblePop),
            GameEvent::SpeciesEvolved(_) => Some(SoundEffect::FishEvolve),
            GameEvent::SpeciesPurchased(_) => Some(SoundEffect::StoreBuy),
            GameEvent::SpeciesFed { .. } => Some(SoundEffect::FishEat),
            GameEvent::SharkHit { .. } => Some(SoundEffect::SharkHit),
            GameEvent::SharkDefeated => Some(SoundEffect::SharkExplode),
            _ => None,
        }
    }
}

/// Whatever actually makes noise
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32);
    fn start_music(&mut self, volume: f32);
    fn stop_music(&mut self);
}

/// Backend that plays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
    fn start_music(&mut self, _volume: f32) {}
    fn stop_music(&mut self) {}
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    settings: Settings,
    music_playing: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B, settings: Settings) -> Self {
        Self {
            backend,
            settings,
            music_playing: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply new preferences; music follows the mute flag immediately
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings.clamped();
        if self.music_playing {
            self.backend.stop_music();
            self.music_playing = false;
            self.start_music();
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let volume = self.settings.effective_sfx_volume();
        if volume <= 0.0 {
            return;
        }
        self.backend.play(effect, volume);
    }

    fn start_music(&mut self) {
        let volume = self.settings.effective_music_volume();
        if self.music_playing || volume <= 0.0 {
            return;
        }
        self.backend.start_music(volume);
        self.music_playing = true;
    }

    fn stop_music(&mut self) {
        if self.music_playing {
            self.backend.stop_music();
            self.music_playing = false;
        }
    }
}

impl<B: AudioBackend> NotificationSink for AudioManager<B> {
    fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameStarted | GameEvent::PauseChanged(false) => self.start_music(),
            GameEvent::PauseChanged(true)
            | GameEvent::GameOver { .. }
            | GameEvent::Won(_)
            | GameEvent::Quit => self.stop_music(),
            _ => {}
        }
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }
}
