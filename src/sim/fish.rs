//! Fish pool and the species progression state machine
//!
//! Each species moves strictly forward through
//! `Locked -> Unlocked -> Feeding -> Ready -> Evolving -> Evolved`.
//! Evolving one species unlocks the next in the chain; nothing re-locks.

use glam::Vec2;
use serde::Serialize;

use super::state::Species;
use crate::consts::*;
use crate::error::{CommandError, CommandResult};

/// Progression stage of one species
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum FishStage {
    Locked,
    Unlocked,
    /// Bought and eating
    Feeding,
    /// Fully fed, resting until tapped
    Ready,
    /// Playing the evolution animation (session clock time it began)
    Evolving { started_at: f32 },
    /// Gone; the next species is unlocked
    Evolved,
}

/// Per-species fish record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FishState {
    pub species: Species,
    pub stage: FishStage,
    /// 1-based animation frame
    pub frame: u32,
    pub feed_count: u32,
    pub pos: Vec2,
    /// +1 swimming right, -1 swimming left
    pub direction: f32,
    pub speed: f32,
    /// Vertical bob phase (only ever increases)
    pub phase: f32,
    pub scale: f32,
}

impl FishState {
    fn new(species: Species) -> Self {
        let stage = if species == Species::FishyBoi {
            FishStage::Unlocked
        } else {
            FishStage::Locked
        };
        Self {
            species,
            stage,
            frame: 1,
            feed_count: 0,
            pos: Vec2::ZERO,
            direction: 1.0,
            speed: 0.0,
            phase: 0.0,
            scale: species.info().scale,
        }
    }

    pub fn unlocked(&self) -> bool {
        self.stage != FishStage::Locked
    }

    /// Bought and not yet evolved (this is the "current" species)
    pub fn purchased(&self) -> bool {
        matches!(
            self.stage,
            FishStage::Feeding | FishStage::Ready | FishStage::Evolving { .. }
        )
    }

    pub fn ready_to_evolve(&self) -> bool {
        self.stage == FishStage::Ready
    }

    pub fn evolving(&self) -> bool {
        matches!(self.stage, FishStage::Evolving { .. })
    }

    pub fn evolved(&self) -> bool {
        self.stage == FishStage::Evolved
    }

    /// Visible in the tank
    pub fn in_tank(&self) -> bool {
        self.purchased()
    }

    pub fn hit_radius(&self) -> f32 {
        FISH_HIT_RADIUS * self.scale
    }

    fn swim(&mut self, dt: f32) {
        self.pos.x += self.direction * self.speed * dt;
        if self.pos.x > SWIM_BOUND_X {
            self.pos.x = SWIM_BOUND_X;
            self.direction = -1.0;
        } else if self.pos.x < -SWIM_BOUND_X {
            self.pos.x = -SWIM_BOUND_X;
            self.direction = 1.0;
        }
    }

    /// Coarse growth frame for a feed count
    fn feeding_frame(feed_count: u32) -> u32 {
        (feed_count / 2 + 1).min(READY_FRAME - 1)
    }
}

/// A completed evolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evolution {
    pub species: Species,
    pub unlocked: Option<Species>,
}

/// All fish, indexed by species
#[derive(Debug, Clone)]
pub struct Aquarium {
    fish: [FishState; Species::COUNT],
}

impl Default for Aquarium {
    fn default() -> Self {
        Self::new()
    }
}

impl Aquarium {
    pub fn new() -> Self {
        Self {
            fish: Species::ALL.map(FishState::new),
        }
    }

    pub fn get(&self, species: Species) -> &FishState {
        &self.fish[species.index()]
    }

    fn get_mut(&mut self, species: Species) -> &mut FishState {
        &mut self.fish[species.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &FishState> {
        self.fish.iter()
    }

    /// The species currently being raised, if any
    pub fn current(&self) -> Option<Species> {
        self.fish.iter().find(|f| f.purchased()).map(|f| f.species)
    }

    /// Every species in the chain has evolved
    pub fn all_evolved(&self) -> bool {
        self.fish.iter().all(FishState::evolved)
    }

    /// Put an unlocked species in the tank
    pub fn purchase(&mut self, species: Species) -> CommandResult {
        match self.get(species).stage {
            FishStage::Locked => return Err(CommandError::Locked(species)),
            FishStage::Unlocked => {}
            _ => return Err(CommandError::AlreadyPurchased(species)),
        }
        if let Some(current) = self.current() {
            return Err(CommandError::AnotherSpeciesCurrent(current));
        }

        let info = species.info();
        let fish = self.get_mut(species);
        fish.stage = FishStage::Feeding;
        fish.frame = 1;
        fish.feed_count = 0;
        fish.pos = Vec2::ZERO;
        fish.direction = 1.0;
        fish.speed = info.swim_speed;
        fish.phase = 0.0;
        fish.scale = info.scale;
        log::info!("{species} joined the tank");
        Ok(())
    }

    /// Feed a purchased species. Returns the new feed count.
    pub fn feed(&mut self, species: Species) -> CommandResult<u32> {
        let fish = self.get_mut(species);
        match fish.stage {
            FishStage::Feeding => {}
            FishStage::Ready => return Err(CommandError::FullyFed(species)),
            FishStage::Evolving { .. } => return Err(CommandError::Evolving(species)),
            _ => return Err(CommandError::NotPurchased(species)),
        }

        fish.feed_count += 1;
        if fish.feed_count >= EVOLVE_THRESHOLD {
            fish.stage = FishStage::Ready;
            fish.speed = RESTING_SPEED;
            fish.frame = READY_FRAME;
            log::info!("{species} is ready to evolve");
        } else {
            fish.frame = FishState::feeding_frame(fish.feed_count);
        }
        Ok(fish.feed_count)
    }

    /// Start the evolution animation for a fully fed species
    pub fn begin_evolve(&mut self, species: Species, now: f32) -> CommandResult {
        let fish = self.get_mut(species);
        match fish.stage {
            FishStage::Ready => {}
            FishStage::Feeding => {
                return Err(CommandError::NotReady {
                    species,
                    remaining: EVOLVE_THRESHOLD.saturating_sub(fish.feed_count),
                });
            }
            FishStage::Evolving { .. } => return Err(CommandError::Evolving(species)),
            _ => return Err(CommandError::NotPurchased(species)),
        }
        fish.stage = FishStage::Evolving { started_at: now };
        fish.frame = 1;
        Ok(())
    }

    /// Move swimming fish and finish any evolution whose animation has run out
    pub fn advance(&mut self, dt: f32, now: f32, evolve_duration: f32) -> Vec<Evolution> {
        let mut finished = Vec::new();

        for fish in &mut self.fish {
            match fish.stage {
                FishStage::Feeding => {
                    fish.swim(dt);
                    fish.phase += FISH_PHASE_RATE * dt;
                    fish.pos.y = FISH_AMPLITUDE * fish.phase.sin();
                }
                FishStage::Ready => fish.swim(dt),
                FishStage::Evolving { started_at } => {
                    let elapsed = (now - started_at).max(0.0);
                    if elapsed >= evolve_duration {
                        finished.push(fish.species);
                    } else {
                        let step = evolve_duration / EVOLVE_FRAMES as f32;
                        fish.frame = ((elapsed / step) as u32 + 1).min(EVOLVE_FRAMES);
                    }
                }
                _ => {}
            }
        }

        finished
            .into_iter()
            .map(|species| self.complete_evolution(species))
            .collect()
    }

    fn complete_evolution(&mut self, species: Species) -> Evolution {
        let fish = self.get_mut(species);
        *fish = FishState::new(species);
        fish.stage = FishStage::Evolved;
        log::info!("{species} evolved");

        let unlocked = species.next().filter(|next| {
            let next_fish = self.get_mut(*next);
            if next_fish.stage == FishStage::Locked {
                next_fish.stage = FishStage::Unlocked;
                true
            } else {
                false
            }
        });
        Evolution { species, unlocked }
    }

    /// Abort in-flight evolutions; those fish go back to resting
    pub fn cancel_evolutions(&mut self) {
        for fish in &mut self.fish {
            if fish.evolving() {
                fish.stage = FishStage::Ready;
                fish.frame = READY_FRAME;
            }
        }
    }
}
