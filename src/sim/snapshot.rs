//! Read-only view of the published state
//!
//! The UI shell and renderer read a [`Snapshot`]; they never touch the
//! engine's entities.

use glam::Vec2;
use serde::Serialize;

use super::fish::FishState;
use super::shark::Shark;
use super::state::{GameState, SessionPhase, Species};

/// Progression flags for one species
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeciesView {
    pub species: Species,
    pub unlocked: bool,
    pub purchased: bool,
    pub feed_count: u32,
    pub ready_to_evolve: bool,
    pub evolving: bool,
    pub evolved: bool,
}

impl From<&FishState> for SpeciesView {
    fn from(fish: &FishState) -> Self {
        Self {
            species: fish.species,
            unlocked: fish.unlocked(),
            purchased: fish.purchased(),
            feed_count: fish.feed_count,
            ready_to_evolve: fish.ready_to_evolve(),
            evolving: fish.evolving(),
            evolved: fish.evolved(),
        }
    }
}

/// Render data for one sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityView {
    pub pos: Vec2,
    /// Radius in world units
    pub size: f32,
    pub frame: u32,
    /// +1 facing right, -1 facing left
    pub facing: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SharkView {
    pub active: bool,
    pub hits: u32,
    pub points_stolen: u64,
    pub sprite: EntityView,
}

impl From<&Shark> for SharkView {
    fn from(shark: &Shark) -> Self {
        Self {
            active: shark.active(),
            hits: shark.hits,
            points_stolen: shark.points_stolen,
            sprite: EntityView {
                pos: shark.pos,
                size: crate::consts::SHARK_HIT_RADIUS,
                frame: shark.frame,
                facing: shark.direction,
            },
        }
    }
}

/// Everything collaborators are allowed to see
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub score: u64,
    pub time_remaining: u32,
    pub paused: bool,
    pub game_over: bool,
    pub won: bool,
    pub current_species: Option<Species>,
    /// Feed count of the current species (0 when none)
    pub current_feed_count: u32,
    pub species: Vec<SpeciesView>,
    pub bubbles: Vec<EntityView>,
    /// Pop animations (frame is 0-based)
    pub popping: Vec<EntityView>,
    /// Fish currently in the tank
    pub fish: Vec<(Species, EntityView)>,
    pub shark: SharkView,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let current_species = state.aquarium.current();
        Self {
            phase: state.phase,
            score: state.score,
            time_remaining: state.time_remaining,
            paused: state.paused(),
            game_over: state.game_over(),
            won: state.won(),
            current_species,
            current_feed_count: current_species
                .map(|s| state.aquarium.get(s).feed_count)
                .unwrap_or(0),
            species: state.aquarium.iter().map(SpeciesView::from).collect(),
            bubbles: state
                .bubbles
                .bubbles
                .iter()
                .map(|b| EntityView {
                    pos: b.pos,
                    size: b.size,
                    frame: u32::from(b.strength),
                    facing: 1.0,
                })
                .collect(),
            popping: state
                .bubbles
                .popping
                .iter()
                .map(|p| EntityView {
                    pos: p.pos,
                    size: p.size,
                    frame: p.frame,
                    facing: 1.0,
                })
                .collect(),
            fish: state
                .aquarium
                .iter()
                .filter(|f| f.in_tank())
                .map(|f| {
                    (
                        f.species,
                        EntityView {
                            pos: f.pos,
                            size: f.hit_radius(),
                            frame: f.frame,
                            facing: f.direction,
                        },
                    )
                })
                .collect(),
            shark: SharkView::from(&state.shark),
        }
    }

    pub fn species(&self, species: Species) -> &SpeciesView {
        &self.species[species.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_fresh_state() {
        let state = GameState::new(1, 30);
        let snapshot = Snapshot::capture(&state);
        assert_eq!(snapshot.phase, SessionPhase::Menu);
        assert_eq!(snapshot.time_remaining, 30);
        assert!(snapshot.species(Species::FishyBoi).unlocked);
        assert!(!snapshot.species(Species::Speedy).unlocked);
        assert!(snapshot.fish.is_empty());
        assert!(!snapshot.shark.active);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = GameState::new(1, 30);
        state.aquarium.purchase(Species::FishyBoi).unwrap();
        let json = serde_json::to_string(&Snapshot::capture(&state)).expect("serializes");
        assert!(json.contains("\"fishyBoi\""));
        assert!(json.contains("\"current_feed_count\":0"));
    }
}
