//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Time comes in from the host, never from the system clock
//! - No rendering, audio or platform dependencies

pub mod bubbles;
pub mod clock;
pub mod collision;
pub mod fish;
pub mod shark;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use bubbles::{Bubble, BubblePool, BubbleTap, PoppingBubble};
pub use clock::{Firings, Interval, Scheduler};
pub use collision::{TapResult, resolve_tap};
pub use fish::{Aquarium, Evolution, FishStage, FishState};
pub use shark::{Shark, SharkHit, SharkMode};
pub use snapshot::{EntityView, SharkView, Snapshot, SpeciesView};
pub use state::{GameState, SessionPhase, Species, SpeciesInfo};
pub use tick::{check_end_conditions, countdown, tick};
