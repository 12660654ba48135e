//! Bubble Time - A clicker aquarium simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity pools, progression, shark, tick)
//! - `engine`: Session controller and the command surface used by the UI shell
//! - `render`: Render boundary (viewport conversion, sprite instances)
//! - `audio`: Sound cue mapping for engine events
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod audio;
pub mod engine;
pub mod error;
pub mod events;
pub mod render;
pub mod settings;
pub mod shop;
pub mod sim;
pub mod tuning;

pub use engine::Engine;
pub use error::{CommandError, CommandResult};
pub use events::{GameEvent, NotificationSink, WinStats};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz frame tick)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Feeds required before a species can evolve
    pub const EVOLVE_THRESHOLD: u32 = 10;
    /// Frame held while a fully fed fish rests
    pub const READY_FRAME: u32 = 6;
    /// Frames in the evolution animation
    pub const EVOLVE_FRAMES: u32 = 8;
    /// Speed a resting fish keeps (effectively frozen)
    pub const RESTING_SPEED: f32 = 0.0001;

    /// Frames in the bubble pop animation (one per tick)
    pub const POP_FRAMES: u32 = 8;
    /// Bubble strength range (hit points)
    pub const BUBBLE_MIN_STRENGTH: u8 = 1;
    pub const BUBBLE_MAX_STRENGTH: u8 = 3;
    /// Extra hitbox radius per point of remaining strength (fraction of size)
    pub const BUBBLE_STRENGTH_HITBOX_BONUS: f32 = 0.25;

    /// Horizontal turnaround for fish and shark (world units)
    pub const SWIM_BOUND_X: f32 = 0.8;
    /// Fish vertical sine amplitude
    pub const FISH_AMPLITUDE: f32 = 0.35;
    /// Fish vertical phase rate (radians/sec)
    pub const FISH_PHASE_RATE: f32 = 1.5;
    /// Fish hitbox radius at scale 1.0
    pub const FISH_HIT_RADIUS: f32 = 0.15;

    /// Shark animation frames (1-based, terminal frame ends the attack)
    pub const SHARK_FIRST_FRAME: u32 = 1;
    pub const SHARK_TERMINAL_FRAME: u32 = 8;
    /// Hits per shark escalation step
    pub const SHARK_HITS_PER_FRAME: u32 = 5;
    /// Shark vertical sine amplitude
    pub const SHARK_AMPLITUDE: f32 = 0.2;
    /// Shark vertical phase rate (radians/sec)
    pub const SHARK_PHASE_RATE: f32 = 2.0;
    /// Shark hitbox radius
    pub const SHARK_HIT_RADIUS: f32 = 0.2;
    /// Vertical band for shark entry
    pub const SHARK_ENTRY_Y: f32 = 0.5;
}

/// Circle containment test in world units
#[inline]
pub fn circle_contains(center: Vec2, radius: f32, point: Vec2) -> bool {
    center.distance_squared(point) <= radius * radius
}
