//! Bubble pool: spawning, rising drift and multi-hit popping

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use crate::circle_contains;
use crate::consts::*;
use crate::tuning::Tuning;

/// A rising, tappable bubble
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bubble {
    pub id: u32,
    pub pos: Vec2,
    /// Spawn x; lateral drift oscillates around it
    pub column: f32,
    /// Spawn y; drift phase is measured from here
    pub origin_y: f32,
    pub size: f32,
    /// Remaining hit points
    pub strength: u8,
    /// Hit points at spawn (drives the pop bonus)
    pub max_strength: u8,
    /// Rise speed (world units/sec)
    pub speed: f32,
}

impl Bubble {
    /// Tap radius: bigger while the bubble is tougher
    pub fn hit_radius(&self) -> f32 {
        self.size * (1.0 + BUBBLE_STRENGTH_HITBOX_BONUS * f32::from(self.strength))
    }

    pub fn contains(&self, point: Vec2) -> bool {
        circle_contains(self.pos, self.hit_radius(), point)
    }

    /// Fully above the visible area
    fn escaped(&self) -> bool {
        self.pos.y - self.size > 1.0
    }
}

/// A popped bubble playing its burst animation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoppingBubble {
    pub pos: Vec2,
    pub size: f32,
    /// 0-based frame, advances once per tick
    pub frame: u32,
}

/// Result of tapping a bubble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleTap {
    /// Lost a point of strength, still floating
    Damaged { strength_left: u8 },
    /// Removed and replaced by a pop animation
    Popped { score: u64 },
}

#[derive(Debug, Clone, Default)]
pub struct BubblePool {
    /// Live bubbles, oldest first
    pub bubbles: Vec<Bubble>,
    pub popping: Vec<PoppingBubble>,
    next_id: u32,
}

impl BubblePool {
    /// Spawn a bubble just below the bottom edge. Returns its id.
    pub fn spawn(&mut self, rng: &mut impl Rng, tuning: &Tuning) -> u32 {
        let size = tuning.bubble_size;
        let margin = (size + tuning.bubble_drift_amplitude).min(0.9);
        let x = rng.random_range(-1.0 + margin..=1.0 - margin);
        let y = -1.0 - size;
        let strength = rng.random_range(BUBBLE_MIN_STRENGTH..=BUBBLE_MAX_STRENGTH);
        let speed = if tuning.bubble_max_speed > tuning.bubble_min_speed {
            rng.random_range(tuning.bubble_min_speed..tuning.bubble_max_speed)
        } else {
            tuning.bubble_min_speed
        };

        self.next_id += 1;
        let id = self.next_id;
        self.bubbles.push(Bubble {
            id,
            pos: Vec2::new(x, y),
            column: x,
            origin_y: y,
            size,
            strength,
            max_strength: strength,
            speed,
        });
        id
    }

    /// Roll the per-tick spawn chance
    pub fn maybe_spawn(&mut self, rng: &mut impl Rng, tuning: &Tuning) -> Option<u32> {
        let chance = tuning.bubble_spawn_chance.clamp(0.0, 1.0);
        rng.random_bool(chance).then(|| self.spawn(rng, tuning))
    }

    /// Rise, drift and cull bubbles; step pop animations
    pub fn advance(&mut self, dt: f32, tuning: &Tuning) {
        for bubble in &mut self.bubbles {
            bubble.pos.y += bubble.speed * dt;
            let risen = bubble.pos.y - bubble.origin_y;
            bubble.pos.x = bubble.column
                + tuning.bubble_drift_amplitude * (risen * tuning.bubble_drift_frequency).sin();
        }
        self.bubbles.retain(|b| !b.escaped());

        for pop in &mut self.popping {
            pop.frame += 1;
        }
        self.popping.retain(|p| p.frame < POP_FRAMES);
    }

    /// Hit the newest bubble under `point`, if any
    pub fn tap(&mut self, point: Vec2, tuning: &Tuning) -> Option<BubbleTap> {
        let index = self.bubbles.iter().rposition(|b| b.contains(point))?;
        let bubble = &mut self.bubbles[index];

        if bubble.strength > 1 {
            bubble.strength -= 1;
            return Some(BubbleTap::Damaged {
                strength_left: bubble.strength,
            });
        }

        let bubble = self.bubbles.remove(index);
        self.popping.push(PoppingBubble {
            pos: bubble.pos,
            size: bubble.size,
            frame: 0,
        });
        Some(BubbleTap::Popped {
            score: tuning.pop_score(bubble.max_strength),
        })
    }

    pub fn get(&self, id: u32) -> Option<&Bubble> {
        self.bubbles.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Bubble> {
        self.bubbles.iter_mut().find(|b| b.id == id)
    }
}
