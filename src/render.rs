//! Render boundary
//!
//! The simulation works in normalized world units (x and y in [-1, 1], y up),
//! which is exactly clip space. Pixels only appear here: taps are converted
//! in, sprite instances are packed out for the renderer's instance buffer.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::assets::{AssetId, AssetManifest};
use crate::sim::Snapshot;

/// Drawable surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Pixel (origin top-left, y down) to world
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            screen.x / self.width * 2.0 - 1.0,
            -(screen.y / self.height * 2.0 - 1.0),
        )
    }

    /// World to pixel (origin top-left, y down)
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(
            (world.x + 1.0) * 0.5 * self.width,
            (1.0 - world.y) * 0.5 * self.height,
        )
    }
}

/// Texture slots, in the order the renderer binds them
pub mod slots {
    use crate::sim::Species;

    /// Bubble frames occupy slots 0..8
    pub const BUBBLE_BASE: u32 = 0;
    pub const FISH_BASE: u32 = 8;
    pub const SHARK: u32 = FISH_BASE + Species::COUNT as u32;

    pub fn fish(species: Species) -> u32 {
        FISH_BASE + species.index() as u32
    }
}

/// One textured quad, laid out for a GPU instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Center in clip space
    pub center: [f32; 2],
    /// Half extents in clip space
    pub half_size: [f32; 2],
    /// Texture slot (see [`slots`])
    pub texture: u32,
    /// Animation frame within the texture's strip
    pub frame: u32,
    /// 1 when the sprite faces left
    pub flip_x: u32,
    pub _pad: u32,
}

impl SpriteInstance {
    fn new(center: Vec2, radius: f32, texture: u32, frame: u32, facing: f32) -> Self {
        Self {
            center: center.to_array(),
            half_size: [radius, radius],
            texture,
            frame,
            flip_x: u32::from(facing < 0.0),
            _pad: 0,
        }
    }
}

/// Build the frame's sprite list, back to front. Sprites whose texture failed
/// to load are skipped.
pub fn build_instances(snapshot: &Snapshot, assets: &AssetManifest) -> Vec<SpriteInstance> {
    let mut instances = Vec::with_capacity(
        snapshot.bubbles.len() + snapshot.popping.len() + snapshot.fish.len() + 1,
    );

    if assets.is_usable(AssetId::BubbleFrame(0)) {
        for bubble in &snapshot.bubbles {
            instances.push(SpriteInstance::new(
                bubble.pos,
                bubble.size,
                slots::BUBBLE_BASE,
                bubble.frame,
                bubble.facing,
            ));
        }
    }

    for pop in &snapshot.popping {
        let Ok(frame) = u8::try_from(pop.frame) else {
            continue;
        };
        if !assets.is_usable(AssetId::BubbleFrame(frame)) {
            continue;
        }
        instances.push(SpriteInstance::new(
            pop.pos,
            pop.size,
            slots::BUBBLE_BASE + pop.frame,
            0,
            pop.facing,
        ));
    }

    for (species, fish) in &snapshot.fish {
        if !assets.is_usable(AssetId::Fish(*species)) {
            continue;
        }
        instances.push(SpriteInstance::new(
            fish.pos,
            fish.size,
            slots::fish(*species),
            fish.frame,
            fish.facing,
        ));
    }

    let shark = &snapshot.shark;
    if shark.active && assets.is_usable(AssetId::Shark) {
        instances.push(SpriteInstance::new(
            shark.sprite.pos,
            shark.sprite.size,
            slots::SHARK,
            shark.sprite.frame,
            shark.sprite.facing,
        ));
    }

    instances
}

/// Raw bytes for upload
pub fn instance_bytes(instances: &[SpriteInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
