//! Turns a `World` into a flat, back-to-front draw list.
//!
//! Composition is pure. The renderer in `main` batches the quads by texture and
//! hands the banner to the HUD, so everything below can be checked without a
//! GPU.

use glam::Vec2;
use scarfy_core::{AnimatedSprite, Rect};
use scarfy_hud::Banner;

use crate::assets::{SheetDims, TextureSlot};
use crate::config::GameConfig;
use crate::world::{Outcome, World};

const BANNER_FONT_SIZE: f32 = 50.0;
const LOST_COLOR: [u8; 3] = [230, 41, 55];
const WON_COLOR: [u8; 3] = [0, 228, 48];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteQuad {
    pub texture: TextureSlot,
    /// Destination on screen, in pixels.
    pub dest: Rect,
    /// `[u0, v0, u1, v1]` in normalized texture space.
    pub uv: [f32; 4],
}

impl SpriteQuad {
    pub fn dest_array(&self) -> [f32; 4] {
        [self.dest.x, self.dest.y, self.dest.width, self.dest.height]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameDraw {
    pub quads: Vec<SpriteQuad>,
    pub banner: Option<Banner>,
}

pub fn compose_frame(world: &World, config: &GameConfig, dims: &SheetDims) -> FrameDraw {
    let mut quads = Vec::with_capacity(6 + 1 + world.enemies.len());

    let backdrop = [
        TextureSlot::Background,
        TextureSlot::Midground,
        TextureSlot::Foreground,
    ];
    for (slot, layer) in backdrop.into_iter().zip(world.layers.iter()) {
        let size = layer.scaled_size();
        for x in layer.tile_xs() {
            quads.push(SpriteQuad {
                texture: slot,
                dest: Rect::new(x, 0.0, size.x, size.y),
                uv: [0.0, 0.0, 1.0, 1.0],
            });
        }
    }

    let banner = match world.outcome() {
        Outcome::Playing => {
            quads.push(sprite_quad(TextureSlot::Player, &world.player.sprite, dims));
            for enemy in &world.enemies {
                quads.push(sprite_quad(TextureSlot::Enemy, enemy, dims));
            }
            None
        }
        Outcome::Lost => Some(outcome_banner("Game Over!", LOST_COLOR, config)),
        Outcome::Won => Some(outcome_banner("You Win!", WON_COLOR, config)),
    };

    FrameDraw { quads, banner }
}

/// Quad for one animated sprite, sampling its current source rectangle.
fn sprite_quad(texture: TextureSlot, sprite: &AnimatedSprite, dims: &SheetDims) -> SpriteQuad {
    SpriteQuad {
        texture,
        dest: sprite.bounds(),
        uv: source_uv(sprite.source, dims.get(texture)),
    }
}

pub fn source_uv(source: Rect, sheet: Vec2) -> [f32; 4] {
    if sheet.x <= 0.0 || sheet.y <= 0.0 {
        return [0.0, 0.0, 1.0, 1.0];
    }
    [
        source.x / sheet.x,
        source.y / sheet.y,
        source.right() / sheet.x,
        source.bottom() / sheet.y,
    ]
}

fn outcome_banner(text: &'static str, color: [u8; 3], config: &GameConfig) -> Banner {
    Banner {
        text,
        color,
        position: (config.window_width / 4.0, config.window_height / 2.0),
        font_size: BANNER_FONT_SIZE,
    }
}
