//! Endless horizontally scrolling backdrop layers.
//!
//! Each layer is one texture scaled to fit the window and drawn twice, side by
//! side. The offset runs from 0 down to just above `-scaled_width` and then
//! snaps back to 0, which lines the second tile up exactly where the first
//! one started.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxLayer {
    /// Left edge of the first tile, always in `(-scaled_width, 0]`.
    pub offset: f32,
    /// Scroll speed in px/s toward the left.
    pub speed: f32,
    pub scale: f32,
    pub texture_size: Vec2,
}

impl ParallaxLayer {
    pub fn new(texture_size: Vec2, speed: f32, window_size: Vec2) -> Self {
        Self {
            offset: 0.0,
            speed,
            scale: fit_scale(texture_size, window_size),
            texture_size,
        }
    }

    pub fn scaled_width(&self) -> f32 {
        self.texture_size.x * self.scale
    }

    pub fn scaled_size(&self) -> Vec2 {
        self.texture_size * self.scale
    }

    pub fn scroll(&mut self, dt: f32) {
        self.offset -= self.speed * dt;
        if self.offset <= -self.scaled_width() {
            self.offset = 0.0;
        }
    }

    /// Left edges of the two tiles drawn for this layer.
    pub fn tile_xs(&self) -> [f32; 2] {
        [self.offset, self.offset + self.scaled_width()]
    }
}

/// Scale that fits the texture's binding dimension to the window: a texture
/// taller than it is wide is fitted to the window width, anything else to the
/// window height.
pub fn fit_scale(texture_size: Vec2, window_size: Vec2) -> f32 {
    if texture_size.x <= 0.0 || texture_size.y <= 0.0 {
        return 1.0;
    }
    if texture_size.x < texture_size.y {
        window_size.x / texture_size.x
    } else {
        window_size.y / texture_size.y
    }
}
