//! Sprite-sheet animation: a moving source rectangle over a strip of equally
//! sized frames.
//!
//! Each sprite keeps its own accumulator. When the accumulated time reaches the
//! per-frame duration the accumulator is reset (not carried over), the frame
//! index steps forward and wraps past `max_frame`, and the source rectangle is
//! moved to `frame * frame_width`.

use glam::Vec2;

use crate::rect::Rect;

/// Animation and placement state for one on-screen entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedSprite {
    /// Region of the sprite sheet shown this frame.
    pub source: Rect,
    /// Top-left corner of the sprite on screen.
    pub position: Vec2,
    pub frame: u32,
    /// Seconds each frame stays on screen. Zero advances on every non-empty tick.
    pub frame_duration: f32,
    pub elapsed: f32,
}

impl AnimatedSprite {
    pub fn new(frame_size: Vec2, position: Vec2, frame_duration: f32) -> Self {
        Self {
            source: Rect::new(0.0, 0.0, frame_size.x, frame_size.y),
            position,
            frame: 0,
            frame_duration,
            elapsed: 0.0,
        }
    }

    pub fn frame_size(&self) -> Vec2 {
        self.source.size()
    }

    /// Full on-screen rectangle covered by the current frame.
    pub fn bounds(&self) -> Rect {
        Rect::from_position_size(self.position, self.source.size())
    }

    /// Advance by `dt` seconds. Returns true when the frame changed.
    pub fn advance(&mut self, dt: f32, max_frame: u32) -> bool {
        if dt <= 0.0 {
            return false;
        }

        self.elapsed += dt;
        if self.elapsed < self.frame_duration {
            return false;
        }

        self.elapsed = 0.0;
        self.frame += 1;
        if self.frame > max_frame {
            self.frame = 0;
        }
        self.source.x = self.frame as f32 * self.source.width;
        true
    }

    /// By-value form of [`AnimatedSprite::advance`].
    pub fn advanced(mut self, dt: f32, max_frame: u32) -> Self {
        self.advance(dt, max_frame);
        self
    }
}
