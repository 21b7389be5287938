use glam::Vec2;
use scarfy_core::AnimatedSprite;

use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    /// Edge-triggered: true only on the frame the jump key went down.
    pub jump_pressed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub sprite: AnimatedSprite,
    /// Vertical velocity in px/s, positive is downward.
    pub velocity: f32,
    pub airborne: bool,
}

impl Player {
    /// Player standing on the ground line, horizontally centred.
    pub fn spawn(frame_size: Vec2, config: &GameConfig) -> Self {
        let position = Vec2::new(
            config.window_width / 2.0 - frame_size.x / 2.0,
            config.window_height - frame_size.y,
        );
        Self::at(frame_size, position, config)
    }

    pub fn at(frame_size: Vec2, position: Vec2, config: &GameConfig) -> Self {
        Self {
            sprite: AnimatedSprite::new(frame_size, position, config.player_frame_duration),
            velocity: 0.0,
            airborne: false,
        }
    }

    pub fn is_on_ground(&self, window_height: f32) -> bool {
        is_on_ground(&self.sprite, window_height)
    }

    /// One physics step: ground test, gravity, jump impulse, integration.
    ///
    /// The ground test sees the position from the start of the frame. A grounded
    /// player has its velocity zeroed before the jump impulse is added, so gravity
    /// first acts on the following, airborne frame.
    pub fn step(&mut self, input: PlayerInput, dt: f32, config: &GameConfig) {
        if self.is_on_ground(config.window_height) {
            if self.airborne {
                log::debug!("Player landed at y={:.1}", self.sprite.position.y);
            }
            self.velocity = 0.0;
            self.airborne = false;
        } else {
            self.airborne = true;
            self.velocity += config.gravity * dt;
        }

        if input.jump_pressed && !self.airborne {
            self.velocity += config.jump_impulse;
            log::debug!("Jump: velocity {:.1} px/s", self.velocity);
        }

        self.sprite.position.y += self.velocity * dt;
    }

    /// The run cycle only plays while the player was on the ground this frame.
    pub fn animate(&mut self, dt: f32, config: &GameConfig) {
        if !self.airborne {
            self.sprite.advance(dt, config.player_max_frame);
        }
    }
}

/// On ground iff the sprite's top edge is at or below `window_height - height`.
pub fn is_on_ground(sprite: &AnimatedSprite, window_height: f32) -> bool {
    sprite.position.y >= window_height - sprite.source.height
}
