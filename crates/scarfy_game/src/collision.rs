//! Player-vs-enemy hit testing.
//!
//! Enemy sprite frames carry a transparent margin, so each enemy's rectangle is
//! shrunk by a fixed pad before the overlap test. The player's rectangle is used
//! unpadded. A hit carries no resolution; it only ends the run.

use scarfy_core::{AnimatedSprite, Rect};

/// Rectangle an enemy can actually be hit in.
pub fn enemy_hitbox(enemy: &AnimatedSprite, pad: f32) -> Rect {
    enemy.bounds().shrunk(pad)
}

pub fn hits_player(player: &AnimatedSprite, enemy: &AnimatedSprite, pad: f32) -> bool {
    enemy_hitbox(enemy, pad).intersects(&player.bounds())
}

/// Index of the first enemy touching the player, if any.
pub fn first_hit(player: &AnimatedSprite, enemies: &[AnimatedSprite], pad: f32) -> Option<usize> {
    enemies
        .iter()
        .position(|enemy| hits_player(player, enemy, pad))
}
