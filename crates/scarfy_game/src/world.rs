//! The whole simulation: one player, a fixed enemy formation, a finish line
//! travelling with that formation, three parallax layers and the run outcome.
//!
//! `World::update` is the only mutator. Every frame runs, in order:
//!
//!   1. scroll the parallax layers
//!   2. player physics (ground test, gravity, jump, integrate)
//!   3. move enemies and the finish line by the shared velocity
//!   4. advance animations (player only when grounded)
//!   5. collision, then the finish test, then the outcome
//!
//! Nothing here touches the GPU or the clock; callers pass the measured delta
//! and the compiled-in `GameConfig`, which keeps every step reproducible.

use glam::Vec2;
use scarfy_core::AnimatedSprite;

use crate::assets::SheetDims;
use crate::collision;
use crate::config::{GameConfig, ENEMY_COUNT, ENEMY_SHEET_COLUMNS, ENEMY_SHEET_ROWS, PLAYER_SHEET_COLUMNS};
use crate::parallax::ParallaxLayer;
use crate::player::{Player, PlayerInput};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Outcome {
    #[default]
    Playing,
    Lost,
    Won,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Self::Playing => "Playing",
            Self::Lost => "Lost",
            Self::Won => "Won",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct World {
    pub player: Player,
    pub enemies: [AnimatedSprite; ENEMY_COUNT],
    /// x coordinate the player must reach to win.
    pub finish_line: f32,
    /// Back to front: background, midground, foreground.
    pub layers: [ParallaxLayer; 3],
    /// Sticky: set by the first enemy hit.
    pub collision: bool,
    /// Sticky: set once the player's x reaches the finish line.
    pub crossed_finish: bool,
    outcome: Outcome,
    pub elapsed: f32,
    pub frame_count: u64,
}

impl World {
    pub fn new(config: &GameConfig, dims: &SheetDims) -> Self {
        let player_frame = Vec2::new(
            dims.player.x / PLAYER_SHEET_COLUMNS as f32,
            dims.player.y,
        );
        let enemy_frame = Vec2::new(
            dims.enemy.x / ENEMY_SHEET_COLUMNS as f32,
            dims.enemy.y / ENEMY_SHEET_ROWS as f32,
        );

        let enemies = std::array::from_fn(|i| {
            AnimatedSprite::new(
                enemy_frame,
                Vec2::new(
                    config.window_width + i as f32 * config.enemy_spacing,
                    config.window_height - enemy_frame.y,
                ),
                config.enemy_frame_duration,
            )
        });

        let window = Vec2::new(config.window_width, config.window_height);
        let layers = [
            ParallaxLayer::new(dims.background, config.background_speed, window),
            ParallaxLayer::new(dims.midground, config.midground_speed, window),
            ParallaxLayer::new(dims.foreground, config.foreground_speed, window),
        ];

        Self::from_parts(Player::spawn(player_frame, config), enemies, layers)
    }

    /// Assemble a world from explicit entities. The finish line starts at the
    /// last enemy.
    pub fn from_parts(
        player: Player,
        enemies: [AnimatedSprite; ENEMY_COUNT],
        layers: [ParallaxLayer; 3],
    ) -> Self {
        let finish_line = enemies[ENEMY_COUNT - 1].position.x;
        Self {
            player,
            enemies,
            finish_line,
            layers,
            collision: false,
            crossed_finish: false,
            outcome: Outcome::Playing,
            elapsed: 0.0,
            frame_count: 0,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Advance the simulation by `dt` seconds and return the outcome after it.
    pub fn update(&mut self, input: PlayerInput, dt: f32, config: &GameConfig) -> Outcome {
        if config.freeze_on_outcome && self.outcome.is_terminal() {
            return self.outcome;
        }

        self.elapsed += dt;
        self.frame_count += 1;

        for layer in &mut self.layers {
            layer.scroll(dt);
        }

        self.player.step(input, dt, config);

        for enemy in &mut self.enemies {
            enemy.position.x += config.enemy_velocity * dt;
        }
        self.finish_line += config.enemy_velocity * dt;

        self.player.animate(dt, config);
        for enemy in &mut self.enemies {
            enemy.advance(dt, config.enemy_max_frame);
        }

        if let Some(index) =
            collision::first_hit(&self.player.sprite, &self.enemies, config.collision_pad)
        {
            if !self.collision {
                log::debug!("Player hit enemy {} at t={:.3}s", index, self.elapsed);
            }
            self.collision = true;
        }
        if self.player.sprite.position.x >= self.finish_line {
            self.crossed_finish = true;
        }

        self.resolve_outcome();
        self.outcome
    }

    /// The outcome is read from the sticky flags every frame, collision first.
    /// A run never returns to Playing, and a win followed by a hit turns into
    /// a loss.
    fn resolve_outcome(&mut self) {
        let outcome = if self.collision {
            Outcome::Lost
        } else if self.crossed_finish {
            Outcome::Won
        } else {
            Outcome::Playing
        };
        if outcome != self.outcome {
            log::info!(
                "Run outcome: {} -> {} after {:.2}s ({} frames)",
                self.outcome,
                outcome,
                self.elapsed,
                self.frame_count
            );
            self.outcome = outcome;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    fn no_jump() -> PlayerInput {
        PlayerInput::default()
    }

    /// Default world with the player swapped for one at `(x, ground)` whose
    /// frame is `size` pixels square.
    fn world_with_player(config: &GameConfig, x: f32, size: f32) -> World {
        let mut world = World::new(config, &SheetDims::default());
        let frame = Vec2::splat(size);
        world.player = Player::at(frame, Vec2::new(x, config.window_height - size), config);
        world
    }

    #[test]
    fn new_world_lays_out_formation_and_finish_line() {
        let config = config();
        let world = World::new(&config, &SheetDims::default());

        let xs: Vec<f32> = world.enemies.iter().map(|e| e.position.x).collect();
        assert_eq!(xs, vec![800.0, 1100.0, 1400.0]);
        assert!(world.enemies.iter().all(|e| e.position.y == 500.0));
        assert_eq!(world.enemies[0].frame_size(), Vec2::new(100.0, 100.0));
        assert_eq!(world.finish_line, 1400.0);

        assert_eq!(world.player.sprite.frame_size(), Vec2::new(128.0, 128.0));
        assert_eq!(world.player.sprite.position, Vec2::new(336.0, 472.0));
        assert_eq!(world.outcome(), Outcome::Playing);
    }

    #[test]
    fn finish_line_stays_locked_to_last_enemy() {
        let config = config();
        let mut world = world_with_player(&config, 0.0, 10.0);
        let initial_gap = world.finish_line - world.enemies[ENEMY_COUNT - 1].position.x;
        let initial_spacing = world.enemies[1].position.x - world.enemies[0].position.x;

        let dts = [1.0 / 60.0, 1.0 / 30.0, 0.007, 0.05];
        for i in 0..400 {
            world.update(no_jump(), dts[i % dts.len()], &config);
            let gap = world.finish_line - world.enemies[ENEMY_COUNT - 1].position.x;
            let spacing = world.enemies[1].position.x - world.enemies[0].position.x;
            assert!((gap - initial_gap).abs() < 1e-3);
            assert!((spacing - initial_spacing).abs() < 1e-2);
        }
    }

    #[test]
    fn short_player_wins_when_finish_line_reaches_it() {
        // A player shorter than the collision pad passes under every hitbox.
        let config = config();
        let mut world = world_with_player(&config, 400.0, 30.0);

        // 0.125 s steps are exact in binary: 25 px per frame, 40 frames to 5.0 s.
        let dt = 0.125;
        for frame in 1..40 {
            let outcome = world.update(no_jump(), dt, &config);
            assert_eq!(outcome, Outcome::Playing, "won early on frame {frame}");
        }
        let outcome = world.update(no_jump(), dt, &config);
        assert_eq!(world.elapsed, 5.0);
        assert_eq!(world.finish_line, 400.0);
        assert_eq!(outcome, Outcome::Won);
        assert!(!world.collision);
    }

    #[test]
    fn standing_player_is_hit_by_first_enemy() {
        let config = config();
        let mut world = World::new(&config, &SheetDims::default());
        let dt = 1.0 / 60.0;
        let mut frames = 0;
        while world.update(no_jump(), dt, &config) == Outcome::Playing {
            frames += 1;
            assert!(frames < 600, "enemy never reached the player");
        }
        assert_eq!(world.outcome(), Outcome::Lost);
        assert!(world.collision);
        assert!(!world.crossed_finish);
    }

    #[test]
    fn collision_is_sticky_after_enemies_pass() {
        let config = config();
        let mut world = World::new(&config, &SheetDims::default());
        world.enemies[0].position.x = world.player.sprite.position.x;
        world.update(no_jump(), 1.0 / 60.0, &config);
        assert!(world.collision);

        // Move every enemy far away; the flag must not clear.
        for enemy in &mut world.enemies {
            enemy.position.x = -5000.0;
        }
        for _ in 0..120 {
            world.update(no_jump(), 1.0 / 60.0, &config);
            assert!(world.collision);
            assert_eq!(world.outcome(), Outcome::Lost);
        }
    }

    #[test]
    fn lost_beats_won_on_the_same_frame() {
        let config = config();
        let mut world = World::new(&config, &SheetDims::default());
        world.enemies[0].position.x = world.player.sprite.position.x;
        world.finish_line = world.player.sprite.position.x - 1000.0;

        let outcome = world.update(no_jump(), 1.0 / 60.0, &config);
        assert!(world.collision);
        assert!(world.crossed_finish);
        assert_eq!(outcome, Outcome::Lost);
    }

    #[test]
    fn hit_after_winning_turns_the_run_into_a_loss() {
        let config = config();
        let mut world = World::new(&config, &SheetDims::default());
        world.finish_line = 0.0;
        for enemy in &mut world.enemies {
            enemy.position.x = 5000.0;
        }
        assert_eq!(world.update(no_jump(), 1.0 / 60.0, &config), Outcome::Won);

        world.enemies[0].position.x = world.player.sprite.position.x;
        let outcome = world.update(no_jump(), 1.0 / 60.0, &config);
        assert!(world.collision);
        assert!(world.crossed_finish);
        assert_eq!(outcome, Outcome::Lost);

        // Lost is final once the hit has happened.
        for enemy in &mut world.enemies {
            enemy.position.x = -5000.0;
        }
        for _ in 0..60 {
            assert_eq!(world.update(no_jump(), 1.0 / 60.0, &config), Outcome::Lost);
        }
    }

    #[test]
    fn early_jump_over_last_enemy_wins_then_lands_on_it() {
        // Only the last enemy is in play; the finish line rides on it, so the
        // player crosses mid-jump and a slightly early jump comes down on it.
        let config = config();
        let dt = 1.0 / 60.0;
        let mut won_then_lost = false;
        for jump_frame in 250..=262u32 {
            let mut world = World::new(&config, &SheetDims::default());
            world.enemies[0].position.x = -5000.0;
            world.enemies[1].position.x = -5000.0;

            let mut saw_won = false;
            for frame in 1..=400u32 {
                let input = PlayerInput {
                    jump_pressed: frame == jump_frame,
                };
                if world.update(input, dt, &config) == Outcome::Won {
                    saw_won = true;
                }
            }
            if world.collision {
                assert_eq!(world.outcome(), Outcome::Lost, "jump on frame {jump_frame}");
                won_then_lost |= saw_won;
            }
        }
        assert!(won_then_lost, "no jump in range crossed the finish before landing");
    }

    #[test]
    fn simulation_keeps_running_after_outcome_by_default() {
        let config = config();
        let mut world = World::new(&config, &SheetDims::default());
        world.finish_line = 0.0;
        world.update(no_jump(), 0.1, &config);
        assert!(world.outcome().is_terminal());

        let before = world.enemies[0].position.x;
        world.update(no_jump(), 0.1, &config);
        assert!(world.enemies[0].position.x < before);
    }

    #[test]
    fn freeze_on_outcome_stops_updates() {
        let config = GameConfig {
            freeze_on_outcome: true,
            ..GameConfig::default()
        };
        let mut world = World::new(&config, &SheetDims::default());
        world.finish_line = 0.0;
        world.update(no_jump(), 0.1, &config);
        let frozen = world;

        world.update(PlayerInput { jump_pressed: true }, 0.1, &config);
        assert_eq!(world, frozen);
    }

    #[test]
    fn parallax_layers_move_at_distinct_speeds() {
        let config = config();
        let mut world = world_with_player(&config, 0.0, 10.0);
        world.update(no_jump(), 0.1, &config);
        let offsets: Vec<f32> = world.layers.iter().map(|l| l.offset).collect();
        assert!((offsets[0] - -10.0).abs() < 1e-4);
        assert!((offsets[1] - -15.0).abs() < 1e-4);
        assert!((offsets[2] - -20.0).abs() < 1e-4);
    }

    #[test]
    fn enemies_animate_every_frame() {
        let config = config();
        let mut world = world_with_player(&config, 0.0, 10.0);
        for expected in 1..=8u32 {
            world.update(no_jump(), 1.0 / 60.0, &config);
            assert!(world.enemies.iter().all(|e| e.frame == expected % 8));
        }
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(Outcome::default(), Outcome::Playing);
        assert_eq!(Outcome::Lost.to_string(), "Lost");
        assert!(Outcome::Won.is_terminal());
        assert!(!Outcome::Playing.is_terminal());
    }
}
