/// Number of obstacles in the enemy formation.
pub const ENEMY_COUNT: usize = 3;

/// Frames in the player's run cycle (one row on the sheet).
pub const PLAYER_SHEET_COLUMNS: u32 = 6;
/// The enemy sheet is a square grid; only its first row is animated.
pub const ENEMY_SHEET_COLUMNS: u32 = 8;
pub const ENEMY_SHEET_ROWS: u32 = 8;

/// Simulation constants. Distances are pixels, times seconds, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub window_width: f32,
    pub window_height: f32,
    /// Advisory redraw rate; the simulation always uses the measured delta.
    pub target_fps: u32,
    /// Downward acceleration while airborne (px/s²).
    pub gravity: f32,
    /// Velocity added by a jump; negative is upward (px/s).
    pub jump_impulse: f32,
    /// Shared horizontal velocity of enemies and the finish line (px/s).
    pub enemy_velocity: f32,
    pub enemy_spacing: f32,
    pub background_speed: f32,
    pub midground_speed: f32,
    pub foreground_speed: f32,
    /// Inward shrink applied to every enemy before the overlap test.
    pub collision_pad: f32,
    pub player_frame_duration: f32,
    pub player_max_frame: u32,
    /// Zero means the enemy animation steps on every simulated frame.
    pub enemy_frame_duration: f32,
    pub enemy_max_frame: u32,
    /// Stop simulating once the run is won or lost.
    pub freeze_on_outcome: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: 800.0,
            window_height: 600.0,
            target_fps: 60,
            gravity: 1_000.0,
            jump_impulse: -600.0,
            enemy_velocity: -200.0,
            enemy_spacing: 300.0,
            background_speed: 100.0,
            midground_speed: 150.0,
            foreground_speed: 200.0,
            collision_pad: 40.0,
            player_frame_duration: 1.0 / 12.0,
            player_max_frame: PLAYER_SHEET_COLUMNS - 1,
            enemy_frame_duration: 0.0,
            enemy_max_frame: ENEMY_SHEET_COLUMNS - 1,
            freeze_on_outcome: false,
        }
    }
}

impl GameConfig {
    /// Window size rounded to whole pixels for the platform layer.
    pub fn window_size(&self) -> (u32, u32) {
        (
            self.window_width.round() as u32,
            self.window_height.round() as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_tuning() {
        let config = GameConfig::default();
        assert_eq!(config.window_size(), (800, 600));
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.gravity, 1000.0);
        assert_eq!(config.jump_impulse, -600.0);
        assert_eq!(config.enemy_velocity, -200.0);
        assert_eq!(config.collision_pad, 40.0);
        assert_eq!(config.player_max_frame, 5);
        assert_eq!(config.enemy_max_frame, 7);
        assert!(!config.freeze_on_outcome);
    }

    #[test]
    fn scroll_speeds_increase_toward_the_viewer() {
        let config = GameConfig::default();
        assert!(config.background_speed < config.midground_speed);
        assert!(config.midground_speed < config.foreground_speed);
    }
}
