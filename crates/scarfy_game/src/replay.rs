use crate::player::PlayerInput;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    #[serde(default = "default_dt")]
    pub dt: f32,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub jump: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    /// Overrides the sequence delta for these frames, to model hitches.
    #[serde(default)]
    pub dt: Option<f32>,
}

impl ReplaySequence {
    /// One `(input, dt)` pair per simulated frame.
    pub fn expanded_inputs(&self) -> Vec<(PlayerInput, f32)> {
        let mut out = Vec::new();
        for frame in &self.frames {
            let dt = frame.dt.unwrap_or(self.dt);
            for _ in 0..frame.repeat.max(1) {
                out.push((
                    PlayerInput {
                        jump_pressed: frame.jump,
                    },
                    dt,
                ));
            }
        }
        out
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.dt <= 0.0 {
        return Err("Replay validation failed: dt must be > 0".to_string());
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    if replay.frames.iter().any(|f| matches!(f.dt, Some(dt) if dt < 0.0)) {
        return Err("Replay validation failed: frame dt must be >= 0".to_string());
    }
    Ok(())
}

const fn default_dt() -> f32 {
    1.0 / 60.0
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SheetDims;
    use crate::config::GameConfig;
    use crate::world::{Outcome, World};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "scarfy_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn write_replay(name_hint: &str, json: &str) -> ReplaySequence {
        let path = temp_file_path(name_hint);
        fs::write(&path, json).expect("write replay file");
        let replay = load_replay_from_path(&path).expect("replay should load");
        let _ = fs::remove_file(path);
        replay
    }

    fn run(replay: &ReplaySequence, config: &GameConfig) -> World {
        let mut world = World::new(config, &SheetDims::default());
        for (input, dt) in replay.expanded_inputs() {
            world.update(input, dt, config);
        }
        world
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let replay = write_replay(
            "parse",
            r#"{
              "frames": [
                { "repeat": 3 },
                { "jump": true },
                { "repeat": 2, "dt": 0.25 }
              ]
            }"#,
        );
        let expanded = replay.expanded_inputs();
        assert_eq!(expanded.len(), 6);
        assert!(expanded[3].0.jump_pressed);
        assert!(!expanded[4].0.jump_pressed);
        assert!((expanded[0].1 - 1.0 / 60.0).abs() < 1e-9);
        assert_eq!(expanded[5].1, 0.25);
    }

    #[test]
    fn empty_or_invalid_replays_are_rejected() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("empty frames");
        assert!(err.contains("frames list is empty"));

        fs::write(&path, r#"{ "dt": 0.0, "frames": [{}] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("zero dt");
        assert!(err.contains("dt must be > 0"));

        fs::write(&path, "not json").expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("bad json");
        assert!(err.contains("Failed to parse replay JSON"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_run_is_deterministic() {
        let replay = write_replay(
            "deterministic",
            r#"{
              "frames": [
                { "repeat": 60 },
                { "jump": true },
                { "repeat": 30 },
                { "repeat": 3, "dt": 0.2 },
                { "jump": true },
                { "repeat": 200 }
              ]
            }"#,
        );
        let config = GameConfig::default();
        let run_a = run(&replay, &config);
        let run_b = run(&replay, &config);
        assert_eq!(run_a, run_b);
    }

    #[test]
    fn idle_run_is_lost_to_the_first_enemy() {
        // Standing still for five seconds at 60 FPS.
        let replay = write_replay("idle", r#"{ "frames": [{ "repeat": 300 }] }"#);
        let world = run(&replay, &GameConfig::default());
        assert_eq!(world.outcome(), Outcome::Lost);
        assert!(world.collision);
    }

    #[test]
    fn zero_dt_frames_change_nothing() {
        let replay = write_replay(
            "zero_dt",
            r#"{ "frames": [{ "repeat": 50, "dt": 0.0 }] }"#,
        );
        let config = GameConfig::default();
        let world = run(&replay, &config);
        let fresh = World::new(&config, &SheetDims::default());
        assert_eq!(world.player, fresh.player);
        assert_eq!(world.enemies, fresh.enemies);
        assert_eq!(world.layers, fresh.layers);
        assert_eq!(world.finish_line, fresh.finish_line);
        assert_eq!(world.outcome(), Outcome::Playing);
    }
}
