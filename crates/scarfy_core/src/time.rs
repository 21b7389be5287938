use std::time::{Duration, Instant};

const FPS_SAMPLE_COUNT: usize = 60;

/// Frames longer than this are reported as hitches. The delta is still passed
/// through unchanged.
const HITCH_THRESHOLD: f64 = 0.25;

/// Variable-step frame clock.
///
/// Every redraw measures the wall-clock time since the previous one and hands
/// it to the simulation as-is. The target frame rate only schedules when the
/// next redraw is requested; it never alters the measured delta.
pub struct TimeState {
    pub target_frame_time: f64,
    pub total_time: f64,
    pub frame_count: u64,
    pub real_dt: f64,
    last_instant: Instant,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl TimeState {
    pub fn new(target_fps: u32) -> Self {
        let target_frame_time = 1.0 / f64::from(target_fps.max(1));
        Self {
            target_frame_time,
            total_time: 0.0,
            frame_count: 0,
            real_dt: 0.0,
            last_instant: Instant::now(),
            fps_samples: [target_frame_time; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 1.0 / target_frame_time,
            smoothed_frame_time_ms: target_frame_time * 1000.0,
        }
    }

    /// Measure the delta since the previous frame. Returns it in seconds.
    pub fn begin_frame(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.record(dt);
        self.real_dt as f32
    }

    fn record(&mut self, dt: f64) {
        if dt > HITCH_THRESHOLD && self.frame_count > 0 {
            log::warn!("Frame took {:.1}ms", dt * 1000.0);
        }

        self.real_dt = dt;
        self.total_time += dt;
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }

    /// Earliest instant the next redraw should be requested to stay near the
    /// target frame rate.
    pub fn next_frame_deadline(&self) -> Instant {
        self.last_instant + Duration::from_secs_f64(self.target_frame_time)
    }
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new(60)
    }
}
