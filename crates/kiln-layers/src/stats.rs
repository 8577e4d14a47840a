use kiln_engine::core::Layer;
use kiln_engine::time::FrameTime;

/// Overlay that logs the average frame rate over a fixed window.
pub struct FrameStatsLayer {
    window_ms: u32,
    frames: u32,
    elapsed_ms: u32,
    waited_ms: u32,
}

/// Frame-rate sample produced at the end of each window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub fps: f32,
    /// Share of the window spent sleeping in the pacer.
    pub idle: f32,
}

impl FrameStatsLayer {
    pub fn new(window_ms: u32) -> Self {
        Self {
            window_ms: window_ms.max(1),
            frames: 0,
            elapsed_ms: 0,
            waited_ms: 0,
        }
    }

    /// Accumulates one frame; returns a sample once the window is full.
    pub fn record(&mut self, time: FrameTime) -> Option<FrameStats> {
        self.frames += 1;
        self.elapsed_ms += (time.dt * 1000.0).round() as u32;
        self.waited_ms += time.waited_ms;

        if self.elapsed_ms < self.window_ms {
            return None;
        }

        let secs = self.elapsed_ms as f32 / 1000.0;
        let stats = FrameStats {
            fps: self.frames as f32 / secs,
            idle: self.waited_ms as f32 / self.elapsed_ms as f32,
        };

        self.frames = 0;
        self.elapsed_ms = 0;
        self.waited_ms = 0;
        Some(stats)
    }
}

impl Layer for FrameStatsLayer {
    fn name(&self) -> &str {
        "frame-stats"
    }

    fn on_update(&mut self, time: FrameTime) {
        if let Some(stats) = self.record(time) {
            log::info!("{:.1} fps, {:.0}% idle", stats.fps, stats.idle * 100.0);
        }
    }
}
