use crate::{Camera, CameraError};
use cali_image::{ColorMode, Frame};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Receives the frames of recorded episodes.
pub trait FrameSink {
    fn begin_episode(&mut self, episode: usize) -> Result<(), CameraError>;

    /// Called once per camera per tick, in camera order.
    fn write_frame(
        &mut self,
        camera: &str,
        index: usize,
        frame: &Frame,
    ) -> Result<(), CameraError>;

    /// Called after the last tick, also when the episode ended on an error.
    fn end_episode(&mut self, episode: usize, frames: usize) -> Result<(), CameraError>;
}

/// Timing of one recorded episode.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordConfig {
    fps: u32,
    duration: Duration,
    color_mode: Option<ColorMode>,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            duration: Duration::from_secs(15),
            color_mode: None,
        }
    }
}

impl RecordConfig {
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = Some(color_mode);
        self
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn color_mode(&self) -> Option<ColorMode> {
        self.color_mode
    }

    /// Number of ticks in one episode, `fps * duration` rounded.
    pub fn frame_count(&self) -> usize {
        (self.fps as f64 * self.duration.as_secs_f64()).round() as usize
    }

    pub fn period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }
}

/// Flag that ends a running episode early.
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

fn run_ticks(
    cameras: &mut [(&str, &mut dyn Camera)],
    sink: &mut dyn FrameSink,
    config: &RecordConfig,
    stop: &StopSignal,
    ticks: &mut usize,
) -> Result<(), CameraError> {
    let period = config.period();
    let start = Instant::now();

    while *ticks < config.frame_count() && !stop.is_stopped() {
        for (name, camera) in cameras.iter_mut() {
            let frame = camera.read(config.color_mode())?;
            sink.write_frame(*name, *ticks, &frame)?;
        }
        *ticks += 1;

        let next = start + period * *ticks as u32;
        if let Some(wait) = next.checked_duration_since(Instant::now()) {
            std::thread::sleep(wait);
        }
    }

    Ok(())
}

/// Record one episode: read every camera once per tick at `config.fps`
/// for `config.duration`, handing each frame to `sink`.
///
/// Cameras must already be connected. Returns the number of ticks recorded,
/// fewer than `config.frame_count()` when `stop` was raised.
///
/// # Errors
///
/// Returns `CameraError::InvalidConfig` for a zero fps, otherwise the first
/// camera or sink error. `sink.end_episode` still runs on a camera error.
pub fn record_episode(
    episode: usize,
    cameras: &mut [(&str, &mut dyn Camera)],
    sink: &mut dyn FrameSink,
    config: &RecordConfig,
    stop: &StopSignal,
) -> Result<usize, CameraError> {
    if config.fps() == 0 {
        return Err(CameraError::InvalidConfig("fps must be positive".to_string()));
    }

    log::info!(
        "episode {episode}: recording {} ticks at {} fps from {} camera(s)",
        config.frame_count(),
        config.fps(),
        cameras.len()
    );

    sink.begin_episode(episode)?;
    let mut ticks = 0;
    match run_ticks(cameras, sink, config, stop, &mut ticks) {
        Ok(()) => {
            sink.end_episode(episode, ticks)?;
            if ticks < config.frame_count() {
                log::info!("episode {episode}: stopped early after {ticks} ticks");
            }
            Ok(ticks)
        }
        Err(e) => {
            log::warn!("episode {episode}: aborted after {ticks} ticks: {e}");
            if let Err(sink_err) = sink.end_episode(episode, ticks) {
                log::warn!("episode {episode}: end_episode failed: {sink_err}");
            }
            Err(e)
        }
    }
}
