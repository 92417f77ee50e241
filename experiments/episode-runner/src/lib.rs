//! Per-shape recording of static target images into PNG episode folders.
//! Episodes are started from the keyboard and can be cut short with Ctrl-C.

use cali_camera::{
    Camera, CameraError, CameraSession, Frame, FrameSink, ImageSource, RecordConfig,
    StaticCamera, StopSignal, record_episode,
};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::thread;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EpisodeAction {
    Next,
    Quit,
}

/// Empty line or `n` starts the next episode, `q` quits.
pub fn parse_action(line: &str) -> Option<EpisodeAction> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "n" | "next" => Some(EpisodeAction::Next),
        "q" | "quit" => Some(EpisodeAction::Quit),
        _ => None,
    }
}

/// Prompt on stdout until a valid answer is read. End of input quits.
pub fn wait_for_action(input: &mut impl BufRead) -> io::Result<EpisodeAction> {
    loop {
        print!("\n  [ENTER] next episode | [q] quit | [Ctrl-C] stop episode > ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(EpisodeAction::Quit);
        }
        if let Some(action) = parse_action(&line) {
            return Ok(action);
        }
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "png" | "jpg" | "jpeg"))
}

/// Target images of one shape. Each shape is recorded as its own dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeTargets {
    pub shape: String,
    pub images: Vec<PathBuf>,
}

fn sorted_entries(dir: &Path, keep: impl Fn(&Path) -> bool) -> io::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| keep(p))
        .collect();
    paths.sort();
    Ok(paths)
}

/// Lists `<png_root>/<shape>/*.{png,jpg}`, shapes and images sorted by name.
///
/// Loose files in `png_root` are ignored. A shape directory without images
/// is kept with an empty list.
pub fn plan_shapes(png_root: &Path) -> io::Result<Vec<ShapeTargets>> {
    sorted_entries(png_root, |p| p.is_dir())?
        .into_iter()
        .map(|dir| {
            Ok(ShapeTargets {
                shape: dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                images: sorted_entries(&dir, |p| p.is_file() && is_image(p))?,
            })
        })
        .collect()
}

/// Raise `stop` on every Ctrl-C.
///
/// The signal is awaited on a dedicated thread running a current-thread
/// tokio runtime, so the recording loop stays synchronous.
pub fn spawn_interrupt_watcher(stop: StopSignal) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("interrupt".to_string())
        .spawn(move || {
            runtime.block_on(async {
                loop {
                    match tokio::signal::ctrl_c().await {
                        Ok(()) => {
                            log::info!("interrupt, stopping episode");
                            stop.stop();
                        }
                        Err(e) => {
                            log::warn!("unable to listen for Ctrl-C: {e}");
                            break;
                        }
                    }
                }
            })
        })?;

    Ok(())
}

/// Point `target` at `image` and record one episode from it, plus `front`
/// when given. Both cameras are disconnected again on return.
pub fn record_target(
    target: &mut StaticCamera,
    front: Option<&mut (dyn Camera + '_)>,
    image: &Path,
    episode: usize,
    sink: &mut dyn FrameSink,
    config: &RecordConfig,
    stop: &StopSignal,
) -> Result<usize, CameraError> {
    target.reconfigure(ImageSource::path(image));
    let mut target_session = CameraSession::open(target)?;
    let mut front_session = match front {
        Some(camera) => Some(CameraSession::open(camera)?),
        None => None,
    };

    let mut cameras: Vec<(&str, &mut dyn Camera)> =
        vec![("target", &mut *target_session as &mut dyn Camera)];
    if let Some(session) = front_session.as_mut() {
        cameras.push(("front", &mut **session as &mut dyn Camera));
    }

    record_episode(episode, &mut cameras, sink, config, stop)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShapeOutcome {
    pub episodes: usize,
    pub quit: bool,
}

/// Record every image of `shape` into `<out_root>/<shape>/episode_NNN`,
/// numbering episodes from zero.
///
/// `gate` is asked before each episode. Quitting there, or a stop raised
/// while waiting, ends the run. Missing images are logged and skipped.
pub fn record_shape(
    shape: &ShapeTargets,
    out_root: &Path,
    target: &mut StaticCamera,
    mut front: Option<&mut (dyn Camera + '_)>,
    config: &RecordConfig,
    stop: &StopSignal,
    gate: &mut dyn FnMut(&Path) -> io::Result<EpisodeAction>,
) -> Result<ShapeOutcome, CameraError> {
    let mut sink = DirectorySink::new(out_root.join(&shape.shape))?;
    let mut outcome = ShapeOutcome::default();

    log::info!(
        "dataset '{}': {} target image(s)",
        shape.shape,
        shape.images.len()
    );

    for image in &shape.images {
        if !image.exists() {
            log::warn!("missing target image {}, skipping", image.display());
            continue;
        }

        stop.reset();
        if gate(image)? == EpisodeAction::Quit || stop.is_stopped() {
            outcome.quit = true;
            break;
        }

        let ticks = record_target(
            target,
            front.as_deref_mut(),
            image,
            outcome.episodes,
            &mut sink,
            config,
            stop,
        )?;
        log::info!(
            "{} | episode {} from {}: {ticks} ticks",
            shape.shape,
            outcome.episodes,
            image.display()
        );
        outcome.episodes += 1;
    }

    Ok(outcome)
}

/// Writes frames to `<root>/episode_NNN/<camera>/frame_NNNNNN.png`.
#[derive(Debug)]
pub struct DirectorySink {
    root: PathBuf,
    episode_dir: Option<PathBuf>,
    written: usize,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            episode_dir: None,
            written: 0,
        })
    }

    pub fn episode_dir(&self, episode: usize) -> PathBuf {
        self.root.join(format!("episode_{episode:03}"))
    }

    /// Frames written since the sink was created.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl FrameSink for DirectorySink {
    fn begin_episode(&mut self, episode: usize) -> Result<(), CameraError> {
        let dir = self.episode_dir(episode);
        fs::create_dir_all(&dir)?;
        self.episode_dir = Some(dir);
        Ok(())
    }

    fn write_frame(&mut self, camera: &str, index: usize, frame: &Frame) -> Result<(), CameraError> {
        let episode_dir = self
            .episode_dir
            .as_ref()
            .ok_or_else(|| CameraError::Sink("no episode started".to_string()))?;

        let camera_dir = episode_dir.join(camera);
        if index == 0 {
            fs::create_dir_all(&camera_dir)?;
        }

        let png = cali_image::encode_png(frame).map_err(|e| CameraError::Sink(e.to_string()))?;
        fs::write(camera_dir.join(format!("frame_{index:06}.png")), png)?;
        self.written += 1;
        Ok(())
    }

    fn end_episode(&mut self, episode: usize, frames: usize) -> Result<(), CameraError> {
        log::info!(
            "episode {episode}: {frames} ticks saved under {}",
            self.episode_dir(episode).display()
        );
        self.episode_dir = None;
        Ok(())
    }
}
