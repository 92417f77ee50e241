use crate::{convert_color, resize_frame, ColorMode, Frame, ImageError};
use crates_image::codecs::gif::{GifEncoder, Repeat};
use crates_image::{Delay, RgbaImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output geometry and timing of a fabricated clip.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipSpec {
    width: usize,
    height: usize,
    fps: u32,
    duration_secs: u32,
}

impl Default for ClipSpec {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fps: 30,
            duration_secs: 5,
        }
    }
}

impl ClipSpec {
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_duration_secs(mut self, duration_secs: u32) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn frame_count(&self) -> usize {
        self.fps as usize * self.duration_secs as usize
    }
}

fn to_rgba(frame: &Frame) -> Result<RgbaImage, ImageError> {
    let data: Vec<u8> = match frame.color_mode() {
        ColorMode::Grayscale => frame
            .data()
            .iter()
            .flat_map(|&v| [v, v, v, 255])
            .collect(),
        _ => convert_color(frame, ColorMode::Rgb)?
            .data()
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
    };

    RgbaImage::from_raw(frame.width() as u32, frame.height() as u32, data)
        .ok_or_else(|| ImageError::Encode("rgba buffer size mismatch".to_string()))
}

/// GIF delays are whole centiseconds. Frame `i` gets the rounded time of
/// frame `i + 1` minus that of frame `i`, so a 30 fps clip alternates 3 and
/// 4 cs and the total matches `count / fps` seconds.
fn frame_delays_cs(fps: u32, count: usize) -> impl Iterator<Item = u32> {
    let at = move |i: usize| ((i as u64 * 100 + fps as u64 / 2) / fps as u64) as u32;
    (0..count).map(move |i| at(i + 1) - at(i))
}

/// Writes `spec.frame_count()` copies of `frame`, resized to the clip size,
/// as a looping animated GIF. Returns the number of frames written.
///
/// Per-frame delays vary by up to 10 ms so the clip plays for
/// `duration_secs`. Above 100 fps some frames get a zero delay.
///
/// # Errors
///
/// Returns `ImageError::Encode` when `fps` is zero or the GIF encoder fails.
pub fn write_static_clip<W: Write>(
    frame: &Frame,
    spec: &ClipSpec,
    out: W,
) -> Result<usize, ImageError> {
    if spec.fps() == 0 {
        return Err(ImageError::Encode("clip fps must be positive".to_string()));
    }

    let resized = resize_frame(frame, spec.width(), spec.height())?;
    let rgba = to_rgba(&resized)?;

    let mut encoder = GifEncoder::new(out);
    encoder
        .set_repeat(Repeat::Infinite)
        .map_err(|e| ImageError::Encode(e.to_string()))?;

    let count = spec.frame_count();
    for delay_cs in frame_delays_cs(spec.fps(), count) {
        let delay = Delay::from_numer_denom_ms(delay_cs * 10, 1);
        let gif_frame = crates_image::Frame::from_parts(rgba.clone(), 0, 0, delay);
        encoder
            .encode_frame(gif_frame)
            .map_err(|e| ImageError::Encode(e.to_string()))?;
    }

    Ok(count)
}

/// `write_static_clip` into a newly created file at `path`.
pub fn write_static_clip_file(
    frame: &Frame,
    spec: &ClipSpec,
    path: impl AsRef<Path>,
) -> Result<usize, ImageError> {
    let file = File::create(path.as_ref())?;
    let count = write_static_clip(frame, spec, BufWriter::new(file))?;
    log::info!("wrote {count} frames to {}", path.as_ref().display());
    Ok(count)
}
