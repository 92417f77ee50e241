//! Image decoding and pixel utilities for the caligraphomate toolkit.
//!
//! Wraps the `image` crate to decode still images into 8-bit `Frame`s
//! (HWC layout: `[height, width, channels]`), convert between color
//! encodings, resize, and encode frames back to PNG or GIF clips.

pub mod clip;
pub mod convert;
pub mod error;
pub mod types;

pub use clip::{write_static_clip, write_static_clip_file, ClipSpec};
pub use convert::convert_color;
pub use error::ImageError;
pub use types::{ColorMode, Frame};

use crates_image::imageops::{self, FilterType};
use crates_image::{DynamicImage, GrayImage, ImageEncoder, RgbImage};

/// Decodes an image from raw bytes into a `Frame`.
///
/// The format is auto-detected. Images without color information decode to
/// `ColorMode::Grayscale`, everything else to `ColorMode::Rgb`. Alpha is
/// dropped and 16-bit/float samples are reduced to 8 bits.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the data is invalid or the format is unsupported.
pub fn decode_frame(data: &[u8]) -> Result<Frame, ImageError> {
    let img = crates_image::load_from_memory(data)?;
    frame_from_dynamic(img)
}

/// Decodes an image from raw bytes into a 3-channel `ColorMode::Rgb` frame,
/// replicating grayscale samples across channels.
pub fn decode_color_frame(data: &[u8]) -> Result<Frame, ImageError> {
    let rgb = crates_image::load_from_memory(data)?.to_rgb8();
    let (w, h) = rgb.dimensions();
    Frame::from_raw(w as usize, h as usize, ColorMode::Rgb, rgb.into_raw())
}

fn frame_from_dynamic(img: DynamicImage) -> Result<Frame, ImageError> {
    let (tensor_data, width, height, mode) = if img.color().has_color() {
        let rgb = match img {
            DynamicImage::ImageRgb8(buf) => buf,
            other => other.to_rgb8(),
        };
        let (w, h) = rgb.dimensions();
        (rgb.into_raw(), w, h, ColorMode::Rgb)
    } else {
        let gray = match img {
            DynamicImage::ImageLuma8(buf) => buf,
            other => other.to_luma8(),
        };
        let (w, h) = gray.dimensions();
        (gray.into_raw(), w, h, ColorMode::Grayscale)
    };

    Frame::from_raw(width as usize, height as usize, mode, tensor_data)
}

enum Buffer {
    Color(RgbImage),
    Gray(GrayImage),
}

/// Channel order is carried through untouched, so BGR stays BGR.
fn to_buffer(frame: &Frame) -> Result<Buffer, ImageError> {
    let (w, h) = (frame.width() as u32, frame.height() as u32);
    let data = frame.data().to_vec();
    let buffer = match frame.color_mode() {
        ColorMode::Rgb | ColorMode::Bgr => RgbImage::from_raw(w, h, data).map(Buffer::Color),
        ColorMode::Grayscale => GrayImage::from_raw(w, h, data).map(Buffer::Gray),
    };
    buffer.ok_or_else(|| ImageError::Encode(format!("buffer does not fit {w}x{h}")))
}

/// Resizes `frame` to `width` x `height` with a triangle filter.
///
/// Returns a clone when the frame already has the requested size.
pub fn resize_frame(frame: &Frame, width: usize, height: usize) -> Result<Frame, ImageError> {
    if frame.width() == width && frame.height() == height {
        return Ok(frame.clone());
    }

    let (w, h) = (width as u32, height as u32);
    let data = match to_buffer(frame)? {
        Buffer::Color(buf) => imageops::resize(&buf, w, h, FilterType::Triangle).into_raw(),
        Buffer::Gray(buf) => imageops::resize(&buf, w, h, FilterType::Triangle).into_raw(),
    };

    log::debug!(
        "resized {}x{} -> {}x{}",
        frame.width(),
        frame.height(),
        width,
        height
    );
    Frame::from_raw(width, height, frame.color_mode(), data)
}

/// Encodes `frame` as PNG. BGR frames are written in RGB order.
pub fn encode_png(frame: &Frame) -> Result<Vec<u8>, ImageError> {
    let (color_type, data) = match frame.color_mode() {
        ColorMode::Rgb => (crates_image::ExtendedColorType::Rgb8, frame.data().to_vec()),
        ColorMode::Bgr => (
            crates_image::ExtendedColorType::Rgb8,
            convert::swap_red_blue(frame.data()),
        ),
        ColorMode::Grayscale => (crates_image::ExtendedColorType::L8, frame.data().to_vec()),
    };

    let mut buffer = Vec::new();
    crates_image::codecs::png::PngEncoder::new(&mut buffer)
        .write_image(
            &data,
            frame.width() as u32,
            frame.height() as u32,
            color_type,
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;

    Ok(buffer)
}
