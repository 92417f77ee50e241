use crate::{ColorMode, Frame, ImageError};
use std::borrow::Cow;

/// BT.601 luma, fixed-point with an 8-bit shift (weights sum to 256).
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((77 * r as u32 + 150 * g as u32 + 29 * b as u32 + 128) >> 8) as u8
}

/// Swaps the first and third channel of packed 3-channel pixels.
pub fn swap_red_blue(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for px in data.chunks_exact(3) {
        out.extend_from_slice(&[px[2], px[1], px[0]]);
    }
    out
}

fn to_grayscale(data: &[u8], from: ColorMode) -> Vec<u8> {
    data.chunks_exact(3)
        .map(|px| match from {
            ColorMode::Bgr => luma(px[2], px[1], px[0]),
            _ => luma(px[0], px[1], px[2]),
        })
        .collect()
}

/// Converts `frame` to the `to` encoding.
///
/// Returns the input borrowed when it is already in `to`; otherwise a new
/// buffer. The input is never modified.
///
/// Supported: RGB <-> BGR, RGB -> grayscale, BGR -> grayscale.
///
/// # Errors
///
/// Returns `ImageError::UnsupportedConversion` for grayscale -> color.
pub fn convert_color(frame: &Frame, to: ColorMode) -> Result<Cow<'_, Frame>, ImageError> {
    let from = frame.color_mode();
    if from == to {
        return Ok(Cow::Borrowed(frame));
    }

    let data = match (from, to) {
        (ColorMode::Rgb, ColorMode::Bgr) | (ColorMode::Bgr, ColorMode::Rgb) => {
            swap_red_blue(frame.data())
        }
        (ColorMode::Rgb | ColorMode::Bgr, ColorMode::Grayscale) => {
            to_grayscale(frame.data(), from)
        }
        _ => return Err(ImageError::UnsupportedConversion { from, to }),
    };

    Frame::from_raw(frame.width(), frame.height(), to, data).map(Cow::Owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_extremes() {
        assert_eq!(luma(0, 0, 0), 0);
        assert_eq!(luma(255, 255, 255), 255);
    }

    #[test]
    fn test_luma_weights_favor_green() {
        assert!(luma(0, 255, 0) > luma(255, 0, 0));
        assert!(luma(255, 0, 0) > luma(0, 0, 255));
    }
}
