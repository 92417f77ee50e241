use cali_camera::{ColorMode, Frame};

/// Pack a frame into the `0x00RRGGBB` pixels minifb expects.
pub fn frame_to_argb(frame: &Frame) -> Vec<u32> {
    let pack = |r: u8, g: u8, b: u8| ((r as u32) << 16) | ((g as u32) << 8) | b as u32;
    match frame.color_mode() {
        ColorMode::Rgb => frame
            .data()
            .chunks_exact(3)
            .map(|px| pack(px[0], px[1], px[2]))
            .collect(),
        ColorMode::Bgr => frame
            .data()
            .chunks_exact(3)
            .map(|px| pack(px[2], px[1], px[0]))
            .collect(),
        ColorMode::Grayscale => frame.data().iter().map(|&v| pack(v, v, v)).collect(),
    }
}
