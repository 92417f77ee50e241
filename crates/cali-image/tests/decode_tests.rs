use cali_image::{decode_frame, encode_png, resize_frame, ColorMode, Frame, ImageError};
use crates_image::ImageEncoder;

fn png_bytes(data: &[u8], width: u32, height: u32, color: crates_image::ExtendedColorType) -> Vec<u8> {
    let mut buffer = Vec::new();
    crates_image::codecs::png::PngEncoder::new(&mut buffer)
        .write_image(data, width, height, color)
        .unwrap();
    buffer
}

#[test]
fn test_decode_png_rgb_keeps_pixels() {
    let pixels = vec![
        255, 0, 0, // red
        0, 255, 0, // green
        0, 0, 255, // blue
        128, 128, 128, // gray
    ];
    let buffer = png_bytes(&pixels, 2, 2, crates_image::ExtendedColorType::Rgb8);

    let frame = decode_frame(&buffer).unwrap();
    assert_eq!(frame.color_mode(), ColorMode::Rgb);
    assert_eq!((frame.width(), frame.height(), frame.channels()), (2, 2, 3));
    assert_eq!(frame.data(), pixels.as_slice());
}

#[test]
fn test_decode_rgba_drops_alpha() {
    let pixels = vec![10, 20, 30, 255, 40, 50, 60, 0];
    let buffer = png_bytes(&pixels, 2, 1, crates_image::ExtendedColorType::Rgba8);

    let frame = decode_frame(&buffer).unwrap();
    assert_eq!(frame.color_mode(), ColorMode::Rgb);
    assert_eq!(frame.data(), &[10, 20, 30, 40, 50, 60]);
}

#[test]
fn test_decode_grayscale_png() {
    let buffer = png_bytes(&[0, 64, 128, 192], 2, 2, crates_image::ExtendedColorType::L8);

    let frame = decode_frame(&buffer).unwrap();
    assert_eq!(frame.color_mode(), ColorMode::Grayscale);
    assert_eq!(frame.channels(), 1);
    assert_eq!(frame.data(), &[0, 64, 128, 192]);
}

#[test]
fn test_decode_jpeg_dimensions() {
    let mut buffer = Vec::new();
    let img = crates_image::RgbImage::from_fn(16, 8, |x, y| {
        let val = ((x + y) * 8) as u8;
        crates_image::Rgb([val, val, val])
    });
    crates_image::codecs::jpeg::JpegEncoder::new(&mut buffer)
        .encode_image(&img)
        .unwrap();

    let frame = decode_frame(&buffer).unwrap();
    assert_eq!(frame.width(), 16);
    assert_eq!(frame.height(), 8);
}

#[test]
fn test_decode_invalid_data() {
    match decode_frame(&[0xFF, 0x00, 0x12, 0x34]) {
        Err(ImageError::Decode(_)) => {}
        other => panic!("Expected Decode error, got {other:?}"),
    }
}

#[test]
fn test_decode_empty_data() {
    assert!(decode_frame(&[]).is_err());
}

#[test]
fn test_frame_rejects_channel_mismatch() {
    let tensor = cali_base::Tensor::from_hwc(1, 1, 1, vec![0u8]).unwrap();
    match Frame::new(tensor, ColorMode::Rgb) {
        Err(ImageError::ChannelMismatch { mode, channels }) => {
            assert_eq!(mode, ColorMode::Rgb);
            assert_eq!(channels, 1);
        }
        other => panic!("Expected ChannelMismatch, got {other:?}"),
    }
}

#[test]
fn test_resize_frame_changes_dimensions() {
    let frame = Frame::from_raw(4, 2, ColorMode::Bgr, vec![100; 4 * 2 * 3]).unwrap();
    let resized = resize_frame(&frame, 2, 1).unwrap();

    assert_eq!((resized.width(), resized.height()), (2, 1));
    assert_eq!(resized.color_mode(), ColorMode::Bgr);
    // uniform input stays uniform
    assert!(resized.data().iter().all(|&v| v == 100));
}

#[test]
fn test_resize_frame_same_size_is_identity() {
    let frame = Frame::from_raw(2, 2, ColorMode::Grayscale, vec![1, 2, 3, 4]).unwrap();
    assert_eq!(resize_frame(&frame, 2, 2).unwrap(), frame);
}

#[test]
fn test_encode_png_bgr_writes_rgb_order() {
    let frame = Frame::from_raw(1, 1, ColorMode::Bgr, vec![0, 0, 255]).unwrap();
    let encoded = encode_png(&frame).unwrap();

    let decoded = decode_frame(&encoded).unwrap();
    assert_eq!(decoded.color_mode(), ColorMode::Rgb);
    assert_eq!(decoded.data(), &[255, 0, 0]);
}

#[test]
fn test_decode_color_frame_expands_grayscale() {
    let buffer = png_bytes(&[9, 200], 2, 1, crates_image::ExtendedColorType::L8);

    let frame = cali_image::decode_color_frame(&buffer).unwrap();
    assert_eq!(frame.color_mode(), ColorMode::Rgb);
    assert_eq!(frame.data(), &[9, 9, 9, 200, 200, 200]);
}
