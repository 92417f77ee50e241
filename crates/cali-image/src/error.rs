use crate::ColorMode;
use std::fmt;

#[derive(Debug)]
pub enum ImageError {
    Decode(String),
    Encode(String),
    Tensor(cali_base::TensorError),
    UnsupportedConversion { from: ColorMode, to: ColorMode },
    ChannelMismatch { mode: ColorMode, channels: usize },
    Io(std::io::Error),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Decode(msg) => write!(f, "decode error: {msg}"),
            ImageError::Encode(msg) => write!(f, "encode error: {msg}"),
            ImageError::Tensor(err) => write!(f, "tensor error: {err}"),
            ImageError::UnsupportedConversion { from, to } => {
                write!(f, "unsupported color conversion: {from} -> {to}")
            }
            ImageError::ChannelMismatch { mode, channels } => write!(
                f,
                "{mode} needs {} channels, buffer has {channels}",
                mode.channels()
            ),
            ImageError::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<crates_image::ImageError> for ImageError {
    fn from(err: crates_image::ImageError) -> Self {
        ImageError::Decode(err.to_string())
    }
}

impl From<cali_base::TensorError> for ImageError {
    fn from(err: cali_base::TensorError) -> Self {
        ImageError::Tensor(err)
    }
}

impl From<std::io::Error> for ImageError {
    fn from(err: std::io::Error) -> Self {
        ImageError::Io(err)
    }
}
