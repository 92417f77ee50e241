use cali_image::{ColorMode, ImageError};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum CameraError {
    /// Configured image path does not exist.
    NotFound(PathBuf),
    /// No image source configured.
    NoSource,
    /// Source exists but is not a decodable image.
    Decode(ImageError),
    UnsupportedConversion { from: ColorMode, to: ColorMode },
    NotConnected,
    /// Loading failed during `connect`; wraps `NotFound`, `NoSource`, `Decode` or `Io`.
    SourceUnavailable(Box<CameraError>),
    InvalidConfig(String),
    Io(std::io::Error),
    Device(String),
    Channel(String),
    Timeout,
    Sink(String),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::NotFound(path) => write!(f, "image file not found: {}", path.display()),
            CameraError::NoSource => write!(f, "no image source configured"),
            CameraError::Decode(err) => write!(f, "decode error: {err}"),
            CameraError::UnsupportedConversion { from, to } => {
                write!(f, "unsupported color conversion: {from} -> {to}")
            }
            CameraError::NotConnected => write!(f, "camera not connected, call connect() first"),
            CameraError::SourceUnavailable(err) => write!(f, "source unavailable: {err}"),
            CameraError::InvalidConfig(msg) => write!(f, "invalid camera config: {msg}"),
            CameraError::Io(err) => write!(f, "io error: {err}"),
            CameraError::Device(msg) => write!(f, "device error: {msg}"),
            CameraError::Channel(msg) => write!(f, "channel error: {msg}"),
            CameraError::Timeout => write!(f, "timed out waiting for a frame"),
            CameraError::Sink(msg) => write!(f, "frame sink error: {msg}"),
        }
    }
}

impl std::error::Error for CameraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CameraError::Decode(err) => Some(err),
            CameraError::SourceUnavailable(err) => Some(err.as_ref()),
            CameraError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ImageError> for CameraError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::UnsupportedConversion { from, to } => {
                CameraError::UnsupportedConversion { from, to }
            }
            other => CameraError::Decode(other),
        }
    }
}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        CameraError::Io(err)
    }
}
