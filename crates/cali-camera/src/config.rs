use crate::CameraError;
use cali_image::{ColorMode, Frame};
use std::fmt;
use std::path::PathBuf;

/// Where a static camera gets its image from.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ImageSource {
    #[default]
    None,
    /// Image file on disk, decoded on load.
    Path(PathBuf),
    /// Encoded image bytes (PNG, JPEG, ...), decoded on load.
    Encoded(Vec<u8>),
    /// Already decoded pixels, used as-is.
    Frame(Frame),
}

impl ImageSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        ImageSource::Path(path.into())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ImageSource::None)
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::None => write!(f, "<none>"),
            ImageSource::Path(path) => write!(f, "{}", path.display()),
            ImageSource::Encoded(bytes) => write!(f, "<{} encoded bytes>", bytes.len()),
            ImageSource::Frame(frame) => {
                write!(f, "<{}x{} {} frame>", frame.width(), frame.height(), frame.color_mode())
            }
        }
    }
}

/// Configuration for a static image camera.
///
/// Width and height are optional; missing values are inferred from the
/// first loaded image. `color_mode` is the default encoding of `read(None)`,
/// `None` meaning the image's native encoding.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticCameraConfig {
    source: ImageSource,
    width: Option<usize>,
    height: Option<usize>,
    fps: u32,
    color_mode: Option<ColorMode>,
}

impl Default for StaticCameraConfig {
    fn default() -> Self {
        Self {
            source: ImageSource::None,
            width: None,
            height: None,
            fps: 30,
            color_mode: None,
        }
    }
}

impl StaticCameraConfig {
    pub fn with_source(mut self, source: ImageSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        self.with_source(ImageSource::path(path))
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: usize) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = Some(color_mode);
        self
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    pub fn width(&self) -> Option<usize> {
        self.width
    }

    pub fn height(&self) -> Option<usize> {
        self.height
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn color_mode(&self) -> Option<ColorMode> {
        self.color_mode
    }

    pub(crate) fn set_source(&mut self, source: ImageSource) {
        self.source = source;
    }

    /// Checks the values a camera cannot run with.
    pub fn validate(&self) -> Result<(), CameraError> {
        if self.fps == 0 {
            return Err(CameraError::InvalidConfig("fps must be positive".to_string()));
        }
        if self.width == Some(0) || self.height == Some(0) {
            return Err(CameraError::InvalidConfig(
                "width and height must be positive".to_string(),
            ));
        }
        if let Some(mode) = self.color_mode {
            if !matches!(mode, ColorMode::Rgb | ColorMode::Bgr) {
                return Err(CameraError::InvalidConfig(format!(
                    "color_mode must be rgb or bgr, got {mode}"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for a live capture device.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceCameraConfig {
    device: String,
    width: u32,
    height: u32,
    fps: u32,
    buffer_count: u32,
    color_mode: Option<ColorMode>,
}

impl Default for DeviceCameraConfig {
    fn default() -> Self {
        Self {
            device: "/dev/video0".to_string(),
            width: 640,
            height: 480,
            fps: 30,
            buffer_count: 4,
            color_mode: None,
        }
    }
}

impl DeviceCameraConfig {
    /// Set the device path (e.g., "/dev/video2").
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = device.into();
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Number of driver buffers, also the depth of the frame queue.
    pub fn with_buffer_count(mut self, buffer_count: u32) -> Self {
        self.buffer_count = buffer_count;
        self
    }

    pub fn with_color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = Some(color_mode);
        self
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn buffer_count(&self) -> u32 {
        self.buffer_count
    }

    pub fn color_mode(&self) -> Option<ColorMode> {
        self.color_mode
    }
}
