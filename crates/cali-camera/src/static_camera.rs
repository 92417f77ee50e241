use crate::{Camera, CameraError, CameraInfo, ImageSource, ImageStore, StaticCameraConfig};
use cali_image::{convert_color, ColorMode, Frame};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// A camera that replays one still image on every read.
///
/// The image is loaded lazily by `connect` and released by `disconnect`.
/// Width and height not set in the config are taken from the first loaded
/// image and stay fixed until `reconfigure`.
///
/// ```no_run
/// use cali_camera::{Camera, StaticCamera, StaticCameraConfig};
///
/// let config = StaticCameraConfig::default().with_path("target.png");
/// let mut camera = StaticCamera::new(config)?;
/// camera.connect()?;
/// let frame = camera.read(None)?;
/// # Ok::<(), cali_camera::CameraError>(())
/// ```
#[derive(Debug)]
pub struct StaticCamera {
    config: StaticCameraConfig,
    store: ImageStore,
    state: ConnectionState,
    width: Option<usize>,
    height: Option<usize>,
}

impl StaticCamera {
    /// Create a disconnected camera. Nothing is read from the source yet.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::InvalidConfig` if the config fails validation.
    pub fn new(config: StaticCameraConfig) -> Result<Self, CameraError> {
        config.validate()?;
        Ok(Self {
            width: config.width(),
            height: config.height(),
            config,
            store: ImageStore::new(),
            state: ConnectionState::Disconnected,
        })
    }

    pub fn config(&self) -> &StaticCameraConfig {
        &self.config
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Configured or inferred width, `None` until known.
    pub fn width(&self) -> Option<usize> {
        self.width
    }

    /// Configured or inferred height, `None` until known.
    pub fn height(&self) -> Option<usize> {
        self.height
    }

    pub fn fps(&self) -> u32 {
        self.config.fps()
    }

    /// Switch to a new image source.
    ///
    /// Disconnects, drops the cached image and forgets inferred dimensions.
    /// Dimensions set in the config are kept. The new source is loaded on
    /// the next `connect`.
    pub fn reconfigure(&mut self, source: ImageSource) {
        log::info!("static camera source -> {source}");
        self.disconnect();
        self.config.set_source(source);
        self.width = self.config.width();
        self.height = self.config.height();
    }

    fn load(&mut self) -> Result<(), CameraError> {
        let frame = self
            .store
            .load(self.config.source(), self.width, self.height)?;
        let (width, height) = (frame.width(), frame.height());
        self.width.get_or_insert(width);
        self.height.get_or_insert(height);
        Ok(())
    }
}

impl Camera for StaticCamera {
    /// Load the image if needed and mark the camera connected.
    ///
    /// On failure the camera stays disconnected and the load error is
    /// wrapped in `CameraError::SourceUnavailable`.
    fn connect(&mut self) -> Result<(), CameraError> {
        if self.state == ConnectionState::Connected {
            return Ok(());
        }

        self.load()
            .map_err(|e| CameraError::SourceUnavailable(Box::new(e)))?;
        self.state = ConnectionState::Connected;
        log::debug!("static camera connected ({})", self.config.source());
        Ok(())
    }

    fn disconnect(&mut self) {
        if self.state == ConnectionState::Connected {
            log::debug!("static camera disconnected");
        }
        self.state = ConnectionState::Disconnected;
        self.store.release();
    }

    fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected && self.store.is_loaded()
    }

    /// Return a copy of the cached image.
    ///
    /// `color_mode` falls back to the configured mode, then to the image's
    /// native encoding. The cache itself is never converted.
    fn read(&mut self, color_mode: Option<ColorMode>) -> Result<Frame, CameraError> {
        if self.state != ConnectionState::Connected {
            return Err(CameraError::NotConnected);
        }
        let cached = self.store.cached().ok_or(CameraError::NotConnected)?;

        let target = color_mode
            .or(self.config.color_mode())
            .unwrap_or(cached.color_mode());
        Ok(convert_color(cached, target)?.into_owned())
    }

    /// Same as `read(None)`; the image is already in memory, so `timeout`
    /// never comes into play.
    fn async_read(&mut self, _timeout: Duration) -> Result<Frame, CameraError> {
        self.read(None)
    }

    /// Static images are never discovered.
    fn find_cameras() -> Vec<CameraInfo> {
        Vec::new()
    }
}
