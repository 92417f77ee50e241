use crate::CameraError;
use cali_image::{ColorMode, Frame};
use std::path::PathBuf;
use std::time::Duration;

/// A camera found by `Camera::find_cameras`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CameraInfo {
    pub id: String,
    pub kind: &'static str,
    pub path: Option<PathBuf>,
}

/// Capability set shared by every camera the recording loop can drive.
///
/// Calls are expected from a single controlling loop: `connect`, any number
/// of reads, `disconnect`. Frames are 8-bit HWC.
pub trait Camera {
    /// Open the camera. Calling it on a connected camera does nothing.
    fn connect(&mut self) -> Result<(), CameraError>;

    /// Close the camera and release what `connect` acquired.
    fn disconnect(&mut self);

    fn is_connected(&self) -> bool;

    /// Capture a frame, converted to `color_mode` when given.
    ///
    /// Returns `CameraError::NotConnected` before `connect`.
    fn read(&mut self, color_mode: Option<ColorMode>) -> Result<Frame, CameraError>;

    /// Capture a frame, waiting at most `timeout` for one to arrive.
    fn async_read(&mut self, timeout: Duration) -> Result<Frame, CameraError>;

    /// Enumerate cameras of this kind attached to the host.
    fn find_cameras() -> Vec<CameraInfo>
    where
        Self: Sized;
}
