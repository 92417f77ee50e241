use crate::{Camera, CameraError, CameraInfo};
use cali_image::{ColorMode, Frame};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Cloneable handle that serializes access to one camera across threads.
pub struct SharedCamera<C> {
    inner: Arc<Mutex<C>>,
}

impl<C> Clone for SharedCamera<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Camera> SharedCamera<C> {
    pub fn new(camera: C) -> Self {
        Self {
            inner: Arc::new(Mutex::new(camera)),
        }
    }

    // a panic while holding the lock leaves the camera usable
    fn lock(&self) -> MutexGuard<'_, C> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run `f` with exclusive access to the camera.
    pub fn with<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        let mut guard = self.lock();
        f(&mut *guard)
    }
}

impl<C: Camera> Camera for SharedCamera<C> {
    fn connect(&mut self) -> Result<(), CameraError> {
        self.lock().connect()
    }

    fn disconnect(&mut self) {
        self.lock().disconnect()
    }

    fn is_connected(&self) -> bool {
        self.lock().is_connected()
    }

    fn read(&mut self, color_mode: Option<ColorMode>) -> Result<Frame, CameraError> {
        self.lock().read(color_mode)
    }

    fn async_read(&mut self, timeout: Duration) -> Result<Frame, CameraError> {
        self.lock().async_read(timeout)
    }

    fn find_cameras() -> Vec<CameraInfo> {
        C::find_cameras()
    }
}
