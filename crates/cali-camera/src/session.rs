use crate::{Camera, CameraError};
use std::ops::{Deref, DerefMut};

/// A connected camera that disconnects when dropped.
///
/// Opening a session connects the camera; every exit path out of the
/// session's scope, including `?` returns and panics, disconnects it.
pub struct CameraSession<'a, C: Camera + ?Sized> {
    camera: &'a mut C,
}

impl<'a, C: Camera + ?Sized> CameraSession<'a, C> {
    /// Connect `camera` and guard it.
    ///
    /// # Errors
    ///
    /// Returns the camera's `connect` error; the camera is left as
    /// `connect` left it.
    pub fn open(camera: &'a mut C) -> Result<Self, CameraError> {
        camera.connect()?;
        Ok(Self { camera })
    }
}

impl<C: Camera + ?Sized> Deref for CameraSession<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.camera
    }
}

impl<C: Camera + ?Sized> DerefMut for CameraSession<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.camera
    }
}

impl<C: Camera + ?Sized> Drop for CameraSession<'_, C> {
    fn drop(&mut self) {
        self.camera.disconnect();
    }
}
