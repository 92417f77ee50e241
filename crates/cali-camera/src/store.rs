use crate::{CameraError, ImageSource};
use cali_image::{Frame, ImageError};

/// Holds at most one decoded image for a camera.
///
/// `load` is idempotent: once an image is cached it is returned as-is until
/// `release` drops it.
#[derive(Debug, Default)]
pub struct ImageStore {
    cached: Option<Frame>,
}

/// Output size for a decoded `(width, height)` given the configured
/// dimensions. A single configured side keeps the aspect ratio.
pub(crate) fn resolve_size(
    native: (usize, usize),
    width: Option<usize>,
    height: Option<usize>,
) -> (usize, usize) {
    let (nw, nh) = native;
    let scaled = |len: usize, num: usize, den: usize| -> usize {
        if den == 0 {
            return len;
        }
        ((len * num + den / 2) / den).max(1)
    };

    match (width, height) {
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) => (w, scaled(nh, w, nw)),
        (None, Some(h)) => (scaled(nw, h, nh), h),
        (None, None) => native,
    }
}

fn decode_source(source: &ImageSource) -> Result<Frame, CameraError> {
    match source {
        ImageSource::None => Err(CameraError::NoSource),
        ImageSource::Path(path) => {
            if !path.exists() {
                return Err(CameraError::NotFound(path.clone()));
            }
            let bytes = std::fs::read(path)?;
            cali_image::decode_color_frame(&bytes).map_err(CameraError::Decode)
        }
        ImageSource::Encoded(bytes) => {
            cali_image::decode_color_frame(bytes).map_err(CameraError::Decode)
        }
        ImageSource::Frame(frame) => Ok(frame.clone()),
    }
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `source` and cache it, fitted to the configured dimensions.
    ///
    /// Returns the cached frame without touching `source` when one is
    /// already loaded.
    ///
    /// # Errors
    ///
    /// - `CameraError::NoSource` when `source` is `ImageSource::None`
    /// - `CameraError::NotFound` when the path does not exist
    /// - `CameraError::Decode` when the data is not a decodable image or
    ///   decodes to zero width or height
    /// - `CameraError::Io` when the file exists but cannot be read
    pub fn load(
        &mut self,
        source: &ImageSource,
        width: Option<usize>,
        height: Option<usize>,
    ) -> Result<&Frame, CameraError> {
        let frame = match self.cached.take() {
            Some(frame) => frame,
            None => {
                let decoded = decode_source(source)?;
                if decoded.width() == 0 || decoded.height() == 0 {
                    return Err(CameraError::Decode(ImageError::Decode(format!(
                        "{source} has no pixels ({}x{})",
                        decoded.width(),
                        decoded.height()
                    ))));
                }
                let (w, h) = resolve_size((decoded.width(), decoded.height()), width, height);
                let fitted = if (w, h) == (decoded.width(), decoded.height()) {
                    decoded
                } else {
                    cali_image::resize_frame(&decoded, w, h).map_err(CameraError::Decode)?
                };
                log::info!(
                    "loaded static image {source} ({}x{} {})",
                    fitted.width(),
                    fitted.height(),
                    fitted.color_mode()
                );
                fitted
            }
        };

        Ok(self.cached.insert(frame))
    }

    pub fn cached(&self) -> Option<&Frame> {
        self.cached.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.is_some()
    }

    /// Drop the cached image.
    pub fn release(&mut self) {
        if self.cached.take().is_some() {
            log::debug!("released static image");
        }
    }
}
