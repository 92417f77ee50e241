use crate::ImageError;
use cali_base::Tensor;
use std::fmt;

/// Pixel encoding of a `Frame`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorMode {
    Rgb,
    Bgr,
    Grayscale,
}

impl ColorMode {
    pub fn channels(&self) -> usize {
        match self {
            ColorMode::Rgb | ColorMode::Bgr => 3,
            ColorMode::Grayscale => 1,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorMode::Rgb => "rgb",
            ColorMode::Bgr => "bgr",
            ColorMode::Grayscale => "grayscale",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rgb" => Ok(ColorMode::Rgb),
            "bgr" => Ok(ColorMode::Bgr),
            "gray" | "grayscale" => Ok(ColorMode::Grayscale),
            other => Err(format!("unknown color mode: {other}")),
        }
    }
}

/// A decoded 8-bit image in HWC layout together with its encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    tensor: Tensor<u8>,
    color_mode: ColorMode,
}

impl Frame {
    /// Wrap an HWC tensor. The channel count must match `color_mode`.
    pub fn new(tensor: Tensor<u8>, color_mode: ColorMode) -> Result<Self, ImageError> {
        let (_, _, channels) = tensor.hwc()?;
        if channels != color_mode.channels() {
            return Err(ImageError::ChannelMismatch {
                mode: color_mode,
                channels,
            });
        }
        Ok(Self { tensor, color_mode })
    }

    pub fn from_raw(
        width: usize,
        height: usize,
        color_mode: ColorMode,
        data: Vec<u8>,
    ) -> Result<Self, ImageError> {
        let tensor = Tensor::from_hwc(height, width, color_mode.channels(), data)?;
        Ok(Self { tensor, color_mode })
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn height(&self) -> usize {
        self.tensor.shape[0]
    }

    pub fn width(&self) -> usize {
        self.tensor.shape[1]
    }

    pub fn channels(&self) -> usize {
        self.tensor.shape[2]
    }

    pub fn data(&self) -> &[u8] {
        &self.tensor.data
    }

    pub fn tensor(&self) -> &Tensor<u8> {
        &self.tensor
    }

    pub fn into_tensor(self) -> Tensor<u8> {
        self.tensor
    }
}
