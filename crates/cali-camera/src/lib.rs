//! Camera abstraction for the caligraphomate recording tools.
//!
//! The `Camera` trait is the capability set the recording loop drives.
//! `StaticCamera` implements it over a single still image, replaying the
//! same pixels on every read; `V4l2Camera` (feature `v4l2`) implements it
//! over a live capture device.

pub mod config;
pub mod error;
pub mod record;
pub mod session;
pub mod shared;
pub mod static_camera;
pub mod store;
pub mod traits;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use config::{DeviceCameraConfig, ImageSource, StaticCameraConfig};
pub use error::CameraError;
pub use record::{record_episode, FrameSink, RecordConfig, StopSignal};
pub use session::CameraSession;
pub use shared::SharedCamera;
pub use static_camera::{ConnectionState, StaticCamera};
pub use store::ImageStore;
pub use traits::{Camera, CameraInfo};

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Camera;

pub use cali_image::{ColorMode, Frame};
