//! REST client for the drawing arm's controller.
//!
//! Moves the arm to its init pose and through fixed joint poses used to
//! calibrate the drawing area.

pub mod client;
pub mod error;
pub mod pose;

pub use client::{run_calibration, ArmClient};
pub use error::ArmError;
pub use pose::{AngleUnit, CalibrationPose, JointPose, CALIBRATION_POSES};
