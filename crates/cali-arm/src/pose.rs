use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    Rad,
    Deg,
}

/// Target angles for the six joints, base first.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointPose {
    pub angles: [f64; 6],
    pub unit: AngleUnit,
}

impl JointPose {
    pub const fn radians(angles: [f64; 6]) -> Self {
        Self {
            angles,
            unit: AngleUnit::Rad,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalibrationPose {
    pub name: &'static str,
    pub pose: JointPose,
}

/// Corners and center of the drawing area, visited in this order.
pub const CALIBRATION_POSES: [CalibrationPose; 5] = [
    CalibrationPose {
        name: "center",
        pose: JointPose::radians([0.00, 1.20, 0.00, -1.00, -1.57, -1.10]),
    },
    CalibrationPose {
        name: "top right",
        pose: JointPose::radians([-0.36, 1.80, -1.15, -0.46, -1.57, -1.10]),
    },
    CalibrationPose {
        name: "top left",
        pose: JointPose::radians([0.36, 1.80, -1.15, -0.46, -1.57, -1.10]),
    },
    CalibrationPose {
        name: "bottom right",
        pose: JointPose::radians([-0.46, 1.00, 0.50, -1.00, -1.57, -1.10]),
    },
    CalibrationPose {
        name: "bottom left",
        pose: JointPose::radians([0.46, 1.00, 0.50, -1.00, -1.57, -1.10]),
    },
];
