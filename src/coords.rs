//! Source (Y-up, centimeters) to target (Z-up, meters) frame conversion.

use crate::types::{BonePose, Position, Quaternion};
use cgmath::{Deg, Matrix3, Rotation3};

/// Source length units per output meter.
pub const UNITS_PER_METER: f64 = 100.0;

/// Rows `[[1, 0, 0], [0, 0, -1], [0, 1, 0]]`: source +Y becomes +Z.
pub fn axis_remap() -> Matrix3<f64> {
    // cgmath takes columns
    Matrix3::new(
        1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, //
        0.0, -1.0, 0.0,
    )
}

/// [`axis_remap`] as a quaternion, a quarter turn about X.
pub fn axis_remap_rotation() -> Quaternion {
    Quaternion::from_angle_x(Deg(90.0))
}

pub fn normalize_position(position: Position) -> Position {
    axis_remap() * position / UNITS_PER_METER
}

pub fn normalize_orientation(orientation: Quaternion) -> Quaternion {
    axis_remap_rotation() * orientation
}

pub fn normalize_pose(position: Position, orientation: Quaternion) -> BonePose {
    BonePose::new(normalize_position(position), normalize_orientation(orientation))
}
