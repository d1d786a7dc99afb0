use crate::types::{Euler, EulerFrame, Frame, Quaternion};
use cgmath::{Deg, InnerSpace, Rotation3};

/// Convert euler angles in DEGREES to a quaternion, applying Z, then Y, then X
/// (`q = qz * qy * qx`).
pub fn euler_to_quat(euler: &Euler) -> Quaternion {
    Quaternion::from_angle_z(Deg(euler.z))
        * Quaternion::from_angle_y(Deg(euler.y))
        * Quaternion::from_angle_x(Deg(euler.x))
}

/// Inverse of [`euler_to_quat`]. Returns angles in DEGREES, pitch (y) in [-90, 90].
pub fn quat_to_euler(q: &Quaternion) -> Euler {
    let q = q.normalize();
    let (w, x, y, z) = (q.s, q.v.x, q.v.y, q.v.z);

    let yaw = (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z));
    let pitch = (2.0 * (w * y - z * x)).clamp(-1.0, 1.0).asin();
    let roll = (2.0 * (w * x + y * z)).atan2(1.0 - 2.0 * (x * x + y * y));

    Euler {
        x: roll.to_degrees(),
        y: pitch.to_degrees(),
        z: yaw.to_degrees(),
    }
}

/// Flip quaternions so that every bone's rotation stays in the same hemisphere
/// as its value on the previous (already fixed) frame.
pub fn remove_quat_discontinuities(frames: &mut [Frame]) {
    for t in 1..frames.len() {
        let (before, after) = frames.split_at_mut(t);
        let prev = &before[t - 1];
        let cur = &mut after[0];
        for (q_prev, q) in prev.rotations.iter().zip(cur.rotations.iter_mut()) {
            if q_prev.dot(*q) < 0.0 {
                *q = -*q;
            }
        }
    }
}

/// Turn decoded euler frames into quaternion frames with continuous signs.
pub fn normalize_rotations(frames: Vec<EulerFrame>) -> Vec<Frame> {
    let mut frames: Vec<Frame> = frames
        .into_iter()
        .map(|frame| Frame {
            rotations: frame.rotations.iter().map(euler_to_quat).collect(),
            positions: frame.positions,
        })
        .collect();
    remove_quat_discontinuities(&mut frames);
    frames
}
