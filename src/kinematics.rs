use crate::types::*;
use cgmath::Decomposed;

type Transform = Decomposed<Position, Quaternion>;

fn local_transform(frame: &Frame, i: Index) -> Transform {
    Decomposed {
        scale: 1.0,
        rot: frame.rotations[i],
        disp: frame.positions[i],
    }
}

/// Global pose of every bone for one frame. Basically forward kinematics.
///
/// Bones are visited in index order, so a parent's global transform is always
/// ready before its children need it.
pub fn forward_kinematics(skeleton: &Skeleton, frame: &Frame) -> Pose {
    let mut transforms: Vec<Transform> = Vec::with_capacity(skeleton.len());

    for bone in skeleton.bones.iter() {
        let local = local_transform(frame, bone.index);
        let global = match bone.parent() {
            Some(parent) => transforms[parent] * local,
            None => local,
        };
        transforms.push(global);
    }

    Pose {
        positions: transforms.iter().map(|t| t.disp).collect(),
        rotations: transforms.iter().map(|t| t.rot).collect(),
    }
}

pub fn forward_kinematics_all(skeleton: &Skeleton, frames: &[Frame]) -> Vec<Pose> {
    frames
        .iter()
        .map(|frame| forward_kinematics(skeleton, frame))
        .collect()
}
