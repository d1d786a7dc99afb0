use crate::coords::normalize_pose;
use crate::types::*;

pub const LEFT_FOOT_MOD: &str = "LeftFootMod";
pub const RIGHT_FOOT_MOD: &str = "RightFootMod";

/// Used when the final frame lacks a head or feet, in meters.
pub const DEFAULT_HUMAN_HEIGHT: f64 = 1.75;

/// Normalized poses keyed by canonical bone name. `names` lines up with the
/// bones of `pose`; a later bone overwrites an earlier one with the same name.
pub fn build_frame_record(names: &[String], pose: &Pose) -> FrameRecord {
    names
        .iter()
        .zip(pose.positions.iter().zip(pose.rotations.iter()))
        .map(|(name, (&position, &orientation))| (name.clone(), normalize_pose(position, orientation)))
        .collect()
}

/// Foot position with toe orientation. Without a toe the foot's own pose is used
/// (or the default pose when the foot is missing too); the toe is never
/// consulted on its own.
// TODO: confirm with the retargeting side whether a missing toe should use anything other than the foot orientation.
fn foot_contact(record: &FrameRecord, foot: &str, toe: &str) -> BonePose {
    match (record.get(foot), record.get(toe)) {
        (Some(foot), Some(toe)) => BonePose::new(foot.position, toe.orientation),
        (Some(foot), None) => *foot,
        (None, _) => BonePose::default(),
    }
}

/// Add `LeftFootMod` and `RightFootMod` to a frame record.
pub fn synthesize_foot_contacts(record: &mut FrameRecord) {
    let left = foot_contact(record, "LeftFoot", "LeftToe");
    let right = foot_contact(record, "RightFoot", "RightToe");
    record.insert(LEFT_FOOT_MOD.to_string(), left);
    record.insert(RIGHT_FOOT_MOD.to_string(), right);
}

/// Head height above the lower foot contact, read from a single frame.
pub fn estimate_human_height(record: Option<&FrameRecord>) -> f64 {
    let Some(record) = record else {
        return DEFAULT_HUMAN_HEIGHT;
    };
    match (
        record.get("Head"),
        record.get(LEFT_FOOT_MOD),
        record.get(RIGHT_FOOT_MOD),
    ) {
        (Some(head), Some(left), Some(right)) => {
            head.position.z - left.position.z.min(right.position.z)
        }
        _ => DEFAULT_HUMAN_HEIGHT,
    }
}
