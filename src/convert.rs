use crate::error::Result;
use crate::kinematics::forward_kinematics;
use crate::names::canonical_bone_names;
use crate::parse::{load_bvh_from_file, load_bvh_from_string};
use crate::pose::{build_frame_record, estimate_human_height, synthesize_foot_contacts};
use crate::types::*;
use std::path::Path;
use tracing::{debug, info};

/// Global, normalized, renamed poses for every decoded frame, plus the height
/// estimated from the last one.
pub fn convert_bvh(metadata: &BvhMetadata, data: &BvhData) -> Conversion {
    let skeleton = &metadata.skeleton;
    let names = canonical_bone_names(skeleton.names());
    debug!("Original bones: {:?}", skeleton.names().collect::<Vec<_>>());
    debug!("Mapped bones: {:?}", names);

    let frames: Vec<FrameRecord> = data
        .frames
        .iter()
        .map(|frame| {
            let pose = forward_kinematics(skeleton, frame);
            let mut record = build_frame_record(&names, &pose);
            synthesize_foot_contacts(&mut record);
            record
        })
        .collect();

    let human_height = estimate_human_height(frames.last());
    info!(
        "Converted {} frames, human height: {:.2}m",
        frames.len(),
        human_height
    );

    Conversion {
        frames,
        human_height,
        frame_time: metadata.frame_time,
        fps: metadata.fps,
    }
}

pub fn convert_bvh_file(file_path: impl AsRef<Path>) -> Result<Conversion> {
    let (metadata, data) = load_bvh_from_file(file_path)?;
    Ok(convert_bvh(&metadata, &data))
}

pub fn convert_bvh_string(bvh_string: &str) -> Result<Conversion> {
    let (metadata, data) = load_bvh_from_string(bvh_string)?;
    Ok(convert_bvh(&metadata, &data))
}
