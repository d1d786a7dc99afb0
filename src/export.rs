//! JSON dump of a [`Conversion`].

use crate::error::{BvhError, Result};
use crate::types::{BonePose, Conversion};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedPose {
    /// Meters, `[x, y, z]`.
    pub position: [f64; 3],
    /// `[w, x, y, z]`.
    pub orientation: [f64; 4],
}

impl From<&BonePose> for ExportedPose {
    fn from(pose: &BonePose) -> Self {
        let (p, q) = (pose.position, pose.orientation);
        ExportedPose {
            position: [p.x, p.y, p.z],
            orientation: [q.s, q.v.x, q.v.y, q.v.z],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedConversion {
    pub fps: u32,
    pub frame_time: f64,
    pub human_height: f64,
    pub frames: Vec<BTreeMap<String, ExportedPose>>,
}

impl From<&Conversion> for ExportedConversion {
    fn from(conversion: &Conversion) -> Self {
        ExportedConversion {
            fps: conversion.fps,
            frame_time: conversion.frame_time,
            human_height: conversion.human_height,
            frames: conversion
                .frames
                .iter()
                .map(|frame| {
                    frame
                        .iter()
                        .map(|(name, pose)| (name.clone(), ExportedPose::from(pose)))
                        .collect()
                })
                .collect(),
        }
    }
}

pub fn to_json(conversion: &Conversion) -> Result<String> {
    Ok(serde_json::to_string(&ExportedConversion::from(conversion))?)
}

pub fn write_json(conversion: &Conversion, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| BvhError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::to_writer(BufWriter::new(file), &ExportedConversion::from(conversion))?;
    Ok(())
}
