use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::types::*;

/// Motion tokens must be plain signed decimals. Anything else (stray text,
/// exponents, trailing garbage) causes the whole line to be dropped.
static RE_MOTION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+\.?\d*$").expect("valid motion token regex"));

/// Split a motion line into numbers. `None` when any token is not a plain
/// signed decimal, or the line is blank.
pub fn tokenize_motion_line(line: &str) -> Option<Vec<f64>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() || !tokens.iter().all(|t| RE_MOTION_TOKEN.is_match(t)) {
        return None;
    }
    tokens.iter().map(|t| t.parse::<f64>().ok()).collect()
}

fn vec3(values: &[f64]) -> Position {
    Position::new(values[0], values[1], values[2])
}

/// Decode one line of values into per-bone local positions and euler rotations.
///
/// Positions start from the rest `offsets`: bones without positional data keep
/// them, and in the 9-channel layout the scaled offset is added on top.
/// Returns `None` when the line length does not match the layout.
pub fn decode_line(layout: ChannelLayout, offsets: &[Position], values: &[f64]) -> Option<EulerFrame> {
    let num_bones = offsets.len();
    if num_bones == 0 || values.len() != layout.line_len(num_bones) {
        return None;
    }

    let mut positions = offsets.to_vec();
    let mut rotations = vec![Euler::zero(); num_bones];

    match layout {
        ChannelLayout::RootPositionOnly => {
            positions[0] = vec3(&values[0..3]);
            for (rotation, row) in rotations.iter_mut().zip(values[3..].chunks_exact(3)) {
                *rotation = Euler::from_zyx_channels(row[0], row[1], row[2]);
            }
        }
        ChannelLayout::PositionPerBone => {
            for (i, row) in values.chunks_exact(6).enumerate() {
                positions[i] = vec3(&row[0..3]);
                rotations[i] = Euler::from_zyx_channels(row[3], row[4], row[5]);
            }
        }
        ChannelLayout::ScaledOffsets => {
            // the root carries no rotation in this layout
            positions[0] = vec3(&values[0..3]);
            for (i, row) in values[3..].chunks_exact(9).enumerate() {
                let bone = i + 1;
                rotations[bone] = Euler::from_zyx_channels(row[3], row[4], row[5]);
                positions[bone] += Position::new(row[0] * row[6], row[1] * row[7], row[2] * row[8]);
            }
        }
    }

    Some(EulerFrame {
        positions,
        rotations,
    })
}

/// Fills euler frames one motion line at a time.
#[derive(Debug)]
pub struct ChannelDecoder {
    layout: ChannelLayout,
    offsets: Vec<Position>,
    declared_frames: usize,
    frames: Vec<EulerFrame>,
    skipped: usize,
}

impl ChannelDecoder {
    pub fn new(layout: ChannelLayout, skeleton: &Skeleton, declared_frames: usize) -> Self {
        ChannelDecoder {
            layout,
            offsets: skeleton.rest_offsets(),
            declared_frames,
            // the header count is untrusted, grow as lines are accepted
            frames: Vec::new(),
            skipped: 0,
        }
    }

    /// Feed one line of the motion section. Returns whether it became a frame.
    pub fn push_line(&mut self, line_number: usize, line: &str) -> bool {
        if line.trim().is_empty() {
            return false;
        }

        let Some(values) = tokenize_motion_line(line) else {
            debug!("Skipping non-numeric motion line {}", line_number);
            self.skipped += 1;
            return false;
        };

        let Some(frame) = decode_line(self.layout, &self.offsets, &values) else {
            debug!(
                "Skipping motion line {}: {} values, expected {}",
                line_number,
                values.len(),
                self.layout.line_len(self.offsets.len())
            );
            self.skipped += 1;
            return false;
        };

        if self.frames.len() >= self.declared_frames {
            warn!(
                "Skipping motion line {}: file declares only {} frames",
                line_number, self.declared_frames
            );
            self.skipped += 1;
            return false;
        }

        self.frames.push(frame);
        true
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn finish(self) -> Vec<EulerFrame> {
        if self.skipped > 0 || self.frames.len() < self.declared_frames {
            debug!(
                "Decoded {} of {} declared frames ({} motion lines skipped)",
                self.frames.len(),
                self.declared_frames,
                self.skipped
            );
        }
        self.frames
    }
}
