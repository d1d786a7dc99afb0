use crate::channels::ChannelDecoder;
use crate::error::{BvhError, Result};
use crate::rotation::normalize_rotations;
use crate::types::*;
use regex::Regex;
use std::iter::Enumerate;
use std::path::Path;
use std::str::Lines;
use std::sync::LazyLock;
use tracing::{debug, warn};

static RE_BONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(ROOT|JOINT)\s+(\w+)").expect("valid bone regex"));
static RE_OFFSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^OFFSET\s+(\S+)\s+(\S+)\s+(\S+)").expect("valid offset regex"));
static RE_CHANNELS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^CHANNELS\s+(\d+)(.*)$").expect("valid channels regex"));
static RE_FRAMES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Frames:\s+(\d+)").expect("valid frames regex"));
static RE_FRAME_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Frame Time:\s+(\S+)").expect("valid frame time regex"));

type NumberedLines<'a> = Enumerate<Lines<'a>>;

/// `str::parse` also takes `nan` and `inf`, which would poison every pose downstream.
fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Depth-first stack machine over the HIERARCHY section.
#[derive(Debug, Default)]
struct HierarchyParser {
    bones: Vec<Bone>,
    /// Indices of the currently open bones, innermost last.
    stack: Vec<Index>,
    in_end_site: bool,
    channels: Option<usize>,
    warned_rotation_order: bool,
}

impl HierarchyParser {
    fn active(&self) -> Option<Index> {
        self.stack.last().copied()
    }

    fn feed(&mut self, number: usize, line: &str) -> Result<()> {
        if line.is_empty() || line.starts_with("HIERARCHY") || line == "{" {
            return Ok(());
        }

        if line.starts_with("ROOT") || line.starts_with("JOINT") {
            self.open_bone(number, line)
        } else if line.to_lowercase().starts_with("end site") {
            self.open_end_site(number, line)
        } else if line == "}" {
            self.close_block(number, line)
        } else if line.starts_with("OFFSET") {
            self.set_offset(number, line)
        } else if line.starts_with("CHANNELS") {
            self.set_channels(number, line)
        } else {
            Err(BvhError::parse(number, line, "unexpected line in HIERARCHY section"))
        }
    }

    fn open_bone(&mut self, number: usize, line: &str) -> Result<()> {
        let captures = RE_BONE
            .captures(line)
            .ok_or_else(|| BvhError::parse(number, line, "bone declaration without a name"))?;
        let is_root = &captures[1] == "ROOT";

        if self.in_end_site {
            return Err(BvhError::parse(number, line, "bone declared inside an End Site"));
        }
        match (is_root, self.active()) {
            (true, Some(_)) => {
                return Err(BvhError::parse(number, line, "ROOT declared inside another bone"))
            }
            (_, None) if !self.bones.is_empty() => {
                return Err(BvhError::parse(number, line, "second root bone"))
            }
            (false, None) => return Err(BvhError::parse(number, line, "JOINT declared before ROOT")),
            _ => {}
        }

        let index = self.bones.len();
        let parent_index = self.active().map_or(-1, |parent| parent as ParentIndex);
        let bone = Bone::new(captures[2].to_string(), index, parent_index, self.stack.len());
        if let Some(parent) = self.active() {
            self.bones[parent].children.push(index);
        }
        self.bones.push(bone);
        self.stack.push(index);
        Ok(())
    }

    fn open_end_site(&mut self, number: usize, line: &str) -> Result<()> {
        if self.active().is_none() {
            return Err(BvhError::parse(number, line, "End Site outside of a bone"));
        }
        if self.in_end_site {
            return Err(BvhError::parse(number, line, "nested End Site"));
        }
        self.in_end_site = true;
        Ok(())
    }

    fn close_block(&mut self, number: usize, line: &str) -> Result<()> {
        if self.in_end_site {
            self.in_end_site = false;
            return Ok(());
        }
        self.stack
            .pop()
            .map(|_| ())
            .ok_or_else(|| BvhError::parse(number, line, "unmatched closing brace"))
    }

    fn set_offset(&mut self, number: usize, line: &str) -> Result<()> {
        let captures = RE_OFFSET
            .captures(line)
            .ok_or_else(|| BvhError::parse(number, line, "OFFSET needs three values"))?;
        let mut values = [0.0; 3];
        for (value, capture) in values.iter_mut().zip(captures.iter().skip(1).flatten()) {
            *value = parse_finite(capture.as_str())
                .ok_or_else(|| BvhError::parse(number, line, "malformed OFFSET value"))?;
        }

        let active = self
            .active()
            .ok_or_else(|| BvhError::parse(number, line, "OFFSET outside of a bone"))?;
        // end site geometry is not kept
        if !self.in_end_site {
            self.bones[active].offset = Position::new(values[0], values[1], values[2]);
        }
        Ok(())
    }

    fn set_channels(&mut self, number: usize, line: &str) -> Result<()> {
        let captures = RE_CHANNELS
            .captures(line)
            .ok_or_else(|| BvhError::parse(number, line, "malformed CHANNELS declaration"))?;
        let count = captures[1]
            .parse::<usize>()
            .map_err(|_| BvhError::parse(number, line, "malformed channel count"))?;

        if self.active().is_none() {
            return Err(BvhError::parse(number, line, "CHANNELS outside of a bone"));
        }

        let rotation_order: String = captures[2]
            .split_whitespace()
            .filter(|name| name.ends_with("rotation"))
            .filter_map(|name| name.chars().next())
            .collect();
        if !rotation_order.is_empty() && rotation_order != "ZYX" && !self.warned_rotation_order {
            warn!(
                "Line {}: rotation order {} is not supported, decoding as ZYX",
                number, rotation_order
            );
            self.warned_rotation_order = true;
        }

        if let Some(previous) = self.channels.filter(|&previous| previous != count) {
            debug!("Line {}: channel count changes from {} to {}", number, previous, count);
        }
        self.channels = Some(count);
        Ok(())
    }

    fn finish(self, number: usize, line: &str) -> Result<(Skeleton, usize)> {
        if !self.stack.is_empty() || self.in_end_site {
            return Err(BvhError::parse(number, line, "MOTION reached with unclosed blocks"));
        }
        if self.bones.is_empty() {
            return Err(BvhError::EmptySkeleton);
        }
        let channels = self.channels.ok_or(BvhError::MissingChannels)?;
        Ok((Skeleton { bones: self.bones }, channels))
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Parse the HIERARCHY section up to and including the `MOTION` line.
fn parse_hierarchy(it: &mut NumberedLines) -> Result<(Skeleton, usize)> {
    let mut parser = HierarchyParser::default();
    let mut last_number = 0;
    for (i, line) in it.by_ref() {
        let number = i + 1;
        last_number = number;
        let line = line.trim();
        if line.starts_with("MOTION") {
            return parser.finish(number, line);
        }
        parser.feed(number, line)?;
    }
    Err(BvhError::parse(last_number + 1, "", "unexpected end of file, MOTION section missing"))
}

/// Next non-blank line, trimmed, with its 1-based line number.
fn next_header_line<'a>(it: &mut NumberedLines<'a>, expected: &str) -> Result<(usize, &'a str)> {
    let mut last_number = 0;
    for (i, line) in it.by_ref() {
        last_number = i + 1;
        let line = line.trim();
        if !line.is_empty() {
            return Ok((i + 1, line));
        }
    }
    Err(BvhError::parse(
        last_number + 1,
        "",
        format!("unexpected end of file, expected {}", expected),
    ))
}

/// Parse `Frames:` and `Frame Time:` which open the motion section.
fn parse_motion_header(it: &mut NumberedLines) -> Result<(usize, f64)> {
    let (number, line) = next_header_line(it, "Frames:")?;
    let num_frames = RE_FRAMES
        .captures(line)
        .and_then(|captures| captures[1].parse::<usize>().ok())
        .ok_or_else(|| BvhError::parse(number, line, "expected `Frames: <count>`"))?;

    let (number, line) = next_header_line(it, "Frame Time:")?;
    let frame_time = RE_FRAME_TIME
        .captures(line)
        .and_then(|captures| parse_finite(&captures[1]))
        .ok_or_else(|| BvhError::parse(number, line, "expected `Frame Time: <seconds>`"))?;

    Ok((num_frames, frame_time))
}

fn parse_bvh(lines: Lines) -> Result<(BvhMetadata, BvhData)> {
    let mut it = lines.enumerate();

    let (skeleton, channel_count) = parse_hierarchy(&mut it)?;
    let layout = ChannelLayout::try_from(channel_count)?;
    let (num_frames, frame_time) = parse_motion_header(&mut it)?;
    let fps = if frame_time > 0.0 {
        (1.0 / frame_time) as u32
    } else {
        0
    };

    /////////////////////////////////// PARSING MOTION ///////////////////////////////////

    let mut decoder = ChannelDecoder::new(layout, &skeleton, num_frames);
    for (i, line) in it {
        decoder.push_line(i + 1, line);
    }
    let frames = normalize_rotations(decoder.finish());

    debug!(
        "Parsed {} bones, {} channels, {}/{} frames at {} fps",
        skeleton.len(),
        layout.cardinality(),
        frames.len(),
        num_frames,
        fps
    );

    let metadata = BvhMetadata {
        skeleton,
        channels: layout,
        num_frames,
        frame_time,
        fps,
    };
    Ok((metadata, BvhData { frames }))
}

//////////////////////////////////////////////////////////////// PUBLIC ///////////////////////////////////////////////////////////////////////////////////////////

/// load a bvh file from a file path
pub fn load_bvh_from_file(file_path: impl AsRef<Path>) -> Result<(BvhMetadata, BvhData)> {
    let path = file_path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| BvhError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_bvh(contents.lines())
}

/// load a bvh file from a string
pub fn load_bvh_from_string(bvh_string: &str) -> Result<(BvhMetadata, BvhData)> {
    parse_bvh(bvh_string.lines())
}
