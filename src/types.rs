use cgmath::{One, Quaternion as CgQuaternion, Vector3, Zero};
use std::collections::BTreeMap;

use crate::error::BvhError;

/////////////////////////////////////////////////////////////////////////////////////////////////

pub type Index = usize;
pub type ParentIndex = isize; // can be -1 if bone has no parent
pub type Quaternion = CgQuaternion<f64>;
pub type Position = Vector3<f64>;
pub type Depth = usize;

/////////////////////////////////////////////////////////////////////////////////////////////////

/// Euler angles in DEGREES, applied in Z, Y, X order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Euler {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Euler {
    pub fn zero() -> Euler {
        Euler {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Build from three values in `Zrotation Yrotation Xrotation` channel order.
    pub fn from_zyx_channels(z: f64, y: f64, x: f64) -> Euler {
        Euler { x, y, z }
    }

    /// The angles back in channel order, i.e. `[z, y, x]`.
    pub fn to_zyx_channels(&self) -> [f64; 3] {
        [self.z, self.y, self.x]
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    pub name: String,
    pub index: Index,
    pub parent_index: ParentIndex,
    pub depth: Depth,
    pub children: Vec<Index>,
    /// Rest translation relative to the parent.
    pub offset: Position,
    /// Always identity for .bvh input.
    pub rest_rotation: Quaternion,
}

impl Bone {
    pub fn new(name: String, index: Index, parent_index: ParentIndex, depth: Depth) -> Self {
        Bone {
            name,
            index,
            parent_index,
            depth,
            children: Vec::new(),
            offset: Position::zero(),
            rest_rotation: Quaternion::one(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_index == -1
    }

    pub fn parent(&self) -> Option<Index> {
        usize::try_from(self.parent_index).ok()
    }
}

/// Bones in parent-before-child order. Every parent index is smaller than the
/// index of the bone referring to it, and bone 0 is the only root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skeleton {
    pub bones: Vec<Bone>,
}

impl Skeleton {
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn root(&self) -> Option<&Bone> {
        self.bones.first()
    }

    pub fn find_bone_by_index(&self, index: Index) -> Option<&Bone> {
        self.bones.get(index)
    }

    pub fn find_bone_by_name(&self, name: &str) -> Option<&Bone> {
        self.bones.iter().find(|bone| bone.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bones.iter().map(|bone| bone.name.as_str())
    }

    pub fn rest_offsets(&self) -> Vec<Position> {
        self.bones.iter().map(|bone| bone.offset).collect()
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// How a motion line is sliced into per-bone values, selected by the file's
/// `CHANNELS` count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// 3: root position, then one ZYX triple for every bone.
    RootPositionOnly,
    /// 6: position and ZYX triple for every bone.
    PositionPerBone,
    /// 9: root position, then `[offset scale, ZYX, stretch]` for every non-root bone.
    ScaledOffsets,
}

impl ChannelLayout {
    pub fn cardinality(&self) -> usize {
        match self {
            ChannelLayout::RootPositionOnly => 3,
            ChannelLayout::PositionPerBone => 6,
            ChannelLayout::ScaledOffsets => 9,
        }
    }

    /// Number of values an accepted motion line must hold for `num_bones` bones.
    pub fn line_len(&self, num_bones: usize) -> usize {
        match self {
            ChannelLayout::RootPositionOnly => 3 + 3 * num_bones,
            ChannelLayout::PositionPerBone => 6 * num_bones,
            ChannelLayout::ScaledOffsets => 3 + 9 * num_bones.saturating_sub(1),
        }
    }
}

impl TryFrom<usize> for ChannelLayout {
    type Error = BvhError;

    fn try_from(channels: usize) -> Result<Self, Self::Error> {
        match channels {
            3 => Ok(ChannelLayout::RootPositionOnly),
            6 => Ok(ChannelLayout::PositionPerBone),
            9 => Ok(ChannelLayout::ScaledOffsets),
            other => Err(BvhError::UnsupportedChannelCount(other)),
        }
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct BvhMetadata {
    pub skeleton: Skeleton,
    pub channels: ChannelLayout,
    /// Frame count declared by the `Frames:` header. Can exceed the number of decoded frames.
    pub num_frames: usize,
    pub frame_time: f64,
    pub fps: u32,
}

/// One decoded motion line: local positions and raw Euler rotations per bone.
#[derive(Debug, Clone, PartialEq)]
pub struct EulerFrame {
    pub positions: Vec<Position>,
    pub rotations: Vec<Euler>,
}

/// Local transforms of every bone for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub positions: Vec<Position>,
    pub rotations: Vec<Quaternion>,
}

/// Global transforms of every bone for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    pub positions: Vec<Position>,
    pub rotations: Vec<Quaternion>,
}

#[derive(Debug, Clone)]
pub struct BvhData {
    pub frames: Vec<Frame>,
}

/////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonePose {
    pub position: Position,
    pub orientation: Quaternion,
}

impl BonePose {
    pub fn new(position: Position, orientation: Quaternion) -> Self {
        BonePose {
            position,
            orientation,
        }
    }
}

impl Default for BonePose {
    fn default() -> Self {
        BonePose::new(Position::zero(), Quaternion::one())
    }
}

/// Canonical bone name -> normalized global pose, for a single frame.
pub type FrameRecord = BTreeMap<String, BonePose>;

/// Everything handed to a retargeter for one file.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub frames: Vec<FrameRecord>,
    pub human_height: f64,
    pub frame_time: f64,
    pub fps: u32,
}
