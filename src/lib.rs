//! .bvh motion capture -> per-frame global bone poses, ready for a retargeting
//! engine (Z-up, meters, canonical bone names, synthesized foot contacts).
//!
//! ```no_run
//! use bvh_pose_converter::convert::convert_bvh_file;
//!
//! let conversion = convert_bvh_file("serve.bvh")?;
//! let head = conversion.frames[0]["Head"];
//! println!("{:?} {}", head.position, conversion.human_height);
//! # Ok::<(), bvh_pose_converter::error::BvhError>(())
//! ```

pub mod channels;
pub mod convert;
pub mod coords;
pub mod error;
pub mod export;
pub mod kinematics;
pub mod names;
pub mod parse;
pub mod pose;
pub mod retarget;
pub mod rotation;
pub mod types;

pub use convert::{convert_bvh, convert_bvh_file, convert_bvh_string};
pub use error::{BvhError, Result};
pub use parse::{load_bvh_from_file, load_bvh_from_string};
pub use retarget::{retarget_frames, Retargeter};
pub use types::{BonePose, Conversion, FrameRecord};
