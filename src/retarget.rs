//! Hand-off to a motion retargeting engine.

use crate::types::{Conversion, FrameRecord};

/// A retargeting engine that turns one frame of normalized human poses into a
/// robot configuration. Implementations usually receive
/// [`Conversion::human_height`] when they are constructed.
pub trait Retargeter {
    type Output;
    type Error;

    fn retarget(&mut self, frame: &FrameRecord) -> Result<Self::Output, Self::Error>;
}

/// Feed every frame to `retargeter` in order. Stops at the first failure and
/// returns that error untouched.
pub fn retarget_frames<R: Retargeter>(
    retargeter: &mut R,
    conversion: &Conversion,
) -> Result<Vec<R::Output>, R::Error> {
    conversion
        .frames
        .iter()
        .map(|frame| retargeter.retarget(frame))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BonePose;

    struct CountingRetargeter {
        calls: usize,
        fail_at: Option<usize>,
    }

    impl Retargeter for CountingRetargeter {
        type Output = usize;
        type Error = String;

        fn retarget(&mut self, frame: &FrameRecord) -> Result<usize, String> {
            self.calls += 1;
            if Some(self.calls) == self.fail_at {
                return Err(format!("solver diverged on call {}", self.calls));
            }
            Ok(frame.len())
        }
    }

    fn conversion(num_frames: usize) -> Conversion {
        let mut frame = FrameRecord::new();
        frame.insert("Hips".to_string(), BonePose::default());
        Conversion {
            frames: vec![frame; num_frames],
            human_height: 1.75,
            frame_time: 1.0 / 30.0,
            fps: 30,
        }
    }

    #[test]
    fn test_every_frame_in_order() {
        let mut retargeter = CountingRetargeter {
            calls: 0,
            fail_at: None,
        };
        let outputs = retarget_frames(&mut retargeter, &conversion(3)).unwrap();
        assert_eq!(outputs, vec![1, 1, 1]);
        assert_eq!(retargeter.calls, 3);
    }

    #[test]
    fn test_first_error_is_returned_unchanged() {
        let mut retargeter = CountingRetargeter {
            calls: 0,
            fail_at: Some(2),
        };
        let err = retarget_frames(&mut retargeter, &conversion(5)).unwrap_err();
        assert_eq!(err, "solver diverged on call 2");
        // no retry, nothing after the failure
        assert_eq!(retargeter.calls, 2);
    }
}
