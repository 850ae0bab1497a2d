pub mod keypoint;

pub use keypoint::{Bone, Detection, Keypoint, KeypointName, Point2D, CONFIDENCE_THRESHOLD};
