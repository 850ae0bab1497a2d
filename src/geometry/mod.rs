pub mod angle;

pub use angle::{joint_angle, joint_angle_strict};
