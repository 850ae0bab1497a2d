pub mod catalog;

pub use catalog::{
    all_body_angles, format_degrees, AngleReport, Joint, JointDefinition, JOINT_TABLE,
};
