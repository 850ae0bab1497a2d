pub mod angles;
pub mod config;
pub mod error;
pub mod face;
pub mod geometry;
pub mod overlay;
pub mod pipeline;
pub mod pose;
pub mod protocol;
pub mod render;

pub use error::PoseError;
