pub mod draw_list;
pub mod skeleton;

pub use draw_list::DrawCommand;
pub use skeleton::SKELETON_CONNECTIONS;
