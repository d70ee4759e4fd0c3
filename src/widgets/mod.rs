mod resize_handle;

pub use resize_handle::{HANDLE_SIZE, ORNAMENT_HANDLE_COLOR, ResizeHandle, TREE_HANDLE_COLOR};
