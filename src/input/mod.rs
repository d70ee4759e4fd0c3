mod controller;
mod state;

pub use controller::{Hit, PointerEvent, handle_event, hit_test, resize_handle_center};
pub use state::{DragTarget, InteractionState, Mode, Selection};
