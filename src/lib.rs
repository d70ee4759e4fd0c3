#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod assets;
pub mod composition;
pub mod editor;
pub mod effects;
pub mod element;
pub mod file_handler;
pub mod gallery;
pub mod history;
pub mod id_generator;
pub mod input;
pub mod panels;
pub mod persist;
pub mod render;
pub mod thumbnail;
pub mod util;
pub mod widgets;

pub use app::GarlandApp;
pub use composition::{Background, Composition, TreeState};
pub use editor::Editor;
pub use element::{ElementId, ImageSource, Ornament, PlacedElement, Text};
pub use history::History;
pub use input::{InteractionState, PointerEvent};
pub use persist::{DesignPayload, DesignStore, LocalStore, MemoryStore};
