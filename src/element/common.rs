use std::path::Path;

use serde::{Deserialize, Serialize};

// Geometry floors and defaults shared by the element kinds and the tree.
pub const DEFAULT_ORNAMENT_SIZE: f32 = 100.0;
pub const MIN_ORNAMENT_SIZE: f32 = 30.0;
pub const DEFAULT_TREE_SIZE: f32 = 500.0;
pub const MIN_TREE_SIZE: f32 = 100.0;

/// Default stacking for placed elements; the tree sits below at [`TREE_Z`].
pub const BASE_Z: i32 = 10;
/// Stacking while an element is being dragged.
pub const DRAG_Z: i32 = 100;
pub const TREE_Z: i32 = 1;

/// How an element kind is removed from the canvas.
///
/// The two policies are intentionally distinct rather than unified:
/// ornaments go on a double-click with no questions asked, text only after
/// the user confirms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalPolicy {
    /// Remove immediately on the gesture.
    Instant,
    /// Ask for confirmation before removing.
    ConfirmFirst,
}

/// Reference to an image resource: a filesystem path, a `data:` URI from an
/// upload, or a URL carried over from a loaded design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageSource(String);

impl ImageSource {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_data_uri(&self) -> bool {
        self.0.starts_with("data:")
    }

    pub fn is_remote(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }

    /// Short label for logs and palette tooltips.
    pub fn label(&self) -> &str {
        if self.is_data_uri() {
            "<uploaded image>"
        } else {
            Path::new(&self.0)
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(&self.0)
        }
    }
}

impl From<&str> for ImageSource {
    fn from(source: &str) -> Self {
        Self(source.to_owned())
    }
}
