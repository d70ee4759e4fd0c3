mod central_panel;
mod tools_panel;

pub use central_panel::{central_panel, show_canvas};
pub use tools_panel::tools_panel;

use crate::element::ImageSource;

/// Which side-panel category is visible. Switching is a pure visibility
/// toggle and never touches the composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolCategory {
    #[default]
    Decorate,
    Text,
    Image,
}

/// Drag-and-drop payload carried from a palette entry to the canvas.
#[derive(Debug, Clone)]
pub struct OrnamentDrop {
    pub src: ImageSource,
}

/// Bundled tree graphics offered in the side panel.
pub const TREE_CHOICES: &[(&str, &str)] = &[
    ("Classic Fir", "assets/trees/classic-fir.png"),
    ("Snowy Pine", "assets/trees/snowy-pine.png"),
    ("Golden Spruce", "assets/trees/golden-spruce.png"),
];

/// Bundled ornament graphics.
pub const ORNAMENT_CHOICES: &[(&str, &str)] = &[
    ("Red Bauble", "assets/ornaments/bauble-red.png"),
    ("Gold Bauble", "assets/ornaments/bauble-gold.png"),
    ("Star", "assets/ornaments/star.png"),
    ("Candy Cane", "assets/ornaments/candy-cane.png"),
    ("Bell", "assets/ornaments/bell.png"),
    ("Gift Box", "assets/ornaments/gift-box.png"),
];

/// Font families offered for text labels.
pub const FONT_CHOICES: &[&str] = &["Arial", "Georgia", "Courier New", "Comic Sans MS"];

/// Text color swatches.
pub const TEXT_COLORS: &[&str] = &[
    "#000000", "#ffffff", "#c41e3a", "#1b5e20", "#ffd700", "#1a237e",
];

/// Quick-insert emoji, added as text elements.
pub const EMOJI_CHOICES: &[&str] = &["🎄", "⭐", "🎅", "🦌", "🎁", "🔔", "❄", "🍬"];
