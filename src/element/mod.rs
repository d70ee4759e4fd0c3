use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

mod common;
mod ornament;
mod text;

pub use common::{
    BASE_Z, DEFAULT_ORNAMENT_SIZE, DEFAULT_TREE_SIZE, DRAG_Z, ImageSource, MIN_ORNAMENT_SIZE,
    MIN_TREE_SIZE, RemovalPolicy, TREE_Z,
};
pub use ornament::Ornament;
pub use text::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_TEXT_COLOR, Text};

use crate::id_generator;

/// Unique identity of a placed element within a composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(usize);

impl ElementId {
    pub(crate) fn next() -> Self {
        Self(id_generator::generate_id())
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Ornament,
    Text,
}

impl ElementKind {
    pub fn removal_policy(self) -> RemovalPolicy {
        match self {
            ElementKind::Ornament => RemovalPolicy::Instant,
            ElementKind::Text => RemovalPolicy::ConfirmFirst,
        }
    }
}

/// A single placed item on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlacedElement {
    Ornament(Ornament),
    Text(Text),
}

impl PlacedElement {
    pub fn id(&self) -> ElementId {
        match self {
            PlacedElement::Ornament(o) => o.id(),
            PlacedElement::Text(t) => t.id(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            PlacedElement::Ornament(_) => ElementKind::Ornament,
            PlacedElement::Text(_) => ElementKind::Text,
        }
    }

    pub fn pos(&self) -> Pos2 {
        match self {
            PlacedElement::Ornament(o) => o.pos(),
            PlacedElement::Text(t) => t.pos(),
        }
    }

    pub fn set_pos(&mut self, pos: Pos2) {
        match self {
            PlacedElement::Ornament(o) => o.set_pos(pos),
            PlacedElement::Text(t) => t.set_pos(pos),
        }
    }

    /// Bounding size: explicit for ornaments, estimated from font metrics
    /// for text.
    pub fn size(&self) -> Vec2 {
        match self {
            PlacedElement::Ornament(o) => o.size(),
            PlacedElement::Text(t) => t.extent(),
        }
    }

    pub fn z(&self) -> i32 {
        match self {
            PlacedElement::Ornament(o) => o.z(),
            PlacedElement::Text(t) => t.z(),
        }
    }

    pub fn set_z(&mut self, z: i32) {
        match self {
            PlacedElement::Ornament(o) => o.set_z(z),
            PlacedElement::Text(t) => t.set_z(z),
        }
    }

    pub fn rect(&self) -> Rect {
        match self {
            PlacedElement::Ornament(o) => o.rect(),
            PlacedElement::Text(t) => t.rect(),
        }
    }

    pub fn hit_test(&self, pos: Pos2) -> bool {
        self.rect().contains(pos)
    }

    pub fn removal_policy(&self) -> RemovalPolicy {
        self.kind().removal_policy()
    }

    pub fn as_ornament(&self) -> Option<&Ornament> {
        match self {
            PlacedElement::Ornament(o) => Some(o),
            PlacedElement::Text(_) => None,
        }
    }

    pub fn as_ornament_mut(&mut self) -> Option<&mut Ornament> {
        match self {
            PlacedElement::Ornament(o) => Some(o),
            PlacedElement::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            PlacedElement::Ornament(_) => None,
            PlacedElement::Text(t) => Some(t),
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            PlacedElement::Ornament(_) => None,
            PlacedElement::Text(t) => Some(t),
        }
    }
}
