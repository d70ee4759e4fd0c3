use egui::{Pos2, Vec2};

use crate::element::ElementId;

/// What a drag or resize gesture is acting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Tree,
    Element(ElementId),
}

/// Exclusive selection: at most one element or the tree is selected.
/// Selection is view-session state and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Tree,
    Element(ElementId),
}

impl Selection {
    pub fn element(self) -> Option<ElementId> {
        match self {
            Selection::Element(id) => Some(id),
            _ => None,
        }
    }

    pub fn target(self) -> Option<DragTarget> {
        match self {
            Selection::None => None,
            Selection::Tree => Some(DragTarget::Tree),
            Selection::Element(id) => Some(DragTarget::Element(id)),
        }
    }
}

/// The short-lived gesture mode. Spans the pointer-move stream between a
/// press and its release; reset unconditionally on release so no stuck mode
/// survives a missed event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Dragging {
        target: DragTarget,
        /// Pointer-to-origin offset captured at press, so the grabbed point
        /// stays under the pointer.
        grab_offset: Vec2,
        moved: bool,
    },
    Resizing {
        target: DragTarget,
        start_pointer: Pos2,
        start_size: Vec2,
        moved: bool,
    },
    EditingText {
        id: ElementId,
    },
}

/// All interaction state, owned by the editor and passed explicitly —
/// nothing ambient, so drag and resize math is testable without a UI.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    pub mode: Mode,
    pub selection: Selection,
    /// Text element awaiting the user's removal confirmation.
    pub pending_removal: Option<ElementId>,
}

impl InteractionState {
    pub fn is_dragging(&self) -> bool {
        matches!(self.mode, Mode::Dragging { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.mode, Mode::Resizing { .. })
    }

    pub fn editing_text(&self) -> Option<ElementId> {
        match self.mode {
            Mode::EditingText { id } => Some(id),
            _ => None,
        }
    }

    /// Drop every transient reference into the composition. Called after a
    /// snapshot restore, when previously referenced ids may no longer exist.
    pub fn reset(&mut self) {
        self.mode = Mode::Idle;
        self.selection = Selection::None;
        self.pending_removal = None;
    }
}
