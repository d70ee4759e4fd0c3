use egui::{Pos2, Vec2};

use crate::composition::Composition;
use crate::editor::Editor;
use crate::element::{self, ElementId, ElementKind, RemovalPolicy};

use super::state::{DragTarget, Mode, Selection};

/// Semantic pointer/keyboard events, produced by the canvas view from raw
/// input. Positions are in composition space (canvas-local pixels).
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed. `on_resize_handle` is true when the press
    /// landed on the selection's resize affordance.
    Down { pos: Pos2, on_resize_handle: bool },
    Moved { pos: Pos2 },
    /// Primary button released, anywhere. Always ends the current gesture;
    /// there is no abort — whatever geometry the gesture reached is kept.
    Up,
    DoubleClick { pos: Pos2 },
    /// Context action asking to remove an element; gated on the element
    /// kind's removal policy.
    RemoveRequested { id: ElementId },
    RemovalConfirmed,
    RemovalCancelled,
    /// The in-place text editor closed with this content.
    EndTextEdit { id: ElementId, content: String },
}

/// What a press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Element(ElementId),
    Tree,
}

/// Topmost-first hit test: elements by descending stacking (insertion order
/// breaks ties), then the tree.
pub fn hit_test(composition: &Composition, pos: Pos2) -> Option<Hit> {
    let elements = composition.elements();
    let mut order: Vec<usize> = (0..elements.len()).collect();
    order.sort_by_key(|&i| elements[i].z());
    for &i in order.iter().rev() {
        if elements[i].hit_test(pos) {
            return Some(Hit::Element(elements[i].id()));
        }
    }
    if let Some(tree) = &composition.tree
        && tree.rect().contains(pos)
    {
        return Some(Hit::Tree);
    }
    None
}

/// Center of the resize affordance for the current selection: the
/// bottom-right corner of its bounding box. Text has no resize affordance.
pub fn resize_handle_center(composition: &Composition, selection: Selection) -> Option<Pos2> {
    match selection {
        Selection::Tree => composition.tree.as_ref().map(|t| t.rect().max),
        Selection::Element(id) => {
            let el = composition.element(id)?;
            (el.kind() == ElementKind::Ornament).then(|| el.rect().max)
        }
        Selection::None => None,
    }
}

/// Drive one semantic event through the interaction state machine, mutating
/// the editor's composition and committing history snapshots at gesture
/// boundaries.
pub fn handle_event(editor: &mut Editor, event: PointerEvent) {
    match event {
        PointerEvent::Down { pos, on_resize_handle } => pointer_down(editor, pos, on_resize_handle),
        PointerEvent::Moved { pos } => pointer_moved(editor, pos),
        PointerEvent::Up => pointer_up(editor),
        PointerEvent::DoubleClick { pos } => double_click(editor, pos),
        PointerEvent::RemoveRequested { id } => remove_requested(editor, id),
        PointerEvent::RemovalConfirmed => {
            if let Some(id) = editor.interaction.pending_removal.take() {
                editor.remove_element(id);
            }
        }
        PointerEvent::RemovalCancelled => {
            editor.interaction.pending_removal = None;
        }
        PointerEvent::EndTextEdit { id, content } => end_text_edit(editor, id, content),
    }
}

fn pointer_down(editor: &mut Editor, pos: Pos2, on_resize_handle: bool) {
    if on_resize_handle
        && let Some(target) = editor.interaction.selection.target()
    {
        let start_size = match target {
            DragTarget::Tree => editor.composition().tree.as_ref().map(|t| t.size),
            DragTarget::Element(id) => editor
                .composition()
                .element(id)
                .and_then(|e| e.as_ornament())
                .map(|o| o.size()),
        };
        if let Some(start_size) = start_size {
            editor.interaction.mode = Mode::Resizing {
                target,
                start_pointer: pos,
                start_size,
                moved: false,
            };
            return;
        }
    }

    match hit_test(editor.composition(), pos) {
        Some(Hit::Element(id)) => {
            // A text element being edited in place does not drag.
            if editor.interaction.editing_text() == Some(id) {
                return;
            }
            editor.interaction.selection = Selection::Element(id);
            let grab_offset = editor.composition_mut().element_mut(id).map(|el| {
                let offset = pos - el.pos();
                el.set_z(element::DRAG_Z);
                offset
            });
            if let Some(grab_offset) = grab_offset {
                editor.interaction.mode = Mode::Dragging {
                    target: DragTarget::Element(id),
                    grab_offset,
                    moved: false,
                };
            }
        }
        Some(Hit::Tree) => {
            editor.interaction.selection = Selection::Tree;
            let grab_offset = editor.composition().tree.as_ref().map(|t| pos - t.pos);
            if let Some(grab_offset) = grab_offset {
                editor.interaction.mode = Mode::Dragging {
                    target: DragTarget::Tree,
                    grab_offset,
                    moved: false,
                };
            }
        }
        None => {
            editor.interaction.selection = Selection::None;
        }
    }
}

fn pointer_moved(editor: &mut Editor, pos: Pos2) {
    let canvas = editor.canvas_size();
    match editor.interaction.mode {
        Mode::Dragging { target, grab_offset, .. } => {
            let origin = pos - grab_offset;
            match target {
                DragTarget::Element(id) => {
                    if let Some(el) = editor.composition_mut().element_mut(id) {
                        el.set_pos(clamp_to_canvas(origin, el.size(), canvas));
                    }
                }
                // The tree may leave the canvas freely.
                DragTarget::Tree => {
                    if let Some(tree) = &mut editor.composition_mut().tree {
                        tree.pos = origin;
                    }
                }
            }
            editor.interaction.mode = Mode::Dragging { target, grab_offset, moved: true };
        }
        Mode::Resizing { target, start_pointer, start_size, .. } => {
            let delta = pos - start_pointer;
            match target {
                DragTarget::Element(id) => {
                    if let Some(o) = editor
                        .composition_mut()
                        .element_mut(id)
                        .and_then(|e| e.as_ornament_mut())
                    {
                        // Width and height track the pointer independently;
                        // set_size applies the 30px floor.
                        o.set_size(start_size + delta);
                    }
                }
                DragTarget::Tree => {
                    if let Some(tree) = &mut editor.composition_mut().tree {
                        // The tree stays square, following the larger axis.
                        let grow = delta.x.max(delta.y);
                        tree.set_size(Vec2::splat(start_size.x + grow));
                    }
                }
            }
            editor.interaction.mode = Mode::Resizing { target, start_pointer, start_size, moved: true };
        }
        Mode::Idle | Mode::EditingText { .. } => {}
    }
}

fn pointer_up(editor: &mut Editor) {
    // Reset unconditionally, whether or not a gesture was in progress.
    let mode = std::mem::take(&mut editor.interaction.mode);
    match mode {
        Mode::Dragging { target, moved, .. } => {
            if let DragTarget::Element(id) = target
                && let Some(el) = editor.composition_mut().element_mut(id)
            {
                el.set_z(element::BASE_Z);
            }
            if moved {
                editor.commit();
            }
        }
        Mode::Resizing { moved, .. } => {
            if moved {
                editor.commit();
            }
        }
        Mode::Idle => {}
        // Releasing the pointer does not end in-place editing; the view
        // closes it on focus loss.
        editing @ Mode::EditingText { .. } => editor.interaction.mode = editing,
    }
}

fn double_click(editor: &mut Editor, pos: Pos2) {
    let Some(Hit::Element(id)) = hit_test(editor.composition(), pos) else {
        return;
    };
    let Some(el) = editor.composition().element(id) else {
        return;
    };
    match el.removal_policy() {
        // Ornaments: double-activation removes with no confirmation.
        RemovalPolicy::Instant => {
            editor.remove_element(id);
        }
        // Text: the double-click opens in-place editing instead.
        RemovalPolicy::ConfirmFirst => {
            editor.interaction.selection = Selection::Element(id);
            editor.interaction.mode = Mode::EditingText { id };
        }
    }
}

fn remove_requested(editor: &mut Editor, id: ElementId) {
    let Some(el) = editor.composition().element(id) else {
        return;
    };
    match el.removal_policy() {
        RemovalPolicy::Instant => {
            editor.remove_element(id);
        }
        RemovalPolicy::ConfirmFirst => {
            editor.interaction.pending_removal = Some(id);
        }
    }
}

fn end_text_edit(editor: &mut Editor, id: ElementId, content: String) {
    if editor.interaction.editing_text() == Some(id) {
        editor.interaction.mode = Mode::Idle;
    }
    if let Some(text) = editor.composition_mut().element_mut(id).and_then(|e| e.as_text_mut()) {
        text.set_content(content);
        editor.commit();
    }
}

/// Clamp an element origin so its bounding box stays inside the canvas.
/// Matches the drag rule: the lower bound wins if the element is larger
/// than the canvas.
fn clamp_to_canvas(origin: Pos2, size: Vec2, canvas: Vec2) -> Pos2 {
    Pos2::new(
        origin.x.min(canvas.x - size.x).max(0.0),
        origin.y.min(canvas.y - size.y).max(0.0),
    )
}
