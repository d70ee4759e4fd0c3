use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Stroke};

use crate::app::GarlandApp;
use crate::element::ElementKind;
use crate::input::{self, Hit, PointerEvent, Selection};
use crate::render::{self, Interactivity};
use crate::widgets::{ORNAMENT_HANDLE_COLOR, ResizeHandle, TREE_HANDLE_COLOR};

use super::OrnamentDrop;

pub fn central_panel(app: &mut GarlandApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let canvas_rect = ui.available_rect_before_wrap();
        app.editor.set_canvas_size(canvas_rect.size());

        let painter = ui.painter_at(canvas_rect);
        let composition = app.editor.composition();
        let empty = composition.tree.is_none() && composition.is_empty();
        let scene = render::scene(composition);
        render::paint(
            &scene,
            &painter,
            canvas_rect,
            &mut app.textures,
            ctx,
            app.editor.interaction.editing_text(),
        );
        if empty {
            painter.text(
                canvas_rect.center(),
                Align2::CENTER_CENTER,
                "Pick a tree, then drag ornaments onto the canvas",
                FontId::proportional(16.0),
                Color32::from_gray(150),
            );
        }

        show_canvas(app, ui, ctx, canvas_rect, Interactivity::Editable);
    });
}

/// Attach (or skip) the interactive layer over an already painted scene.
/// The read-only viewer calls this with [`Interactivity::ReadOnly`] and gets
/// nothing; the editor canvas gets hit areas, selection chrome, the resize
/// handle, the in-place text editor, and palette drops.
pub fn show_canvas(
    app: &mut GarlandApp,
    ui: &mut egui::Ui,
    ctx: &egui::Context,
    canvas_rect: Rect,
    interactivity: Interactivity,
) {
    if interactivity == Interactivity::ReadOnly {
        return;
    }

    let origin = canvas_rect.min.to_vec2();
    let handle_rect = input::resize_handle_center(
        app.editor.composition(),
        app.editor.interaction.selection,
    )
    .map(|center| ResizeHandle::new(center + origin, Color32::WHITE).rect());

    let response = ui.interact(
        canvas_rect,
        ui.id().with("canvas"),
        Sense::click_and_drag(),
    );

    // Raw egui input becomes semantic events; all geometry decisions live in
    // the interaction controller. A plain click (egui reports it separately
    // from drags) is a degenerate press-release: it selects but moves
    // nothing.
    if response.clicked()
        && let Some(pos) = response.interact_pointer_pos()
    {
        input::handle_event(
            &mut app.editor,
            PointerEvent::Down {
                pos: pos - origin,
                on_resize_handle: false,
            },
        );
        input::handle_event(&mut app.editor, PointerEvent::Up);
    }
    if response.drag_started()
        && let Some(pos) = response.interact_pointer_pos()
    {
        let on_resize_handle = handle_rect.is_some_and(|r| r.contains(pos));
        input::handle_event(
            &mut app.editor,
            PointerEvent::Down {
                pos: pos - origin,
                on_resize_handle,
            },
        );
    }
    if response.dragged()
        && let Some(pos) = response.interact_pointer_pos()
    {
        input::handle_event(&mut app.editor, PointerEvent::Moved { pos: pos - origin });
    }
    if response.drag_stopped() {
        input::handle_event(&mut app.editor, PointerEvent::Up);
    }
    if response.double_clicked()
        && let Some(pos) = response.interact_pointer_pos()
    {
        input::handle_event(&mut app.editor, PointerEvent::DoubleClick { pos: pos - origin });
    }
    if response.secondary_clicked()
        && let Some(pos) = response.interact_pointer_pos()
        && let Some(Hit::Element(id)) = input::hit_test(app.editor.composition(), pos - origin)
    {
        input::handle_event(&mut app.editor, PointerEvent::RemoveRequested { id });
    }

    if app.editor.interaction.is_dragging() {
        ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
    } else if app.editor.interaction.is_resizing() {
        ctx.set_cursor_icon(egui::CursorIcon::ResizeNwSe);
    }

    selection_chrome(app, ui, canvas_rect);
    text_edit_overlay(app, ui, canvas_rect);

    // Palette drops: an ornament lands centered on the drop point.
    if let Some(payload) = response.dnd_release_payload::<OrnamentDrop>()
        && let Some(pos) = response.hover_pos()
    {
        app.editor.add_ornament(payload.src.clone(), pos - origin);
    } else if response.dnd_hover_payload::<OrnamentDrop>().is_some() {
        ui.painter()
            .rect_stroke(canvas_rect, 0.0, Stroke::new(2.0, TREE_HANDLE_COLOR));
    }
}

/// Selection outline and the resize affordance for the selected item.
fn selection_chrome(app: &mut GarlandApp, ui: &mut egui::Ui, canvas_rect: Rect) {
    let origin = canvas_rect.min.to_vec2();
    let composition = app.editor.composition();
    let selection = app.editor.interaction.selection;

    let (outline_rect, handle_color) = match selection {
        Selection::None => return,
        Selection::Tree => match &composition.tree {
            Some(tree) => (tree.rect(), TREE_HANDLE_COLOR),
            None => return,
        },
        Selection::Element(id) => match composition.element(id) {
            Some(el) => (
                el.rect(),
                match el.kind() {
                    ElementKind::Ornament => ORNAMENT_HANDLE_COLOR,
                    ElementKind::Text => TREE_HANDLE_COLOR,
                },
            ),
            None => return,
        },
    };

    ui.painter().rect_stroke(
        outline_rect.translate(origin),
        0.0,
        Stroke::new(2.0, TREE_HANDLE_COLOR),
    );

    if let Some(center) = input::resize_handle_center(composition, selection) {
        ResizeHandle::new(center + origin, handle_color).show(ui, "selection");
    }
}

/// In-place editor for the text element currently in edit mode.
fn text_edit_overlay(app: &mut GarlandApp, ui: &mut egui::Ui, canvas_rect: Rect) {
    let Some(id) = app.editor.interaction.editing_text() else {
        app.text_edit = None;
        return;
    };
    let Some(text) = app.editor.composition().element(id).and_then(|e| e.as_text()) else {
        app.text_edit = None;
        return;
    };

    // (Re)seed the buffer when edit mode starts or switches elements.
    let stale = app.text_edit.as_ref().is_none_or(|(edit_id, _)| *edit_id != id);
    if stale {
        app.text_edit = Some((id, text.content().to_owned()));
    }

    let pos = text.pos() + canvas_rect.min.to_vec2();
    let font = render::font_id(text.font_family(), text.font_size());
    let color = text.color();
    let width = text.extent().x.max(80.0);

    let mut finished = false;
    let mut content = String::new();
    egui::Area::new(ui.id().with(("text_edit", id)))
        .fixed_pos(pos)
        .show(ui.ctx(), |ui| {
            if let Some((_, buffer)) = &mut app.text_edit {
                let edit = ui.add(
                    egui::TextEdit::singleline(buffer)
                        .font(font)
                        .text_color(color)
                        .desired_width(width),
                );
                if stale {
                    edit.request_focus();
                }
                let done = edit.lost_focus()
                    || ui.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape));
                if done && !stale {
                    finished = true;
                    content = buffer.clone();
                }
            }
        });

    if finished {
        app.text_edit = None;
        input::handle_event(&mut app.editor, PointerEvent::EndTextEdit { id, content });
    }
}

