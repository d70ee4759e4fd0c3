use eframe::egui::{self, Color32, Rect, Sense, Stroke, Ui, Vec2};

use crate::app::GarlandApp;
use crate::composition::{BACKGROUND_PRESETS, Background, SOLID_SWATCHES, parse_css_color};
use crate::element::ImageSource;

use super::{
    EMOJI_CHOICES, FONT_CHOICES, ORNAMENT_CHOICES, OrnamentDrop, TEXT_COLORS, ToolCategory,
    TREE_CHOICES,
};

pub fn tools_panel(app: &mut GarlandApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.heading("Decorate");

            ui.horizontal(|ui| {
                for (category, label) in [
                    (ToolCategory::Decorate, "Tree"),
                    (ToolCategory::Text, "Text"),
                    (ToolCategory::Image, "My images"),
                ] {
                    if ui
                        .selectable_label(app.category == category, label)
                        .clicked()
                    {
                        app.category = category;
                    }
                }
            });
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| match app.category {
                ToolCategory::Decorate => decorate_sections(app, ui),
                ToolCategory::Text => text_sections(app, ui),
                ToolCategory::Image => image_sections(app, ui),
            });
        });
}

fn decorate_sections(app: &mut GarlandApp, ui: &mut Ui) {
    ui.strong("Background");
    let mut picked = None;
    ui.horizontal_wrapped(|ui| {
        for (name, tag, paint) in BACKGROUND_PRESETS {
            let background = Background::preset(tag, paint);
            if swatch(ui, &background, app.background_tag() == *tag)
                .on_hover_text(*name)
                .clicked()
            {
                picked = Some(background);
            }
        }
        for color in SOLID_SWATCHES {
            let background = Background::solid(color);
            if swatch(ui, &background, app.background_tag() == background.tag)
                .on_hover_text(*color)
                .clicked()
            {
                picked = Some(background);
            }
        }
    });
    if let Some(background) = picked {
        app.editor.set_background(background);
    }

    ui.add_space(8.0);
    ui.strong("Tree");
    let mut tree_pick = None;
    for (name, path) in TREE_CHOICES {
        if ui.button(*name).clicked() {
            tree_pick = Some(ImageSource::from(*path));
        }
    }
    if let Some(src) = tree_pick {
        app.editor.set_tree(src);
    }

    ui.add_space(8.0);
    ui.strong("Ornaments");
    ui.label("Drag one onto the canvas");
    ui.horizontal_wrapped(|ui| {
        for (name, path) in ORNAMENT_CHOICES {
            palette_entry(app, ui, name, &ImageSource::from(*path));
        }
    });
}

fn text_sections(app: &mut GarlandApp, ui: &mut Ui) {
    ui.strong("Add text");
    let add = ui.horizontal(|ui| {
        let edit = ui.text_edit_singleline(&mut app.text_input);
        let pressed_enter = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        ui.button("Add").clicked() || pressed_enter
    });
    if add.inner {
        let content = app.text_input.trim().to_owned();
        if !content.is_empty() {
            app.editor.add_text(&content);
            app.text_input.clear();
        }
    }

    ui.add_space(8.0);
    ui.strong("Font");
    let mut settings = app.editor.text_settings.clone();
    for family in FONT_CHOICES {
        if ui
            .selectable_label(settings.font_family == *family, *family)
            .clicked()
        {
            settings.font_family = (*family).to_owned();
        }
    }

    ui.add_space(8.0);
    ui.strong("Size");
    ui.add(egui::Slider::new(&mut settings.font_size, 12.0..=72.0).suffix("px"));

    ui.add_space(8.0);
    ui.strong("Color");
    ui.horizontal_wrapped(|ui| {
        for css in TEXT_COLORS {
            let color = parse_css_color(css).unwrap_or(Color32::BLACK);
            let (rect, response) = ui.allocate_exact_size(Vec2::splat(22.0), Sense::click());
            ui.painter().rect_filled(rect, 4.0, color);
            if settings.color == color {
                ui.painter()
                    .rect_stroke(rect, 4.0, Stroke::new(2.0, Color32::from_rgb(0x4c, 0xaf, 0x50)));
            }
            if response.clicked() {
                settings.color = color;
            }
        }
    });
    if settings != app.editor.text_settings {
        app.editor.apply_text_settings(settings);
    }

    ui.add_space(8.0);
    ui.strong("Emoji");
    ui.horizontal_wrapped(|ui| {
        for emoji in EMOJI_CHOICES {
            if ui.button(*emoji).clicked() {
                app.editor.add_text(emoji);
            }
        }
    });
}

fn image_sections(app: &mut GarlandApp, ui: &mut Ui) {
    ui.strong("Your images");
    ui.label("Drop image files anywhere in the window to add them here, then drag them onto the canvas.");
    ui.add_space(8.0);
    if app.uploads.is_empty() {
        ui.weak("No images uploaded yet.");
        return;
    }
    let uploads = app.uploads.clone();
    ui.horizontal_wrapped(|ui| {
        for upload in &uploads {
            palette_entry(app, ui, &upload.name, &upload.src);
        }
    });
}

/// Background preview swatch.
fn swatch(ui: &mut Ui, background: &Background, active: bool) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(36.0), Sense::click());
    match background.fill() {
        crate::composition::BackgroundFill::Solid(color) => {
            ui.painter().rect_filled(rect, 4.0, color);
        }
        crate::composition::BackgroundFill::Vertical(top, bottom) => {
            let half = rect.height() / 2.0;
            ui.painter()
                .rect_filled(Rect::from_min_size(rect.min, Vec2::new(rect.width(), half)), 0.0, top);
            ui.painter().rect_filled(
                Rect::from_min_size(rect.min + Vec2::new(0.0, half), Vec2::new(rect.width(), half)),
                0.0,
                bottom,
            );
        }
    }
    let stroke = if active {
        Stroke::new(2.0, Color32::from_rgb(0x4c, 0xaf, 0x50))
    } else {
        Stroke::new(1.0, Color32::from_gray(180))
    };
    ui.painter().rect_stroke(rect, 4.0, stroke);
    response
}

/// A draggable palette entry: thumbnail (or placeholder) plus label.
fn palette_entry(app: &mut GarlandApp, ui: &mut Ui, name: &str, src: &ImageSource) {
    let payload = OrnamentDrop { src: src.clone() };
    let id = egui::Id::new(("palette", src.as_str()));
    ui.dnd_drag_source(id, payload, |ui| {
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(56.0), Sense::hover());
        match app.textures.get(ui.ctx(), src) {
            Some(texture) => {
                ui.painter().image(
                    texture.id(),
                    rect,
                    Rect::from_min_max(egui::Pos2::ZERO, egui::pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
            }
            None => {
                ui.painter().rect_filled(rect, 4.0, Color32::from_gray(200));
                ui.painter().rect_stroke(rect, 4.0, Stroke::new(1.0, Color32::from_gray(120)));
            }
        }
    })
    .response
    .on_hover_text(name);
}
