use eframe::egui::{self, Align2, Color32, FontId, Key, KeyboardShortcut, Modifiers, Vec2};
use log::error;

use crate::assets::TextureCache;
use crate::editor::Editor;
use crate::effects::Snowfield;
use crate::element::ElementId;
use crate::file_handler::{FileHandler, UploadedImage};
use crate::gallery::Gallery;
use crate::input::{self, PointerEvent};
use crate::panels::{self, ToolCategory};
use crate::persist::{
    self, DesignId, DesignPayload, DesignStore, LocalStore, SaveOutcome, SaveScope,
};
use crate::render::{self, Interactivity};
use crate::thumbnail;
use crate::util::time;

const UNDO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);
const REDO_SHIFT: KeyboardShortcut =
    KeyboardShortcut::new(Modifiers::COMMAND.plus(Modifiers::SHIFT), Key::Z);

/// The app's screens, replacing page navigation: home, the gallery page with
/// its create button, the editor, and the read-only shared view selected by
/// a design id.
#[derive(Debug, Clone, PartialEq)]
enum Screen {
    Home,
    Decorator,
    Editor,
    Viewer { id: DesignId },
}

/// A design loaded for viewing, or why it could not be.
struct ViewerState {
    id: DesignId,
    result: Result<crate::composition::Composition, String>,
}

/// Save flow: nickname prompt, then the share link (with its scope).
enum SaveFlow {
    Idle,
    Nickname { nickname: String },
    Done { outcome: SaveOutcome },
}

pub struct GarlandApp {
    screen: Screen,
    pub(crate) editor: Editor,
    pub(crate) textures: TextureCache,
    pub(crate) category: ToolCategory,
    pub(crate) uploads: Vec<UploadedImage>,
    pub(crate) text_input: String,
    pub(crate) text_edit: Option<(ElementId, String)>,

    snow: Snowfield,
    gallery: Gallery,
    file_handler: FileHandler,

    shared_store: Box<dyn DesignStore>,
    local_store: LocalStore,

    save_flow: SaveFlow,
    confirm_clear: bool,
    viewer: Option<ViewerState>,

    /// Set when a required collaborator failed at startup; blocks every
    /// mutating action behind an alert.
    fatal: Option<String>,
}

impl GarlandApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let data_dir = std::path::PathBuf::from("garland_data");
        let shared = LocalStore::open(data_dir.join("shared"));
        let local = LocalStore::open(data_dir.join("local"));
        let (shared_store, local_store, fatal) = match (shared, local) {
            (Ok(shared), Ok(local)) => (Box::new(shared) as Box<dyn DesignStore>, local, None),
            (shared, local) => {
                let err = shared
                    .err()
                    .or(local.err())
                    .map(|e| e.to_string())
                    .unwrap_or_default();
                error!("design store unavailable: {err}");
                // Keep the app alive to show the alert; `fatal` gates every
                // action, so these placeholder stores are never reached.
                (
                    Box::new(persist::MemoryStore::new()) as Box<dyn DesignStore>,
                    LocalStore::open(std::env::temp_dir().join("garland-local"))
                        .expect("temp dir must be writable"),
                    Some(format!("Design storage is unavailable: {err}")),
                )
            }
        };

        Self {
            screen: Screen::Home,
            editor: Editor::new(Vec2::new(960.0, 640.0)),
            textures: TextureCache::new(),
            category: ToolCategory::default(),
            uploads: Vec::new(),
            text_input: String::new(),
            text_edit: None,
            snow: Snowfield::new(),
            gallery: Gallery::new(),
            file_handler: FileHandler::new(),
            shared_store,
            local_store,
            save_flow: SaveFlow::Idle,
            confirm_clear: false,
            viewer: None,
            fatal,
        }
    }

    pub(crate) fn background_tag(&self) -> &str {
        &self.editor.composition().background.tag
    }

    fn editor_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.input_mut(|i| i.consume_shortcut(&REDO_SHIFT) || i.consume_shortcut(&REDO)) {
            self.editor.redo();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&UNDO)) {
            self.editor.undo();
        }
    }

    fn editor_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("editor_top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Back").clicked() {
                    self.screen = Screen::Decorator;
                }
                ui.separator();

                let can_undo = self.editor.history().can_undo();
                let can_redo = self.editor.history().can_redo();
                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    self.editor.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    self.editor.redo();
                }
                ui.separator();

                if ui.button("Clear").clicked() {
                    self.confirm_clear = true;
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Save").clicked() {
                        self.save_flow = SaveFlow::Nickname {
                            nickname: "Anonymous".to_owned(),
                        };
                    }
                });
            });
        });
    }

    fn editor_dialogs(&mut self, ctx: &egui::Context) {
        if self.confirm_clear {
            let mut clear = false;
            let mut cancel = false;
            egui::Window::new("Clear everything on the canvas?")
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        clear = ui.button("Clear").clicked();
                        cancel = ui.button("Cancel").clicked();
                    });
                });
            if clear {
                self.editor.clear();
            }
            if clear || cancel {
                self.confirm_clear = false;
            }
        }

        if self.editor.interaction.pending_removal.is_some() {
            let mut event = None;
            egui::Window::new("Remove this text?")
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("Remove").clicked() {
                            event = Some(PointerEvent::RemovalConfirmed);
                        }
                        if ui.button("Keep it").clicked() {
                            event = Some(PointerEvent::RemovalCancelled);
                        }
                    });
                });
            if let Some(event) = event {
                input::handle_event(&mut self.editor, event);
            }
        }

        match std::mem::replace(&mut self.save_flow, SaveFlow::Idle) {
            SaveFlow::Idle => {}
            SaveFlow::Nickname { mut nickname } => {
                let mut next = None;
                egui::Window::new("Save your design")
                    .collapsible(false)
                    .resizable(false)
                    .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
                    .show(ctx, |ui| {
                        ui.label("Enter a nickname to share your creation with others!");
                        ui.text_edit_singleline(&mut nickname);
                        ui.horizontal(|ui| {
                            if ui.button("Save & share").clicked() {
                                next = Some(true);
                            }
                            if ui.button("Cancel").clicked() {
                                next = Some(false);
                            }
                        });
                    });
                self.save_flow = match next {
                    Some(true) => {
                        let nickname = if nickname.trim().is_empty() {
                            "Anonymous".to_owned()
                        } else {
                            nickname.trim().to_owned()
                        };
                        match self.save_current(&nickname) {
                            Ok(outcome) => SaveFlow::Done { outcome },
                            Err(message) => {
                                error!("save failed: {message}");
                                self.fatal = Some(message);
                                SaveFlow::Idle
                            }
                        }
                    }
                    Some(false) => SaveFlow::Idle,
                    None => SaveFlow::Nickname { nickname },
                };
            }
            SaveFlow::Done { outcome } => {
                let mut open_viewer = false;
                let mut close = false;
                egui::Window::new("Design saved!")
                    .collapsible(false)
                    .resizable(false)
                    .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
                    .show(ctx, |ui| {
                        match outcome.scope {
                            SaveScope::Shared => {
                                ui.label("Share this link to show off your tree:");
                            }
                            SaveScope::LocalFallback => {
                                ui.label(
                                    "The gallery could not be reached, so your design was \
                                     saved on this computer. The link works here:",
                                );
                            }
                        }
                        ui.monospace(&outcome.link);
                        ui.horizontal(|ui| {
                            if ui.button("View it").clicked() {
                                open_viewer = true;
                            }
                            if ui.button("Close").clicked() {
                                close = true;
                            }
                        });
                    });
                if open_viewer {
                    self.open_viewer(outcome.id.clone());
                } else if !close {
                    self.save_flow = SaveFlow::Done { outcome };
                }
            }
        }
    }

    /// Capture the thumbnail, build the payload, and save with local
    /// fallback. Only the thumbnail step can fail; store trouble degrades
    /// the scope instead.
    fn save_current(&mut self, nickname: &str) -> Result<SaveOutcome, String> {
        let composition = self.editor.composition();
        let thumbnail = thumbnail::capture_png(composition, self.editor.canvas_size())
            .map_err(|err| format!("Could not capture a thumbnail: {err}"))?;
        let payload = DesignPayload::from_composition(composition, time::timestamp_ms());
        Ok(persist::save_design(
            self.shared_store.as_mut(),
            &mut self.local_store,
            nickname,
            &payload,
            &thumbnail,
        ))
    }

    fn open_viewer(&mut self, id: DesignId) {
        self.viewer = None;
        self.screen = Screen::Viewer { id };
    }

    fn home_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let rect = ui.max_rect();
            ui.painter()
                .rect_filled(rect, 0.0, Color32::from_rgb(0x0b, 0x1d, 0x3a));
            self.snow.paint(ui.painter(), rect);
            ui.painter().text(
                rect.center() - Vec2::new(0.0, 40.0),
                Align2::CENTER_CENTER,
                "Garland",
                FontId::proportional(48.0),
                Color32::WHITE,
            );
            let button_rect = egui::Rect::from_center_size(
                rect.center() + Vec2::new(0.0, 30.0),
                Vec2::new(220.0, 40.0),
            );
            if ui
                .put(button_rect, egui::Button::new("Decorate a tree"))
                .clicked()
            {
                self.screen = Screen::Decorator;
            }
        });
    }

    fn decorator_screen(&mut self, ctx: &egui::Context, now: f64) {
        self.gallery.maybe_refresh(self.shared_store.as_mut(), now);

        egui::TopBottomPanel::top("decorator_top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Recent designs");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Create your own").clicked() {
                        self.screen = Screen::Editor;
                    }
                    if ui.button("Home").clicked() {
                        self.screen = Screen::Home;
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(error) = &self.gallery.error {
                ui.colored_label(Color32::from_rgb(0xc4, 0x1e, 0x3a), error);
                return;
            }
            if self.gallery.entries().is_empty() {
                ui.label("No designs yet. Be the first to create one!");
                return;
            }

            let entries = self.gallery.entries().to_vec();
            let mut view_id = None;
            let mut like_id = None;
            ui.horizontal_wrapped(|ui| {
                for entry in &entries {
                    ui.vertical(|ui| {
                        ui.set_width(180.0);
                        let (rect, response) =
                            ui.allocate_exact_size(Vec2::new(170.0, 170.0), egui::Sense::click());
                        let backdrop = crate::composition::Background {
                            paint: entry.background.clone(),
                            tag: entry.background_tag.clone(),
                        };
                        match backdrop.fill() {
                            crate::composition::BackgroundFill::Solid(color) => {
                                ui.painter().rect_filled(rect, 4.0, color);
                            }
                            crate::composition::BackgroundFill::Vertical(top, _) => {
                                ui.painter().rect_filled(rect, 4.0, top);
                            }
                        }
                        let key = format!("thumb:{}", entry.id);
                        if let Some(texture) =
                            self.textures.get_png(ctx, &key, &entry.thumbnail_png)
                        {
                            ui.painter().image(
                                texture.id(),
                                rect,
                                egui::Rect::from_min_max(egui::Pos2::ZERO, egui::pos2(1.0, 1.0)),
                                Color32::WHITE,
                            );
                        }
                        if response.clicked() {
                            view_id = Some(entry.id.clone());
                        }
                        ui.label(&entry.nickname);
                        ui.horizontal(|ui| {
                            ui.weak(format!("{} views", entry.views));
                            if ui.button(format!("♥ {}", entry.likes)).clicked() {
                                like_id = Some(entry.id.clone());
                            }
                        });
                    });
                }
            });
            if let Some(id) = view_id {
                self.open_viewer(id);
            }
            if let Some(id) = like_id {
                self.gallery.like(self.shared_store.as_mut(), &id);
            }
        });
    }

    fn viewer_screen(&mut self, ctx: &egui::Context) {
        let Screen::Viewer { id } = self.screen.clone() else {
            return;
        };

        egui::TopBottomPanel::top("viewer_top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Back to gallery").clicked() {
                    self.screen = Screen::Decorator;
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let canvas_rect = ui.max_rect();

            let needs_load = self.viewer.as_ref().is_none_or(|v| v.id != id);
            if needs_load {
                let result =
                    persist::load_design(self.shared_store.as_mut(), &self.local_store, &id)
                        .map(|design| design.payload.to_composition(canvas_rect.size()))
                        .map_err(|_| "Design not found. It may have been deleted.".to_owned());
                self.viewer = Some(ViewerState {
                    id: id.clone(),
                    result,
                });
            }

            let Some(viewer) = &self.viewer else { return };
            let mut rendered = false;
            match &viewer.result {
                Ok(composition) => {
                    // Same scene path as the editor.
                    let scene = render::scene(composition);
                    let painter = ui.painter_at(canvas_rect);
                    render::paint(&scene, &painter, canvas_rect, &mut self.textures, ctx, None);
                    self.snow.paint(&painter, canvas_rect);
                    rendered = true;
                }
                Err(message) => {
                    ui.painter().text(
                        canvas_rect.center(),
                        Align2::CENTER_CENTER,
                        message,
                        FontId::proportional(18.0),
                        Color32::from_gray(120),
                    );
                }
            }
            if rendered {
                // Shared view: same canvas, interactivity withheld.
                panels::show_canvas(self, ui, ctx, canvas_rect, Interactivity::ReadOnly);
            }
        });
    }
}

impl eframe::App for GarlandApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(message) = self.fatal.clone() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.colored_label(Color32::from_rgb(0xc4, 0x1e, 0x3a), &message);
                });
            });
            return;
        }

        let now = time::current_time_secs();
        let dt = ctx.input(|i| i.stable_dt).min(0.1);

        for upload in self.file_handler.take_dropped_images(ctx) {
            self.uploads.push(upload);
        }
        self.file_handler.preview_files_being_dropped(ctx);

        match self.screen.clone() {
            Screen::Home => {
                self.snow.update(dt);
                self.home_screen(ctx);
                ctx.request_repaint();
            }
            Screen::Decorator => {
                self.decorator_screen(ctx, now);
                // Keep ticking so the auto-refresh fires without input.
                ctx.request_repaint_after(std::time::Duration::from_millis(500));
            }
            Screen::Editor => {
                self.editor_shortcuts(ctx);
                self.editor_top_bar(ctx);
                panels::tools_panel(self, ctx);
                panels::central_panel(self, ctx);
                self.editor_dialogs(ctx);
            }
            Screen::Viewer { .. } => {
                self.snow.update(dt);
                self.viewer_screen(ctx);
                ctx.request_repaint();
            }
        }
    }
}
