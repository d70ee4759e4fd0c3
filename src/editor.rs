use egui::{Color32, Pos2, Vec2};
use log::info;

use crate::composition::{Background, Composition, TreeState};
use crate::element::{
    self, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_TEXT_COLOR, ElementId, ImageSource,
    Ornament, PlacedElement, Text,
};
use crate::history::History;
use crate::input::InteractionState;

/// Current text tool settings, applied to new text and live-updated on the
/// selected text element.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSettings {
    pub font_family: String,
    pub font_size: f32,
    pub color: Color32,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            font_size: DEFAULT_FONT_SIZE,
            color: DEFAULT_TEXT_COLOR,
        }
    }
}

/// The composition engine: owns the live [`Composition`], the undo history,
/// and the interaction state, and is the single source of truth queried by
/// persistence and thumbnail capture.
///
/// Every mutating operation commits one history snapshot, except the
/// in-flight updates of a drag or resize, which the interaction layer
/// batches into a single commit on release.
pub struct Editor {
    composition: Composition,
    history: History,
    pub interaction: InteractionState,
    pub text_settings: TextSettings,
    canvas_size: Vec2,
}

impl Editor {
    pub fn new(canvas_size: Vec2) -> Self {
        let mut editor = Self {
            composition: Composition::new(),
            history: History::new(),
            interaction: InteractionState::default(),
            text_settings: TextSettings::default(),
            canvas_size,
        };
        // Seed the history so undo can always return to the opening state.
        editor.commit();
        editor
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    /// Mutable access for in-flight gestures; the caller is responsible for
    /// committing when the gesture completes.
    pub(crate) fn composition_mut(&mut self) -> &mut Composition {
        &mut self.composition
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    pub fn set_canvas_size(&mut self, size: Vec2) {
        self.canvas_size = size;
    }

    /// Record the current composition as a history entry.
    pub(crate) fn commit(&mut self) {
        self.history.commit(self.composition.clone());
    }

    /// Add an ornament with its default box centered on the drop point.
    pub fn add_ornament(&mut self, src: ImageSource, drop_point: Pos2) -> ElementId {
        let half = element::DEFAULT_ORNAMENT_SIZE / 2.0;
        let pos = Pos2::new(drop_point.x - half, drop_point.y - half);
        let id = self.composition.add(PlacedElement::Ornament(Ornament::new(src, pos)));
        info!("placed ornament {id} at {pos:?}");
        self.commit();
        id
    }

    /// Add a text label near the canvas center using the current tool
    /// settings.
    pub fn add_text(&mut self, content: &str) -> ElementId {
        let pos = Pos2::new(
            self.canvas_size.x / 2.0 - 50.0,
            self.canvas_size.y / 2.0 - 20.0,
        );
        let text = Text::new(
            content,
            self.text_settings.font_family.clone(),
            self.text_settings.font_size,
            self.text_settings.color,
            pos,
        );
        let id = self.composition.add(PlacedElement::Text(text));
        info!("placed text {id}: {content:?}");
        self.commit();
        id
    }

    pub fn set_background(&mut self, background: Background) {
        self.composition.background = background;
        self.commit();
    }

    /// Swap the tree image, keeping its geometry; creates a centered tree if
    /// none exists yet.
    pub fn set_tree(&mut self, src: ImageSource) {
        match &mut self.composition.tree {
            Some(tree) => tree.src = src,
            None => {
                self.composition.tree = Some(TreeState::centered(src, self.canvas_size));
            }
        }
        self.commit();
    }

    pub fn remove_element(&mut self, id: ElementId) -> bool {
        if self.composition.remove(id) {
            info!("removed element {id}");
            if self.interaction.selection.element() == Some(id) {
                self.interaction.selection = crate::input::Selection::None;
            }
            self.commit();
            true
        } else {
            false
        }
    }

    /// Remove every decoration and reset the background, as one undoable
    /// step.
    pub fn clear(&mut self) {
        self.composition.clear_decorations();
        self.interaction.reset();
        self.commit();
    }

    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            self.composition = snapshot;
            self.interaction.reset();
        }
    }

    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            self.composition = snapshot;
            self.interaction.reset();
        }
    }

    /// Live-apply a text style change to the selected text element, if any,
    /// and remember it for the next insertion.
    pub fn apply_text_settings(&mut self, settings: TextSettings) {
        self.text_settings = settings.clone();
        if let Some(id) = self.interaction.selection.element()
            && let Some(text) = self.composition.element_mut(id).and_then(|e| e.as_text_mut())
        {
            text.set_font_family(settings.font_family);
            text.set_font_size(settings.font_size);
            text.set_color(settings.color);
        }
    }
}
