use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::ElementId;
use super::common;

pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_FONT_SIZE: f32 = 24.0;
pub const DEFAULT_TEXT_COLOR: Color32 = Color32::BLACK;

/// Text element: an editable label sized implicitly from its font metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    id: ElementId,
    content: String,
    font_family: String,
    font_size: f32,
    color: Color32,
    pos: Pos2,
    z: i32,
}

impl Text {
    pub fn new(
        content: impl Into<String>,
        font_family: impl Into<String>,
        font_size: f32,
        color: Color32,
        pos: Pos2,
    ) -> Self {
        Self {
            id: ElementId::next(),
            content: content.into(),
            font_family: font_family.into(),
            font_size,
            color,
            pos,
            z: common::BASE_Z,
        }
    }

    /// Rebuild a text element from persisted attributes.
    pub fn restored(
        content: String,
        font_family: String,
        font_size: f32,
        color: Color32,
        pos: Pos2,
        z: i32,
    ) -> Self {
        Self {
            id: ElementId::next(),
            content,
            font_family,
            font_size,
            color,
            pos,
            z,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.font_family = family.into();
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    pub fn pos(&self) -> Pos2 {
        self.pos
    }

    pub fn set_pos(&mut self, pos: Pos2) {
        self.pos = pos;
    }

    pub fn z(&self) -> i32 {
        self.z
    }

    pub fn set_z(&mut self, z: i32) {
        self.z = z;
    }

    /// Deterministic estimate of the rendered extent, used for hit testing
    /// and canvas clamping. The view lays the text out with real font
    /// metrics; this estimate only has to be stable.
    pub fn extent(&self) -> Vec2 {
        let chars = self.content.chars().count().max(1) as f32;
        Vec2::new(0.6 * self.font_size * chars, 1.2 * self.font_size)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.pos, self.extent())
    }
}
