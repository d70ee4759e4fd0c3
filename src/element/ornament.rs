use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::ElementId;
use super::common::{self, ImageSource};

/// Ornament element: a bitmap image placed on the canvas with an explicit
/// size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ornament {
    id: ElementId,
    src: ImageSource,
    pos: Pos2,
    size: Vec2,
    z: i32,
}

impl Ornament {
    /// Create an ornament at the given top-left corner with the default
    /// 100x100 size.
    pub fn new(src: ImageSource, pos: Pos2) -> Self {
        Self {
            id: ElementId::next(),
            src,
            pos,
            size: Vec2::splat(common::DEFAULT_ORNAMENT_SIZE),
            z: common::BASE_Z,
        }
    }

    /// Rebuild an ornament from persisted attributes, keeping its stored
    /// geometry and stacking.
    pub fn restored(src: ImageSource, pos: Pos2, size: Vec2, z: i32) -> Self {
        Self {
            id: ElementId::next(),
            src,
            pos,
            size,
            z,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn src(&self) -> &ImageSource {
        &self.src
    }

    pub fn pos(&self) -> Pos2 {
        self.pos
    }

    pub fn set_pos(&mut self, pos: Pos2) {
        self.pos = pos;
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Set the size, flooring both axes at the ornament minimum so a resize
    /// can never produce degenerate geometry.
    pub fn set_size(&mut self, size: Vec2) {
        self.size = Vec2::new(
            size.x.max(common::MIN_ORNAMENT_SIZE),
            size.y.max(common::MIN_ORNAMENT_SIZE),
        );
    }

    pub fn z(&self) -> i32 {
        self.z
    }

    pub fn set_z(&mut self, z: i32) {
        self.z = z;
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.pos, self.size)
    }
}
