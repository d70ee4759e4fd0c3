use egui::{Color32, CursorIcon, Id, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2};

/// Diameter of the circular resize affordance.
pub const HANDLE_SIZE: f32 = 15.0;

/// Fill colors matching the element the handle belongs to.
pub const TREE_HANDLE_COLOR: Color32 = Color32::from_rgb(0x4c, 0xaf, 0x50);
pub const ORNAMENT_HANDLE_COLOR: Color32 = Color32::from_rgb(0xff, 0x6b, 0x6b);

/// The single bottom-right resize affordance drawn on the selected element
/// or tree.
pub struct ResizeHandle {
    center: Pos2,
    color: Color32,
}

impl ResizeHandle {
    pub fn new(center: Pos2, color: Color32) -> Self {
        Self { center, color }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, Vec2::splat(HANDLE_SIZE))
    }

    /// Draw the handle and return its interaction response.
    pub fn show(&self, ui: &mut Ui, id_salt: impl std::hash::Hash) -> Response {
        let rect = self.rect();
        let radius = HANDLE_SIZE / 2.0;

        ui.painter().circle_filled(self.center, radius, self.color);
        ui.painter()
            .circle_stroke(self.center, radius, Stroke::new(2.0, Color32::WHITE));

        ui.interact(rect, Id::new(("resize_handle", id_salt)), Sense::drag())
            .on_hover_cursor(CursorIcon::ResizeNwSe)
    }
}
