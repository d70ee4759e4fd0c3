use egui::{
    Align2, Color32, FontFamily, FontId, Painter, Pos2, Rect, Vec2,
    epaint::{Mesh, Vertex, WHITE_UV},
};

use crate::assets::TextureCache;
use crate::composition::{BackgroundFill, Composition};
use crate::element::{ElementId, ImageSource, PlacedElement};

/// Whether the rendered canvas gets interactive bindings attached. The draw
/// list is identical either way; only the editor canvas layers hit areas and
/// the resize affordance on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interactivity {
    Editable,
    ReadOnly,
}

/// One entry of the ordered draw list, in composition coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Tree {
        src: ImageSource,
        rect: Rect,
    },
    Ornament {
        id: ElementId,
        src: ImageSource,
        rect: Rect,
    },
    Text {
        id: ElementId,
        content: String,
        font_family: String,
        font_size: f32,
        color: Color32,
        pos: Pos2,
    },
}

/// The resolved draw order for a composition: background fill, then the
/// tree, then elements sorted by stacking (insertion order breaks ties).
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub fill: BackgroundFill,
    pub nodes: Vec<SceneNode>,
}

/// Pure reconstruction of the draw list from a composition. Used identically
/// for the live editor canvas, post-undo redraws, and the read-only shared
/// view.
pub fn scene(composition: &Composition) -> Scene {
    let mut nodes = Vec::with_capacity(composition.len() + 1);

    if let Some(tree) = &composition.tree {
        nodes.push(SceneNode::Tree {
            src: tree.src.clone(),
            rect: tree.rect(),
        });
    }

    let elements = composition.elements();
    let mut order: Vec<usize> = (0..elements.len()).collect();
    order.sort_by_key(|&i| elements[i].z());
    for i in order {
        match &elements[i] {
            PlacedElement::Ornament(o) => nodes.push(SceneNode::Ornament {
                id: o.id(),
                src: o.src().clone(),
                rect: o.rect(),
            }),
            PlacedElement::Text(t) => nodes.push(SceneNode::Text {
                id: t.id(),
                content: t.content().to_owned(),
                font_family: t.font_family().to_owned(),
                font_size: t.font_size(),
                color: t.color(),
                pos: t.pos(),
            }),
        }
    }

    Scene {
        fill: composition.background.fill(),
        nodes,
    }
}

/// Map a stored font family name onto the embedded egui families.
pub fn font_id(family: &str, size: f32) -> FontId {
    let family = family.to_ascii_lowercase();
    if family.contains("courier") || family.contains("mono") {
        FontId::new(size, FontFamily::Monospace)
    } else {
        FontId::new(size, FontFamily::Proportional)
    }
}

/// Draw a scene into the given canvas rect. `skip_text` hides the text
/// element currently covered by the in-place edit overlay.
pub fn paint(
    scene: &Scene,
    painter: &Painter,
    canvas_rect: Rect,
    textures: &mut TextureCache,
    ctx: &egui::Context,
    skip_text: Option<ElementId>,
) {
    paint_fill(scene.fill, painter, canvas_rect);

    let origin = canvas_rect.min.to_vec2();
    for node in &scene.nodes {
        match node {
            SceneNode::Tree { src, rect } | SceneNode::Ornament { src, rect, .. } => {
                let rect = rect.translate(origin);
                match textures.get(ctx, src) {
                    Some(texture) => {
                        painter.image(
                            texture.id(),
                            rect,
                            Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                            Color32::WHITE,
                        );
                    }
                    None => paint_placeholder(painter, rect),
                }
            }
            SceneNode::Text {
                id,
                content,
                font_family,
                font_size,
                color,
                pos,
            } => {
                if skip_text == Some(*id) {
                    continue;
                }
                let pos = *pos + origin;
                let font = font_id(font_family, *font_size);
                // Soft drop shadow behind the label, like the canvas text
                // style the payload carries.
                painter.text(
                    pos + Vec2::splat(1.0),
                    Align2::LEFT_TOP,
                    content,
                    font.clone(),
                    Color32::from_black_alpha(80),
                );
                painter.text(pos, Align2::LEFT_TOP, content, font, *color);
            }
        }
    }
}

fn paint_fill(fill: BackgroundFill, painter: &Painter, rect: Rect) {
    match fill {
        BackgroundFill::Solid(color) => {
            painter.rect_filled(rect, 0.0, color);
        }
        BackgroundFill::Vertical(top, bottom) => {
            let mut mesh = Mesh::default();
            let idx = mesh.vertices.len() as u32;
            mesh.vertices.push(vertex(rect.left_top(), top));
            mesh.vertices.push(vertex(rect.right_top(), top));
            mesh.vertices.push(vertex(rect.right_bottom(), bottom));
            mesh.vertices.push(vertex(rect.left_bottom(), bottom));
            mesh.add_triangle(idx, idx + 1, idx + 2);
            mesh.add_triangle(idx, idx + 2, idx + 3);
            painter.add(mesh);
        }
    }
}

fn vertex(pos: Pos2, color: Color32) -> Vertex {
    Vertex {
        pos,
        uv: WHITE_UV,
        color,
    }
}

/// Gray box drawn where an image resource has not resolved (yet).
fn paint_placeholder(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_gray(200));
    painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, Color32::from_gray(100)));
}
