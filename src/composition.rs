use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::element::{self, ElementId, ImageSource, PlacedElement};

/// Background of a composition: the raw paint expression applied to the
/// canvas plus the symbolic tag that identifies which named style produced
/// it. The tag is what the gallery uses to redraw a design's backdrop
/// consistently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Background {
    pub paint: String,
    pub tag: String,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            paint: "white".to_owned(),
            tag: String::new(),
        }
    }
}

/// How a paint expression resolves for drawing and thumbnail compositing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundFill {
    Solid(Color32),
    /// Two-stop vertical gradient, top color first.
    Vertical(Color32, Color32),
}

impl Background {
    /// A solid-color background; the tag records the color so the gallery
    /// can rebuild the swatch.
    pub fn solid(color: &str) -> Self {
        Self {
            paint: color.to_owned(),
            tag: format!("solid-{color}"),
        }
    }

    pub fn preset(tag: &str, paint: &str) -> Self {
        Self {
            paint: paint.to_owned(),
            tag: tag.to_owned(),
        }
    }

    /// Resolve the paint expression into something drawable.
    ///
    /// Gradient expressions keep their first two color stops as a vertical
    /// gradient; repeating and radial patterns degrade to their base color,
    /// the same approximation the thumbnail style has always used.
    pub fn fill(&self) -> BackgroundFill {
        let paint = self.paint.trim();
        if paint.contains("linear-gradient") && !paint.contains("repeating-") {
            let mut colors = hex_colors(paint);
            let top = colors.next();
            let bottom = colors.next();
            return match (top, bottom) {
                (Some(top), Some(bottom)) => BackgroundFill::Vertical(top, bottom),
                (Some(only), None) => BackgroundFill::Solid(only),
                _ => BackgroundFill::Solid(Color32::WHITE),
            };
        }
        if paint.contains("gradient") {
            let base = hex_colors(paint).next().unwrap_or(Color32::WHITE);
            return BackgroundFill::Solid(base);
        }
        BackgroundFill::Solid(parse_css_color(paint).unwrap_or(Color32::WHITE))
    }
}

/// Scan a paint expression for `#rrggbb` color stops.
fn hex_colors(paint: &str) -> impl Iterator<Item = Color32> + '_ {
    paint.match_indices('#').filter_map(move |(idx, _)| {
        let candidate = paint.get(idx..idx + 7)?;
        parse_css_color(candidate)
    })
}

/// Parse a CSS-ish color: `#rgb`, `#rrggbb`, `rgb(r, g, b)`, or one of the
/// named colors the presets use.
pub fn parse_css_color(value: &str) -> Option<Color32> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return match hex.len() {
            3 => {
                let chars: Vec<u8> = hex
                    .chars()
                    .map(|c| c.to_digit(16).map(|d| (d * 17) as u8))
                    .collect::<Option<_>>()?;
                Some(Color32::from_rgb(chars[0], chars[1], chars[2]))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Color32::from_rgb(r, g, b))
            }
            _ => None,
        };
    }
    if let Some(body) = value.strip_prefix("rgb(").and_then(|v| v.strip_suffix(')')) {
        let mut parts = body.split(',').map(|p| p.trim().parse::<u8>());
        let r = parts.next()?.ok()?;
        let g = parts.next()?.ok()?;
        let b = parts.next()?.ok()?;
        return Some(Color32::from_rgb(r, g, b));
    }
    match value.to_ascii_lowercase().as_str() {
        "white" => Some(Color32::WHITE),
        "black" => Some(Color32::BLACK),
        "red" => Some(Color32::from_rgb(255, 0, 0)),
        "green" => Some(Color32::from_rgb(0, 128, 0)),
        "blue" => Some(Color32::from_rgb(0, 0, 255)),
        "gold" => Some(Color32::from_rgb(255, 215, 0)),
        "ivory" => Some(Color32::from_rgb(255, 255, 240)),
        _ => None,
    }
}

/// Named background styles offered in the side panel.
pub const BACKGROUND_PRESETS: &[(&str, &str, &str)] = &[
    (
        "Snowfall",
        "pattern-1",
        "linear-gradient(180deg, #e8f4f8 0%, #d6eaf8 100%)",
    ),
    (
        "Midnight",
        "pattern-2",
        "linear-gradient(180deg, #1a237e 0%, #4a148c 100%)",
    ),
    (
        "Candy Cane",
        "christmas-red",
        "repeating-linear-gradient(135deg, #c41e3a 0%, #c41e3a 10%, #ffffff 10%, #ffffff 20%)",
    ),
    (
        "Evergreen",
        "christmas-green",
        "linear-gradient(180deg, #1b5e20 0%, #388e3c 100%)",
    ),
    ("Plain", "plain-bg", "white"),
];

/// Solid swatches; picking one yields a `solid-<color>` tag.
pub const SOLID_SWATCHES: &[&str] = &[
    "#ffffff", "#fffff0", "#fde2e4", "#d0f4de", "#cddafd", "#1a1a2e",
];

/// The tree image on the canvas. Draggable and resizable like an element,
/// but structurally distinct: at most one exists, it stacks below all
/// elements, and it is never clamped to the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeState {
    pub src: ImageSource,
    pub pos: Pos2,
    pub size: Vec2,
}

impl TreeState {
    /// A tree at its default size, centered on the canvas.
    pub fn centered(src: ImageSource, canvas: Vec2) -> Self {
        let size = Vec2::splat(element::DEFAULT_TREE_SIZE);
        Self {
            src,
            pos: Pos2::new((canvas.x - size.x) / 2.0, (canvas.y - size.y) / 2.0),
            size,
        }
    }

    /// Set the size, flooring both axes at the tree minimum. The controller
    /// keeps the tree square; the floor lives here.
    pub fn set_size(&mut self, size: Vec2) {
        self.size = Vec2::new(
            size.x.max(element::MIN_TREE_SIZE),
            size.y.max(element::MIN_TREE_SIZE),
        );
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.pos, self.size)
    }
}

/// The full in-memory description of one design: background, optional tree,
/// and the ordered element collection. Insertion order is the default
/// stacking; ids are unique.
///
/// `Composition` is plain serializable data — it doubles as the history
/// snapshot value, so restoring an earlier state is a single assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Composition {
    pub background: Background,
    pub tree: Option<TreeState>,
    elements: Vec<PlacedElement>,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[PlacedElement] {
        &self.elements
    }

    pub fn add(&mut self, element: PlacedElement) -> ElementId {
        let id = element.id();
        debug_assert!(
            self.element(id).is_none(),
            "duplicate element id {id} in composition"
        );
        self.elements.push(element);
        id
    }

    /// Remove an element by id; returns whether anything was removed.
    pub fn remove(&mut self, id: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.id() != id);
        self.elements.len() != before
    }

    pub fn element(&self, id: ElementId) -> Option<&PlacedElement> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut PlacedElement> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Remove every element and reset the background to the default. The
    /// tree stays.
    pub fn clear_decorations(&mut self) {
        self.elements.clear();
        self.background = Background::default();
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }
}
