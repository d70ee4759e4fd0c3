use egui::{Color32, Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::composition::{Background, Composition, TreeState, parse_css_color};
use crate::element::{self, ImageSource, Ornament, PlacedElement, Text};

/// One persisted ornament. Position and size travel as pixel-suffixed
/// strings (`"120px"`) so a DOM-backed viewer can reapply them verbatim; we
/// parse them back to numbers at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrnamentRecord {
    pub src: String,
    #[serde(with = "px")]
    pub left: f32,
    #[serde(with = "px")]
    pub top: f32,
    #[serde(with = "px")]
    pub width: f32,
    #[serde(with = "px")]
    pub height: f32,
    #[serde(rename = "zIndex", with = "zindex", default = "default_z")]
    pub z_index: i32,
}

/// One persisted text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRecord {
    pub content: String,
    #[serde(with = "px")]
    pub left: f32,
    #[serde(with = "px")]
    pub top: f32,
    #[serde(rename = "fontFamily")]
    pub font_family: String,
    #[serde(rename = "fontSize", with = "px")]
    pub font_size: f32,
    pub color: String,
    #[serde(rename = "zIndex", with = "zindex", default = "default_z")]
    pub z_index: i32,
}

/// The wire shape of one saved design, produced once at save time from the
/// live composition. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignPayload {
    pub background: String,
    #[serde(rename = "backgroundClass")]
    pub background_class: String,
    pub tree: Option<String>,
    pub ornaments: Vec<OrnamentRecord>,
    pub texts: Vec<TextRecord>,
    /// Milliseconds since the UNIX epoch.
    pub timestamp: u64,
}

fn default_z() -> i32 {
    element::BASE_Z
}

impl DesignPayload {
    pub fn from_composition(composition: &Composition, timestamp: u64) -> Self {
        let mut ornaments = Vec::new();
        let mut texts = Vec::new();
        for el in composition.elements() {
            match el {
                PlacedElement::Ornament(o) => ornaments.push(OrnamentRecord {
                    src: o.src().as_str().to_owned(),
                    left: o.pos().x,
                    top: o.pos().y,
                    width: o.size().x,
                    height: o.size().y,
                    z_index: o.z(),
                }),
                PlacedElement::Text(t) => texts.push(TextRecord {
                    content: t.content().to_owned(),
                    left: t.pos().x,
                    top: t.pos().y,
                    font_family: t.font_family().to_owned(),
                    font_size: t.font_size(),
                    color: color_to_css(t.color()),
                    z_index: t.z(),
                }),
            }
        }
        Self {
            background: composition.background.paint.clone(),
            background_class: composition.background.tag.clone(),
            // Only the image reference is stored for the tree; the viewer
            // lays it out at its default geometry.
            tree: composition.tree.as_ref().map(|t| t.src.as_str().to_owned()),
            ornaments,
            texts,
            timestamp,
        }
    }

    /// Rebuild a composition for rendering. `canvas` sizes the default tree
    /// placement.
    pub fn to_composition(&self, canvas: Vec2) -> Composition {
        let mut composition = Composition::new();
        composition.background = Background {
            paint: self.background.clone(),
            tag: self.background_class.clone(),
        };
        composition.tree = self
            .tree
            .as_ref()
            .map(|src| TreeState::centered(ImageSource::new(src.clone()), canvas));
        for record in &self.ornaments {
            composition.add(PlacedElement::Ornament(Ornament::restored(
                ImageSource::new(record.src.clone()),
                Pos2::new(record.left, record.top),
                Vec2::new(record.width, record.height),
                record.z_index,
            )));
        }
        for record in &self.texts {
            composition.add(PlacedElement::Text(Text::restored(
                record.content.clone(),
                record.font_family.clone(),
                record.font_size,
                parse_css_color(&record.color).unwrap_or(Color32::BLACK),
                Pos2::new(record.left, record.top),
                record.z_index,
            )));
        }
        composition
    }
}

fn color_to_css(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Pixel-suffixed string encoding for lengths. Lenient on the way in:
/// accepts `"150px"`, `"150"`, and bare numbers.
mod px {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{value}px"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        struct PxVisitor;

        impl Visitor<'_> for PxVisitor {
            type Value = f32;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a pixel length like \"150px\" or a number")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<f32, E> {
                value
                    .trim()
                    .trim_end_matches("px")
                    .trim()
                    .parse()
                    .map_err(|_| E::custom(format!("invalid pixel length: {value:?}")))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<f32, E> {
                Ok(value as f32)
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<f32, E> {
                Ok(value as f32)
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<f32, E> {
                Ok(value as f32)
            }
        }

        deserializer.deserialize_any(PxVisitor)
    }
}

/// Stacking index. Serialized as an integer; accepts the stringly form a
/// DOM-serialized design carries.
mod zindex {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
        struct ZVisitor;

        impl Visitor<'_> for ZVisitor {
            type Value = i32;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a stacking index as integer or string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<i32, E> {
                value
                    .trim()
                    .parse()
                    .map_err(|_| E::custom(format!("invalid stacking index: {value:?}")))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<i32, E> {
                Ok(value as i32)
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<i32, E> {
                Ok(value as i32)
            }
        }

        deserializer.deserialize_any(ZVisitor)
    }
}
