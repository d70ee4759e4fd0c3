use std::io::Cursor;

use egui::Vec2;
use image::{Rgba, RgbaImage, imageops};
use log::warn;
use thiserror::Error;

use crate::assets::resolve_image_bytes;
use crate::composition::{BackgroundFill, Composition};
use crate::render::{SceneNode, scene};

/// Thumbnails are captured at half the canvas resolution.
pub const THUMBNAIL_SCALE: f32 = 0.5;

#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("canvas has no area to capture")]
    EmptyCanvas,

    #[error("failed to encode thumbnail: {0}")]
    Encode(#[from] image::ImageError),
}

/// Rasterize the composition into a PNG: background fill, then tree and
/// ornaments composited in the same z-order the scene uses.
///
/// Sources that do not resolve are skipped with a warning rather than
/// failing the save. Text labels belong to the UI layer's font stack and are
/// not rasterized here.
pub fn capture_png(composition: &Composition, canvas: Vec2) -> Result<Vec<u8>, ThumbnailError> {
    let width = (canvas.x * THUMBNAIL_SCALE) as u32;
    let height = (canvas.y * THUMBNAIL_SCALE) as u32;
    if width == 0 || height == 0 {
        return Err(ThumbnailError::EmptyCanvas);
    }

    let scene = scene(composition);
    let mut target = fill_background(scene.fill, width, height);

    for node in &scene.nodes {
        let (src, rect) = match node {
            SceneNode::Tree { src, rect } | SceneNode::Ornament { src, rect, .. } => (src, rect),
            SceneNode::Text { .. } => continue,
        };
        let Some(bytes) = resolve_image_bytes(src) else {
            warn!("thumbnail: skipping unresolvable image {}", src.label());
            continue;
        };
        let Ok(decoded) = image::load_from_memory(&bytes) else {
            warn!("thumbnail: skipping undecodable image {}", src.label());
            continue;
        };
        let w = ((rect.width() * THUMBNAIL_SCALE) as u32).max(1);
        let h = ((rect.height() * THUMBNAIL_SCALE) as u32).max(1);
        let scaled = decoded.resize_exact(w, h, imageops::FilterType::Triangle);
        imageops::overlay(
            &mut target,
            &scaled,
            (rect.min.x * THUMBNAIL_SCALE) as i64,
            (rect.min.y * THUMBNAIL_SCALE) as i64,
        );
    }

    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(target)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;
    Ok(png)
}

fn fill_background(fill: BackgroundFill, width: u32, height: u32) -> RgbaImage {
    match fill {
        BackgroundFill::Solid(color) => RgbaImage::from_pixel(
            width,
            height,
            Rgba([color.r(), color.g(), color.b(), color.a()]),
        ),
        BackgroundFill::Vertical(top, bottom) => {
            RgbaImage::from_fn(width, height, |_, y| {
                let t = y as f32 / (height.saturating_sub(1)).max(1) as f32;
                Rgba([
                    lerp(top.r(), bottom.r(), t),
                    lerp(top.g(), bottom.g(), t),
                    lerp(top.b(), bottom.b(), t),
                    255,
                ])
            })
        }
    }
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round() as u8
}
