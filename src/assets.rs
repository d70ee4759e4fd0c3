use std::collections::HashMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use log::warn;

use crate::element::ImageSource;

/// Resolve an image reference to raw encoded bytes.
///
/// `data:` URIs decode in place; local paths read from disk; remote URLs are
/// collaborator territory and resolve to nothing (the renderer falls back to
/// a placeholder).
pub fn resolve_image_bytes(src: &ImageSource) -> Option<Vec<u8>> {
    if src.is_data_uri() {
        let encoded = src.as_str().split(";base64,").nth(1)?;
        return BASE64.decode(encoded).ok();
    }
    if src.is_remote() {
        return None;
    }
    std::fs::read(src.as_str()).ok()
}

/// Encode image bytes as a self-contained `data:` URI, the form uploaded
/// ornaments travel in so saved designs stay portable.
pub fn to_data_uri(mime: &str, bytes: &[u8]) -> ImageSource {
    ImageSource::new(format!("data:{mime};base64,{}", BASE64.encode(bytes)))
}

/// Decoded-texture cache keyed by image source. Failures are cached too so a
/// broken source logs once instead of once per frame.
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<String, Option<TextureHandle>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, ctx: &Context, src: &ImageSource) -> Option<TextureHandle> {
        if let Some(cached) = self.textures.get(src.as_str()) {
            return cached.clone();
        }
        let loaded = Self::load(ctx, src);
        if loaded.is_none() {
            warn!("could not load image {}", src.label());
        }
        self.textures.insert(src.as_str().to_owned(), loaded.clone());
        loaded
    }

    fn load(ctx: &Context, src: &ImageSource) -> Option<TextureHandle> {
        let bytes = resolve_image_bytes(src)?;
        let decoded = image::load_from_memory(&bytes).ok()?;
        let rgba = decoded.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let color_image = ColorImage::from_rgba_unmultiplied(size, rgba.as_flat_samples().as_slice());
        Some(ctx.load_texture(src.label().to_owned(), color_image, TextureOptions::LINEAR))
    }

    /// Upload raw PNG bytes directly (gallery thumbnails), keyed by id.
    pub fn get_png(&mut self, ctx: &Context, key: &str, png: &[u8]) -> Option<TextureHandle> {
        if let Some(cached) = self.textures.get(key) {
            return cached.clone();
        }
        let loaded = image::load_from_memory(png).ok().map(|decoded| {
            let rgba = decoded.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            let color_image =
                ColorImage::from_rgba_unmultiplied(size, rgba.as_flat_samples().as_slice());
            ctx.load_texture(key.to_owned(), color_image, TextureOptions::LINEAR)
        });
        self.textures.insert(key.to_owned(), loaded.clone());
        loaded
    }

    pub fn forget(&mut self, key: &str) {
        self.textures.remove(key);
    }
}
