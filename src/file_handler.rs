use eframe::egui;
use log::{info, warn};

use crate::assets::to_data_uri;
use crate::element::ImageSource;

/// An image the user dropped into the app, available in the uploads palette.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub name: String,
    /// Re-encoded as a `data:` URI so saved designs stay self-contained.
    pub src: ImageSource,
}

/// Collects image files dropped onto the window and turns them into palette
/// entries.
#[derive(Default)]
pub struct FileHandler {
    processed_files: Vec<String>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest any newly dropped files, returning the uploads they produced.
    pub fn take_dropped_images(&mut self, ctx: &egui::Context) -> Vec<UploadedImage> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let mut uploads = Vec::new();

        for file in &dropped {
            let file_name = if let Some(path) = &file.path {
                path.display().to_string()
            } else if !file.name.is_empty() {
                file.name.clone()
            } else {
                "unknown".to_owned()
            };

            if self.processed_files.contains(&file_name) {
                continue;
            }

            if !Self::is_image_file(file) {
                warn!("dropped file is not a supported image: {file_name}");
                continue;
            }

            if let Some(upload) = Self::ingest(file, &file_name) {
                uploads.push(upload);
                self.processed_files.push(file_name);
            }
        }

        uploads
    }

    fn is_image_file(file: &egui::DroppedFile) -> bool {
        if !file.mime.is_empty() {
            file.mime.starts_with("image/")
        } else if let Some(path) = &file.path {
            path.extension().is_some_and(|ext| {
                let ext = ext.to_string_lossy().to_lowercase();
                matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
            })
        } else {
            false
        }
    }

    fn ingest(file: &egui::DroppedFile, file_name: &str) -> Option<UploadedImage> {
        let bytes: Vec<u8> = if let Some(bytes) = &file.bytes {
            bytes.to_vec()
        } else if let Some(path) = &file.path {
            #[cfg(not(target_arch = "wasm32"))]
            {
                match std::fs::read(path) {
                    Ok(bytes) => bytes,
                    Err(err) => {
                        warn!("failed to read {}: {err}", path.display());
                        return None;
                    }
                }
            }
            #[cfg(target_arch = "wasm32")]
            {
                warn!("file path access not supported on wasm: {file_name}");
                return None;
            }
        } else {
            warn!("dropped file has no accessible data: {file_name}");
            return None;
        };

        // Verify the bytes decode before offering them as an ornament.
        let format = match image::guess_format(&bytes) {
            Ok(format) => format,
            Err(err) => {
                warn!("could not identify image format for {file_name}: {err}");
                return None;
            }
        };
        if image::load_from_memory(&bytes).is_err() {
            warn!("failed to decode dropped image {file_name}");
            return None;
        }

        let mime = format.to_mime_type();
        info!("ingested upload {file_name} ({} bytes)", bytes.len());
        Some(UploadedImage {
            name: file_name.to_owned(),
            src: to_data_uri(mime, &bytes),
        })
    }

    /// Dim the window and list the files while a drag hovers over it.
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order};

        if !ctx.input(|i| i.raw.hovered_files.is_empty()) {
            let text = ctx.input(|i| {
                let mut text = "Drop to add to your ornaments:\n".to_owned();
                for file in &i.raw.hovered_files {
                    if let Some(path) = &file.path {
                        text += &format!("\n{}", path.display());
                    } else {
                        text += "\n(image)";
                    }
                }
                text
            });

            let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
            let screen_rect = ctx.screen_rect();
            painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
            painter.text(
                screen_rect.center(),
                Align2::CENTER_CENTER,
                text,
                egui::TextStyle::Heading.resolve(&ctx.style()),
                Color32::WHITE,
            );
        }
    }
}
