use egui::Vec2;
use log::{info, warn};

use crate::error::ImportError;
use crate::scene::DecodedImage;

/// Decode raw file bytes into an RGBA bitmap.
///
/// Format support is whatever the `image` crate's decoder handles; no extra
/// validation is performed here.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, ImportError> {
    if bytes.is_empty() {
        return Err(ImportError::Empty);
    }
    let decoded = image::load_from_memory(bytes)?;
    let rgba = decoded.to_rgba8();
    let size = Vec2::new(rgba.width() as f32, rgba.height() as f32);
    Ok(DecodedImage {
        rgba: rgba.into_raw(),
        size,
    })
}

/// Collects image files dropped onto the window.
pub struct FileImporter {
    processed: Vec<String>,
}

impl Default for FileImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl FileImporter {
    pub fn new() -> Self {
        Self {
            processed: Vec::new(),
        }
    }

    /// Pick up any files dropped this frame and try to decode each one.
    ///
    /// Returns one `(file name, result)` pair per new file, in drop order; if
    /// several files arrive at once each becomes its own import and the last
    /// one ends up selected.
    pub fn poll(&mut self, ctx: &egui::Context) -> Vec<(String, Result<DecodedImage, ImportError>)> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let mut results = Vec::new();

        for file in &dropped {
            let file_name = if let Some(path) = &file.path {
                path.display().to_string()
            } else if !file.name.is_empty() {
                file.name.clone()
            } else {
                "unknown".to_owned()
            };

            if self.processed.contains(&file_name) {
                continue;
            }
            self.processed.push(file_name.clone());

            if !is_image_file(file) {
                warn!("dropped file is not a supported type: {}", file_name);
                results.push((file_name.clone(), Err(ImportError::UnsupportedType(file_name))));
                continue;
            }

            results.push((file_name.clone(), load_dropped_file(file, &file_name)));
        }

        if !results.is_empty() {
            self.processed.clear();
        }
        results
    }

    /// Dim the window and list hovered files while a drag is in progress.
    pub fn preview_hovered_files(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order, TextStyle};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Dropping files:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                } else {
                    text += "\n(path not available)";
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        if let Some(font) = ctx.style().text_styles.get(&TextStyle::Heading).cloned() {
            painter.text(
                screen_rect.center(),
                Align2::CENTER_CENTER,
                text,
                font,
                Color32::WHITE,
            );
        }
    }
}

fn load_dropped_file(
    file: &egui::DroppedFile,
    file_name: &str,
) -> Result<DecodedImage, ImportError> {
    if let Some(bytes) = &file.bytes {
        info!("importing image from memory: {} ({} bytes)", file_name, bytes.len());
        return decode_image(bytes);
    }

    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = &file.path {
        info!("importing image from path: {}", path.display());
        let bytes = std::fs::read(path)?;
        return decode_image(&bytes);
    }

    Err(ImportError::Empty)
}

/// Check for an image by MIME type, falling back to the file extension.
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        file.mime.starts_with("image/")
    } else if let Some(path) = &file.path {
        match path.extension() {
            Some(ext) => {
                let ext = ext.to_string_lossy().to_lowercase();
                matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
            }
            None => false,
        }
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_is_rejected() {
        assert!(matches!(decode_image(&[]), Err(ImportError::Empty)));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let result = decode_image(&[0xde, 0xad, 0xbe, 0xef]);
        assert!(matches!(result, Err(ImportError::Decode(_))));
    }

    #[test]
    fn valid_png_round_trips_dimensions() {
        let mut bytes = Vec::new();
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.size, Vec2::new(3.0, 2.0));
        assert_eq!(decoded.rgba.len(), 3 * 2 * 4);
    }
}
