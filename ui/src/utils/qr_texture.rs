//! Uploading rendered codes to egui.

use std::sync::Arc;

use egui::{ColorImage, TextureHandle, TextureOptions};
use qrgen_business::RenderedSurface;

/// Converts a rendered surface into an egui image, pixel for pixel.
pub fn surface_to_image(surface: &RenderedSurface) -> ColorImage {
    ColorImage::from_rgba_unmultiplied(
        [surface.width() as usize, surface.height() as usize],
        surface.rgba(),
    )
}

/// Texture for the current result, re-uploaded only when the surface changes.
#[derive(Default)]
pub struct QrTextureCache {
    entry: Option<(Arc<RenderedSurface>, TextureHandle)>,
}

impl QrTextureCache {
    pub fn get_or_load(
        &mut self,
        ctx: &egui::Context,
        surface: &Arc<RenderedSurface>,
    ) -> &TextureHandle {
        let entry = match self.entry.take() {
            Some((cached, texture)) if Arc::ptr_eq(&cached, surface) => (cached, texture),
            _ => {
                let texture = ctx.load_texture(
                    "qr_code_display",
                    surface_to_image(surface),
                    TextureOptions::NEAREST,
                );
                (surface.clone(), texture)
            }
        };
        &self.entry.insert(entry).1
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.entry.is_some()
    }
}
