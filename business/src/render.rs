//! QR rendering.
//!
//! The rest of the crate only sees the [`Renderer`] capability and the
//! opaque [`RenderedSurface`] it produces. [`QrRenderer`] is the production
//! implementation backed by the `qrcode` and `image` crates.

use std::io::Cursor;

use image::{ImageBuffer, ImageFormat, Rgba};
use log::debug;
use thiserror::Error;

/// Quiet zone width, in modules, added when a margin is requested.
pub const QUIET_ZONE_MODULES: usize = 4;

/// Logical edge length of generated codes.
pub const DEFAULT_QR_SIZE: u32 = 200;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Render size must be greater than zero")]
    EmptySurface,
    #[error("QR encoding failed: {0}")]
    Encode(String),
    #[error("Render size {size} is smaller than the {modules} modules the code needs")]
    TooSmall { modules: usize, size: u32 },
    #[error("PNG serialization failed: {0}")]
    Png(String),
}

/// Error correction level of the QR symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EcLevel {
    L,
    M,
    Q,
    #[default]
    H,
}

impl From<EcLevel> for qrcode::EcLevel {
    fn from(level: EcLevel) -> Self {
        match level {
            EcLevel::L => Self::L,
            EcLevel::M => Self::M,
            EcLevel::Q => Self::Q,
            EcLevel::H => Self::H,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    const fn rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }
}

/// Parameters handed to the renderer.
///
/// The defaults are what the app always uses: 200px, level H, black on
/// white, no quiet zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub size: u32,
    pub level: EcLevel,
    pub background: Rgb,
    pub foreground: Rgb,
    pub include_margin: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_QR_SIZE,
            level: EcLevel::H,
            background: Rgb::WHITE,
            foreground: Rgb::BLACK,
            include_margin: false,
        }
    }
}

impl RenderOptions {
    pub fn with_size(size: u32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }
}

/// A rendered code as straight RGBA8 pixels.
///
/// Produced once per generate and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSurface {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl RenderedSurface {
    /// Wraps an RGBA buffer, checking that its length matches the dimensions.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (expected == rgba.len()).then_some(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.rgba.get(offset..offset + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Serializes the surface to a PNG byte stream.
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let img: ImageBuffer<Rgba<u8>, &[u8]> =
            ImageBuffer::from_raw(self.width, self.height, self.rgba.as_slice())
                .ok_or(RenderError::EmptySurface)?;

        let mut cursor = Cursor::new(Vec::new());
        img.write_to(&mut cursor, ImageFormat::Png)
            .map_err(|e| RenderError::Png(e.to_string()))?;

        Ok(cursor.into_inner())
    }
}

/// Turns a text value into a raster surface.
pub trait Renderer {
    fn render(&self, value: &str, options: &RenderOptions) -> Result<RenderedSurface, RenderError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct QrRenderer;

impl Renderer for QrRenderer {
    fn render(&self, value: &str, options: &RenderOptions) -> Result<RenderedSurface, RenderError> {
        if options.size == 0 {
            return Err(RenderError::EmptySurface);
        }

        let code = qrcode::QrCode::with_error_correction_level(value.as_bytes(), options.level.into())
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        let modules = code.width();
        let colors = code.to_colors();

        let quiet = if options.include_margin {
            QUIET_ZONE_MODULES
        } else {
            0
        };
        let cells = modules + quiet * 2;
        let size = options.size as usize;
        // Below one pixel per module the sampling drops whole modules.
        if size < cells {
            return Err(RenderError::TooSmall {
                modules: cells,
                size: options.size,
            });
        }

        debug!(
            "Render qr: version={:?} modules={modules} cells={cells} size={size}",
            code.version()
        );

        let light = options.background.rgba();
        let dark = options.foreground.rgba();
        let mut rgba = Vec::with_capacity(size * size * 4);

        // Each pixel samples the cell it falls into, so the surface is exactly
        // `size` wide even when `size` is not a multiple of `cells`.
        for py in 0..size {
            let cy = py * cells / size;
            for px in 0..size {
                let cx = px * cells / size;
                let is_dark = cx >= quiet
                    && cy >= quiet
                    && cx < quiet + modules
                    && cy < quiet + modules
                    && colors[(cy - quiet) * modules + (cx - quiet)] == qrcode::Color::Dark;
                rgba.extend_from_slice(if is_dark { &dark } else { &light });
            }
        }

        RenderedSurface::from_rgba(options.size, options.size, rgba).ok_or(RenderError::EmptySurface)
    }
}
