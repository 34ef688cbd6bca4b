//! Draws a code into the terminal with half-block characters.

use anyhow::{Context as _, Result};
use qrcode::QrCode;
use qrcode::render::unicode::Dense1x2;
use qrgen_business::EcLevel;

/// Renders `data` as text, two modules per character row, with a quiet zone.
///
/// Colours are inverted so the code reads correctly on dark terminals.
pub fn render_terminal(data: &str, level: EcLevel) -> Result<String> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), level.into())
        .context("Failed to encode QR code for the terminal")?;
    Ok(code
        .render::<Dense1x2>()
        .dark_color(Dense1x2::Light)
        .light_color(Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}
