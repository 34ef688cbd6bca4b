//! Shared color constants for the UI.

use egui::Color32;

/// Confirmation text such as "Copied!".
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

/// Validation errors and failure notices.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Fallback notices that still succeeded.
pub const COLOR_AMBER: Color32 = Color32::from_rgb(255, 193, 7);

/// Primary action buttons.
pub const COLOR_BLUE: Color32 = Color32::from_rgb(13, 110, 253);
