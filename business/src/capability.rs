//! Platform capabilities consumed by the export pipeline.
//!
//! The pipeline never reaches for a global clipboard, share sheet or file
//! system. Each is injected through one of these traits so that the
//! branching in [`crate::ExportPipeline`] can be driven by mocks in tests and
//! by `qrgen-platform` in the binaries.

use std::future::Future;

use thiserror::Error;

use crate::export::Notice;

/// MIME type of the exported image.
pub const PNG_MIME: &str = "image/png";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("Clipboard is not available")]
    Unavailable,
    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// The user dismissed the share surface.
    #[error("Share was cancelled by the user")]
    Aborted,
    #[error("Share failed: {0}")]
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("Save was cancelled")]
    Cancelled,
    #[error("Failed to save {filename}: {reason}")]
    Io { filename: String, reason: String },
}

/// A file attached to a share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// What gets handed to the native share surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: Option<String>,
    pub files: Vec<ShareFile>,
}

impl SharePayload {
    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }
}

/// Writes text to the system clipboard.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>> + Send;
}

/// Native share surface, which may be missing entirely on a platform.
pub trait Sharer: Send + Sync {
    /// Whether a share surface exists at all.
    fn is_available(&self) -> bool;

    /// Whether the platform accepts this particular payload.
    fn can_share(&self, payload: &SharePayload) -> bool;

    fn share(&self, payload: SharePayload) -> impl Future<Output = Result<(), ShareError>> + Send;
}

/// Hands a byte stream to the user under a suggested filename.
pub trait FileSaver: Send + Sync {
    fn save(&self, bytes: &[u8], filename: &str) -> Result<(), SaveError>;
}

/// Modal-style user-visible alerts.
pub trait Notifier: Send + Sync {
    fn alert(&self, notice: Notice);
}
