//! Core of the QR generator: input validation, rendering and the
//! download / copy / share pipeline, independent of any UI or platform.

mod capability;
mod clock;
mod config;
mod export;
mod form;
mod generator;
mod payload;
mod render;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use capability::{
    Clipboard, ClipboardError, FileSaver, Notifier, PNG_MIME, SaveError, ShareError, ShareFile,
    SharePayload, Sharer,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, ConfigError, ENV_PREFIX, MAX_QR_SIZE, MIN_QR_SIZE};
pub use export::{
    Capabilities, DEFAULT_COPY_FEEDBACK, DEFAULT_DOWNLOAD_FILENAME, DownloadOutcome,
    ExportPipeline, FallbackReason, Notice, ShareOutcome, ShareState,
};
pub use form::{FormEvent, FormKey, InputForm};
pub use generator::{QrGenerator, QrResult, SubmitOutcome};
pub use payload::{DISPLAY_URL_MAX_CHARS, FALLBACK_SHARE_TITLE, GeneratePayload, ValidationError};
pub use render::{
    DEFAULT_QR_SIZE, EcLevel, QUIET_ZONE_MODULES, QrRenderer, RenderError, RenderOptions,
    RenderedSurface, Renderer, Rgb,
};
