use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::TimeDelta;
use log::{debug, info, warn};

use super::notice::Notice;
use super::state::{ExportFlags, ShareState};
use crate::capability::{
    Clipboard, FileSaver, Notifier, PNG_MIME, SaveError, ShareError, ShareFile, SharePayload,
    Sharer,
};
use crate::clock::{Clock, SystemClock};
use crate::payload::GeneratePayload;
use crate::render::RenderedSurface;

pub const DEFAULT_DOWNLOAD_FILENAME: &str = "qrcode.png";

/// How long the "copied" indicator stays up after a successful copy.
pub const DEFAULT_COPY_FEEDBACK: TimeDelta = TimeDelta::milliseconds(2000);

/// The platform services an [`ExportPipeline`] runs against.
#[derive(Debug, Clone)]
pub struct Capabilities<C, S, F, N> {
    pub clipboard: C,
    pub sharer: S,
    pub saver: F,
    pub notifier: N,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved,
    /// The surface could not be turned into PNG bytes; nothing was saved.
    SerializationUnavailable,
    Cancelled,
    SaveFailed,
}

/// Why the share fell back to the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    ShareUnavailable,
    ShareFailed,
}

/// Terminal state of one [`ExportPipeline::share`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    /// The user dismissed the share surface. Nothing else happens.
    Cancelled,
    CopiedInstead(FallbackReason),
    /// Share and the clipboard fallback both failed.
    Failed,
    /// Another share was still in flight; this call did nothing.
    Busy,
}

/// Download, copy and share for one generated code.
///
/// Built once per generate from the payload and the rendered surface, both
/// of which it only reads. `share` is single-flight; `download` and
/// `copy_to_clipboard` are not guarded and may run during a share.
pub struct ExportPipeline<C, S, F, N, K = SystemClock> {
    payload: GeneratePayload,
    surface: Arc<RenderedSurface>,
    caps: Capabilities<C, S, F, N>,
    clock: K,
    filename: String,
    copy_feedback: TimeDelta,
    flags: Mutex<ExportFlags>,
}

impl<C, S, F, N> ExportPipeline<C, S, F, N, SystemClock>
where
    C: Clipboard,
    S: Sharer,
    F: FileSaver,
    N: Notifier,
{
    pub fn new(
        payload: GeneratePayload,
        surface: Arc<RenderedSurface>,
        caps: Capabilities<C, S, F, N>,
    ) -> Self {
        Self::with_clock(payload, surface, caps, SystemClock)
    }
}

impl<C, S, F, N, K> ExportPipeline<C, S, F, N, K>
where
    C: Clipboard,
    S: Sharer,
    F: FileSaver,
    N: Notifier,
    K: Clock,
{
    pub fn with_clock(
        payload: GeneratePayload,
        surface: Arc<RenderedSurface>,
        caps: Capabilities<C, S, F, N>,
        clock: K,
    ) -> Self {
        Self {
            payload,
            surface,
            caps,
            clock,
            filename: DEFAULT_DOWNLOAD_FILENAME.to_owned(),
            copy_feedback: DEFAULT_COPY_FEEDBACK,
            flags: Mutex::new(ExportFlags::default()),
        }
    }

    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    #[must_use]
    pub fn copy_feedback(mut self, window: TimeDelta) -> Self {
        self.copy_feedback = window;
        self
    }

    /// Name handed to the saver on download.
    pub fn download_filename(&self) -> &str {
        &self.filename
    }

    pub fn payload(&self) -> &GeneratePayload {
        &self.payload
    }

    pub fn surface(&self) -> &RenderedSurface {
        &self.surface
    }

    pub fn capabilities(&self) -> &Capabilities<C, S, F, N> {
        &self.caps
    }

    pub fn share_state(&self) -> ShareState {
        self.flags().snapshot(self.clock.now(), self.copy_feedback)
    }

    pub fn is_sharing(&self) -> bool {
        self.flags().sharing
    }

    pub fn copy_success(&self) -> bool {
        self.share_state().copy_success
    }

    /// Remaining time of the "copied" window, for scheduling a repaint.
    pub fn copy_feedback_left(&self) -> Option<std::time::Duration> {
        self.flags()
            .copy_feedback_left(self.clock.now(), self.copy_feedback)
            .and_then(|left| left.to_std().ok())
    }

    /// Saves the code as a PNG under the configured filename.
    pub fn download(&self) -> DownloadOutcome {
        let bytes = match self.surface.encode_png() {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Download skipped, surface could not be serialized: {e}");
                return DownloadOutcome::SerializationUnavailable;
            }
        };

        match self.caps.saver.save(&bytes, &self.filename) {
            Ok(()) => {
                info!("Saved {} ({} bytes)", self.filename, bytes.len());
                DownloadOutcome::Saved
            }
            Err(SaveError::Cancelled) => {
                debug!("Download cancelled by user");
                DownloadOutcome::Cancelled
            }
            Err(e) => {
                warn!("Download failed: {e}");
                DownloadOutcome::SaveFailed
            }
        }
    }

    /// Writes the share text to the clipboard and opens the "copied" window.
    pub async fn copy_to_clipboard(&self) -> bool {
        let text = self.payload.share_text();
        match self.caps.clipboard.write_text(&text).await {
            Ok(()) => {
                debug!("Copied {} chars to clipboard", text.chars().count());
                self.flags().copied_at = Some(self.clock.now());
                true
            }
            Err(e) => {
                warn!("Clipboard write failed: {e}");
                false
            }
        }
    }

    /// Shares through the native surface, falling back to the clipboard.
    pub async fn share(&self) -> ShareOutcome {
        let Some(_busy) = SharingGuard::acquire(&self.flags) else {
            debug!("Share already in flight, ignoring");
            return ShareOutcome::Busy;
        };

        if !self.caps.sharer.is_available() {
            info!("Native share unavailable, copying instead");
            return self.fall_back(FallbackReason::ShareUnavailable).await;
        }

        match self.share_natively().await {
            Ok(()) => {
                info!("Shared {}", self.payload.url());
                ShareOutcome::Shared
            }
            Err(ShareError::Aborted) => {
                debug!("Share dismissed by user");
                ShareOutcome::Cancelled
            }
            Err(e) => {
                warn!("{e}, copying instead");
                self.fall_back(FallbackReason::ShareFailed).await
            }
        }
    }

    async fn share_natively(&self) -> Result<(), ShareError> {
        let png = self
            .surface
            .encode_png()
            .map_err(|e| ShareError::Failed(e.to_string()))?;

        let title = self.payload.share_title().to_owned();
        let text = self.payload.share_text();

        let with_file = SharePayload {
            title: title.clone(),
            text: text.clone(),
            url: None,
            files: vec![ShareFile {
                name: self.filename.clone(),
                mime_type: PNG_MIME.to_owned(),
                bytes: png,
            }],
        };

        let payload = if self.caps.sharer.can_share(&with_file) {
            with_file
        } else {
            debug!("Platform refuses file shares, sharing text only");
            SharePayload {
                title,
                text,
                url: Some(self.payload.url().to_owned()),
                files: Vec::new(),
            }
        };

        self.caps.sharer.share(payload).await
    }

    async fn fall_back(&self, reason: FallbackReason) -> ShareOutcome {
        if self.copy_to_clipboard().await {
            self.caps.notifier.alert(match reason {
                FallbackReason::ShareUnavailable => Notice::ShareUnavailableCopied,
                FallbackReason::ShareFailed => Notice::ShareFailedCopied,
            });
            ShareOutcome::CopiedInstead(reason)
        } else {
            self.caps.notifier.alert(Notice::ShareAndCopyFailed);
            ShareOutcome::Failed
        }
    }

    fn flags(&self) -> MutexGuard<'_, ExportFlags> {
        self.flags.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds the `sharing` flag for the lifetime of one share.
///
/// The flag is released on drop, so it is reset on every exit path,
/// including the share future being dropped mid-await.
struct SharingGuard<'a> {
    flags: &'a Mutex<ExportFlags>,
}

impl<'a> SharingGuard<'a> {
    fn acquire(flags: &'a Mutex<ExportFlags>) -> Option<Self> {
        let mut guard = flags.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.sharing {
            return None;
        }
        guard.sharing = true;
        Some(Self { flags })
    }
}

impl Drop for SharingGuard<'_> {
    fn drop(&mut self) {
        self.flags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .sharing = false;
    }
}
