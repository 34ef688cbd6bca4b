//! System clipboard text access.
//!
//! # Platform Support
//!
//! - **Windows**: Win32 Clipboard API via `arboard`
//! - **macOS**: `NSPasteboard` via `arboard`
//! - **Linux X11 / Wayland**: selections and wl-clipboard protocols via `arboard`
//! - **Web (WASM)**: Not supported here; the browser clipboard API is async
//!   and tied to a user gesture, so the UI routes copies through egui instead.
//!
//! On X11 and Wayland the clipboard content is owned by the process that set
//! it, so the [`SystemClipboard`] keeps its `arboard` handle alive for as long
//! as any clone exists, and [`SystemClipboard::hold`] lets a short-lived
//! process keep serving the text before it exits.

use qrgen_business::{Clipboard, ClipboardError};

#[cfg(not(target_arch = "wasm32"))]
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Default)]
struct Slot {
    handle: Option<arboard::Clipboard>,
    /// Text of the last successful write.
    text: Option<String>,
}

/// System clipboard backed by `arboard`.
///
/// The handle is opened lazily on the first write, so constructing one never
/// fails even on a headless machine. Clones share the same handle; keep one
/// for a whole session rather than one per export.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Default, Clone)]
pub struct SystemClipboard {
    slot: Arc<Mutex<Slot>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `other` is a clone of this clipboard.
    pub fn shares_handle(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }

    pub fn last_text(&self) -> Option<String> {
        self.lock().text.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut slot = self.lock();

        if slot.handle.is_none() {
            let clipboard = arboard::Clipboard::new().map_err(|e| {
                log::debug!(
                    target: "qrgen_platform::clipboard",
                    "clipboard_open_failed error={e}",
                );
                ClipboardError::Unavailable
            })?;
            slot.handle = Some(clipboard);
        }

        let Some(clipboard) = slot.handle.as_mut() else {
            return Err(ClipboardError::Unavailable);
        };

        if let Err(e) = clipboard.set_text(text) {
            // A broken handle is dropped so the next write reopens it.
            slot.handle = None;
            return Err(ClipboardError::WriteFailed(e.to_string()));
        }
        slot.text = Some(text.to_owned());

        log::trace!(
            target: "qrgen_platform::clipboard",
            "clipboard_text_set chars={}",
            text.chars().count(),
        );
        Ok(())
    }

    /// Keeps the last written text pasteable after the caller is done with it.
    ///
    /// X11 and Wayland serve the clipboard from the process that set it, so
    /// on Linux this blocks until another program takes the clipboard over or
    /// `timeout` passes. Elsewhere the OS owns the text and this returns at
    /// once. Returns whether it waited.
    pub fn hold(&self, timeout: Duration) -> bool {
        let Some(text) = self.last_text() else {
            return false;
        };
        if timeout.is_zero() {
            return false;
        }
        hold_selection(text, timeout)
    }
}

#[cfg(target_os = "linux")]
fn hold_selection(text: String, timeout: Duration) -> bool {
    use arboard::SetExtLinux as _;

    let (done_tx, done_rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let result = arboard::Clipboard::new().and_then(|mut c| c.set().wait().text(text));
        if let Err(e) = result {
            log::debug!(target: "qrgen_platform::clipboard", "clipboard_hold_failed error={e}");
        }
        drop(done_tx.send(()));
    });

    match done_rx.recv_timeout(timeout) {
        Ok(()) => log::debug!(target: "qrgen_platform::clipboard", "clipboard_taken_over"),
        Err(_) => log::debug!(target: "qrgen_platform::clipboard", "clipboard_hold_elapsed"),
    }
    true
}

#[cfg(all(not(target_os = "linux"), not(target_arch = "wasm32")))]
fn hold_selection(_text: String, _timeout: Duration) -> bool {
    false
}

#[cfg(not(target_arch = "wasm32"))]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.set_text(text)
    }
}

/// Stub implementation for WASM (clipboard not available through arboard).
#[cfg(target_arch = "wasm32")]
#[derive(Default, Clone, Copy)]
pub struct SystemClipboard;

#[cfg(target_arch = "wasm32")]
impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_arch = "wasm32")]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable)
    }
}
