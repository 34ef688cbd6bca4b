//! In-memory capabilities for exercising the export pipeline without a
//! platform clipboard, share sheet or file system.
//!
//! Every mock is cheap to clone and clones share their recorded calls, so a
//! test can hand one copy to the pipeline and inspect the other.
//!
//! # Example
//!
//! ```ignore
//! use qrgen_business::test_utils::{MockClipboard, MockSaver, MockSharer, RecordingNotifier};
//!
//! let clipboard = MockClipboard::ok();
//! let caps = Capabilities {
//!     clipboard: clipboard.clone(),
//!     sharer: MockSharer::unavailable(),
//!     saver: MockSaver::ok(),
//!     notifier: RecordingNotifier::default(),
//! };
//! ```

use std::sync::{Arc, Mutex};

use crate::capability::{
    Clipboard, ClipboardError, FileSaver, Notifier, SaveError, ShareError, SharePayload, Sharer,
};
use crate::export::Notice;

#[derive(Debug, Clone, Default)]
pub struct MockClipboard {
    writes: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl MockClipboard {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Every text passed to `write_text`, failed attempts included.
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().expect("lock poisoned").clone()
    }
}

impl Clipboard for MockClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.writes
            .lock()
            .expect("lock poisoned")
            .push(text.to_owned());
        if self.fail {
            Err(ClipboardError::WriteFailed("mock failure".to_owned()))
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone)]
pub struct MockSharer {
    available: bool,
    accepts_files: bool,
    result: Result<(), ShareError>,
    shared: Arc<Mutex<Vec<SharePayload>>>,
}

impl Default for MockSharer {
    fn default() -> Self {
        Self {
            available: true,
            accepts_files: true,
            result: Ok(()),
            shared: Arc::default(),
        }
    }
}

impl MockSharer {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::default()
        }
    }

    pub fn aborting() -> Self {
        Self {
            result: Err(ShareError::Aborted),
            ..Self::default()
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            result: Err(ShareError::Failed(reason.to_owned())),
            ..Self::default()
        }
    }

    /// The platform reports it cannot share payloads carrying files.
    #[must_use]
    pub fn text_only(mut self) -> Self {
        self.accepts_files = false;
        self
    }

    pub fn shared(&self) -> Vec<SharePayload> {
        self.shared.lock().expect("lock poisoned").clone()
    }
}

impl Sharer for MockSharer {
    fn is_available(&self) -> bool {
        self.available
    }

    fn can_share(&self, payload: &SharePayload) -> bool {
        self.accepts_files || !payload.has_files()
    }

    async fn share(&self, payload: SharePayload) -> Result<(), ShareError> {
        self.shared.lock().expect("lock poisoned").push(payload);
        self.result.clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockSaver {
    saved: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
    error: Option<SaveError>,
}

impl MockSaver {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn failing(error: SaveError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// `(filename, bytes)` of every successful save.
    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().expect("lock poisoned").clone()
    }
}

impl FileSaver for MockSaver {
    fn save(&self, bytes: &[u8], filename: &str) -> Result<(), SaveError> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        self.saved
            .lock()
            .expect("lock poisoned")
            .push((filename.to_owned(), bytes.to_vec()));
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("lock poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, notice: Notice) {
        self.notices.lock().expect("lock poisoned").push(notice);
    }
}
