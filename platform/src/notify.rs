//! A notifier for contexts with no alert surface.

use qrgen_business::{Notice, Notifier};

/// Writes notices to the log: `warn` for failures, `info` otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, notice: Notice) {
        if notice.is_error() {
            log::warn!("{notice}");
        } else {
            log::info!("{notice}");
        }
    }
}
