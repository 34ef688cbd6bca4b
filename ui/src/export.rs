//! Capabilities the UI hands to the export pipeline, and the glue that runs
//! its async operations off the frame loop.
//!
//! Results come back to the UI in two ways: the pipeline's own flags, read
//! every frame, and notices pushed through a `flume` channel that the app
//! drains at the start of each frame.

use std::future::Future;
use std::sync::Arc;

use qrgen_business::{
    Clipboard, ClipboardError, ExportPipeline, FileSaver, Notice, Notifier, SaveError,
};
use qrgen_platform::UnsupportedSharer;

pub type UiPipeline = ExportPipeline<EguiClipboard, UnsupportedSharer, UiSaver, ChannelNotifier>;

/// Copies through egui's platform output, which works on desktop and web alike.
///
/// egui only queues the text for the integration and never reports whether
/// the platform accepted it, so every copy counts as a success and the
/// "share and copy both failed" notice cannot occur in the GUI.
pub struct EguiClipboard {
    ctx: egui::Context,
}

impl EguiClipboard {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl Clipboard for EguiClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.ctx.copy_text(text.to_owned());
        self.ctx.request_repaint();
        Ok(())
    }
}

/// Forwards notices to the UI thread and wakes it up.
pub struct ChannelNotifier {
    sender: flume::Sender<Notice>,
    ctx: egui::Context,
}

impl ChannelNotifier {
    pub fn new(sender: flume::Sender<Notice>, ctx: egui::Context) -> Self {
        Self { sender, ctx }
    }
}

impl Notifier for ChannelNotifier {
    fn alert(&self, notice: Notice) {
        if self.sender.send(notice).is_err() {
            log::warn!("Notice dropped, UI is gone: {notice}");
        }
        self.ctx.request_repaint();
    }
}

/// Type-erased saver so tests can swap the dialog for a directory.
#[derive(Clone)]
pub struct UiSaver(Arc<dyn FileSaver>);

impl UiSaver {
    pub fn new(saver: impl FileSaver + 'static) -> Self {
        Self(Arc::new(saver))
    }

    /// The save dialog on desktop, a browser download on web.
    pub fn platform() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::new(qrgen_platform::DialogSaver)
        }
        #[cfg(target_arch = "wasm32")]
        {
            Self::new(qrgen_platform::BrowserDownloadSaver)
        }
    }
}

impl FileSaver for UiSaver {
    fn save(&self, bytes: &[u8], filename: &str) -> Result<(), SaveError> {
        self.0.save(bytes, filename)
    }
}

/// Runs an export operation in the background.
///
/// Native builds need an entered tokio runtime.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn(task: impl Future<Output = ()> + Send + 'static) {
    tokio::spawn(task);
}

#[cfg(target_arch = "wasm32")]
pub fn spawn(task: impl Future<Output = ()> + 'static) {
    wasm_bindgen_futures::spawn_local(task);
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn copy_is_queued_for_the_integration_and_reported_ok() {
        let ctx = egui::Context::default();
        let clipboard = EguiClipboard::new(ctx.clone());

        ctx.begin_pass(egui::RawInput::default());
        let result = clipboard.write_text("T\nhttps://a.b").await;
        let output = ctx.end_pass();

        assert!(result.is_ok());
        let queued = output.platform_output.commands.iter().any(|command| {
            matches!(command, egui::OutputCommand::CopyText(text) if text == "T\nhttps://a.b")
        });
        assert!(queued, "copy should reach the platform output");
    }
}
