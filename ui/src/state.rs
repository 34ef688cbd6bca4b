use std::sync::Arc;

use qrgen_business::{
    AppConfig, Capabilities, DownloadOutcome, ExportPipeline, FormKey, InputForm, Notice,
    QrGenerator, QrRenderer, QrResult, SubmitOutcome,
};
use qrgen_platform::UnsupportedSharer;

use crate::export::{ChannelNotifier, EguiClipboard, UiPipeline, UiSaver, spawn};
use crate::utils::qr_texture::QrTextureCache;

/// The main application state.
pub struct State {
    pub config: AppConfig,
    pub generator: QrGenerator<QrRenderer>,
    /// Export actions for the current result, rebuilt on every generate.
    pub export: Option<Arc<UiPipeline>>,
    pub texture: QrTextureCache,
    /// Notice currently shown in the alert modal.
    pub alert: Option<Notice>,
    /// Render error for the last submit, if any.
    pub render_error: Option<String>,
    /// egui time at which the URL field started shaking.
    pub shake_started: Option<f64>,
    /// Focus the URL field on the next frame.
    pub focus_url: bool,
    saver: UiSaver,
    notice_sender: flume::Sender<Notice>,
    notice_receiver: flume::Receiver<Notice>,
}

impl Default for State {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl State {
    pub fn new(config: AppConfig) -> Self {
        Self::with_saver(config, UiSaver::platform())
    }

    pub fn with_saver(config: AppConfig, saver: UiSaver) -> Self {
        let generator = QrGenerator::with_form(
            InputForm::with_defaults(&config.default_url, &config.default_title),
            QrRenderer,
            config.render_options(),
        );
        let (notice_sender, notice_receiver) = flume::unbounded();

        Self {
            config,
            generator,
            export: None,
            texture: QrTextureCache::default(),
            alert: None,
            render_error: None,
            shake_started: None,
            focus_url: false,
            saver,
            notice_sender,
            notice_receiver,
        }
    }

    /// Generate button.
    pub fn submit(&mut self, ctx: &egui::Context) {
        let outcome = self.generator.submit();
        self.apply(outcome, ctx);
    }

    /// Key press inside one of the form fields.
    pub fn handle_key(&mut self, key: FormKey, ctx: &egui::Context) {
        if let Some(outcome) = self.generator.handle_key(key) {
            self.apply(outcome, ctx);
        }
    }

    pub fn clear(&mut self) {
        self.generator.clear();
        self.export = None;
        self.texture.clear();
        self.render_error = None;
        self.shake_started = None;
        self.focus_url = true;
    }

    pub fn result(&self) -> Option<&QrResult> {
        self.generator.result()
    }

    /// Moves notices sent by background exports into the alert slot.
    pub fn poll_notices(&mut self) {
        while let Ok(notice) = self.notice_receiver.try_recv() {
            self.alert = Some(notice);
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn download(&self) -> Option<DownloadOutcome> {
        self.export.as_ref().map(|pipeline| pipeline.download())
    }

    pub fn copy(&self) {
        if let Some(pipeline) = self.export.clone() {
            spawn(async move {
                pipeline.copy_to_clipboard().await;
            });
        }
    }

    pub fn share(&self) {
        if let Some(pipeline) = self.export.clone() {
            spawn(async move {
                let outcome = pipeline.share().await;
                log::debug!("Share finished: {outcome:?}");
            });
        }
    }

    fn apply(&mut self, outcome: SubmitOutcome, ctx: &egui::Context) {
        match outcome {
            SubmitOutcome::Generated(result) => {
                self.render_error = None;
                self.shake_started = None;
                self.export = Some(Arc::new(self.build_pipeline(&result, ctx)));
            }
            SubmitOutcome::Invalid => {
                self.shake_started = Some(ctx.input(|i| i.time));
                ctx.request_repaint();
            }
            SubmitOutcome::RenderFailed(e) => {
                self.render_error = Some(e.to_string());
                self.export = None;
                self.texture.clear();
            }
        }
    }

    fn build_pipeline(&self, result: &QrResult, ctx: &egui::Context) -> UiPipeline {
        ExportPipeline::new(
            result.payload.clone(),
            result.surface.clone(),
            Capabilities {
                clipboard: EguiClipboard::new(ctx.clone()),
                sharer: UnsupportedSharer,
                saver: self.saver.clone(),
                notifier: ChannelNotifier::new(self.notice_sender.clone(), ctx.clone()),
            },
        )
        .filename(self.config.download_filename.clone())
        .copy_feedback(self.config.copy_feedback)
    }
}
