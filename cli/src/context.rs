//! Wiring between the generator result and the desktop capabilities.

use std::path::Path;
use std::time::Duration;

use qrgen_business::{
    AppConfig, Capabilities, DownloadOutcome, ExportPipeline, InputForm, QrGenerator, QrRenderer,
    QrResult, ShareOutcome,
};
use qrgen_platform::{DirectorySaver, SystemClipboard, UnsupportedSharer};

use crate::output::{ConsoleNotifier, Output};

pub type CliPipeline =
    ExportPipeline<SystemClipboard, UnsupportedSharer, DirectorySaver, ConsoleNotifier>;

/// Loads config from the environment, falling back to defaults on bad values.
pub fn load_config(out: &Output) -> AppConfig {
    match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring invalid configuration: {e}");
            out.warning(format!("Invalid configuration ({e}), using defaults"));
            AppConfig::default()
        }
    }
}

/// A generator whose form starts out with the configured defaults.
pub fn build_generator(config: &AppConfig) -> QrGenerator<QrRenderer> {
    QrGenerator::with_form(
        InputForm::with_defaults(&config.default_url, &config.default_title),
        QrRenderer,
        config.render_options(),
    )
}

/// Exports of one session all write through `clipboard`.
pub fn build_pipeline(
    config: &AppConfig,
    result: &QrResult,
    out_dir: &Path,
    out: &Output,
    clipboard: &SystemClipboard,
) -> CliPipeline {
    ExportPipeline::new(
        result.payload.clone(),
        result.surface.clone(),
        Capabilities {
            clipboard: clipboard.clone(),
            sharer: UnsupportedSharer,
            saver: DirectorySaver::new(out_dir),
            notifier: ConsoleNotifier::new(out.clone()),
        },
    )
    .filename(config.download_filename.clone())
    .copy_feedback(config.copy_feedback)
}

/// Prints the result of a download. Returns whether a file was written.
pub fn report_download(out: &Output, pipeline: &CliPipeline, outcome: DownloadOutcome) -> bool {
    let target = pipeline
        .capabilities()
        .saver
        .target(pipeline.download_filename());
    match outcome {
        DownloadOutcome::Saved => {
            out.success(format!("Saved {}", target.display()));
            true
        }
        DownloadOutcome::SerializationUnavailable => {
            out.error("Could not encode the QR code as PNG");
            false
        }
        DownloadOutcome::Cancelled => {
            out.dim("Save cancelled.");
            false
        }
        DownloadOutcome::SaveFailed => {
            out.error(format!("Could not write {}", target.display()));
            false
        }
    }
}

/// Prints the result of a share. Fallback notices are printed by the notifier.
pub fn report_share(out: &Output, outcome: ShareOutcome) {
    match outcome {
        ShareOutcome::Shared => out.success("Shared"),
        ShareOutcome::Cancelled => out.dim("Share cancelled."),
        ShareOutcome::Busy => out.dim("A share is already in progress."),
        ShareOutcome::CopiedInstead(_) | ShareOutcome::Failed => {}
    }
}

pub fn report_copy(out: &Output, copied: bool) {
    if copied {
        out.success("Copied!");
    } else {
        out.error("Could not copy to the clipboard");
    }
}

/// Called once before exit. Returns whether the clipboard was held.
pub async fn release_clipboard(out: &Output, clipboard: &SystemClipboard, hold: Duration) -> bool {
    if hold.is_zero() || clipboard.last_text().is_none() || !cfg!(target_os = "linux") {
        return false;
    }

    out.dim(format!(
        "Keeping the link on the clipboard for up to {}s so it can be pasted (Ctrl-C to stop).",
        hold.as_secs()
    ));
    let clipboard = clipboard.clone();
    match tokio::task::spawn_blocking(move || clipboard.hold(hold)).await {
        Ok(held) => held,
        Err(e) => {
            tracing::warn!("Clipboard hold task failed: {e}");
            false
        }
    }
}
