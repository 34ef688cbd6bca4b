//! One-shot generate command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, Result, bail};
use qrgen_business::{AppConfig, ShareOutcome, SubmitOutcome};
use qrgen_platform::SystemClipboard;
use tracing::instrument;

use crate::context::{
    build_generator, build_pipeline, release_clipboard, report_copy, report_download, report_share,
};
use crate::output::Output;
use crate::preview::render_terminal;

pub struct GenerateArgs {
    pub url: String,
    pub title: Option<String>,
    pub out: PathBuf,
    pub copy: bool,
    pub share: bool,
    pub print: bool,
    /// How long to keep a copied link pasteable before returning.
    pub hold: Duration,
}

#[instrument(skip_all, name = "generate", fields(copy = args.copy, share = args.share))]
pub async fn run_generate(config: &AppConfig, args: GenerateArgs) -> Result<()> {
    let out = Output::new();

    let mut generator = build_generator(config);
    generator.form_mut().set_url(args.url);
    generator
        .form_mut()
        .set_title(args.title.unwrap_or_default());

    let result = match generator.submit() {
        SubmitOutcome::Generated(result) => result,
        SubmitOutcome::Invalid => bail!("Please enter a URL"),
        SubmitOutcome::RenderFailed(e) => {
            return Err(e).context("Failed to render QR code");
        }
    };

    out.result_summary(&result);
    if args.print {
        out.print(render_terminal(
            result.payload.url(),
            generator.options().level,
        )?);
    }

    let clipboard = SystemClipboard::new();
    let pipeline = build_pipeline(config, &result, &args.out, &out, &clipboard);

    if !report_download(&out, &pipeline, pipeline.download()) {
        bail!("QR code was not saved");
    }

    if args.copy {
        report_copy(&out, pipeline.copy_to_clipboard().await);
    }

    let mut share_failed = false;
    if args.share {
        let outcome = pipeline.share().await;
        report_share(&out, outcome);
        share_failed = outcome == ShareOutcome::Failed;
    }

    release_clipboard(&out, &clipboard, args.hold).await;

    if share_failed {
        bail!("Sharing and copying to the clipboard both failed");
    }
    Ok(())
}
