//! Interactive mode: a prompt-driven form plus an action menu per result.

use std::fmt;
use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result, bail};
use inquire::{InquireError, Select, Text};
use qrgen_business::{AppConfig, QrGenerator, QrRenderer, SubmitOutcome};
use qrgen_platform::SystemClipboard;
use tracing::{debug, instrument};

use crate::context::{
    CliPipeline, build_generator, build_pipeline, release_clipboard, report_copy, report_download,
    report_share,
};
use crate::output::Output;
use crate::preview::render_terminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Download,
    Share,
    Copy,
    Edit,
    Clear,
    Quit,
}

impl Action {
    const ALL: [Self; 6] = [
        Self::Download,
        Self::Share,
        Self::Copy,
        Self::Edit,
        Self::Clear,
        Self::Quit,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Download => "Save image (PNG)",
            Self::Share => "Share",
            Self::Copy => "Copy link",
            Self::Edit => "Edit title / URL",
            Self::Clear => "Clear",
            Self::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// What the form loop does after the action menu closes.
enum Next {
    Edit,
    Clear,
    Quit,
}

#[instrument(skip_all, name = "interactive")]
pub async fn run_interactive(config: &AppConfig, out_dir: PathBuf, hold: Duration) -> Result<()> {
    let out = Output::new();

    if !std::io::stdin().is_terminal() {
        out.dim("Use `qrgen generate --url <URL>` when input is not a terminal.");
        bail!("Cannot prompt: stdin is not a terminal");
    }

    out.header("QR Generator");
    // One clipboard for the session, so a copy outlives Edit and Clear.
    let clipboard = SystemClipboard::new();
    let session = run_session(config, &out_dir, &out, &clipboard).await;
    release_clipboard(&out, &clipboard, hold).await;
    session
}

async fn run_session(
    config: &AppConfig,
    out_dir: &Path,
    out: &Output,
    clipboard: &SystemClipboard,
) -> Result<()> {
    let mut generator = build_generator(config);

    loop {
        if !prompt_form(&mut generator)? {
            return Ok(());
        }

        let result = match generator.submit() {
            SubmitOutcome::Generated(result) => result,
            SubmitOutcome::Invalid => {
                out.error("Please enter a URL");
                continue;
            }
            SubmitOutcome::RenderFailed(e) => {
                out.error(format!("Could not render the QR code: {e}"));
                continue;
            }
        };

        out.newline();
        out.result_summary(&result);
        out.print(render_terminal(
            result.payload.url(),
            generator.options().level,
        )?);

        let pipeline = build_pipeline(config, &result, out_dir, out, clipboard);
        match action_menu(out, &pipeline).await? {
            Next::Edit => {}
            Next::Clear => {
                generator.clear();
            }
            Next::Quit => return Ok(()),
        }
    }
}

/// Asks for the title and URL. Returns `false` when the user backs out.
fn prompt_form(generator: &mut QrGenerator<QrRenderer>) -> Result<bool> {
    let form = generator.form();
    let Some(title) = prompt(
        Text::new("Title (optional):")
            .with_initial_value(form.title())
            .with_placeholder("e.g. My Website"),
    )?
    else {
        return Ok(false);
    };
    let Some(url) = prompt(
        Text::new("URL:")
            .with_initial_value(form.url())
            .with_placeholder("https://example.com")
            .with_help_message("Press Enter to generate"),
    )?
    else {
        return Ok(false);
    };

    let form = generator.form_mut();
    form.set_title(title);
    form.set_url(url);
    Ok(true)
}

async fn action_menu(out: &Output, pipeline: &CliPipeline) -> Result<Next> {
    loop {
        let Some(action) = prompt_select(Select::new("What next?", Action::ALL.to_vec()))? else {
            return Ok(Next::Quit);
        };
        debug!(?action, "Selected action");

        match action {
            Action::Download => {
                report_download(out, pipeline, pipeline.download());
            }
            Action::Share => report_share(out, pipeline.share().await),
            Action::Copy => report_copy(out, pipeline.copy_to_clipboard().await),
            Action::Edit => return Ok(Next::Edit),
            Action::Clear => return Ok(Next::Clear),
            Action::Quit => return Ok(Next::Quit),
        }
    }
}

/// Runs a text prompt, mapping Esc and Ctrl-C to `None`.
fn prompt(text: Text<'_>) -> Result<Option<String>> {
    match text.prompt() {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e).context("Failed to read input"),
    }
}

fn prompt_select(select: Select<'_, Action>) -> Result<Option<Action>> {
    match select.prompt() {
        Ok(action) => Ok(Some(action)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e).context("Failed to read selection"),
    }
}
