//! `qrgen`: generate QR codes from the terminal.

mod cli;
mod commands;
mod context;
mod output;
mod preview;
mod timing;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser as _;

use crate::cli::{Cli, Commands};
use crate::commands::{GenerateArgs, generate_completions, run_generate, run_interactive};
use crate::context::load_config;
use crate::output::Output;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // `.env` may carry RUST_LOG as well as QRGEN_* settings.
    let dotenv = dotenvy::dotenv();
    timing::init_tracing(cli.verbose, cli.timing);
    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {path:?}");
    }

    let out = Output::new();
    let hold = Duration::from_secs(cli.clipboard_hold);

    match cli.command {
        Some(Commands::Generate {
            url,
            title,
            out: out_dir,
            copy,
            share,
            print,
        }) => {
            let config = load_config(&out);
            run_generate(
                &config,
                GenerateArgs {
                    url,
                    title,
                    out: out_dir,
                    copy,
                    share,
                    print,
                    hold,
                },
            )
            .await
        }
        Some(Commands::Interactive { out: out_dir }) => {
            run_interactive(&load_config(&out), out_dir, hold).await
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
            Ok(())
        }
        None => run_interactive(&load_config(&out), PathBuf::from("."), hold).await,
    }
}
