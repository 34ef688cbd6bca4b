use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "qrgen")]
#[command(about = "Generate QR codes from a URL and save, copy or share them", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Show timing/latency information
    #[arg(long, global = true)]
    pub timing: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Seconds to keep copied text pasteable before exiting on Linux (0 to skip)
    #[arg(long, global = true, value_name = "SECS", default_value_t = 30)]
    pub clipboard_hold: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a QR code for a URL and save it as PNG
    Generate {
        /// URL (or any text) to encode
        #[arg(long, short = 'u')]
        url: String,

        /// Optional title shown with the code and used when sharing
        #[arg(long, short = 't')]
        title: Option<String>,

        /// Directory the PNG is written to
        #[arg(long, short = 'o', default_value = ".")]
        out: PathBuf,

        /// Also copy the link to the clipboard
        #[arg(long, short = 'c')]
        copy: bool,

        /// Also share the code (falls back to the clipboard when sharing is unavailable)
        #[arg(long, short = 's')]
        share: bool,

        /// Print the code to the terminal
        #[arg(long, short = 'p')]
        print: bool,
    },
    /// Fill in the form interactively and pick actions from a menu (default)
    Interactive {
        /// Directory downloads are written to
        #[arg(long, short = 'o', default_value = ".")]
        out: PathBuf,
    },
    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
