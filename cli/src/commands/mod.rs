//! Command implementations for the qrgen CLI.

pub mod completions;
pub mod generate;
pub mod interactive;

pub use completions::generate_completions;
pub use generate::{GenerateArgs, run_generate};
pub use interactive::run_interactive;
