//! Export pipeline: download, copy and share of a rendered code.

mod notice;
mod pipeline;
mod state;

#[cfg(test)]
mod tests;

pub use notice::Notice;
pub use pipeline::{
    Capabilities, DEFAULT_COPY_FEEDBACK, DEFAULT_DOWNLOAD_FILENAME, DownloadOutcome,
    ExportPipeline, FallbackReason, ShareOutcome,
};
pub use state::ShareState;
