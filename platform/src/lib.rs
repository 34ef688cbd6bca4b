//! Platform implementations of the qrgen capabilities.
//!
//! - [`clipboard`]: system clipboard text writes (`arboard` on native)
//! - [`saver`]: writing the exported PNG to a directory, a native save
//!   dialog, or a browser download
//! - [`share`]: native share probing; desktop platforms have none
//! - [`notify`]: a notifier that only logs

pub mod clipboard;
pub mod notify;
pub mod saver;
pub mod share;

pub use clipboard::SystemClipboard;
pub use notify::LogNotifier;
#[cfg(target_arch = "wasm32")]
pub use saver::BrowserDownloadSaver;
#[cfg(not(target_arch = "wasm32"))]
pub use saver::{DialogSaver, DirectorySaver};
pub use share::UnsupportedSharer;
