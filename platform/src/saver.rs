//! Ways to hand the exported PNG to the user.
//!
//! # Platform Support
//!
//! - **Native**: [`DirectorySaver`] writes into a fixed directory (CLI),
//!   [`DialogSaver`] asks with the native save dialog via `rfd` (desktop UI).
//! - **Web (WASM)**: [`BrowserDownloadSaver`] triggers a browser download
//!   through a temporary object URL and anchor element.

use qrgen_business::{FileSaver, SaveError};

/// Writes files into a directory, overwriting existing files of the same name.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl DirectorySaver {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Where a file with this name ends up.
    pub fn target(&self, filename: &str) -> std::path::PathBuf {
        self.dir.join(filename)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl FileSaver for DirectorySaver {
    fn save(&self, bytes: &[u8], filename: &str) -> Result<(), SaveError> {
        let path = self.target(filename);
        std::fs::write(&path, bytes).map_err(|e| SaveError::Io {
            filename: path.display().to_string(),
            reason: e.to_string(),
        })?;
        log::info!("Wrote {} bytes to {path:?}", bytes.len());
        Ok(())
    }
}

/// Asks for a location with the native save dialog.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogSaver;

#[cfg(not(target_arch = "wasm32"))]
impl FileSaver for DialogSaver {
    fn save(&self, bytes: &[u8], filename: &str) -> Result<(), SaveError> {
        use rfd::FileDialog;

        let Some(path) = FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name(filename)
            .set_title("Save QR code")
            .save_file()
        else {
            return Err(SaveError::Cancelled);
        };

        log::debug!("User picked save path: {path:?}");

        std::fs::write(&path, bytes).map_err(|e| SaveError::Io {
            filename: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Triggers a download in the browser the way a `download` link would.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserDownloadSaver;

#[cfg(target_arch = "wasm32")]
impl BrowserDownloadSaver {
    fn download(bytes: &[u8], filename: &str) -> Result<(), wasm_bindgen::JsValue> {
        use wasm_bindgen::JsCast as _;

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let body = document.body().ok_or("no body")?;

        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(qrgen_business::PNG_MIME);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob)?;

        let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        body.append_child(&anchor)?;
        anchor.click();
        body.remove_child(&anchor)?;
        web_sys::Url::revoke_object_url(&url)?;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
impl FileSaver for BrowserDownloadSaver {
    fn save(&self, bytes: &[u8], filename: &str) -> Result<(), SaveError> {
        Self::download(bytes, filename).map_err(|e| SaveError::Io {
            filename: filename.to_owned(),
            reason: format!("{e:?}"),
        })
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_directory_saver_writes_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let saver = DirectorySaver::new(dir.path());

        saver
            .save(b"\x89PNG", "qrcode.png")
            .expect("save should succeed");

        let written = std::fs::read(dir.path().join("qrcode.png")).expect("file should exist");
        assert_eq!(written, b"\x89PNG");
    }

    #[test]
    fn test_directory_saver_overwrites() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let saver = DirectorySaver::new(dir.path());

        saver.save(b"first", "qrcode.png").expect("first save");
        saver.save(b"second", "qrcode.png").expect("second save");

        let written = std::fs::read(saver.target("qrcode.png")).expect("file should exist");
        assert_eq!(written, b"second");
    }

    #[test]
    fn test_directory_saver_missing_dir_is_io_error() {
        let saver = DirectorySaver::new("/non/existent/dir");
        let result = saver.save(b"data", "qrcode.png");
        assert!(matches!(result, Err(SaveError::Io { .. })));
    }

    #[test]
    fn test_file_saver_trait_is_object_safe() {
        fn _accept_saver(_saver: &dyn FileSaver) {}
        _accept_saver(&DirectorySaver::new("."));
        _accept_saver(&DialogSaver);
    }
}
