//! Input form state for the title and url fields.
//!
//! The form owns the raw text the user typed, a validation error flag and the
//! last generated payload. Views render from it and feed edits back through
//! the setters; everything the view should react to (the shake cue on a
//! failed generate, moving focus after clear) comes back as a [`FormEvent`].

use log::{debug, info};

use crate::payload::GeneratePayload;

/// Something the view layer may want to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Generate was requested with an empty url.
    ValidationFailed,
    /// A new payload replaced the previous one.
    Generated(GeneratePayload),
    /// Input focus should move back to the url field.
    FocusUrl,
}

/// Keys the form understands while one of its fields has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKey {
    Enter,
    Other,
}

#[derive(Debug, Clone, Default)]
pub struct InputForm {
    title: String,
    url: String,
    error: bool,
    payload: Option<GeneratePayload>,
}

impl InputForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form prefilled with the given values, with no error and no payload.
    pub fn with_defaults(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn has_error(&self) -> bool {
        self.error
    }

    pub fn payload(&self) -> Option<&GeneratePayload> {
        self.payload.as_ref()
    }

    pub fn set_title(&mut self, text: impl Into<String>) {
        self.title = text.into();
    }

    /// Updates the url; a non-blank value also clears the error flag.
    pub fn set_url(&mut self, text: impl Into<String>) {
        self.url = text.into();
        if !self.url.trim().is_empty() {
            self.error = false;
        }
    }

    pub fn generate(&mut self) -> FormEvent {
        match GeneratePayload::new(&self.url, &self.title) {
            Ok(payload) => {
                info!("Generate payload for url={:?}", payload.url());
                self.error = false;
                self.payload = Some(payload.clone());
                FormEvent::Generated(payload)
            }
            Err(e) => {
                debug!("Generate rejected: {e}");
                self.error = true;
                FormEvent::ValidationFailed
            }
        }
    }

    /// Forgets the stored payload while keeping the typed values.
    pub(crate) fn discard_payload(&mut self) {
        self.payload = None;
    }

    pub fn clear(&mut self) -> FormEvent {
        self.title.clear();
        self.url.clear();
        self.error = false;
        self.payload = None;
        FormEvent::FocusUrl
    }

    /// Enter in either field behaves like pressing the generate button.
    pub fn handle_key(&mut self, key: FormKey) -> Option<FormEvent> {
        match key {
            FormKey::Enter => Some(self.generate()),
            FormKey::Other => None,
        }
    }
}
