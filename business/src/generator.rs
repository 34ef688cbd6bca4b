//! Ties the input form to the renderer: the "result view" model.

use std::sync::Arc;

use log::warn;

use crate::form::{FormEvent, FormKey, InputForm};
use crate::payload::GeneratePayload;
use crate::render::{RenderError, RenderOptions, RenderedSurface, Renderer};

/// A generated code: the payload plus the surface rendered from its url.
#[derive(Debug, Clone)]
pub struct QrResult {
    pub payload: GeneratePayload,
    pub surface: Arc<RenderedSurface>,
}

/// What a submit produced.
#[derive(Debug)]
pub enum SubmitOutcome {
    Generated(QrResult),
    /// The url was blank; the form's error flag is set.
    Invalid,
    /// The payload was valid but could not be rendered.
    RenderFailed(RenderError),
}

/// Owns the form and the current result, re-rendering on each submit.
#[derive(Debug)]
pub struct QrGenerator<R> {
    form: InputForm,
    renderer: R,
    options: RenderOptions,
    result: Option<QrResult>,
}

impl<R: Renderer> QrGenerator<R> {
    pub fn new(renderer: R, options: RenderOptions) -> Self {
        Self::with_form(InputForm::new(), renderer, options)
    }

    pub fn with_form(form: InputForm, renderer: R, options: RenderOptions) -> Self {
        Self {
            form,
            renderer,
            options,
            result: None,
        }
    }

    pub fn form(&self) -> &InputForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut InputForm {
        &mut self.form
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn result(&self) -> Option<&QrResult> {
        self.result.as_ref()
    }

    /// Validates the form and renders a fresh result.
    pub fn submit(&mut self) -> SubmitOutcome {
        match self.form.generate() {
            FormEvent::Generated(payload) => self.render(payload),
            _ => SubmitOutcome::Invalid,
        }
    }

    /// Like [`Self::submit`] but driven by a key press in one of the fields.
    pub fn handle_key(&mut self, key: FormKey) -> Option<SubmitOutcome> {
        match self.form.handle_key(key)? {
            FormEvent::Generated(payload) => Some(self.render(payload)),
            _ => Some(SubmitOutcome::Invalid),
        }
    }

    /// Resets the form and drops the current result.
    pub fn clear(&mut self) -> FormEvent {
        self.result = None;
        self.form.clear()
    }

    fn render(&mut self, payload: GeneratePayload) -> SubmitOutcome {
        match self.renderer.render(payload.url(), &self.options) {
            Ok(surface) => {
                let result = QrResult {
                    payload,
                    surface: Arc::new(surface),
                };
                self.result = Some(result.clone());
                SubmitOutcome::Generated(result)
            }
            Err(e) => {
                warn!("Render failed for {:?}: {e}", payload.url());
                self.result = None;
                self.form.discard_payload();
                SubmitOutcome::RenderFailed(e)
            }
        }
    }
}
