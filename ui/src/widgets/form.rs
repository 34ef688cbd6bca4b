//! Title and URL inputs with the generate and clear buttons.
//!
//! Enter in either field generates, the same as the button. An empty URL
//! shows an inline error and shakes the URL field.

use egui::{Button, Response, RichText, TextEdit, Ui};
use qrgen_business::FormKey;

use crate::state::State;
use crate::utils::colors::{COLOR_BLUE, COLOR_RED};
use crate::utils::shake::shake_offset;

const FIELD_INDENT: f32 = 8.0;

pub(crate) const TITLE_FIELD_ID: &str = "qr_form_title";
pub(crate) const URL_FIELD_ID: &str = "qr_form_url";

pub fn qr_form(state: &mut State, ui: &mut Ui) -> Response {
    let form = state.generator.form();
    let mut title = form.title().to_owned();
    let mut url = form.url().to_owned();
    let has_error = form.has_error();

    let now = ui.input(|i| i.time);
    let offset = state
        .shake_started
        .and_then(|started| shake_offset(started, now));
    if offset.is_some() {
        ui.ctx().request_repaint();
    } else {
        state.shake_started = None;
    }

    let mut enter = false;
    let mut generate = false;
    let mut clear = false;

    let response = ui
        .vertical(|ui| {
            ui.label("Title (optional)");
            ui.horizontal(|ui| {
                ui.add_space(FIELD_INDENT);
                let title_response = ui.add(
                    TextEdit::singleline(&mut title)
                        .id(egui::Id::new(TITLE_FIELD_ID))
                        .hint_text("e.g. My Website")
                        .desired_width(f32::INFINITY),
                );
                if title_response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    enter = true;
                }
            });

            ui.add_space(8.0);

            ui.label("URL");
            ui.horizontal(|ui| {
                ui.add_space(FIELD_INDENT + offset.unwrap_or(0.0));
                let url_response = ui.add(
                    TextEdit::singleline(&mut url)
                        .id(egui::Id::new(URL_FIELD_ID))
                        .hint_text("https://example.com")
                        .desired_width(f32::INFINITY),
                );
                if state.focus_url {
                    url_response.request_focus();
                    state.focus_url = false;
                }
                if url_response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    enter = true;
                }
            });

            if has_error {
                ui.colored_label(COLOR_RED, "Please enter a URL");
            }
            if let Some(error) = &state.render_error {
                ui.colored_label(COLOR_RED, format!("Could not render the QR code: {error}"));
            }

            ui.add_space(12.0);

            ui.horizontal(|ui| {
                let generate_button =
                    Button::new(RichText::new("Generate QR Code").color(egui::Color32::WHITE))
                        .fill(COLOR_BLUE);
                if ui.add(generate_button).clicked() {
                    generate = true;
                }
                if ui.button("Clear").clicked() {
                    clear = true;
                }
            });
        })
        .response;

    let form = state.generator.form_mut();
    if form.title() != title {
        form.set_title(title);
    }
    if form.url() != url {
        form.set_url(url);
    }

    if clear {
        state.clear();
    } else if generate {
        state.submit(ui.ctx());
    } else if enter {
        state.handle_key(FormKey::Enter, ui.ctx());
    }

    response
}
