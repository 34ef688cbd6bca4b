//! The generated code with its title, URL and export buttons.

use egui::{Align, Button, Color32, Frame, Layout, Margin, Response, RichText, Ui};
use qrgen_business::DownloadOutcome;

use crate::state::State;
use crate::utils::colors::COLOR_GREEN;

/// Shows the current result, or nothing when there is none.
pub fn qr_result(state: &mut State, ui: &mut Ui) -> Option<Response> {
    let result = state.result()?.clone();
    let pipeline = state.export.clone()?;

    let is_sharing = pipeline.is_sharing();
    let copied = pipeline.copy_success();
    if let Some(left) = pipeline.copy_feedback_left() {
        ui.ctx().request_repaint_after(left);
    }

    let mut download = false;
    let mut share = false;
    let mut copy = false;

    let response = ui
        .with_layout(Layout::top_down(Align::Center), |ui| {
            let texture = state.texture.get_or_load(ui.ctx(), &result.surface);
            Frame::NONE
                .fill(Color32::WHITE)
                .inner_margin(Margin::same(8))
                .corner_radius(4.0)
                .show(ui, |ui| {
                    ui.image(texture);
                });

            ui.add_space(8.0);
            if result.payload.has_title() {
                ui.label(RichText::new(result.payload.title()).strong().size(18.0));
            }
            ui.label(RichText::new(result.payload.display_url()).weak())
                .on_hover_text(result.payload.url());

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui.button("Save image (PNG)").clicked() {
                    download = true;
                }
                let share_label = if is_sharing { "Sharing..." } else { "Share" };
                if ui.add_enabled(!is_sharing, Button::new(share_label)).clicked() {
                    share = true;
                }
                let copy_text = if copied {
                    RichText::new("Copied!").color(COLOR_GREEN)
                } else {
                    RichText::new("Copy")
                };
                if ui.button(copy_text).clicked() {
                    copy = true;
                }
            });
        })
        .response;

    if download {
        match state.download() {
            Some(DownloadOutcome::Saved) | None => {}
            Some(outcome) => log::info!("Download did not complete: {outcome:?}"),
        }
    }
    if share {
        state.share();
    }
    if copy {
        state.copy();
    }

    Some(response)
}
