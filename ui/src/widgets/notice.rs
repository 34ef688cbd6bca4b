//! Blocking alert for export notices.

use egui::{Id, Modal, RichText};

use crate::state::State;
use crate::utils::colors::{COLOR_AMBER, COLOR_RED};

pub fn notice_modal(state: &mut State, ctx: &egui::Context) {
    let Some(notice) = state.alert else {
        return;
    };

    let mut ok = false;
    let modal = Modal::new(Id::new("export_notice")).show(ctx, |ui| {
        ui.set_max_width(320.0);
        let color = if notice.is_error() {
            COLOR_RED
        } else {
            COLOR_AMBER
        };
        ui.label(RichText::new(notice.message()).color(color));
        ui.add_space(12.0);
        if ui.button("OK").clicked() {
            ok = true;
        }
    });

    if ok || modal.should_close() {
        state.dismiss_alert();
    }
}
