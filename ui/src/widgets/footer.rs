use chrono::Datelike as _;
use egui::{Align, Layout, Response, RichText, Ui};

pub fn footer(ui: &mut Ui) -> Response {
    let year = chrono::Local::now().year();
    ui.with_layout(Layout::top_down(Align::Center), |ui| {
        ui.label(RichText::new(format!("© {year} QR Generator App. Runs locally.")).small());
    })
    .response
}
