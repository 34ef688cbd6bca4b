//! egui front end: the input form, the generated code and its export buttons.

#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod export;
pub mod state;
pub mod utils;
pub mod widgets;

pub use app::QrGenApp;
