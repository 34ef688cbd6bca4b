mod footer;
mod form;
mod notice;
mod result;

pub use footer::footer;
pub use form::qr_form;
pub use notice::notice_modal;
pub use result::qr_result;
