pub mod colors;
pub mod qr_texture;
pub mod shake;
