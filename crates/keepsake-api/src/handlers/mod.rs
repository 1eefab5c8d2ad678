pub mod health;
pub mod media_serve;
pub mod photo_upload;
