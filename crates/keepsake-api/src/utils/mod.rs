pub mod conditional;
pub mod upload;
