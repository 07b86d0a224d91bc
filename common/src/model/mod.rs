pub mod config;
pub mod personality;
pub mod upload;
