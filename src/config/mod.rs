//! Configuration module - Application settings from file and environment

pub mod loader;
pub mod types;

pub use loader::load_config;
pub use types::AppConfig;
