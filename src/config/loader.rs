//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::AppConfig;
use crate::common::errors::{ClientError, Result};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with APP_)
/// 2. Configuration file (TOML format)
/// 3. Default values
///
/// `RIOT_API_KEY` and `PORT` are honoured when the corresponding
/// setting is not provided elsewhere.
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ClientError::Configuration(e.to_string()))?;

    let bind_configured = config.get_string("server.bind_address").is_ok();
    let mut app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ClientError::Configuration(e.to_string()))?;

    apply_fallbacks(
        &mut app_config,
        bind_configured,
        std::env::var("RIOT_API_KEY").ok(),
        std::env::var("PORT").ok(),
    );
    Ok(app_config)
}

fn apply_fallbacks(
    app_config: &mut AppConfig,
    bind_configured: bool,
    api_key: Option<String>,
    port: Option<String>,
) {
    if app_config.riot.api_key.is_none() {
        app_config.riot.api_key = api_key;
    }
    if bind_configured {
        return;
    }
    if let Some(port) = port.and_then(|p| p.trim().parse::<u16>().ok()) {
        app_config.server.bind_address = format!("0.0.0.0:{}", port);
    }
}
