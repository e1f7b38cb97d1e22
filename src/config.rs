//! Environment configuration
//!
//! All settings come from the environment (a .env file is loaded by the
//! binary before this runs). Missing credentials are a startup error.

use crate::error::{BotError, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// LINE channel access token (bearer token for the Messaging API)
    pub channel_access_token: String,
    /// LINE channel secret used to verify webhook signatures
    pub channel_secret: String,
    /// Exchange-rate API endpoint returning a TWD-based `rates` object
    pub exchange_rate_api_url: String,
    /// Port for the webhook server
    pub port: u16,
    /// Path to the rich-menu image asset
    pub rich_menu_image: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| BotError::ConfigError(format!("invalid PORT: {}", e)))?;

        let rich_menu_image = env::var("RICH_MENU_IMAGE")
            .unwrap_or_else(|_| "static/richmenu.jpg".to_string())
            .into();

        Ok(Self {
            channel_access_token: require("CHANNEL_ACCESS_TOKEN")?,
            channel_secret: require("CHANNEL_SECRET")?,
            exchange_rate_api_url: require("EXCHANGE_RATE_API_URL")?,
            port,
            rich_menu_image,
        })
    }
}

fn require(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(BotError::ConfigError(format!("{} is not set", name))),
    }
}
