use std::env;
use std::time::Duration;

use anyhow::{anyhow, Result};

const DEFAULT_IMAGE_API_URL: &str =
    "https://api-inference.huggingface.co/models/CompVis/stable-diffusion-v1-4";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    /// Long-poll the Telegram API for updates.
    Polling,
    /// Serve an HTTP endpoint and let Telegram push updates to it.
    Webhook,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub image_api_url: String,
    pub image_api_token: String,
    pub transport_mode: TransportMode,
    pub port: u16,
    pub generation_timeout_seconds: u64,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bot_token: require_env("BOT_TOKEN")?,
            image_api_url: env_string("IMAGE_API_URL", DEFAULT_IMAGE_API_URL),
            image_api_token: require_env("IMAGE_API_TOKEN")?,
            transport_mode: parse_transport_mode(&env_string("TRANSPORT_MODE", "polling"))?,
            port: env_u16("PORT", 5000),
            generation_timeout_seconds: env_u64("GENERATION_TIMEOUT_SECONDS", 120),
            log_level: env_string("LOG_LEVEL", "info"),
        })
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_seconds)
    }
}

fn parse_transport_mode(value: &str) -> Result<TransportMode> {
    match value.trim().to_lowercase().as_str() {
        "polling" => Ok(TransportMode::Polling),
        "webhook" => Ok(TransportMode::Webhook),
        other => Err(anyhow!(
            "Unknown TRANSPORT_MODE '{other}', expected 'polling' or 'webhook'"
        )),
    }
}

fn require_env(name: &str) -> Result<String> {
    let value = env::var(name).unwrap_or_default();
    if value.trim().is_empty() {
        return Err(anyhow!("{name} is required"));
    }
    Ok(value)
}

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}
