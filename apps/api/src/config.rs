use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::llm_client::DEFAULT_API_URL;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Without a key every model call resolves to its fallback.
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Load the demo archive when no snapshot provides entries.
    pub seed_catalog: bool,
    pub snapshot_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_api_url: optional_env("GEMINI_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            seed_catalog: match optional_env("ARCHIVE_SEED") {
                Some(raw) => parse_flag(&raw).context("ARCHIVE_SEED must be a boolean")?,
                None => true,
            },
            snapshot_path: optional_env("ARCHIVE_SNAPSHOT_PATH").map(PathBuf::from),
        })
    }
}

/// Unset and blank variables are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognized flag value '{other}'"),
    }
}
