use std::env;

use anyhow::{Context, Result, ensure};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioSettings {
    pub api_base_url: String,
    pub request_timeout_ms: u64,
}

impl StudioSettings {
    pub fn from_env() -> Result<Self> {
        // Load .env if present, but do not fail if file does not exist.
        let _ = dotenvy::dotenv();

        let api_base_url =
            env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_owned());
        ensure!(
            !api_base_url.trim().is_empty(),
            "API_BASE_URL cannot be empty"
        );

        let request_timeout_ms = parse_u64_env("REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)?;
        ensure!(
            request_timeout_ms > 0,
            "REQUEST_TIMEOUT_MS must be greater than 0"
        );

        Ok(Self {
            api_base_url,
            request_timeout_ms,
        })
    }
}

fn parse_u64_env(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("failed to parse {name} as u64")),
        Err(_) => Ok(default),
    }
}
