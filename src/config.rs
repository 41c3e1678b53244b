use std::env;
use std::path::Path;

use crate::error::ConfigError;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_API_TOKEN: &str = "";

/// Number of users shown per page. The backend is always asked for this size.
pub const PAGE_SIZE: u32 = 10;

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(
        &env::var("API_BASE_URL").unwrap_or_default(),
        DEFAULT_API_BASE_URL,
    )
}

pub fn get_api_token() -> String {
    env::var("API_TOKEN").unwrap_or_else(|_| DEFAULT_API_TOKEN.to_string())
}

pub fn get_panel_host() -> String {
    match env::var("PANEL_HOST") {
        Ok(h) if !h.trim().is_empty() => h.trim().to_string(),
        _ => DEFAULT_HOST.to_string(),
    }
}

pub fn get_panel_port() -> Result<u16, ConfigError> {
    let raw = match env::var("PANEL_PORT") {
        Ok(v) if !v.trim().is_empty() => v,
        _ => return Ok(DEFAULT_PORT),
    };
    raw.trim()
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidValue {
            key: "PANEL_PORT",
            value: raw.clone(),
        })
}

/// Trim whitespace and trailing slashes, falling back when nothing is left.
pub fn sanitize_base_url(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
