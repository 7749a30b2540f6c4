//! Runtime configuration read from the environment
//!
//! # Environment Variables
//!
//! - `PORT` - Server port number (default: 8080)
//! - `BASE_URL` - Public prefix for short URLs (default: `http://localhost:{PORT}`)
//! - `DATA_FILE` - Path of the JSON data file (default: `links.json`)
//! - `AUTHORIZATION` - When set and non-empty, required value of the
//!   `Authorization` header on `/api` routes
//! - `FALLBACK_URL` - Where unknown short links redirect to (default: 404).
//!   Must be an absolute `http`/`https` URL; an invalid value is ignored with
//!   a warning.

use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::service::validate_destination;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub base_url: String,
    pub data_file: PathBuf,
    pub auth_token: Option<String>,
    pub fallback_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            base_url: "http://localhost:8080".to_string(),
            data_file: PathBuf::from("links.json"),
            auth_token: None,
            fallback_url: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        Self {
            port,
            base_url: env::var("BASE_URL").unwrap_or_else(|_| format!("http://localhost:{port}")),
            data_file: env::var("DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("links.json")),
            auth_token: non_empty_var("AUTHORIZATION"),
            fallback_url: parse_fallback(non_empty_var("FALLBACK_URL")),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

/// Keeps `FALLBACK_URL` only if it would make a valid redirect target.
fn parse_fallback(value: Option<String>) -> Option<String> {
    let value = value?;
    match validate_destination(&value) {
        Ok(url) => Some(url),
        Err(e) => {
            warn!(value = %value.escape_debug(), error = %e, "ignoring invalid FALLBACK_URL");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_accepts_absolute_http_url() {
        assert_eq!(
            parse_fallback(Some(" https://example.com/ ".to_string())),
            Some("https://example.com/".to_string())
        );
        assert_eq!(parse_fallback(None), None);
    }

    #[test]
    fn fallback_rejects_unusable_values() {
        for bad in ["example.com", "ftp://example.com", "https://example.com/a\nb"] {
            assert_eq!(parse_fallback(Some(bad.to_string())), None, "{bad:?}");
        }
    }
}
