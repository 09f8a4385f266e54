//! Server configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_ROOMS_FILE: &str = "rooms.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub rooms_file: String,
    /// Exact origin allowed by CORS. `None` allows any origin.
    pub cors_allow_origin: Option<String>,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `DATA_DIR`: directory holding the rooms document, default `data`
    /// - `ROOMS_FILE`: file name inside `DATA_DIR`, default `rooms.json`
    /// - `CORS_ALLOW_ORIGIN`: single allowed origin, default any
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw.clone() })?,
            Err(_) => DEFAULT_PORT,
        };
        let data_dir = non_empty_var("DATA_DIR").map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let rooms_file = non_empty_var("ROOMS_FILE").unwrap_or_else(|| DEFAULT_ROOMS_FILE.to_owned());
        if rooms_file.contains(['/', '\\']) {
            return Err(ConfigError::Invalid { key: "ROOMS_FILE", value: rooms_file });
        }
        let cors_allow_origin = non_empty_var("CORS_ALLOW_ORIGIN").filter(|v| v != "*");

        Ok(Self { port, data_dir, rooms_file, cors_allow_origin })
    }

    /// Full path of the rooms document.
    #[must_use]
    pub fn rooms_path(&self) -> PathBuf {
        self.data_dir.join(&self.rooms_file)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
