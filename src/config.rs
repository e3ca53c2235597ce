//! Configuration management for the lost and found board.
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present). Values that fail to parse fall back to their defaults.

use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Initialize configuration (call once at startup)
pub fn init() -> &'static Config {
    config()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// JSON file holding every item record.
    pub data_file: PathBuf,
    /// Directory uploaded images are written to.
    pub upload_dir: PathBuf,
    /// Maximum accepted request body, in bytes.
    pub max_upload_size: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            server: ServerConfig {
                host: env_or("HOST", "0.0.0.0"),
                port: env_or("PORT", "5000").parse().unwrap_or(5000),
            },
            storage: StorageConfig {
                data_file: PathBuf::from(env_or("DATA_FILE", "items.json")),
                upload_dir: PathBuf::from(env_or("UPLOAD_DIR", "static/uploads")),
                max_upload_size: env_or("MAX_UPLOAD_SIZE", "16777216")
                    .parse()
                    .unwrap_or(16 * 1024 * 1024), // 16MB
            },
        }
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
