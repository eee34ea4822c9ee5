//! Application configuration management

use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Database URL (SQLite). Prefer DATABASE_PATH; DATABASE_URL may carry a
    /// full sqlite: URL.
    pub database_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            let path = env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/talentnet.db".to_string());
            format!("sqlite:{}", path)
        });

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .context("Invalid PORT")?,

            database_url,
        })
    }
}
