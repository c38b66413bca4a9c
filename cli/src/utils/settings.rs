use anyhow::{anyhow, Context, Result};
use database::DatabaseConfig;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use user::auth::token::{TokenConfig, DEFAULT_TTL_SECONDS, DEV_SECRET};

pub const DEFAULT_DATA_PATH: &str = "./data";
pub const DATABASE_FILE: &str = "jobboard.db";

/// Runtime settings read from the environment, with `.env` support.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_path: PathBuf,
    pub database_path: PathBuf,
    pub database_max_connections: u32,
    pub api_port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_seconds: i64,
    pub seed_demo_data: bool,
}

/// Printable form of [`Settings`] with the signing secret withheld.
#[derive(Debug, Serialize)]
pub struct SettingsView {
    pub data_path: String,
    pub database_path: String,
    pub database_max_connections: u32,
    pub api_port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_seconds: i64,
    pub seed_demo_data: bool,
}

impl Settings {
    /// Load `.env` from the current directory if present, then read the
    /// process environment. Relative paths resolve against the current
    /// directory.
    pub fn load() -> Result<Self> {
        let cwd = env::current_dir().context("Failed to get current directory")?;
        let env_file = cwd.join(".env");
        if env_file.exists() {
            dotenv::from_path(&env_file).ok();
        }
        Self::from_lookup(&cwd, |name| env::var(name).ok())
    }

    /// Build settings from any variable source. Relative paths resolve
    /// against `base_dir`.
    pub fn from_lookup<F>(base_dir: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let data_path = resolve(
            base_dir,
            value("DATA_PATH").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string()),
        );
        let database_path = match value("DATABASE_PATH") {
            Some(path) => resolve(base_dir, path),
            None => data_path.join(DATABASE_FILE),
        };

        Ok(Self {
            database_max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                value("DATABASE_MAX_CONNECTIONS"),
                database::init::DEFAULT_MAX_CONNECTIONS,
            )?,
            api_port: parse_or("API_PORT", value("API_PORT"), api::server::DEFAULT_PORT)?,
            jwt_secret: value("JWT_SECRET").unwrap_or_else(|| DEV_SECRET.to_string()),
            jwt_ttl_seconds: parse_or("JWT_TTL_SECONDS", value("JWT_TTL_SECONDS"), DEFAULT_TTL_SECONDS)?,
            seed_demo_data: match value("SEED_DEMO_DATA") {
                Some(raw) => parse_bool("SEED_DEMO_DATA", &raw)?,
                None => cfg!(debug_assertions),
            },
            data_path,
            database_path,
        })
    }

    pub fn logs_path(&self) -> PathBuf {
        self.data_path.join("logs")
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_SECRET
    }

    pub fn token_config(&self) -> TokenConfig {
        TokenConfig::new(self.jwt_secret.clone(), self.jwt_ttl_seconds)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new_with_path(self.database_path.clone())
            .with_max_connections(self.database_max_connections)
    }

    pub fn view(&self) -> SettingsView {
        SettingsView {
            data_path: self.data_path.display().to_string(),
            database_path: self.database_path.display().to_string(),
            database_max_connections: self.database_max_connections,
            api_port: self.api_port,
            jwt_secret: if self.uses_dev_secret() {
                "<development default>".to_string()
            } else {
                "<redacted>".to_string()
            },
            jwt_ttl_seconds: self.jwt_ttl_seconds,
            seed_demo_data: self.seed_demo_data,
        }
    }
}

fn resolve(base_dir: &Path, raw: String) -> PathBuf {
    let path = PathBuf::from(raw);
    if path.is_relative() {
        base_dir.join(path)
    } else {
        path
    }
}

fn parse_or<T: std::str::FromStr>(name: &str, raw: Option<String>, default: T) -> Result<T> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow!("{} has an invalid value: {:?}", name, raw)),
        None => Ok(default),
    }
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("{} must be true or false, got {:?}", name, raw)),
    }
}
