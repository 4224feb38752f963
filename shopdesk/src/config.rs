// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Failed logins are never answered faster than this.
pub const MIN_LOGIN_FAILURE_DELAY_MS: u64 = 1000;

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub app: AppConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub login: LoginConfig,
    #[serde(default)]
    pub plugins: PluginsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_workers() -> usize {
    2
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub name: String,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String {
    "default".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AdminConfig {
    #[serde(default = "default_admin_path")]
    pub path: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            path: default_admin_path(),
        }
    }
}

fn default_admin_path() -> String {
    "/admin".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    #[serde(default = "default_session_key")]
    pub key: String,
    #[serde(default = "default_idle_timeout_minutes")]
    pub idle_timeout_minutes: u64,
    #[serde(default)]
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            key: default_session_key(),
            idle_timeout_minutes: default_idle_timeout_minutes(),
            secure_cookie: false,
        }
    }
}

fn default_session_key() -> String {
    "shopdesk_admin".to_string()
}

fn default_idle_timeout_minutes() -> u64 {
    120
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoginConfig {
    #[serde(default = "default_failure_delay_ms")]
    pub failure_delay_ms: u64,
    #[serde(default)]
    pub password_hashing: PasswordHashingParams,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            failure_delay_ms: default_failure_delay_ms(),
            password_hashing: PasswordHashingParams::default(),
        }
    }
}

fn default_failure_delay_ms() -> u64 {
    MIN_LOGIN_FAILURE_DELAY_MS
}

/// Argon2id cost parameters used when new password hashes are created.
/// Existing hashes carry their own parameters.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHashingParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordHashingParams {
    fn default() -> Self {
        Self {
            memory_kib: 19456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PluginsConfig {
    /// Comma separated plugin slugs, only used to seed the activation state.
    #[serde(default)]
    pub active: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub server: ServerConfig,
    pub app: AppConfig,
    pub admin: AdminConfig,
    pub session: ValidatedSessionConfig,
    pub login: ValidatedLoginConfig,
    pub plugins: PluginsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ValidatedSessionConfig {
    pub key: String,
    pub idle_timeout: Duration,
    pub secure_cookie: bool,
}

#[derive(Debug, Clone)]
pub struct ValidatedLoginConfig {
    pub failure_delay: Duration,
    pub password_hashing: PasswordHashingParams,
}

impl Config {
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let config_path = root.join("config.yaml");
        let config_content = fs::read_to_string(&config_path).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        Self::parse(&config_content).map_err(|e| match e {
            ConfigError::LoadError(msg) => ConfigError::LoadError(format!(
                "Failed to parse config file '{}': {}",
                config_path.display(),
                msg
            )),
            other => other,
        })
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::LoadError(e.to_string()))
    }

    /// Loads and validates configuration at startup. If validation fails, the application should not start.
    pub fn load_and_validate(root: &Path) -> Result<ValidatedConfig, ConfigError> {
        Self::load(root)?.validate()
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        let admin_path = self.admin.path.trim().to_string();
        if !admin_path.starts_with('/') || admin_path.len() < 2 {
            return Err(ConfigError::ValidationError(format!(
                "admin.path must start with '/' and name a directory, got: '{}'",
                self.admin.path
            )));
        }
        if admin_path.ends_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "admin.path must not end with '/', got: '{}'",
                self.admin.path
            )));
        }

        let key = self.session.key.trim();
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::ValidationError(format!(
                "session.key must be a non-empty token of letters, digits, '_' or '-', got: '{}'",
                self.session.key
            )));
        }
        if self.session.idle_timeout_minutes == 0 {
            return Err(ConfigError::ValidationError(
                "session.idle_timeout_minutes must be at least 1".to_string(),
            ));
        }

        if self.login.failure_delay_ms < MIN_LOGIN_FAILURE_DELAY_MS {
            return Err(ConfigError::ValidationError(format!(
                "login.failure_delay_ms must be at least {}, got: {}",
                MIN_LOGIN_FAILURE_DELAY_MS, self.login.failure_delay_ms
            )));
        }
        let hashing = self.login.password_hashing;
        if hashing.iterations == 0 || hashing.parallelism == 0 || hashing.memory_kib < 8 {
            return Err(ConfigError::ValidationError(format!(
                "login.password_hashing parameters are out of range: {:?}",
                hashing
            )));
        }

        if self.server.workers == 0 {
            return Err(ConfigError::ValidationError(
                "server.workers must be at least 1".to_string(),
            ));
        }

        Ok(ValidatedConfig {
            server: self.server,
            app: self.app,
            admin: AdminConfig { path: admin_path },
            session: ValidatedSessionConfig {
                key: key.to_string(),
                idle_timeout: Duration::from_secs(self.session.idle_timeout_minutes * 60),
                secure_cookie: self.session.secure_cookie,
            },
            login: ValidatedLoginConfig {
                failure_delay: Duration::from_millis(self.login.failure_delay_ms),
                password_hashing: hashing,
            },
            plugins: self.plugins,
            logging: self.logging,
        })
    }
}

impl ValidatedConfig {
    /// Absolute URL path of an admin action, e.g. `admin_url("products/add")`.
    pub fn admin_url(&self, tail: &str) -> String {
        let tail = tail.trim_start_matches('/');
        if tail.is_empty() {
            self.admin.path.clone()
        } else {
            format!("{}/{}", self.admin.path, tail)
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.logging.level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            _ => log::LevelFilter::Info,
        }
    }
}
