// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use crate::config::{
    AdminConfig, AppConfig, LoggingConfig, MIN_LOGIN_FAILURE_DELAY_MS, PasswordHashingParams,
    PluginsConfig, ServerConfig, ValidatedConfig, ValidatedLoginConfig, ValidatedSessionConfig,
};
use std::time::Duration;

/// Argon2 parameters cheap enough for debug-build tests.
pub const TEST_PASSWORD_HASHING: PasswordHashingParams = PasswordHashingParams {
    memory_kib: 64,
    iterations: 1,
    parallelism: 1,
};

#[derive(Debug, Clone)]
pub struct TestConfigBuilder {
    config: ValidatedConfig,
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ValidatedConfig {
                server: ServerConfig {
                    host: "127.0.0.1".to_string(),
                    port: 7080,
                    workers: 1,
                },
                app: AppConfig {
                    name: "Test Shop".to_string(),
                    theme: "default".to_string(),
                },
                admin: AdminConfig {
                    path: "/admin".to_string(),
                },
                session: ValidatedSessionConfig {
                    key: "shopdesk_admin".to_string(),
                    idle_timeout: Duration::from_secs(3600),
                    secure_cookie: false,
                },
                login: ValidatedLoginConfig {
                    failure_delay: Duration::from_millis(MIN_LOGIN_FAILURE_DELAY_MS),
                    password_hashing: TEST_PASSWORD_HASHING,
                },
                plugins: PluginsConfig::default(),
                logging: LoggingConfig {
                    level: "info".to_string(),
                },
            },
        }
    }

    pub fn with_active_plugins(mut self, active: &str) -> Self {
        self.config.plugins.active = active.to_string();
        self
    }

    pub fn with_admin_path(mut self, path: &str) -> Self {
        self.config.admin.path = path.to_string();
        self
    }

    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.session.idle_timeout = timeout;
        self
    }

    pub fn build(self) -> ValidatedConfig {
        self.config
    }
}

pub fn test_config() -> ValidatedConfig {
    TestConfigBuilder::new().build()
}
