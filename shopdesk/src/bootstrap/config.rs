// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{BootstrapError, log_action};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

const DEFAULT_PORT: u16 = 7080;
const DEFAULT_WORKERS: u16 = 2;

pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Writes the default `config.yaml` unless one already exists.
pub fn ensure_config(root: &Path) -> Result<bool, BootstrapError> {
    let config_path = root.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        return Ok(false);
    }

    let contents = default_config_yaml();

    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&config_path)
    {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => return Err(BootstrapError::Io(err)),
    };

    file.write_all(contents.as_bytes())?;
    file.sync_all()?;

    log_action(format!(
        "created {} (http {}, admin at /admin)",
        CONFIG_FILE_NAME, DEFAULT_PORT
    ));

    Ok(true)
}

fn default_config_yaml() -> String {
    format!(
        "server:\n  host: \"127.0.0.1\"\n  port: {port}\n  workers: {workers}\n\napp:\n  name: \"ShopDesk\"\n  theme: \"default\"\n\nadmin:\n  path: \"/admin\"\n\nsession:\n  key: \"shopdesk_admin\"\n  idle_timeout_minutes: 120\n  secure_cookie: false\n\nlogin:\n  failure_delay_ms: 1000\n  password_hashing:\n    memory_kib: 19456\n    iterations: 2\n    parallelism: 1\n\nplugins:\n  active: \"\"\n\nlogging:\n  level: \"info\"\n",
        port = DEFAULT_PORT,
        workers = DEFAULT_WORKERS,
    )
}
