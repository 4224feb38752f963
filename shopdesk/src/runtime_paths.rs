// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::config::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct RuntimePaths {
    pub root: PathBuf,
    pub config_file: PathBuf,
    pub users_file: PathBuf,
    pub themes_dir: PathBuf,
    pub plugins_dir: PathBuf,
    pub state_dir: PathBuf,
    pub products_file: PathBuf,
    pub plugin_state_file: PathBuf,
}

impl RuntimePaths {
    pub fn from_root(root: &Path) -> Result<Self, ConfigError> {
        let root_path = if root.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            root.to_path_buf()
        };

        if !root_path.exists() {
            fs::create_dir_all(&root_path).map_err(|e| {
                ConfigError::ValidationError(format!(
                    "Failed to create runtime root '{}': {}",
                    root_path.display(),
                    e
                ))
            })?;
        }

        let root_canonical = canonicalize(&root_path, "runtime root")?;

        let themes_dir = root_canonical.join("themes");
        let plugins_dir = root_canonical.join("plugins");
        let state_dir = root_canonical.join("state");

        ensure_dir_exists(&themes_dir)?;
        ensure_dir_exists(&plugins_dir)?;
        ensure_dir_exists(&state_dir)?;

        let themes_dir = canonicalize(&themes_dir, "themes directory")?;
        let plugins_dir = canonicalize(&plugins_dir, "plugins directory")?;
        let state_dir = canonicalize(&state_dir, "state directory")?;

        Ok(Self {
            config_file: root_canonical.join("config.yaml"),
            users_file: root_canonical.join("users.yaml"),
            products_file: state_dir.join("products.yaml"),
            plugin_state_file: state_dir.join("plugins.yaml"),
            root: root_canonical,
            themes_dir,
            plugins_dir,
            state_dir,
        })
    }
}

fn canonicalize(path: &Path, label: &str) -> Result<PathBuf, ConfigError> {
    path.canonicalize().map_err(|e| {
        ConfigError::ValidationError(format!(
            "Failed to canonicalize {} '{}': {}",
            label,
            path.display(),
            e
        ))
    })
}

fn ensure_dir_exists(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(ConfigError::ValidationError(format!(
                "Expected a directory at '{}'",
                path.display()
            )));
        }
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| {
        ConfigError::ValidationError(format!(
            "Failed to create directory '{}': {}",
            path.display(),
            e
        ))
    })
}
