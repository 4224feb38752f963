// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{BootstrapError, log_action};
use crate::config::ValidatedConfig;
use crate::runtime_paths::RuntimePaths;
use std::fs;
use std::path::Path;

/// Resolves the runtime directories and makes sure the configured theme has
/// a directory to live in.
pub fn ensure_paths(
    root: &Path,
    config: &ValidatedConfig,
) -> Result<RuntimePaths, BootstrapError> {
    let runtime_paths = RuntimePaths::from_root(root).map_err(BootstrapError::Config)?;
    ensure_theme_dir(&runtime_paths, &config.app.theme)?;
    Ok(runtime_paths)
}

fn ensure_theme_dir(paths: &RuntimePaths, theme: &str) -> Result<(), BootstrapError> {
    let theme = theme.trim();
    if theme.is_empty() || theme.contains(['/', '\\']) || theme.starts_with('.') {
        return Ok(());
    }
    let theme_dir = paths.themes_dir.join(theme);
    if theme_dir.exists() {
        return Ok(());
    }
    fs::create_dir_all(&theme_dir)?;
    log_action(format!("created theme directory {}", theme_dir.display()));
    Ok(())
}
