// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::admin::view::{AdminOutcome, AdminView};
use crate::app_state::AppState;
use serde::Serialize;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeEntry {
    pub name: String,
    pub file_count: usize,
    pub size_bytes: u64,
    pub size: String,
    pub active: bool,
}

pub fn list(state: &AppState, mut view: AdminView) -> AdminOutcome {
    let themes = scan_themes_directory(&state.runtime_paths.themes_dir, &state.config.app.theme);
    view.set_serialized("themes", &themes);
    AdminOutcome::render(view, "theme/index")
}

/// Every visible directory under `themes_dir`, sorted by name.
pub fn scan_themes_directory(themes_dir: &Path, active_theme: &str) -> Vec<ThemeEntry> {
    let mut themes = Vec::new();

    if let Ok(entries) = fs::read_dir(themes_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();

            // Skip hidden files and directories starting with '.'
            if name.starts_with('.') || !path.is_dir() {
                continue;
            }

            let (file_count, size_bytes) = directory_usage(&path);
            themes.push(ThemeEntry {
                active: name == active_theme,
                size: format_file_size(size_bytes),
                name,
                file_count,
                size_bytes,
            });
        }
    } else {
        log::warn!("Failed to read themes directory {}", themes_dir.display());
    }

    themes.sort_by(|a, b| a.name.cmp(&b.name));
    themes
}

fn directory_usage(dir: &Path) -> (usize, u64) {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .fold((0, 0), |(count, bytes), entry| {
            let len = entry.metadata().map(|m| m.len()).unwrap_or(0);
            (count + 1, bytes + len)
        })
}

pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_fixtures::TestFixtureRoot;

    #[test]
    fn lists_theme_directories_and_flags_active() {
        let fixture = TestFixtureRoot::new_unique("themes-scan").unwrap();
        let themes_dir = fixture.themes_dir();
        fs::create_dir_all(themes_dir.join("default/partials")).unwrap();
        fs::create_dir_all(themes_dir.join("autumn")).unwrap();
        fs::create_dir_all(themes_dir.join(".cache")).unwrap();
        fs::write(themes_dir.join("default/layout.html"), "<html></html>").unwrap();
        fs::write(themes_dir.join("default/partials/nav.html"), "<nav>").unwrap();
        fs::write(themes_dir.join("stray.html"), "x").unwrap();

        let themes = scan_themes_directory(&themes_dir, "default");
        let names: Vec<&str> = themes.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["autumn", "default"]);
        assert!(!themes[0].active);
        assert!(themes[1].active);
        assert_eq!(themes[1].file_count, 2);
        assert_eq!(themes[1].size_bytes, 18);
    }

    #[test]
    fn formats_sizes() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(2048), "2.0 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.0 MB");
    }
}
