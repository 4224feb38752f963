// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::runtime_paths::RuntimePaths;

/// Scratch runtime root under `target/test-fixtures`, removed on drop.
#[derive(Debug)]
pub struct TestFixtureRoot {
    path: PathBuf,
}

impl TestFixtureRoot {
    /// A fresh `<prefix>-<uuid>` directory.
    pub fn new_unique(prefix: &str) -> std::io::Result<Self> {
        let path = scratch_dir().join(format!("{}-{}", prefix, Uuid::new_v4().simple()));
        if path.exists() {
            fs::remove_dir_all(&path)?;
        }
        fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn plugins_dir(&self) -> PathBuf {
        self.path.join("plugins")
    }

    pub fn themes_dir(&self) -> PathBuf {
        self.path.join("themes")
    }

    pub fn runtime_paths(&self) -> std::io::Result<RuntimePaths> {
        RuntimePaths::from_root(&self.path).map_err(|err| std::io::Error::other(err.to_string()))
    }

    /// Installs a plugin directory with an `about.json` and an optional admin page.
    pub fn install_plugin(
        &self,
        slug: &str,
        about_json: &str,
        admin_page: Option<&str>,
    ) -> std::io::Result<()> {
        let dir = self.plugins_dir().join(slug);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("about.json"), about_json)?;
        if let Some(page) = admin_page {
            fs::write(dir.join("admin.html"), page)?;
        }
        Ok(())
    }
}

impl Drop for TestFixtureRoot {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_dir_all(&self.path) {
            log::debug!("fixture {} not removed: {}", self.path.display(), err);
        }
    }
}

fn scratch_dir() -> PathBuf {
    let crate_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    crate_dir
        .parent()
        .unwrap_or(crate_dir)
        .join("target/test-fixtures")
}
