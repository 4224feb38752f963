// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

pub const PLUGIN_DESCRIPTOR_FILE: &str = "about.json";

/// Plugin slugs name directories under `plugins/`, so only `[a-z0-9_-]+` is accepted.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
}

/// The comma separated list of active plugin slugs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivePlugins {
    slugs: Vec<String>,
}

impl ActivePlugins {
    pub fn parse(value: &str) -> Self {
        let slugs = value
            .split(',')
            .map(str::trim)
            .filter(|slug| !slug.is_empty())
            .map(str::to_string)
            .collect();
        Self { slugs }
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.slugs.iter().any(|active| active == slug)
    }

    pub fn slugs(&self) -> &[String] {
        &self.slugs
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginDescriptor {
    pub slug: String,
    pub active: bool,
    /// Everything from `about.json` except the keys owned by the descriptor.
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
    pub page: Option<String>,
}

impl PluginDescriptor {
    pub fn new(slug: String, active: bool, mut metadata: Map<String, Value>) -> Self {
        for reserved in ["slug", "active", "page"] {
            metadata.remove(reserved);
        }
        Self {
            slug,
            active,
            metadata,
            page: None,
        }
    }

    pub fn name(&self) -> &str {
        self.metadata
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(&self.slug)
    }
}

/// Reads every `plugins/<slug>/about.json`, sorted by slug.
///
/// Directories with an invalid slug, a missing descriptor or a descriptor that
/// is not a JSON object are skipped.
pub fn discover_plugins(plugins_dir: &Path) -> Vec<(String, Map<String, Value>)> {
    let entries = match fs::read_dir(plugins_dir) {
        Ok(entries) => entries,
        Err(err) => {
            if plugins_dir.exists() {
                log::warn!(
                    "Failed to read plugins directory {}: {}",
                    plugins_dir.display(),
                    err
                );
            }
            return Vec::new();
        }
    };

    let mut plugins = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(slug) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if !is_valid_slug(slug) {
            log::debug!("Ignoring plugin directory with invalid slug: {:?}", slug);
            continue;
        }
        let descriptor_path = path.join(PLUGIN_DESCRIPTOR_FILE);
        if !descriptor_path.is_file() {
            continue;
        }
        match read_descriptor(&descriptor_path) {
            Ok(metadata) => plugins.push((slug.to_string(), metadata)),
            Err(err) => log::warn!("Skipping plugin '{}': {}", slug, err),
        }
    }
    plugins.sort_by(|a, b| a.0.cmp(&b.0));
    plugins
}

fn read_descriptor(path: &Path) -> Result<Map<String, Value>, String> {
    let content = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(format!("{} is not a JSON object", path.display())),
        Err(err) => Err(format!("failed to parse {}: {}", path.display(), err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_fixtures::TestFixtureRoot;

    #[test]
    fn slug_validation() {
        for valid in ["blog", "seo-tools", "a_b", "v2"] {
            assert!(is_valid_slug(valid), "{}", valid);
        }
        for invalid in ["", "Blog", "../etc", "a/b", "a b", "é"] {
            assert!(!is_valid_slug(invalid), "{}", invalid);
        }
    }

    #[test]
    fn active_plugins_trims_and_skips_empty_entries() {
        let active = ActivePlugins::parse(" blog ,,seo,");
        assert_eq!(active.slugs(), ["blog".to_string(), "seo".to_string()]);
        assert!(active.contains("seo"));
        assert!(!active.contains("se"));
        assert!(ActivePlugins::parse("").slugs().is_empty());
    }

    #[test]
    fn descriptor_drops_reserved_metadata_keys() {
        let metadata: Map<String, Value> = serde_json::from_str(
            r#"{"name":"Blog","slug":"spoofed","active":true,"page":"x","version":"1.0"}"#,
        )
        .unwrap();
        let descriptor = PluginDescriptor::new("blog".to_string(), false, metadata);
        assert_eq!(descriptor.slug, "blog");
        assert!(!descriptor.active);
        assert_eq!(descriptor.name(), "Blog");
        assert_eq!(descriptor.metadata.len(), 2);

        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["slug"], "blog");
        assert_eq!(json["version"], "1.0");
    }

    #[test]
    fn discovery_is_sorted_and_skips_broken_plugins() {
        let fixture = TestFixtureRoot::new_unique("plugin-discovery").unwrap();
        fixture
            .install_plugin("seo", r#"{"name":"SEO"}"#, None)
            .unwrap();
        fixture
            .install_plugin("blog", r#"{"name":"Blog"}"#, None)
            .unwrap();
        fixture.install_plugin("broken", "{not json", None).unwrap();
        fixture.install_plugin("list", "[1,2]", None).unwrap();
        fixture
            .install_plugin("Upper", r#"{"name":"Upper"}"#, None)
            .unwrap();

        let slugs: Vec<String> = discover_plugins(&fixture.plugins_dir())
            .into_iter()
            .map(|(slug, _)| slug)
            .collect();
        assert_eq!(slugs, vec!["blog".to_string(), "seo".to_string()]);
    }

    #[test]
    fn missing_plugins_directory_is_empty() {
        let fixture = TestFixtureRoot::new_unique("plugin-none").unwrap();
        assert!(discover_plugins(&fixture.path().join("nope")).is_empty());
    }
}
