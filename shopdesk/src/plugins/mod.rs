// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Plugin discovery and the lifecycle hook chain admin actions notify.

mod discovery;

pub use discovery::{
    ActivePlugins, PLUGIN_DESCRIPTOR_FILE, PluginDescriptor, discover_plugins, is_valid_slug,
};

use crate::catalog::Product;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const PLUGIN_ADMIN_PAGE_FILE: &str = "admin.html";

/// A hook point. Payloads are borrowed mutably so observers can adjust them
/// before the admin action continues.
#[derive(Debug)]
pub enum LifecycleEvent<'a> {
    AdminDelegated { action: &'a str },
    AdminProducts { products: &'a mut Vec<Product> },
    AdminPluginList { plugin: &'a mut PluginDescriptor },
    PluginEnabled { slug: &'a str },
    PluginDisabled { slug: &'a str },
}

impl LifecycleEvent<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleEvent::AdminDelegated { .. } => "admin_delegated",
            LifecycleEvent::AdminProducts { .. } => "admin_products",
            LifecycleEvent::AdminPluginList { .. } => "admin_plugin_list",
            LifecycleEvent::PluginEnabled { .. } => "plugin_enabled",
            LifecycleEvent::PluginDisabled { .. } => "plugin_disabled",
        }
    }
}

pub trait LifecycleObserver: Send + Sync {
    fn receive(&self, event: &mut LifecycleEvent<'_>);
}

/// Writes every lifecycle event to the log.
pub struct LogObserver;

impl LifecycleObserver for LogObserver {
    fn receive(&self, event: &mut LifecycleEvent<'_>) {
        let name = event.name();
        match event {
            LifecycleEvent::AdminDelegated { action } => log::debug!("{}: {}", name, action),
            LifecycleEvent::AdminProducts { products } => {
                log::debug!("{}: {} product(s)", name, products.len())
            }
            LifecycleEvent::AdminPluginList { plugin } => log::debug!("{}: {}", name, plugin.slug),
            LifecycleEvent::PluginEnabled { slug } | LifecycleEvent::PluginDisabled { slug } => {
                log::info!("{}: {}", name, slug)
            }
        }
    }
}

pub struct PluginHost {
    plugins_dir: PathBuf,
    observers: Vec<Arc<dyn LifecycleObserver>>,
    pages: HashMap<String, String>,
}

impl PluginHost {
    pub fn new(plugins_dir: impl Into<PathBuf>) -> Self {
        Self {
            plugins_dir: plugins_dir.into(),
            observers: Vec::new(),
            pages: HashMap::new(),
        }
    }

    pub fn plugins_dir(&self) -> &Path {
        &self.plugins_dir
    }

    /// Observers are notified in registration order.
    pub fn register_observer(&mut self, observer: Arc<dyn LifecycleObserver>) {
        self.observers.push(observer);
    }

    /// Registers an admin page fragment, taking precedence over the plugin's `admin.html`.
    pub fn register_page(&mut self, slug: &str, content: impl Into<String>) {
        if !is_valid_slug(slug) {
            log::warn!("Refusing to register page for invalid plugin slug {:?}", slug);
            return;
        }
        self.pages.insert(slug.to_string(), content.into());
    }

    pub fn notify(&self, event: &mut LifecycleEvent<'_>) {
        for observer in &self.observers {
            observer.receive(event);
        }
    }

    /// The admin page fragment of a plugin, if it has one.
    pub fn pages(&self, slug: &str) -> Option<String> {
        if !is_valid_slug(slug) {
            return None;
        }
        if let Some(page) = self.pages.get(slug) {
            return Some(page.clone());
        }
        let path = self.plugins_dir.join(slug).join(PLUGIN_ADMIN_PAGE_FILE);
        if !path.is_file() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(err) => {
                log::error!("Failed to read plugin page {}: {}", path.display(), err);
                None
            }
        }
    }

    /// Installed plugins tagged with their activation state and page, each
    /// passed through the `admin_plugin_list` hook.
    pub fn list_plugins(&self, active: &ActivePlugins) -> Vec<PluginDescriptor> {
        discover_plugins(&self.plugins_dir)
            .into_iter()
            .map(|(slug, metadata)| {
                let is_active = active.contains(&slug);
                let mut plugin = PluginDescriptor::new(slug, is_active, metadata);
                plugin.page = self.pages(&plugin.slug);
                self.notify(&mut LifecycleEvent::AdminPluginList {
                    plugin: &mut plugin,
                });
                plugin
            })
            .collect()
    }
}
