// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::sync::Arc;

use crate::catalog::ShopModel;
use crate::config::ValidatedConfig;
use crate::plugins::PluginHost;
use crate::runtime_paths::RuntimePaths;
use crate::sessions::AdminSessionStore;
use crate::templates::{MiniJinjaEngine, TemplateEngine};

pub struct AppState {
    pub config: Arc<ValidatedConfig>,
    pub templates: Arc<dyn TemplateEngine>,
    pub sessions: AdminSessionStore,
    pub model: Arc<dyn ShopModel>,
    pub plugins: PluginHost,
    pub runtime_paths: RuntimePaths,
}

impl AppState {
    pub fn new(
        config: Arc<ValidatedConfig>,
        runtime_paths: RuntimePaths,
        model: Arc<dyn ShopModel>,
        plugins: PluginHost,
    ) -> Self {
        Self {
            sessions: AdminSessionStore::new(config.session.idle_timeout),
            templates: Arc::new(MiniJinjaEngine::new()),
            config,
            model,
            plugins,
            runtime_paths,
        }
    }
}
