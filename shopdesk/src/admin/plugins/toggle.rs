// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::admin::dispatch::AdminRequest;
use crate::admin::view::AdminOutcome;
use crate::app_state::AppState;
use crate::plugins::LifecycleEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleMode {
    Enable,
    Disable,
}

impl ToggleMode {
    /// Checked in this order; only the first mode with a value runs.
    pub const ORDER: [ToggleMode; 2] = [ToggleMode::Enable, ToggleMode::Disable];

    pub fn query_key(self) -> &'static str {
        match self {
            ToggleMode::Enable => "enable",
            ToggleMode::Disable => "disable",
        }
    }
}

/// True when the query names either toggle key, with or without a value.
pub fn toggle_requested(request: &AdminRequest) -> bool {
    ToggleMode::ORDER
        .iter()
        .any(|mode| request.query_value(mode.query_key()).is_some())
}

/// Runs the first toggle mode carrying a non-empty value, then redirects to
/// the plugin list. Toggle keys without a value change nothing.
pub fn apply_toggle(state: &AppState, request: &AdminRequest) -> AdminOutcome {
    let plugins_url = state.config.admin_url("plugins");
    for mode in ToggleMode::ORDER {
        let Some(slug) = request
            .query_value(mode.query_key())
            .filter(|value| !value.is_empty())
        else {
            continue;
        };

        let result = match mode {
            ToggleMode::Enable => {
                state
                    .plugins
                    .notify(&mut LifecycleEvent::PluginEnabled { slug });
                state.model.enable_plugin(slug)
            }
            ToggleMode::Disable => {
                state
                    .plugins
                    .notify(&mut LifecycleEvent::PluginDisabled { slug });
                state.model.disable_plugin(slug)
            }
        };
        match result {
            Ok(()) => log::info!("Plugin {:?}: {}", mode, slug),
            Err(err) => log::error!("Failed to {} plugin {:?}: {}", mode.query_key(), slug, err),
        }
        return AdminOutcome::redirect(plugins_url);
    }
    log::debug!("Plugin toggle without a slug");
    AdminOutcome::redirect(plugins_url)
}
