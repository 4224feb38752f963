// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::toggle::{apply_toggle, toggle_requested};
use crate::admin::dispatch::AdminRequest;
use crate::admin::view::{AdminOutcome, AdminView};
use crate::app_state::AppState;
use crate::plugins::ActivePlugins;

pub fn list(state: &AppState, request: &AdminRequest, mut view: AdminView) -> AdminOutcome {
    if toggle_requested(request) {
        return apply_toggle(state, request);
    }

    let active = match state.model.active_plugins() {
        Ok(active) => ActivePlugins::parse(&active),
        Err(err) => {
            log::error!("Failed to read active plugins: {}", err);
            return AdminOutcome::error(view);
        }
    };

    let plugins = state.plugins.list_plugins(&active);
    view.set_serialized("plugins", &plugins);
    AdminOutcome::render(view, "plugin/index")
}
