// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::admin::view::{AdminOutcome, AdminView};
use crate::app_state::AppState;
use crate::plugins::LifecycleEvent;

/// Product list. An empty catalog goes straight to the add form.
pub fn list(state: &AppState, mut view: AdminView) -> AdminOutcome {
    let mut products = match state.model.all_products() {
        Ok(products) => products,
        Err(err) => {
            log::error!("Failed to load products: {}", err);
            return AdminOutcome::error(view);
        }
    };
    if products.is_empty() {
        return AdminOutcome::redirect(state.config.admin_url("products/add"));
    }

    state.plugins.notify(&mut LifecycleEvent::AdminProducts {
        products: &mut products,
    });

    view.set_serialized("products", &products);
    AdminOutcome::render(view, "product/index")
}
