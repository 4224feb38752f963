// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::admin::dispatch::AdminRequest;
use crate::admin::view::{AdminOutcome, AdminView};
use crate::app_state::AppState;
use crate::catalog::{ModelError, ProductFields};

pub fn edit(
    state: &AppState,
    request: &AdminRequest,
    mut view: AdminView,
    id: Option<&str>,
) -> AdminOutcome {
    let Some(id) = id.and_then(|raw| raw.parse::<u64>().ok()) else {
        return AdminOutcome::not_found(view);
    };

    let mut message = None;
    if request.is_post {
        let fields = ProductFields::from_input(|field| request.form_value(field));
        match state.model.update(id, &fields) {
            Ok(result) => message = result,
            Err(ModelError::NotFound(_)) => {
                return AdminOutcome::redirect(state.config.admin_url("products"));
            }
            Err(err) => {
                log::error!("Failed to update product {}: {}", id, err);
                return AdminOutcome::redirect(state.config.admin_url("products"));
            }
        }
    }

    match state.model.find_product(id) {
        Ok(Some(product)) => {
            view.set_serialized("product", &product);
            if let Some(message) = message {
                view.set_message(message);
            }
            AdminOutcome::render(view, "product/edit")
        }
        Ok(None) => AdminOutcome::not_found(view),
        Err(err) => {
            log::error!("Failed to load product {}: {}", id, err);
            AdminOutcome::error(view)
        }
    }
}
