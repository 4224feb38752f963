// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::admin::dispatch::AdminRequest;
use crate::admin::view::{AdminOutcome, AdminView};
use crate::app_state::AppState;
use crate::catalog::{PRODUCT_FIELDS, ProductRecord, missing_required, normalize_stock};
use std::collections::BTreeMap;

pub const UNEXPECTED_ERROR_MESSAGE: &str = "Unexpected error. Try again in a minute.";

/// Add form. The stock value is derived before validation so both stock
/// columns of the record share it.
pub fn add(state: &AppState, request: &AdminRequest, mut view: AdminView) -> AdminOutcome {
    let stock = normalize_stock(request.form_value("total_stock"));

    // Posted values are echoed back into the form.
    let posted: BTreeMap<&str, &str> = PRODUCT_FIELDS
        .into_iter()
        .filter_map(|field| request.form_value(field).map(|value| (field, value)))
        .collect();
    view.set_serialized("product", &posted);

    if !request.is_post {
        return AdminOutcome::render(view, "product/add");
    }

    let errors = missing_required(|field| request.form_value(field));
    let record = ProductRecord::from_input(|field| request.form_value(field), stock);

    if !errors.is_empty() {
        view.set_message(errors.join("<br>"));
        return AdminOutcome::render(view, "product/add");
    }

    match state.model.insert_product(record) {
        Ok(product) => {
            log::info!("Created product {} ({})", product.id, product.slug);
            AdminOutcome::redirect(state.config.admin_url(&format!("products/{}", product.id)))
        }
        Err(err) => {
            log::error!("Failed to create product: {}", err);
            view.set_message(UNEXPECTED_ERROR_MESSAGE);
            AdminOutcome::render(view, "product/add")
        }
    }
}
