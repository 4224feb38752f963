// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::admin::view::{AdminOutcome, AdminView};
use crate::app_state::AppState;

/// A plugin's own admin page, or back to the list when it has none.
pub fn single(state: &AppState, mut view: AdminView, slug: Option<&str>) -> AdminOutcome {
    let Some((slug, content)) =
        slug.and_then(|slug| state.plugins.pages(slug).map(|page| (slug, page)))
    else {
        return AdminOutcome::redirect(state.config.admin_url("plugins"));
    };

    view.set("slug", slug).set("content", content);
    AdminOutcome::render(view, "plugin/single")
}
