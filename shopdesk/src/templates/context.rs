// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::catalog::STOCK_SENTINEL;
use minijinja::Value;

/// Variables every admin view starts from.
#[derive(Debug, Clone)]
pub struct AdminLayoutContext {
    app_name: String,
    admin_path: String,
    url: String,
    logged_in: bool,
}

impl AdminLayoutContext {
    /// `url` is the first path segment after the admin prefix.
    pub fn new(app_name: &str, admin_path: &str, url: &str, logged_in: bool) -> Self {
        Self {
            app_name: app_name.to_string(),
            admin_path: admin_path.to_string(),
            url: url.to_string(),
            logged_in,
        }
    }

    pub fn entries(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("app_name", Value::from(self.app_name.as_str())),
            ("admin_path", Value::from(self.admin_path.as_str())),
            ("url", Value::from(self.url.as_str())),
            ("logged_in", Value::from(self.logged_in)),
            ("stock_sentinel", Value::from(STOCK_SENTINEL)),
        ]
    }
}
