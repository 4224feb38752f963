// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod dispatch;
pub mod login;
pub mod middleware;
pub mod plugins;
pub mod products;
pub mod themes;
pub mod view;

use crate::config::ValidatedConfig;
use crate::sessions::AdminSessionStore;
use actix_web::web;
use std::sync::Arc;

/// Mounts the admin controller under `admin.path`. Every request below it
/// passes the session gate and is dispatched by [`dispatch::handle_admin_request`].
pub fn configure(
    cfg: &mut web::ServiceConfig,
    config: Arc<ValidatedConfig>,
    sessions: AdminSessionStore,
) {
    let admin_path = config.admin.path.clone();
    cfg.service(
        web::scope(&admin_path)
            .wrap(middleware::RequireAdminSession::new(config, sessions))
            .route("", web::to(dispatch::handle_admin_request))
            .route("/{tail:.*}", web::to(dispatch::handle_admin_request)),
    );
}
