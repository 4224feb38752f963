// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::admin::dispatch::AdminRequest;
use crate::admin::view::{AdminOutcome, AdminView, SessionCookie};
use crate::app_state::AppState;
use crate::catalog::ModelError;
use crate::iam::{AdminSession, User};
use actix_web::rt::time::sleep;
use actix_web::web;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password.";

pub async fn login(state: &AppState, request: &AdminRequest, mut view: AdminView) -> AdminOutcome {
    if request.session.is_some() {
        return AdminOutcome::redirect(state.config.admin_url(""));
    }

    view.remove("logged_in");

    if request.has_form_value("username") {
        let username = request.form_value("username").unwrap_or_default();
        let password = request.form_value("password").unwrap_or_default();

        match verify_credentials(state, username, password).await {
            Ok(Some(user)) => {
                log::info!("Admin login succeeded for '{}'", user.username);
                let id = state.sessions.set(AdminSession::from(user)).await;
                return AdminOutcome::redirect(state.config.admin_url(""))
                    .with_session_cookie(SessionCookie::Issue(id));
            }
            Ok(None) => log::warn!("Admin login failed for '{}'", username),
            Err(err) => log::error!("Admin login could not verify credentials: {}", err),
        }

        sleep(state.config.login.failure_delay).await;
        view.set_message(INVALID_CREDENTIALS_MESSAGE);
        view.set("username", username);
    }

    view.set("class", "login");
    AdminOutcome::render(view, "login")
}

/// Password verification is CPU bound and runs on the blocking pool.
async fn verify_credentials(
    state: &AppState,
    username: &str,
    password: &str,
) -> Result<Option<User>, ModelError> {
    let model = state.model.clone();
    let username = username.to_string();
    let password = password.to_string();
    web::block(move || model.find_user(&username, &password))
        .await
        .map_err(|err| ModelError::Storage(err.to_string()))?
}

pub async fn logout(state: &AppState, request: &AdminRequest) -> AdminOutcome {
    if let Some(active) = &request.session {
        state.sessions.destroy(&active.id).await;
        log::info!("Admin logout for '{}'", active.session.username);
    }
    AdminOutcome::redirect(state.config.admin_url("login"))
        .with_session_cookie(SessionCookie::Clear)
}
