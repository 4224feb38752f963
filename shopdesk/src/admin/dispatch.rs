// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::admin::middleware::ActiveSession;
use crate::admin::view::{AdminOutcome, AdminView};
use crate::admin::{login, plugins, products, themes};
use crate::app_state::AppState;
use crate::plugins::LifecycleEvent;
use crate::templates::AdminLayoutContext;
use actix_web::http::Method;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Result, web};

/// Every action the admin controller answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    Index,
    Products,
    /// Edit form; carries the raw id segment.
    Product(Option<String>),
    AddProduct,
    Themes,
    Login,
    Logout,
    Plugins,
    /// Plugin page; carries the raw slug segment.
    Plugin(Option<String>),
}

impl AdminAction {
    pub fn name(&self) -> &'static str {
        match self {
            AdminAction::Index => "index",
            AdminAction::Products => "products",
            AdminAction::Product(_) => "product",
            AdminAction::AddProduct => "addproduct",
            AdminAction::Themes => "themes",
            AdminAction::Login => "login",
            AdminAction::Logout => "logout",
            AdminAction::Plugins => "plugins",
            AdminAction::Plugin(_) => "plugin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRoute {
    /// First path segment as requested, exposed to templates as `url`.
    pub url: String,
    /// `None` when no action matches.
    pub action: Option<AdminAction>,
}

/// The part of `path` after the admin prefix, without leading or trailing `/`.
pub fn admin_tail<'a>(path: &'a str, admin_path: &str) -> &'a str {
    path.strip_prefix(admin_path)
        .unwrap_or(path)
        .trim_matches('/')
}

pub fn first_segment(tail: &str) -> &str {
    tail.split('/').next().unwrap_or("")
}

pub fn resolve_route(tail: &str) -> AdminRoute {
    let segments: Vec<&str> = tail.trim_matches('/').split('/').collect();
    let first = segments.first().copied().unwrap_or("");
    let second = segments
        .get(1)
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_string());

    let action = match (first, second.as_deref()) {
        ("products", Some("add")) => Some(AdminAction::AddProduct),
        ("products", Some(_)) => Some(AdminAction::Product(second.clone())),
        _ => action_by_name(&first.replace('_', "").to_ascii_lowercase(), second.clone()),
    };

    AdminRoute {
        url: first.to_string(),
        action,
    }
}

fn action_by_name(name: &str, second: Option<String>) -> Option<AdminAction> {
    match name {
        "" | "index" => Some(AdminAction::Index),
        "products" => Some(AdminAction::Products),
        "product" => Some(AdminAction::Product(second)),
        "addproduct" => Some(AdminAction::AddProduct),
        "themes" => Some(AdminAction::Themes),
        "login" => Some(AdminAction::Login),
        "logout" => Some(AdminAction::Logout),
        "plugins" => Some(AdminAction::Plugins),
        "plugin" => Some(AdminAction::Plugin(second)),
        _ => None,
    }
}

/// Decoded request data handed to every action.
#[derive(Debug, Clone, Default)]
pub struct AdminRequest {
    pub is_post: bool,
    pub session: Option<ActiveSession>,
    pub query: Vec<(String, String)>,
    pub form: Vec<(String, String)>,
}

impl AdminRequest {
    pub fn query_value(&self, key: &str) -> Option<&str> {
        first_value(&self.query, key)
    }

    pub fn form_value(&self, key: &str) -> Option<&str> {
        first_value(&self.form, key)
    }

    pub fn has_form_value(&self, key: &str) -> bool {
        self.is_post && self.form_value(key).is_some()
    }
}

fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

fn decode_request(req: &HttpRequest, body: &[u8]) -> AdminRequest {
    let query = web::Query::<Vec<(String, String)>>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .unwrap_or_else(|err| {
            log::warn!("Ignoring malformed admin query string: {}", err);
            Vec::new()
        });
    let is_post = req.method() == Method::POST;
    let form = if is_post && !body.is_empty() {
        serde_urlencoded::from_bytes::<Vec<(String, String)>>(body).unwrap_or_else(|err| {
            log::warn!("Ignoring malformed admin form body: {}", err);
            Vec::new()
        })
    } else {
        Vec::new()
    };

    AdminRequest {
        is_post,
        session: req.extensions().get::<ActiveSession>().cloned(),
        query,
        form,
    }
}

/// Single entry point for everything under the admin path.
pub async fn handle_admin_request(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if req.method() != Method::GET && req.method() != Method::POST {
        return Ok(HttpResponse::MethodNotAllowed().finish());
    }

    let config = &state.config;
    let route = resolve_route(admin_tail(req.path(), &config.admin.path));
    let request = decode_request(&req, &body);
    let layout = AdminLayoutContext::new(
        &config.app.name,
        &config.admin.path,
        &route.url,
        request.session.is_some(),
    );
    let view = AdminView::new(layout);

    let Some(action) = route.action else {
        log::debug!("No admin action for '{}'", req.path());
        return Ok(AdminOutcome::not_found(view).into_response(&state));
    };

    state.plugins.notify(&mut LifecycleEvent::AdminDelegated {
        action: action.name(),
    });

    let outcome = match action {
        AdminAction::Index => index(&request, view),
        AdminAction::Products => products::list(&state, view),
        AdminAction::Product(id) => products::edit(&state, &request, view, id.as_deref()),
        AdminAction::AddProduct => products::add(&state, &request, view),
        AdminAction::Themes => themes::list(&state, view),
        AdminAction::Login => login::login(&state, &request, view).await,
        AdminAction::Logout => login::logout(&state, &request).await,
        AdminAction::Plugins => plugins::list(&state, &request, view),
        AdminAction::Plugin(slug) => plugins::single(&state, view, slug.as_deref()),
    };

    Ok(outcome.into_response(&state))
}

fn index(request: &AdminRequest, mut view: AdminView) -> AdminOutcome {
    if let Some(active) = &request.session {
        view.set("operator_name", active.session.name.as_str());
    }
    AdminOutcome::render(view, "index")
}
