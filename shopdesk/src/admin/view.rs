// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::app_state::AppState;
use crate::templates::{AdminLayoutContext, TemplateEngine};
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, HttpResponseBuilder};
use minijinja::Value;
use serde::Serialize;
use std::collections::BTreeMap;

pub const MESSAGE_KEY: &str = "msg";

/// Template variables for one admin response, seeded from the layout context.
#[derive(Debug, Clone)]
pub struct AdminView {
    layout: AdminLayoutContext,
    vars: BTreeMap<String, Value>,
}

impl AdminView {
    pub fn new(layout: AdminLayoutContext) -> Self {
        let vars = layout
            .entries()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        Self { layout, vars }
    }

    pub fn layout(&self) -> &AdminLayoutContext {
        &self.layout
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.vars.insert(key.to_string(), value.into());
        self
    }

    pub fn set_serialized<T: Serialize>(&mut self, key: &str, value: &T) -> &mut Self {
        self.vars.insert(key.to_string(), Value::from_serialize(value));
        self
    }

    /// Messages are built from fixed strings only and render unescaped, so
    /// several can be joined with `<br>`.
    pub fn set_message(&mut self, message: impl Into<String>) -> &mut Self {
        let message: String = message.into();
        self.vars
            .insert(MESSAGE_KEY.to_string(), Value::from_safe_string(message));
        self
    }

    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.vars.remove(key);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    pub fn render(
        &self,
        engine: &dyn TemplateEngine,
        view_name: &str,
    ) -> Result<String, minijinja::Error> {
        engine.render(view_name, Value::from_serialize(&self.vars))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCookie {
    Keep,
    Issue(String),
    Clear,
}

#[derive(Debug)]
pub enum AdminOutcome {
    Render {
        view: AdminView,
        template: &'static str,
        status: StatusCode,
    },
    Redirect {
        location: String,
        cookie: SessionCookie,
    },
}

impl AdminOutcome {
    pub fn render(view: AdminView, template: &'static str) -> Self {
        AdminOutcome::Render {
            view,
            template,
            status: StatusCode::OK,
        }
    }

    pub fn not_found(view: AdminView) -> Self {
        AdminOutcome::Render {
            view,
            template: "404",
            status: StatusCode::NOT_FOUND,
        }
    }

    pub fn error(view: AdminView) -> Self {
        AdminOutcome::Render {
            view,
            template: "500",
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        AdminOutcome::Redirect {
            location: location.into(),
            cookie: SessionCookie::Keep,
        }
    }

    pub fn with_session_cookie(self, session_cookie: SessionCookie) -> Self {
        match self {
            AdminOutcome::Redirect { location, .. } => AdminOutcome::Redirect {
                location,
                cookie: session_cookie,
            },
            other => other,
        }
    }

    pub fn into_response(self, state: &AppState) -> HttpResponse {
        match self {
            AdminOutcome::Render {
                view,
                template,
                status,
            } => render_page(state.templates.as_ref(), &view, template, status),
            AdminOutcome::Redirect { location, cookie } => {
                let mut builder = HttpResponse::Found();
                builder.insert_header((LOCATION, location));
                match cookie {
                    SessionCookie::Keep => {}
                    SessionCookie::Issue(id) => {
                        builder.cookie(session_cookie(state, id));
                    }
                    SessionCookie::Clear => {
                        let mut removal = session_cookie(state, String::new());
                        removal.make_removal();
                        builder.cookie(removal);
                    }
                }
                builder.finish()
            }
        }
    }
}

fn session_cookie(state: &AppState, value: String) -> Cookie<'static> {
    Cookie::build(state.config.session.key.clone(), value)
        .path(state.config.admin.path.clone())
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.session.secure_cookie)
        .finish()
}

fn render_page(
    engine: &dyn TemplateEngine,
    view: &AdminView,
    template: &str,
    status: StatusCode,
) -> HttpResponse {
    match view.render(engine, template) {
        Ok(html) => html_response(HttpResponse::build(status), html),
        Err(err) => {
            log::error!("Failed to render admin template '{}': {}", template, err);
            let html = if template == "500" {
                fallback_500_html()
            } else {
                AdminView::new(view.layout().clone())
                    .render(engine, "500")
                    .unwrap_or_else(|err| {
                        log::error!("Failed to render admin template '500': {}", err);
                        fallback_500_html()
                    })
            };
            html_response(HttpResponse::InternalServerError(), html)
        }
    }
}

fn html_response(mut builder: HttpResponseBuilder, html: String) -> HttpResponse {
    builder
        .content_type("text/html; charset=utf-8")
        .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
        .insert_header(("Pragma", "no-cache"))
        .insert_header(("Expires", "0"))
        .body(html)
}

fn fallback_500_html() -> String {
    r#"<!DOCTYPE html>
<html><head><title>500 - Internal Server Error</title></head>
<body><h1>500 - Internal Server Error</h1><p>Unexpected error. Try again in a minute.</p></body></html>"#
        .to_string()
}
