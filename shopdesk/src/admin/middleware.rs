// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::admin::dispatch::{admin_tail, first_segment};
use crate::config::ValidatedConfig;
use crate::iam::AdminSession;
use crate::sessions::AdminSessionStore;
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::LOCATION,
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;

/// The operator session found for the current request, stored in request
/// extensions by [`RequireAdminSession`].
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub id: String,
    pub session: AdminSession,
}

/// Session gate for every admin route. Requests without a live session are
/// redirected to the login action; the login action itself always passes.
pub struct RequireAdminSession {
    config: Arc<ValidatedConfig>,
    sessions: AdminSessionStore,
}

impl RequireAdminSession {
    pub fn new(config: Arc<ValidatedConfig>, sessions: AdminSessionStore) -> Self {
        Self { config, sessions }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAdminSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAdminSessionService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAdminSessionService {
            service: Rc::new(service),
            config: self.config.clone(),
            sessions: self.sessions.clone(),
        }))
    }
}

pub struct RequireAdminSessionService<S> {
    service: Rc<S>,
    config: Arc<ValidatedConfig>,
    sessions: AdminSessionStore,
}

impl<S, B> Service<ServiceRequest> for RequireAdminSessionService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let config = self.config.clone();
        let sessions = self.sessions.clone();
        let session_id = req
            .cookie(&config.session.key)
            .map(|cookie| cookie.value().to_string());

        Box::pin(async move {
            let active = match session_id {
                Some(id) => sessions
                    .get(&id)
                    .await
                    .map(|session| ActiveSession { id, session }),
                None => None,
            };

            match active {
                Some(active) => {
                    req.extensions_mut().insert(active);
                }
                None => {
                    let tail = admin_tail(req.path(), &config.admin.path);
                    if first_segment(tail) != "login" {
                        let (req, _) = req.into_parts();
                        let response = HttpResponse::Found()
                            .insert_header((LOCATION, config.admin_url("login")))
                            .finish()
                            .map_into_right_body();
                        return Ok(ServiceResponse::new(req, response));
                    }
                }
            }

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}
