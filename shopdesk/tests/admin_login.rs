// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod common;

use actix_web::http::header::CONTENT_TYPE;
use actix_web::{http::StatusCode, test};
use shopdesk::admin::login::INVALID_CREDENTIALS_MESSAGE;
use std::time::{Duration, Instant};

fn login_request(username: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/admin/login")
        .insert_header((CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload(common::form(&[("username", username), ("password", password)]))
}

#[actix_web::test]
async fn login_page_has_login_class_and_no_session_marker() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = test::TestRequest::get().uri("/admin/login").to_request();
    let resp = test::call_service(&app, req).await;
    let body = common::body_string(resp).await;
    assert!(body.contains("class=\"login\""));
    assert!(!body.contains("data-logged-in"));
    assert!(!body.contains("Log out"));
}

#[actix_web::test]
async fn wrong_password_is_delayed_and_generic() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let started = Instant::now();
    let resp = test::call_service(&app, login_request(common::ADMIN_USERNAME, "nope").to_request()).await;
    assert!(started.elapsed() >= Duration::from_secs(1));
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(common::session_cookie(&resp).is_none());

    let body = common::body_string(resp).await;
    assert!(body.contains(INVALID_CREDENTIALS_MESSAGE));
    assert!(body.contains("value=\"admin\""));
    assert_eq!(harness.app_state.sessions.len().await, 0);
}

#[actix_web::test]
async fn unknown_user_gets_the_same_message() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let started = Instant::now();
    let resp = test::call_service(&app, login_request("ghost", common::ADMIN_PASSWORD).to_request()).await;
    assert!(started.elapsed() >= Duration::from_secs(1));
    let body = common::body_string(resp).await;
    assert!(body.contains(INVALID_CREDENTIALS_MESSAGE));
}

#[actix_web::test]
async fn successful_login_issues_cookie_and_opens_dashboard() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let resp = test::call_service(
        &app,
        login_request(common::ADMIN_USERNAME, common::ADMIN_PASSWORD).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(common::location(&resp), "/admin");
    let cookie = common::session_cookie(&resp).expect("session cookie");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/admin"));

    let req = test::TestRequest::get().uri("/admin").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::body_string(resp).await;
    assert!(body.contains("data-logged-in=\"true\""));
}

#[actix_web::test]
async fn signed_in_operator_is_sent_away_from_login() {
    let harness = common::TestHarness::new();
    let cookie = harness.login_cookie().await;
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = test::TestRequest::get()
        .uri("/admin/login")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(common::location(&resp), "/admin");
}

#[actix_web::test]
async fn logout_destroys_the_session() {
    let harness = common::TestHarness::new();
    let cookie = harness.login_cookie().await;
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = test::TestRequest::get()
        .uri("/admin/logout")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(common::location(&resp), "/admin/login");
    let removal = common::session_cookie(&resp).expect("removal cookie");
    assert_eq!(removal.value(), "");
    assert!(harness.app_state.sessions.is_empty().await);

    let req = test::TestRequest::get().uri("/admin").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(common::location(&resp), "/admin/login");
}
