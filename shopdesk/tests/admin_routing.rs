// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod common;

use actix_web::{http::StatusCode, test};

#[actix_web::test]
async fn anonymous_requests_are_sent_to_login() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    for uri in ["/admin", "/admin/products", "/admin/plugins?enable=foo", "/admin/nowhere"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND, "{}", uri);
        assert_eq!(common::location(&resp), "/admin/login", "{}", uri);
    }
    assert!(!harness.plugin_state_yaml().contains("foo"));
}

#[actix_web::test]
async fn login_page_is_reachable_without_session() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = test::TestRequest::get().uri("/admin/login").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::body_string(resp).await;
    assert!(body.contains("name=\"username\""));
}

#[actix_web::test]
async fn stale_session_cookie_is_treated_as_anonymous() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = test::TestRequest::get()
        .uri("/admin/products")
        .cookie(actix_web::cookie::Cookie::new(common::SESSION_KEY, "expired"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(common::location(&resp), "/admin/login");
}

#[actix_web::test]
async fn dashboard_greets_the_operator() {
    let harness = common::TestHarness::new();
    let cookie = harness.login_cookie().await;
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = test::TestRequest::get().uri("/admin").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::body_string(resp).await;
    assert!(body.contains(common::ADMIN_NAME));
    assert!(body.contains("data-logged-in=\"true\""));
    assert_eq!(harness.events.names(), vec!["admin_delegated"]);
}

#[actix_web::test]
async fn unknown_action_renders_not_found_without_hooks() {
    let harness = common::TestHarness::new();
    let cookie = harness.login_cookie().await;
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = test::TestRequest::get()
        .uri("/admin/reports")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = common::body_string(resp).await;
    assert!(body.contains("Page not found"));
    assert!(harness.events.names().is_empty());
}

#[actix_web::test]
async fn other_methods_are_rejected() {
    let harness = common::TestHarness::new();
    let cookie = harness.login_cookie().await;
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = test::TestRequest::delete()
        .uri("/admin/products/1")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[actix_web::test]
async fn custom_admin_path_is_honored() {
    let harness = common::TestHarness::with_options(common::HarnessOptions {
        builder: shopdesk::util::test_config::TestConfigBuilder::new().with_admin_path("/backoffice"),
        ..Default::default()
    });
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = test::TestRequest::get().uri("/backoffice/themes").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(common::location(&resp), "/backoffice/login");

    let req = test::TestRequest::get().uri("/admin").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn themes_page_lists_installed_themes() {
    let harness = common::TestHarness::new();
    std::fs::create_dir_all(harness.runtime_paths.themes_dir.join("autumn")).unwrap();
    let cookie = harness.login_cookie().await;
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = test::TestRequest::get()
        .uri("/admin/themes")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::body_string(resp).await;
    assert!(body.contains("autumn"));
    assert!(body.contains("default"));
}
