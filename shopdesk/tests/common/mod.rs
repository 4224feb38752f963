// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use actix_web::cookie::Cookie;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::LOCATION;
use actix_web::{App, test, web};
use shopdesk::admin;
use shopdesk::app_state::AppState;
use shopdesk::catalog::YamlShopModel;
use shopdesk::config::ValidatedConfig;
use shopdesk::iam::{PasswordHasherService, YamlUser};
use shopdesk::plugins::{LifecycleEvent, LifecycleObserver, PluginHost};
use shopdesk::runtime_paths::RuntimePaths;
use shopdesk::util::test_config::{TEST_PASSWORD_HASHING, TestConfigBuilder};
use shopdesk::util::test_fixtures::TestFixtureRoot;
use std::collections::BTreeMap;
use std::fs;
use std::sync::{Arc, Mutex};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_NAME: &str = "Shop Owner";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const SESSION_KEY: &str = "shopdesk_admin";

/// Collects lifecycle event names in the order they were raised.
#[derive(Default)]
pub struct EventLog {
    events: Mutex<Vec<String>>,
}

impl EventLog {
    pub fn names(&self) -> Vec<String> {
        self.events.lock().expect("event log lock").clone()
    }

    pub fn clear(&self) {
        self.events.lock().expect("event log lock").clear();
    }
}

impl LifecycleObserver for EventLog {
    fn receive(&self, event: &mut LifecycleEvent<'_>) {
        self.events
            .lock()
            .expect("event log lock")
            .push(event.name().to_string());
    }
}

pub struct TestHarness {
    pub fixture: TestFixtureRoot,
    pub config: Arc<ValidatedConfig>,
    pub runtime_paths: RuntimePaths,
    pub app_state: Arc<AppState>,
    pub events: Arc<EventLog>,
}

pub struct HarnessOptions {
    pub builder: TestConfigBuilder,
    pub plugins: Vec<(&'static str, &'static str, Option<&'static str>)>,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            builder: TestConfigBuilder::new(),
            plugins: Vec::new(),
        }
    }
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_options(HarnessOptions::default())
    }

    pub fn with_options(options: HarnessOptions) -> Self {
        let fixture = TestFixtureRoot::new_unique("shopdesk-it").expect("fixture root");
        for (slug, about, page) in &options.plugins {
            fixture
                .install_plugin(slug, about, *page)
                .expect("install plugin");
        }
        fs::create_dir_all(fixture.themes_dir().join("default")).expect("themes dir");

        let runtime_paths = fixture.runtime_paths().expect("runtime paths");
        write_admin_user(&runtime_paths);

        let config = Arc::new(options.builder.build());
        let model = YamlShopModel::open(&runtime_paths, &config).expect("open model");

        let events = Arc::new(EventLog::default());
        let mut plugins = PluginHost::new(runtime_paths.plugins_dir.clone());
        plugins.register_observer(events.clone());

        let app_state = Arc::new(AppState::new(
            config.clone(),
            runtime_paths.clone(),
            Arc::new(model),
            plugins,
        ));

        Self {
            fixture,
            config,
            runtime_paths,
            app_state,
            events,
        }
    }

    /// Signs a session in directly, skipping the login form.
    pub async fn login_cookie(&self) -> Cookie<'static> {
        let user = self
            .app_state
            .model
            .find_user(ADMIN_USERNAME, ADMIN_PASSWORD)
            .expect("find user")
            .expect("admin user");
        let id = self.app_state.sessions.set(user.into()).await;
        Cookie::new(SESSION_KEY, id)
    }

    pub fn products_yaml(&self) -> Option<String> {
        fs::read_to_string(&self.runtime_paths.products_file).ok()
    }

    pub fn plugin_state_yaml(&self) -> String {
        fs::read_to_string(&self.runtime_paths.plugin_state_file).expect("plugin state")
    }
}

fn write_admin_user(runtime_paths: &RuntimePaths) {
    let hasher = PasswordHasherService::new(TEST_PASSWORD_HASHING).expect("hasher");
    let mut users = BTreeMap::new();
    users.insert(
        ADMIN_USERNAME.to_string(),
        YamlUser {
            name: ADMIN_NAME.to_string(),
            password: hasher.hash(ADMIN_PASSWORD).expect("hash"),
        },
    );
    let yaml = serde_yaml::to_string(&users).expect("users yaml");
    fs::write(&runtime_paths.users_file, yaml).expect("write users");
}

pub fn build_test_app(
    harness: &TestHarness,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let config = harness.config.clone();
    let sessions = harness.app_state.sessions.clone();

    App::new()
        .app_data(web::Data::from(harness.app_state.clone()))
        .configure(move |cfg| admin::configure(cfg, config, sessions))
}

pub fn location(resp: &ServiceResponse) -> String {
    resp.headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub fn session_cookie(resp: &ServiceResponse) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_KEY)
        .map(|cookie| cookie.into_owned())
}

pub async fn body_string(resp: ServiceResponse) -> String {
    let body = test::read_body(resp).await;
    String::from_utf8(body.to_vec()).expect("utf8 body")
}

pub fn form(pairs: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(pairs).expect("form body")
}
