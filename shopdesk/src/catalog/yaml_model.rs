// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::fields::{ProductFields, ProductRecord, REQUIRED_FIELDS, required_field_message};
use super::product::Product;
use super::{ModelError, PRODUCT_UPDATED_MESSAGE, ShopModel};
use crate::config::ValidatedConfig;
use crate::iam::{FileUserStore, PasswordHasherService, User, UserStore};
use crate::plugins::{ActivePlugins, is_valid_slug};
use crate::runtime_paths::RuntimePaths;
use crate::util::yaml_store::{read_yaml_file, write_yaml_file};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::RwLock;

const DUPLICATE_SLUG_MESSAGE: &str = "That slug is already used by another product.";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ProductsDocument {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    products: Vec<Product>,
}

impl ProductsDocument {
    fn normalized(mut self) -> Self {
        self.products.sort_by_key(|product| product.id);
        let after_last = self.products.last().map(|p| p.id + 1).unwrap_or(1);
        self.next_id = self.next_id.max(after_last);
        self
    }

    fn slug_taken(&self, slug: &str, except: Option<u64>) -> bool {
        self.products
            .iter()
            .any(|product| product.slug == slug && Some(product.id) != except)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PluginStateDocument {
    #[serde(default)]
    active: Vec<String>,
}

/// [`ShopModel`] backed by YAML documents under `state/`.
///
/// Every mutation writes a modified copy to disk first and only then replaces
/// the in-memory state, so a failed write leaves both unchanged.
pub struct YamlShopModel {
    products_file: PathBuf,
    plugin_state_file: PathBuf,
    products: RwLock<ProductsDocument>,
    plugins: RwLock<PluginStateDocument>,
    users: Box<dyn UserStore>,
    hasher: PasswordHasherService,
}

impl YamlShopModel {
    pub fn open(paths: &RuntimePaths, config: &ValidatedConfig) -> Result<Self, ModelError> {
        let users = FileUserStore::new(paths.users_file.clone())
            .map_err(|err| ModelError::Storage(err.to_string()))?;
        Self::with_user_store(paths, config, Box::new(users))
    }

    pub fn with_user_store(
        paths: &RuntimePaths,
        config: &ValidatedConfig,
        users: Box<dyn UserStore>,
    ) -> Result<Self, ModelError> {
        let products: ProductsDocument = read_yaml_file(&paths.products_file, "products")
            .map_err(|err| ModelError::Storage(err.to_string()))?
            .unwrap_or_default();

        let stored_plugins: Option<PluginStateDocument> =
            read_yaml_file(&paths.plugin_state_file, "plugin state")
                .map_err(|err| ModelError::Storage(err.to_string()))?;
        let plugins = match stored_plugins {
            Some(document) => document,
            None => {
                let seeded = PluginStateDocument {
                    active: ActivePlugins::parse(&config.plugins.active)
                        .slugs()
                        .iter()
                        .filter(|slug| is_valid_slug(slug))
                        .cloned()
                        .collect(),
                };
                write_yaml_file(&paths.plugin_state_file, "plugin state", &seeded)
                    .map_err(|err| ModelError::Storage(err.to_string()))?;
                log::info!(
                    "Seeded plugin state with {} active plugin(s)",
                    seeded.active.len()
                );
                seeded
            }
        };

        let hasher = PasswordHasherService::new(config.login.password_hashing)
            .map_err(|err| ModelError::Storage(err.to_string()))?;

        Ok(Self {
            products_file: paths.products_file.clone(),
            plugin_state_file: paths.plugin_state_file.clone(),
            products: RwLock::new(products.normalized()),
            plugins: RwLock::new(plugins),
            users,
            hasher,
        })
    }

    fn modify_products<T>(
        &self,
        change: impl FnOnce(&mut ProductsDocument) -> Result<(T, bool), ModelError>,
    ) -> Result<T, ModelError> {
        let mut guard = self
            .products
            .write()
            .map_err(|_| ModelError::Storage("products lock poisoned".to_string()))?;
        let mut draft = guard.clone();
        let (result, dirty) = change(&mut draft)?;
        if dirty {
            write_yaml_file(&self.products_file, "products", &draft)
                .map_err(|err| ModelError::Storage(err.to_string()))?;
            *guard = draft;
        }
        Ok(result)
    }

    fn modify_plugins(
        &self,
        change: impl FnOnce(&mut PluginStateDocument) -> bool,
    ) -> Result<(), ModelError> {
        let mut guard = self
            .plugins
            .write()
            .map_err(|_| ModelError::Storage("plugin state lock poisoned".to_string()))?;
        let mut draft = guard.clone();
        if change(&mut draft) {
            write_yaml_file(&self.plugin_state_file, "plugin state", &draft)
                .map_err(|err| ModelError::Storage(err.to_string()))?;
            *guard = draft;
        }
        Ok(())
    }
}

fn checked_slug(slug: &str) -> Result<&str, ModelError> {
    if is_valid_slug(slug) {
        Ok(slug)
    } else {
        Err(ModelError::InvalidRecord(format!(
            "invalid plugin slug: {:?}",
            slug
        )))
    }
}

impl ShopModel for YamlShopModel {
    fn all_products(&self) -> Result<Vec<Product>, ModelError> {
        self.products
            .read()
            .map(|document| document.products.clone())
            .map_err(|_| ModelError::Storage("products lock poisoned".to_string()))
    }

    fn find_product(&self, id: u64) -> Result<Option<Product>, ModelError> {
        self.products
            .read()
            .map(|document| document.products.iter().find(|p| p.id == id).cloned())
            .map_err(|_| ModelError::Storage("products lock poisoned".to_string()))
    }

    fn update(&self, id: u64, fields: &ProductFields) -> Result<Option<String>, ModelError> {
        self.modify_products(|document| {
            let index = document
                .products
                .iter()
                .position(|product| product.id == id)
                .ok_or_else(|| ModelError::NotFound(format!("product {}", id)))?;

            let blank: Vec<String> = REQUIRED_FIELDS
                .iter()
                .copied()
                .filter(|field| fields.get(field).is_some_and(str::is_empty))
                .map(required_field_message)
                .collect();
            if !blank.is_empty() {
                return Ok((Some(blank.join("<br>")), false));
            }
            if let Some(slug) = fields.get("slug")
                && document.slug_taken(slug, Some(id))
            {
                return Ok((Some(DUPLICATE_SLUG_MESSAGE.to_string()), false));
            }

            let product = &mut document.products[index];
            if product.apply_fields(fields)? {
                Ok((Some(PRODUCT_UPDATED_MESSAGE.to_string()), true))
            } else {
                Ok((None, false))
            }
        })
    }

    fn insert_product(&self, record: ProductRecord) -> Result<Product, ModelError> {
        if !record.is_complete() {
            return Err(ModelError::InvalidRecord(format!(
                "expected {} columns, got {}",
                super::fields::PRODUCT_FIELDS.len() + 1,
                record.columns().len()
            )));
        }
        self.modify_products(|document| {
            let product = Product::from_record(document.next_id, &record)?;
            if document.slug_taken(&product.slug, None) {
                return Err(ModelError::Conflict(format!(
                    "slug '{}' already exists",
                    product.slug
                )));
            }
            document.next_id += 1;
            document.products.push(product.clone());
            Ok((product, true))
        })
    }

    fn find_user(&self, username: &str, password: &str) -> Result<Option<User>, ModelError> {
        let users = self
            .users
            .load()
            .map_err(|err| ModelError::Storage(err.to_string()))?;
        match users.get(username) {
            Some(user) if self.hasher.verify(password, &user.password_hash) => {
                Ok(Some(user.clone()))
            }
            Some(_) => Ok(None),
            None => {
                self.hasher.verify_against_dummy(password);
                Ok(None)
            }
        }
    }

    fn active_plugins(&self) -> Result<String, ModelError> {
        self.plugins
            .read()
            .map(|document| document.active.join(","))
            .map_err(|_| ModelError::Storage("plugin state lock poisoned".to_string()))
    }

    fn enable_plugin(&self, slug: &str) -> Result<(), ModelError> {
        let slug = checked_slug(slug)?;
        self.modify_plugins(|document| {
            if document.active.iter().any(|active| active == slug) {
                return false;
            }
            document.active.push(slug.to_string());
            true
        })
    }

    fn disable_plugin(&self, slug: &str) -> Result<(), ModelError> {
        let slug = checked_slug(slug)?;
        self.modify_plugins(|document| {
            let before = document.active.len();
            document.active.retain(|active| active != slug);
            document.active.len() != before
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{STOCK_SENTINEL, UNLIMITED_STOCK, normalize_stock};
    use crate::iam::MemoryUserStore;
    use crate::util::test_config::{TEST_PASSWORD_HASHING, TestConfigBuilder, test_config};
    use crate::util::test_fixtures::TestFixtureRoot;
    use std::collections::HashMap;

    fn model(fixture: &TestFixtureRoot) -> YamlShopModel {
        let paths = fixture.runtime_paths().unwrap();
        YamlShopModel::with_user_store(
            &paths,
            &test_config(),
            Box::new(MemoryUserStore::default()),
        )
        .unwrap()
    }

    fn record(form: &[(&str, &str)]) -> ProductRecord {
        let form: HashMap<&str, &str> = form.iter().copied().collect();
        let stock = normalize_stock(form.get("total_stock").copied());
        ProductRecord::from_input(|field| form.get(field).copied(), stock)
    }

    fn mug_record() -> ProductRecord {
        record(&[
            ("id", "999"),
            ("name", "Mug"),
            ("description", "A mug"),
            ("slug", "mug"),
            ("price", "1200"),
            ("total_stock", UNLIMITED_STOCK),
        ])
    }

    #[test]
    fn insert_assigns_sequential_ids_and_persists() {
        let fixture = TestFixtureRoot::new_unique("model-insert").unwrap();
        let model = model(&fixture);

        let first = model.insert_product(mug_record()).unwrap();
        let second = model
            .insert_product(record(&[
                ("name", "Cup"),
                ("description", "A cup"),
                ("slug", "cup"),
                ("price", "800"),
            ]))
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.total_stock, STOCK_SENTINEL);

        let reopened = self::model(&fixture);
        let ids: Vec<u64> = reopened.all_products().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn insert_rejects_duplicate_slug() {
        let fixture = TestFixtureRoot::new_unique("model-dup").unwrap();
        let model = model(&fixture);
        model.insert_product(mug_record()).unwrap();
        assert!(matches!(
            model.insert_product(mug_record()),
            Err(ModelError::Conflict(_))
        ));
        assert_eq!(model.all_products().unwrap().len(), 1);
    }

    #[test]
    fn insert_rejects_incomplete_record() {
        let fixture = TestFixtureRoot::new_unique("model-incomplete").unwrap();
        let model = model(&fixture);
        assert!(matches!(
            model.insert_product(ProductRecord::new()),
            Err(ModelError::InvalidRecord(_))
        ));
    }

    #[test]
    fn update_reports_change_no_change_and_blank_fields() {
        let fixture = TestFixtureRoot::new_unique("model-update").unwrap();
        let model = model(&fixture);
        let product = model.insert_product(mug_record()).unwrap();

        let mut fields = ProductFields::default();
        fields.insert("name", "Big Mug");
        assert_eq!(
            model.update(product.id, &fields).unwrap().as_deref(),
            Some(PRODUCT_UPDATED_MESSAGE)
        );
        assert_eq!(model.update(product.id, &fields).unwrap(), None);

        let mut blank = ProductFields::default();
        blank.insert("name", "");
        blank.insert("description", "");
        assert_eq!(
            model.update(product.id, &blank).unwrap().as_deref(),
            Some("Please fill out the name!<br>Please fill out the description!")
        );
        let stored = model.find_product(product.id).unwrap().unwrap();
        assert_eq!(stored.name, "Big Mug");
    }

    #[test]
    fn update_unknown_product_is_not_found() {
        let fixture = TestFixtureRoot::new_unique("model-missing").unwrap();
        let model = model(&fixture);
        assert!(matches!(
            model.update(42, &ProductFields::default()),
            Err(ModelError::NotFound(_))
        ));
    }

    #[test]
    fn update_refuses_slug_of_another_product() {
        let fixture = TestFixtureRoot::new_unique("model-slug").unwrap();
        let model = model(&fixture);
        model.insert_product(mug_record()).unwrap();
        let cup = model
            .insert_product(record(&[
                ("name", "Cup"),
                ("description", "A cup"),
                ("slug", "cup"),
                ("price", "800"),
            ]))
            .unwrap();
        let mut fields = ProductFields::default();
        fields.insert("slug", "mug");
        assert_eq!(
            model.update(cup.id, &fields).unwrap().as_deref(),
            Some(DUPLICATE_SLUG_MESSAGE)
        );
        assert_eq!(model.find_product(cup.id).unwrap().unwrap().slug, "cup");
    }

    #[test]
    fn find_user_verifies_password() {
        let fixture = TestFixtureRoot::new_unique("model-users").unwrap();
        let paths = fixture.runtime_paths().unwrap();
        let hasher = PasswordHasherService::new(TEST_PASSWORD_HASHING).unwrap();
        let users = MemoryUserStore::with_users(vec![User {
            username: "admin".to_string(),
            name: "Shop Admin".to_string(),
            password_hash: hasher.hash("s3cret").unwrap(),
        }]);
        let model =
            YamlShopModel::with_user_store(&paths, &test_config(), Box::new(users)).unwrap();

        assert_eq!(
            model.find_user("admin", "s3cret").unwrap().map(|u| u.name),
            Some("Shop Admin".to_string())
        );
        assert!(model.find_user("admin", "wrong").unwrap().is_none());
        assert!(model.find_user("nobody", "s3cret").unwrap().is_none());
    }

    #[test]
    fn plugin_state_is_seeded_once_then_toggled() {
        let fixture = TestFixtureRoot::new_unique("model-plugins").unwrap();
        let paths = fixture.runtime_paths().unwrap();
        let config = TestConfigBuilder::new()
            .with_active_plugins("blog, reviews,,../etc")
            .build();
        let model = YamlShopModel::with_user_store(
            &paths,
            &config,
            Box::new(MemoryUserStore::default()),
        )
        .unwrap();
        assert_eq!(model.active_plugins().unwrap(), "blog,reviews");

        model.enable_plugin("seo").unwrap();
        model.enable_plugin("seo").unwrap();
        model.disable_plugin("blog").unwrap();
        assert_eq!(model.active_plugins().unwrap(), "reviews,seo");
        assert!(model.enable_plugin("../evil").is_err());

        let reseeded = YamlShopModel::with_user_store(
            &paths,
            &TestConfigBuilder::new().with_active_plugins("blog").build(),
            Box::new(MemoryUserStore::default()),
        )
        .unwrap();
        assert_eq!(reseeded.active_plugins().unwrap(), "reviews,seo");
    }
}
