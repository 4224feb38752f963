// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod fields;
mod product;
mod yaml_model;

pub use fields::{
    FieldTransform, FieldValue, PRODUCT_FIELDS, ProductFields, ProductRecord, REQUIRED_FIELDS,
    STOCK_SENTINEL, UNLIMITED_STOCK, coerce_field, is_yes, missing_required, normalize_stock,
    required_field_message, strip_non_digits, transform_for,
};
pub use product::Product;
pub use yaml_model::YamlShopModel;

use crate::iam::User;

pub const PRODUCT_UPDATED_MESSAGE: &str = "Product updated.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    NotFound(String),
    Conflict(String),
    InvalidRecord(String),
    Storage(String),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ModelError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ModelError::InvalidRecord(msg) => write!(f, "Invalid record: {}", msg),
            ModelError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}

/// The persistence collaborator behind every admin action.
pub trait ShopModel: Send + Sync {
    /// All products ordered by id.
    fn all_products(&self) -> Result<Vec<Product>, ModelError>;

    fn find_product(&self, id: u64) -> Result<Option<Product>, ModelError>;

    /// Applies the posted fields to product `id`.
    ///
    /// Returns the message to show with the edit form, or `None` when nothing
    /// changed. Unknown ids are [`ModelError::NotFound`].
    fn update(&self, id: u64, fields: &ProductFields) -> Result<Option<String>, ModelError>;

    /// Persists a new product from a complete positional record and returns it
    /// with its assigned id.
    fn insert_product(&self, record: ProductRecord) -> Result<Product, ModelError>;

    /// Returns the user when `password` verifies. Unknown users and wrong
    /// passwords are both `Ok(None)`.
    fn find_user(&self, username: &str, password: &str) -> Result<Option<User>, ModelError>;

    /// Comma separated slugs of the active plugins.
    fn active_plugins(&self) -> Result<String, ModelError>;

    fn enable_plugin(&self, slug: &str) -> Result<(), ModelError>;

    fn disable_plugin(&self, slug: &str) -> Result<(), ModelError>;
}
