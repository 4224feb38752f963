// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::ModelError;
use super::fields::{
    FieldValue, ProductFields, ProductRecord, STOCK_SENTINEL, is_yes, normalize_stock,
    strip_non_digits,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub slug: String,
    /// Smallest currency unit.
    pub price: i64,
    #[serde(default)]
    pub image: String,
    pub total_stock: i32,
    pub current_stock: i32,
    #[serde(default)]
    pub discount: i64,
    #[serde(default)]
    pub visible: bool,
}

impl Product {
    /// Builds a product from a positional record. The record's own id column
    /// is ignored in favour of `id`.
    pub fn from_record(id: u64, record: &ProductRecord) -> Result<Self, ModelError> {
        let text = |field: &str| match record.get(field) {
            Some(FieldValue::Text(value)) => value.clone(),
            _ => String::new(),
        };
        let stock = |field: &str| match record.get(field) {
            Some(FieldValue::Stock(value)) => *value,
            Some(FieldValue::Text(value)) => normalize_stock(Some(value.as_str())),
            _ => STOCK_SENTINEL,
        };

        Ok(Self {
            id,
            name: text("name"),
            description: text("description"),
            slug: text("slug"),
            price: parse_amount("price", &text("price"))?
                .ok_or_else(|| ModelError::InvalidRecord("price has no digits".to_string()))?,
            image: text("image"),
            total_stock: stock("total_stock"),
            current_stock: stock("current_stock"),
            discount: parse_amount("discount", &text("discount"))?.unwrap_or(0),
            visible: matches!(record.get("visible"), Some(FieldValue::Flag(true))),
        })
    }

    /// Applies posted fields in place and reports whether anything changed.
    /// Fields absent from `fields` keep their current value.
    pub fn apply_fields(&mut self, fields: &ProductFields) -> Result<bool, ModelError> {
        let before = self.clone();
        for (field, value) in fields.iter() {
            match field {
                "name" => self.name = value.to_string(),
                "description" => self.description = value.to_string(),
                "slug" => self.slug = value.to_string(),
                "image" => self.image = value.to_string(),
                "price" => {
                    self.price = parse_amount("price", &strip_non_digits(value))?.ok_or_else(
                        || ModelError::InvalidRecord("price has no digits".to_string()),
                    )?;
                }
                "discount" => {
                    self.discount = parse_amount("discount", &strip_non_digits(value))?.unwrap_or(0)
                }
                "total_stock" => self.total_stock = normalize_stock(Some(value)),
                "current_stock" => self.current_stock = normalize_stock(Some(value)),
                "visible" => self.visible = is_yes(value),
                _ => {}
            }
        }
        Ok(*self != before)
    }
}

fn parse_amount(field: &str, digits: &str) -> Result<Option<i64>, ModelError> {
    if digits.is_empty() {
        return Ok(None);
    }
    digits
        .parse::<i64>()
        .map(Some)
        .map_err(|_| ModelError::InvalidRecord(format!("{} is out of range: {}", field, digits)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(form: &[(&str, &str)], stock: i32) -> ProductRecord {
        let form: HashMap<&str, &str> = form.iter().copied().collect();
        ProductRecord::from_input(|field| form.get(field).copied(), stock)
    }

    fn mug() -> Product {
        Product::from_record(
            3,
            &record(
                &[
                    ("name", "Mug"),
                    ("description", "A mug"),
                    ("slug", "mug"),
                    ("price", "12.50"),
                ],
                STOCK_SENTINEL,
            ),
        )
        .unwrap()
    }

    #[test]
    fn from_record_uses_assigned_id_and_defaults() {
        let product = mug();
        assert_eq!(product.id, 3);
        assert_eq!(product.price, 1250);
        assert_eq!(product.discount, 0);
        assert!(!product.visible);
        assert_eq!(product.total_stock, STOCK_SENTINEL);
        assert_eq!(product.current_stock, STOCK_SENTINEL);
    }

    #[test]
    fn from_record_rejects_price_without_digits() {
        let record = record(&[("name", "Mug"), ("price", "free")], 1);
        assert!(matches!(
            Product::from_record(1, &record),
            Err(ModelError::InvalidRecord(_))
        ));
    }

    #[test]
    fn apply_fields_touches_only_posted_fields() {
        let mut product = mug();
        let mut fields = ProductFields::default();
        fields.insert("price", "$9.99");
        fields.insert("total_stock", "5");
        fields.insert("visible", "yes");

        assert!(product.apply_fields(&fields).unwrap());
        assert_eq!(product.price, 999);
        assert_eq!(product.total_stock, 5);
        assert_eq!(product.current_stock, STOCK_SENTINEL);
        assert!(product.visible);
        assert_eq!(product.name, "Mug");
    }

    #[test]
    fn apply_fields_reports_no_change() {
        let mut product = mug();
        let mut fields = ProductFields::default();
        fields.insert("name", "Mug");
        fields.insert("price", "1250");
        assert!(!product.apply_fields(&fields).unwrap());
    }
}
