// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Product form fields and the per-field coercions applied to posted values.

use std::collections::BTreeMap;

/// Stored stock value meaning "unlimited".
pub const STOCK_SENTINEL: i32 = i32::MAX;
pub const UNLIMITED_STOCK: &str = "unlimited";

/// Column order of a product record, after the leading placeholder.
pub const PRODUCT_FIELDS: [&str; 10] = [
    "id",
    "name",
    "description",
    "slug",
    "price",
    "image",
    "total_stock",
    "current_stock",
    "discount",
    "visible",
];

pub const REQUIRED_FIELDS: [&str; 4] = ["name", "price", "slug", "description"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Not posted.
    Missing,
    Text(String),
    Flag(bool),
    Stock(i32),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTransform {
    /// Keep only ASCII digits.
    Digits,
    /// Exactly `"yes"` is true.
    YesFlag,
    /// Ignore the posted value and use the stock computed for the submission.
    Stock,
}

const FIELD_TRANSFORMS: &[(&str, FieldTransform)] = &[
    ("price", FieldTransform::Digits),
    ("visible", FieldTransform::YesFlag),
    ("total_stock", FieldTransform::Stock),
    ("current_stock", FieldTransform::Stock),
    ("discount", FieldTransform::Digits),
];

pub fn transform_for(field: &str) -> Option<FieldTransform> {
    FIELD_TRANSFORMS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, transform)| *transform)
}

impl FieldTransform {
    pub fn apply(self, raw: Option<&str>, stock: i32) -> FieldValue {
        match self {
            FieldTransform::Digits => FieldValue::Text(strip_non_digits(raw.unwrap_or(""))),
            FieldTransform::YesFlag => FieldValue::Flag(raw.is_some_and(is_yes)),
            FieldTransform::Stock => FieldValue::Stock(stock),
        }
    }
}

/// Applies the registered transform for `field`; unregistered fields pass through.
pub fn coerce_field(field: &str, raw: Option<&str>, stock: i32) -> FieldValue {
    match transform_for(field) {
        Some(transform) => transform.apply(raw, stock),
        None => raw
            .map(|value| FieldValue::Text(value.to_string()))
            .unwrap_or(FieldValue::Missing),
    }
}

pub fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn is_yes(raw: &str) -> bool {
    raw == "yes"
}

/// Normalizes a posted stock value.
///
/// Absent means `unlimited`. Stray `"` characters are dropped. `unlimited`,
/// anything non-numeric and anything above `i32::MAX` become [`STOCK_SENTINEL`];
/// negative numbers become 0 and fractions are truncated.
pub fn normalize_stock(raw: Option<&str>) -> i32 {
    let cleaned = raw.unwrap_or(UNLIMITED_STOCK).replace('"', "");
    let value = cleaned.trim();
    if value.eq_ignore_ascii_case(UNLIMITED_STOCK) {
        return STOCK_SENTINEL;
    }

    if let Ok(number) = value.parse::<i64>() {
        return clamp_stock(number as f64);
    }
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => clamp_stock(number),
        _ => STOCK_SENTINEL,
    }
}

fn clamp_stock(number: f64) -> i32 {
    if number < 0.0 {
        0
    } else if number > STOCK_SENTINEL as f64 {
        STOCK_SENTINEL
    } else {
        number as i32
    }
}

pub fn required_field_message(field: &str) -> String {
    format!("Please fill out the {}!", field)
}

/// One message per required field that is absent or empty, in required order.
pub fn missing_required<'a>(input: impl Fn(&str) -> Option<&'a str>) -> Vec<String> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| input(*field).is_none_or(str::is_empty))
        .map(required_field_message)
        .collect()
}

/// A product laid out by column for insertion. Column 0 is an empty
/// placeholder, followed by one value per [`PRODUCT_FIELDS`] entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    columns: Vec<FieldValue>,
}

impl Default for ProductRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductRecord {
    pub fn new() -> Self {
        Self {
            columns: vec![FieldValue::Missing],
        }
    }

    /// Builds the record from posted input, coercing every field in column order.
    pub fn from_input<'a>(input: impl Fn(&str) -> Option<&'a str>, stock: i32) -> Self {
        let mut record = Self::new();
        for field in PRODUCT_FIELDS {
            record.push(coerce_field(field, input(field), stock));
        }
        record
    }

    pub fn push(&mut self, value: FieldValue) {
        self.columns.push(value);
    }

    pub fn columns(&self) -> &[FieldValue] {
        &self.columns
    }

    pub fn is_complete(&self) -> bool {
        self.columns.len() == PRODUCT_FIELDS.len() + 1
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        PRODUCT_FIELDS
            .iter()
            .position(|name| *name == field)
            .and_then(|index| self.columns.get(index + 1))
    }
}

/// Posted product fields keyed by name, as used by updates. Only fields that
/// were actually posted are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFields {
    values: BTreeMap<String, String>,
}

impl ProductFields {
    pub fn from_input<'a>(input: impl Fn(&str) -> Option<&'a str>) -> Self {
        let values = PRODUCT_FIELDS
            .into_iter()
            .filter_map(|field| input(field).map(|value| (field.to_string(), value.to_string())))
            .collect();
        Self { values }
    }

    pub fn insert(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
