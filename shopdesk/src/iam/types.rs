// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub name: String,
    pub password_hash: String,
}

// Structure matching the YAML file format, keyed by username
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct YamlUser {
    pub name: String,
    pub password: String,
}

impl YamlUser {
    pub fn into_user(self, username: String) -> User {
        User {
            username,
            name: self.name,
            password_hash: self.password,
        }
    }
}

impl From<&User> for YamlUser {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            password: user.password_hash.clone(),
        }
    }
}

pub type UsersData = BTreeMap<String, User>;
pub type YamlUsersData = BTreeMap<String, YamlUser>;

/// The operator record kept in the session store.
///
/// Built from a verified [`User`]; the password hash is dropped on conversion
/// so it can never end up in session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminSession {
    pub username: String,
    pub name: String,
    pub signed_in_at: DateTime<Utc>,
}

impl From<User> for AdminSession {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            name: user.name,
            signed_in_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum IamError {
    FileError(String),
    ParseError(String),
    PasswordError(String),
}

impl std::fmt::Display for IamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IamError::FileError(msg) => write!(f, "File error: {}", msg),
            IamError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            IamError::PasswordError(msg) => write!(f, "Password error: {}", msg),
        }
    }
}

impl std::error::Error for IamError {}
