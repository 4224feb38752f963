// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::types::{IamError, UsersData, YamlUser, YamlUsersData};
use crate::util::yaml_store::{read_yaml_file, write_yaml_file};
use std::path::PathBuf;

#[cfg(test)]
use super::types::User;
#[cfg(test)]
use std::sync::{Arc, RwLock};

pub trait UserStore: Send + Sync {
    fn load(&self) -> Result<UsersData, IamError>;
    fn save(&self, users: &UsersData) -> Result<(), IamError>;
}

pub struct FileUserStore {
    users_file: PathBuf,
}

impl FileUserStore {
    pub fn new(users_file: PathBuf) -> Result<Self, IamError> {
        if users_file.as_os_str().is_empty() {
            return Err(IamError::FileError("Users file path is empty".to_string()));
        }

        Ok(Self { users_file })
    }

    pub fn path(&self) -> &PathBuf {
        &self.users_file
    }
}

impl UserStore for FileUserStore {
    fn load(&self) -> Result<UsersData, IamError> {
        let yaml_users: Option<YamlUsersData> = read_yaml_file(&self.users_file, "users")
            .map_err(|err| IamError::ParseError(err.to_string()))?;

        Ok(yaml_users
            .unwrap_or_default()
            .into_iter()
            .map(|(username, yaml_user)| {
                let user = yaml_user.into_user(username.clone());
                (username, user)
            })
            .collect())
    }

    fn save(&self, users: &UsersData) -> Result<(), IamError> {
        let yaml_users: YamlUsersData = users
            .iter()
            .map(|(username, user)| (username.clone(), YamlUser::from(user)))
            .collect();
        write_yaml_file(&self.users_file, "users", &yaml_users)
            .map_err(|err| IamError::FileError(err.to_string()))
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<UsersData>>,
}

#[cfg(test)]
impl MemoryUserStore {
    pub fn with_users(users: Vec<User>) -> Self {
        let data = users
            .into_iter()
            .map(|user| (user.username.clone(), user))
            .collect();
        Self {
            users: Arc::new(RwLock::new(data)),
        }
    }
}

#[cfg(test)]
impl UserStore for MemoryUserStore {
    fn load(&self) -> Result<UsersData, IamError> {
        self.users
            .read()
            .map(|users| users.clone())
            .map_err(|_| IamError::FileError("user store lock poisoned".to_string()))
    }

    fn save(&self, users: &UsersData) -> Result<(), IamError> {
        let mut guard = self
            .users
            .write()
            .map_err(|_| IamError::FileError("user store lock poisoned".to_string()))?;
        *guard = users.clone();
        Ok(())
    }
}
