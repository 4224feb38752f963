// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{BootstrapError, log_action, log_warning};
use crate::config::ValidatedConfig;
use crate::iam::{PasswordHasherService, User, YamlUser, generate_password};
use crate::runtime_paths::RuntimePaths;
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{self, Write};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_NAME: &str = "Administrator";
const ADMIN_PASSWORD_LENGTH: usize = 16;

/// Creates `users.yaml` with a single admin account and a random password,
/// printed once to stderr.
pub fn ensure_users(
    paths: &RuntimePaths,
    config: &ValidatedConfig,
) -> Result<bool, BootstrapError> {
    let users_path = &paths.users_file;
    if users_path.exists() {
        return Ok(false);
    }

    let password = generate_password(ADMIN_PASSWORD_LENGTH);
    let hasher = PasswordHasherService::new(config.login.password_hashing)
        .map_err(|err| BootstrapError::Io(io::Error::other(err.to_string())))?;
    let password_hash = hasher
        .hash(&password)
        .map_err(|err| BootstrapError::Io(io::Error::other(err.to_string())))?;

    let admin = User {
        username: ADMIN_USERNAME.to_string(),
        name: ADMIN_NAME.to_string(),
        password_hash,
    };
    let mut users = BTreeMap::new();
    users.insert(admin.username.clone(), YamlUser::from(&admin));
    let yaml = serde_yaml::to_string(&users)
        .map_err(|err| BootstrapError::Io(io::Error::other(err.to_string())))?;

    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(users_path)
    {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => return Err(BootstrapError::Io(err)),
    };

    file.write_all(yaml.as_bytes())?;
    file.sync_all()?;

    log_action(format!("created users.yaml with {}", ADMIN_USERNAME));
    log_warning(format!(
        "{} password: {} (shown only once)",
        ADMIN_USERNAME, password
    ));

    Ok(true)
}
