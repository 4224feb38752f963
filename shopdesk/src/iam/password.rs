// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::config::PasswordHashingParams;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    rand_core::RngCore,
};
use argon2::{Algorithm, Argon2, Params, Version};

const PASSWORD_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const DUMMY_PASSWORD: &str = "shopdesk-unknown-user";

#[derive(Debug)]
pub enum PasswordError {
    HashError(String),
}

impl std::fmt::Display for PasswordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PasswordError::HashError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PasswordError {}

/// Argon2id hashing with a precomputed dummy hash, so a lookup for an unknown
/// username can burn the same verification cost as a wrong password.
#[derive(Debug, Clone)]
pub struct PasswordHasherService {
    params: PasswordHashingParams,
    dummy_hash: String,
}

impl PasswordHasherService {
    pub fn new(params: PasswordHashingParams) -> Result<Self, PasswordError> {
        let dummy_hash = hash_with(params, DUMMY_PASSWORD)?;
        Ok(Self { params, dummy_hash })
    }

    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        hash_with(self.params, password)
    }

    /// Parameters come from the PHC string, not from the current config.
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        let parsed = match PasswordHash::new(stored_hash) {
            Ok(parsed) => parsed,
            Err(err) => {
                log::error!("Stored password hash is malformed: {}", err);
                return false;
            }
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    pub fn verify_against_dummy(&self, password: &str) {
        let _ = self.verify(password, &self.dummy_hash);
    }
}

fn hash_with(params: PasswordHashingParams, password: &str) -> Result<String, PasswordError> {
    let argon2 = build_argon2(params)?;
    let salt = SaltString::generate(&mut OsRng);
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| PasswordError::HashError(err.to_string()))
}

fn build_argon2(params: PasswordHashingParams) -> Result<Argon2<'static>, PasswordError> {
    let argon2_params = Params::new(
        params.memory_kib,
        params.iterations,
        params.parallelism,
        None,
    )
    .map_err(|err| PasswordError::HashError(err.to_string()))?;
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        argon2_params,
    ))
}

pub fn generate_password(length: usize) -> String {
    let mut bytes = vec![0u8; length];
    OsRng.fill_bytes(&mut bytes);
    bytes
        .iter()
        .map(|byte| PASSWORD_CHARS[*byte as usize % PASSWORD_CHARS.len()] as char)
        .collect()
}
