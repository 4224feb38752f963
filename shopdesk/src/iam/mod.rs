// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod password;
mod store;
mod types;

pub use password::{PasswordError, PasswordHasherService, generate_password};
pub use store::{FileUserStore, UserStore};
#[cfg(test)]
pub use store::MemoryUserStore;
pub use types::{AdminSession, IamError, User, UsersData, YamlUser};
