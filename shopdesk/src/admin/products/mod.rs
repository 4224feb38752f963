// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod add;
mod edit;
mod index;

pub use add::{UNEXPECTED_ERROR_MESSAGE, add};
pub use edit::edit;
pub use index::list;
