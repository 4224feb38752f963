// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod context;
mod engine;

pub use context::AdminLayoutContext;
pub use engine::{MiniJinjaEngine, TemplateEngine, template_file_name};
