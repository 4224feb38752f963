// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use minijinja::{Environment, Value, default_auto_escape_callback};

pub trait TemplateEngine: Send + Sync {
    /// Renders a view by name, e.g. `product/edit`.
    fn render(&self, view_name: &str, context: Value) -> Result<String, minijinja::Error>;
}

pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(default_auto_escape_callback);
        env.set_loader(embedded_template_loader);
        Self { env }
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(&self, view_name: &str, context: Value) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(&template_file_name(view_name))?;
        tmpl.render(context)
    }
}

pub fn template_file_name(view_name: &str) -> String {
    format!("{}.html", view_name)
}

/// Admin templates are compiled into the binary.
fn embedded_template_loader(name: &str) -> Result<Option<String>, minijinja::Error> {
    let template_content = match name {
        "layout.html" => Some(include_str!("../admin/templates/layout.html")),
        "index.html" => Some(include_str!("../admin/templates/index.html")),
        "404.html" => Some(include_str!("../admin/templates/404.html")),
        "500.html" => Some(include_str!("../admin/templates/500.html")),
        "login.html" => Some(include_str!("../admin/templates/login.html")),

        "product/index.html" => Some(include_str!("../admin/templates/product/index.html")),
        "product/add.html" => Some(include_str!("../admin/templates/product/add.html")),
        "product/edit.html" => Some(include_str!("../admin/templates/product/edit.html")),
        "product/_fields.html" => Some(include_str!("../admin/templates/product/_fields.html")),

        "theme/index.html" => Some(include_str!("../admin/templates/theme/index.html")),

        "plugin/index.html" => Some(include_str!("../admin/templates/plugin/index.html")),
        "plugin/single.html" => Some(include_str!("../admin/templates/plugin/single.html")),

        _ => None,
    };

    Ok(template_content.map(|s| s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    fn layout() -> Value {
        context! {
            app_name => "Test Shop",
            admin_path => "/admin",
            url => "",
            logged_in => true,
        }
    }

    #[test]
    fn every_view_renders_with_the_layout_only() {
        let engine = MiniJinjaEngine::new();
        for view in ["index", "404", "500", "login", "theme/index", "plugin/index"] {
            let html = engine.render(view, layout());
            assert!(html.is_ok(), "{}: {:?}", view, html.err());
        }
    }

    #[test]
    fn add_form_defaults_stock_to_unlimited() {
        let engine = MiniJinjaEngine::new();
        let html = engine
            .render(
                "product/add",
                context! {
                    admin_path => "/admin",
                    stock_sentinel => i32::MAX,
                    product => Value::from_serialize(&std::collections::BTreeMap::<String, String>::new()),
                },
            )
            .unwrap();
        assert!(html.contains(r#"name="total_stock" type="text" value="unlimited""#));
    }

    #[test]
    fn values_are_html_escaped() {
        let engine = MiniJinjaEngine::new();
        let html = engine
            .render(
                "plugin/single",
                context! {
                    app_name => "<b>Shop</b>",
                    admin_path => "/admin",
                    slug => "blog",
                    content => "<p>raw page</p>",
                },
            )
            .unwrap();
        assert!(html.contains("&lt;b&gt;Shop&lt;&#x2f;b&gt;"));
        assert!(!html.contains("<b>Shop</b>"));
        assert!(html.contains("<p>raw page</p>"));
    }

    #[test]
    fn unknown_view_is_an_error() {
        let engine = MiniJinjaEngine::new();
        assert!(engine.render("missing", layout()).is_err());
    }
}
