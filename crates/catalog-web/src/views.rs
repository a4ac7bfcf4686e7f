//! View rendering via `minijinja`.
//!
//! The default templates are compiled into the binary. Operators can point
//! `CATALOG_TEMPLATES_DIR` at a directory with the same file names to
//! restyle the client without recompiling; those templates go through
//! minijinja's path loader and are checked at startup.

use minijinja::Environment;

use crate::error::WebError;
use crate::routes::ViewKind;

/// Built-in templates: page views plus the shared layout and list partial.
const EMBEDDED_TEMPLATES: [(&str, &str); 7] = [
    ("layout.html", include_str!("../templates/layout.html")),
    ("server_list.html", include_str!("../templates/server_list.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("server_detail.html", include_str!("../templates/server_detail.html")),
    ("search.html", include_str!("../templates/search.html")),
    ("docs.html", include_str!("../templates/docs.html")),
    ("not_found.html", include_str!("../templates/not_found.html")),
];

/// Renders [`ViewKind`]s to HTML.
#[derive(Debug)]
pub struct ViewEngine {
    env: Environment<'static>,
}

impl ViewEngine {
    /// Engine backed by the built-in templates.
    pub fn embedded() -> Result<Self, WebError> {
        let mut env = base_environment();
        for (name, source) in EMBEDDED_TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Engine that loads templates from `dir`.
    ///
    /// Every view template is loaded once up front so a missing or broken
    /// file fails at startup rather than on first request.
    pub fn from_dir(dir: &str) -> Result<Self, WebError> {
        let mut env = base_environment();
        env.set_loader(minijinja::path_loader(dir));
        for view in ViewKind::ALL {
            env.get_template(view.template()).map_err(|e| {
                WebError::Config(format!(
                    "cannot load {} from {dir}: {e}",
                    view.template()
                ))
            })?;
        }
        Ok(Self { env })
    }

    /// Render `view` with `context`. The view's name is added to the
    /// context as `view`.
    pub fn render(
        &self,
        view: ViewKind,
        mut context: serde_json::Value,
    ) -> Result<String, WebError> {
        if let Some(fields) = context.as_object_mut() {
            fields.insert("view".to_owned(), view.name().into());
        }
        let template = self.env.get_template(view.template())?;
        Ok(template.render(&context)?)
    }
}

/// Environment with the filters every template set relies on.
fn base_environment() -> Environment<'static> {
    let mut env = Environment::new();
    // `urlencode` keeps `/`, which would split namespaced ids across segments.
    env.add_filter("segment", |value: minijinja::Value| {
        catalog_client::encode_path_segment(&value.to_string())
    });
    env
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ViewEngine {
        ViewEngine::embedded().unwrap_or_else(|_| ViewEngine {
            env: Environment::new(),
        })
    }

    #[test]
    fn embedded_templates_render_every_view() {
        let engine = engine();
        for view in ViewKind::ALL {
            let html = engine.render(view, serde_json::json!({}));
            assert!(html.is_ok(), "{} failed: {html:?}", view.name());
            let html = html.unwrap_or_default();
            assert!(html.contains(&format!("data-view=\"{}\"", view.name())));
        }
    }

    #[test]
    fn list_links_encode_namespaced_ids() {
        let html = engine()
            .render(
                ViewKind::Home,
                serde_json::json!({
                    "servers": [
                        {"id": "io.example/weather", "name": "Weather"},
                        {"id": 7},
                        {"id": ".."}
                    ]
                }),
            )
            .unwrap_or_default();
        assert!(html.contains("href=\"/server/io.example%2Fweather\""));
        assert!(html.contains("href=\"/server/7\""));
        assert!(html.contains("href=\"/server/%2E%2E\""));
        assert!(html.contains(">Weather</a>"));
    }

    #[test]
    fn record_text_is_escaped() {
        let html = engine()
            .render(
                ViewKind::Home,
                serde_json::json!({
                    "servers": [{"id": 1, "name": "<script>alert(1)</script>"}]
                }),
            )
            .unwrap_or_default();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn from_dir_loads_overrides() {
        let unique = format!("catalog-web-views-{}", std::process::id());
        let dir = std::env::temp_dir().join(unique);
        std::fs::create_dir_all(&dir).ok();
        for view in ViewKind::ALL {
            std::fs::write(dir.join(view.template()), "custom {{ view }}").ok();
        }

        let engine = ViewEngine::from_dir(&dir.to_string_lossy());
        assert!(engine.is_ok());
        let html = engine
            .and_then(|e| e.render(ViewKind::Docs, serde_json::json!({})))
            .unwrap_or_default();
        assert_eq!(html, "custom Docs");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn from_dir_rejects_missing_templates() {
        let unique = format!("catalog-web-empty-views-{}", std::process::id());
        let dir = std::env::temp_dir().join(unique);
        std::fs::create_dir_all(&dir).ok();

        let result = ViewEngine::from_dir(&dir.to_string_lossy());
        assert!(matches!(result, Err(WebError::Config(_))));

        std::fs::remove_dir_all(&dir).ok();
    }
}
