//! Template environment for the server-rendered admin pages.
//!
//! Templates are plain Jinja2 `.html` files under the configured views
//! directory (`templates/views` by default). They are loaded once into a
//! global environment; `.html` names get HTML auto-escaping.

use minijinja::{Environment, Value};
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

use crate::core::config::ViewConfig;

/// Global template environment
static VIEW_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// Load every template under `dir` into the global environment.
///
/// Must be called before the first render to take effect; later calls are
/// ignored. Returns the number of templates available.
pub fn init_views(dir: &str) -> usize {
    if VIEW_ENV.set(build_environment(Path::new(dir))).is_err() {
        tracing::warn!("View environment already initialized, ignoring '{}'", dir);
    }
    list_templates().len()
}

fn build_environment(template_path: &Path) -> Environment<'static> {
    let mut env = Environment::new();

    if template_path.exists() {
        load_templates_recursive(&mut env, template_path, template_path);
    } else {
        tracing::warn!(
            "Views directory '{}' does not exist",
            template_path.display()
        );
    }

    env
}

/// Recursively load all .html templates from a directory
fn load_templates_recursive(env: &mut Environment<'static>, base_path: &Path, current_path: &Path) {
    if let Ok(entries) = std::fs::read_dir(current_path) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                load_templates_recursive(env, base_path, &path);
            } else if path.extension().is_some_and(|ext| ext == "html") {
                if let Ok(relative) = path.strip_prefix(base_path) {
                    let template_name = relative.to_string_lossy().replace('\\', "/");
                    if let Ok(content) = std::fs::read_to_string(&path) {
                        // Templates live for the whole process
                        let static_name: &'static str =
                            Box::leak(template_name.clone().into_boxed_str());
                        let static_content: &'static str = Box::leak(content.into_boxed_str());
                        if let Err(e) = env.add_template(static_name, static_content) {
                            tracing::warn!("Failed to load template {}: {}", template_name, e);
                        } else {
                            tracing::debug!("Loaded template: {}", template_name);
                        }
                    }
                }
            }
        }
    }
}

fn get_environment() -> &'static Environment<'static> {
    VIEW_ENV.get_or_init(|| build_environment(Path::new(ViewConfig::DEFAULT_DIR)))
}

/// Render a view with the given context.
///
/// # Example
/// ```ignore
/// use minijinja::context;
///
/// let html = render("items/show.html", context! { item => item })?;
/// ```
pub fn render(template_name: &str, ctx: Value) -> Result<String, ViewError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| ViewError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| ViewError::RenderError(e.to_string()))
}

/// List all available templates
pub fn list_templates() -> Vec<String> {
    get_environment()
        .templates()
        .map(|(name, _)| name.to_string())
        .collect()
}
