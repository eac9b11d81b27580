//! Template resolver
//!
//! The base, post and list templates are Tera templates loaded from the
//! templates directory; copies of all three are embedded in the binary and
//! stand in for any file that is absent, so a site works with an empty
//! templates directory. Autoescaping is off throughout: `page_content` and
//! `content` carry pre-rendered HTML and the stylesheet is raw CSS.
//!
//! Two strategies exist behind the same `render` call: compile once at
//! construction (compile failure is fatal at startup) or recompile from disk
//! per render (template edits take effect without a restart, compile failure
//! is a per-request error).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tera::Tera;

pub use tera::Context;

use crate::config::TemplateStrategy;
use crate::error::{Error, Result};

/// Base/outer shell template name
pub const BASE: &str = "base.html";
/// Post detail template name
pub const POST: &str = "post.html";
/// Post list template name
pub const LIST: &str = "list.html";

/// Embedded fallbacks, compiled into the binary
const DEFAULTS: [(&str, &str); 3] = [
    (BASE, include_str!("defaults/base.html")),
    (POST, include_str!("defaults/post.html")),
    (LIST, include_str!("defaults/list.html")),
];

/// Loads and compiles the page templates
#[derive(Debug)]
pub struct TemplateResolver {
    templates_dir: PathBuf,
    strategy: TemplateStrategy,
    /// Populated only under `CompileOnce`
    compiled: Option<Tera>,
}

impl TemplateResolver {
    /// Create a resolver over a templates directory
    pub fn new<P: AsRef<Path>>(templates_dir: P, strategy: TemplateStrategy) -> Result<Self> {
        let templates_dir = templates_dir.as_ref().to_path_buf();
        let compiled = match strategy {
            TemplateStrategy::CompileOnce => Some(compile(&templates_dir)?),
            TemplateStrategy::Reload => None,
        };
        Ok(Self {
            templates_dir,
            strategy,
            compiled,
        })
    }

    /// Render a named template against a context
    pub fn render(&self, name: &str, context: &Context) -> Result<String> {
        match (self.strategy, &self.compiled) {
            (TemplateStrategy::CompileOnce, Some(tera)) => Ok(tera.render(name, context)?),
            _ => {
                let tera = compile(&self.templates_dir)?;
                Ok(tera.render(name, context)?)
            }
        }
    }
}

/// Compile the template set, falling back to the embedded copy for any file
/// that is absent from the directory
fn compile(templates_dir: &Path) -> Result<Tera> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);

    let mut sources = Vec::with_capacity(DEFAULTS.len());
    for (name, fallback) in DEFAULTS {
        let path = templates_dir.join(name);
        match fs::read_to_string(&path) {
            Ok(source) => sources.push((name, source)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                sources.push((name, fallback.to_string()))
            }
            Err(e) => return Err(Error::storage(path, e)),
        }
    }
    tera.add_raw_templates(sources)?;

    Ok(tera)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn base_context() -> Context {
        let mut ctx = Context::new();
        ctx.insert("title", "T");
        ctx.insert("page_content", "<p>inner</p>");
        ctx.insert("stylesheet", "body { margin: 0; }");
        ctx
    }

    #[test]
    fn test_embedded_defaults_cover_missing_files() {
        let dir = TempDir::new().unwrap();
        let resolver = TemplateResolver::new(dir.path(), TemplateStrategy::Reload).unwrap();

        let html = resolver.render(BASE, &base_context()).unwrap();
        assert!(html.contains("<p>inner</p>"));
        assert!(html.contains("body { margin: 0; }"));
    }

    #[test]
    fn test_content_is_not_escaped() {
        let dir = TempDir::new().unwrap();
        let resolver = TemplateResolver::new(dir.path(), TemplateStrategy::Reload).unwrap();

        let html = resolver.render(BASE, &base_context()).unwrap();
        assert!(!html.contains("&lt;p&gt;"));
    }

    #[test]
    fn test_disk_template_overrides_default() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(BASE), "CUSTOM {{ page_content }}").unwrap();
        let resolver = TemplateResolver::new(dir.path(), TemplateStrategy::Reload).unwrap();

        let html = resolver.render(BASE, &base_context()).unwrap();
        assert!(html.starts_with("CUSTOM "));
    }

    #[test]
    fn test_reload_picks_up_edits_without_reconstruction() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(POST), "v1 {{ title }}").unwrap();
        let resolver = TemplateResolver::new(dir.path(), TemplateStrategy::Reload).unwrap();

        let mut ctx = Context::new();
        ctx.insert("title", "T");
        ctx.insert("date_display", "1/2/2006");
        ctx.insert("content", "c");
        assert_eq!(resolver.render(POST, &ctx).unwrap(), "v1 T");

        fs::write(dir.path().join(POST), "v2 {{ title }}").unwrap();
        assert_eq!(resolver.render(POST, &ctx).unwrap(), "v2 T");
    }

    #[test]
    fn test_compile_once_ignores_later_edits() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(POST), "v1 {{ title }}").unwrap();
        let resolver = TemplateResolver::new(dir.path(), TemplateStrategy::CompileOnce).unwrap();

        let mut ctx = Context::new();
        ctx.insert("title", "T");
        fs::write(dir.path().join(POST), "v2 {{ title }}").unwrap();
        assert_eq!(resolver.render(POST, &ctx).unwrap(), "v1 T");
    }

    #[test]
    fn test_compile_once_fails_fast_on_bad_template() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(BASE), "{{ unclosed").unwrap();

        let err = TemplateResolver::new(dir.path(), TemplateStrategy::CompileOnce).unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }

    #[test]
    fn test_reload_surfaces_bad_template_per_render() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(BASE), "{{ unclosed").unwrap();

        // Construction succeeds; the failure belongs to the render call.
        let resolver = TemplateResolver::new(dir.path(), TemplateStrategy::Reload).unwrap();
        let err = resolver.render(BASE, &base_context()).unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }
}
