//! Site configuration (blogd.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What `PostStore::list` does when a post file fails to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvalidPostPolicy {
    /// A bad post aborts the whole listing (no partial results)
    #[default]
    Fail,
    /// Bad posts are logged and dropped from the listing
    Skip,
}

/// When templates are compiled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateStrategy {
    /// Recompile from disk on every render; template edits need no restart
    #[default]
    Reload,
    /// Compile at startup and reuse; compile failure is fatal
    CompileOnce,
}

/// Optional post cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Maximum number of posts held when enabled
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            capacity: 64,
        }
    }
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,

    // Directory layout, relative to the base directory
    pub content_dir: String,
    /// Posts directory, relative to `content_dir`
    pub posts_dir: String,
    /// Templates directory, relative to `content_dir`
    pub templates_dir: String,

    // Content files, relative to `content_dir`
    pub index_file: String,
    pub about_file: String,
    pub stylesheet_file: String,

    // Behavior
    pub on_invalid: InvalidPostPolicy,
    pub templates: TemplateStrategy,
    pub cache: CacheConfig,

    /// Include pipeline error details in 500 response bodies
    pub expose_errors: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "A blog".to_string(),
            author: String::new(),

            content_dir: "content".to_string(),
            posts_dir: "posts".to_string(),
            templates_dir: "templates".to_string(),

            index_file: "index.html".to_string(),
            about_file: "about.html".to_string(),
            stylesheet_file: "style.css".to_string(),

            on_invalid: InvalidPostPolicy::Fail,
            templates: TemplateStrategy::Reload,
            cache: CacheConfig::default(),

            expose_errors: true,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
