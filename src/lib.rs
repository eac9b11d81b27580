//! blogd: a small personal blog server over flat text files
//!
//! Posts live as `.post` files in a content directory; pages are produced by
//! rendering a content-specific template and wrapping it in a base template.
//! The HTTP layer is a thin shell over the rendering pipeline.

pub mod cache;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod render;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Configuration file name looked up in the base directory
pub const CONFIG_FILE: &str = "blogd.yml";

/// The main blogd application
#[derive(Clone)]
pub struct Blogd {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory
    pub content_dir: PathBuf,
    /// Posts directory
    pub posts_dir: PathBuf,
    /// Templates directory
    pub templates_dir: PathBuf,
}

impl Blogd {
    /// Create a blogd instance from a base directory, loading `blogd.yml`
    /// when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a blogd instance with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let posts_dir = content_dir.join(&config.posts_dir);
        let templates_dir = content_dir.join(&config.templates_dir);

        Self {
            config,
            base_dir,
            content_dir,
            posts_dir,
            templates_dir,
        }
    }
}
