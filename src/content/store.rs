//! Content repository
//!
//! Answers "what posts exist" and "give me post X" over the backing store,
//! plus loads the non-post content files (index source, about fragment,
//! stylesheet). Everything is read fresh per call; the optional cache in
//! front of `get` is the only state that outlives a request.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use walkdir::WalkDir;

use super::parser;
use super::post::{Post, POST_EXTENSION};
use crate::cache::{LruCache, NullCache, PostCache};
use crate::config::InvalidPostPolicy;
use crate::error::{Error, Result};
use crate::Blogd;

/// Repository over the content directory
pub struct PostStore {
    posts_dir: PathBuf,
    index_file: PathBuf,
    about_file: PathBuf,
    stylesheet_file: PathBuf,
    on_invalid: InvalidPostPolicy,
    cache: Mutex<Box<dyn PostCache>>,
}

impl PostStore {
    /// Create a store over the app's content layout
    pub fn new(blog: &Blogd) -> Self {
        let cache: Box<dyn PostCache> = if blog.config.cache.enabled {
            Box::new(LruCache::new(blog.config.cache.capacity))
        } else {
            Box::new(NullCache)
        };

        Self {
            posts_dir: blog.posts_dir.clone(),
            index_file: blog.content_dir.join(&blog.config.index_file),
            about_file: blog.content_dir.join(&blog.config.about_file),
            stylesheet_file: blog.content_dir.join(&blog.config.stylesheet_file),
            on_invalid: blog.config.on_invalid,
            cache: Mutex::new(cache),
        }
    }

    /// Fetch a single post by slug
    pub fn get(&self, slug: &str) -> Result<Post> {
        if !is_valid_slug(slug) {
            return Err(Error::NotFound(slug.to_string()));
        }

        if let Ok(mut cache) = self.cache.lock() {
            if let Some(post) = cache.get(slug) {
                return Ok(post);
            }
        }

        let path = self.posts_dir.join(format!("{}.{}", slug, POST_EXTENSION));
        let post = self.load_post(&path, slug)?;

        if let Ok(mut cache) = self.cache.lock() {
            cache.put(slug, post.clone());
        }

        Ok(post)
    }

    /// All parsable posts, in filename order.
    ///
    /// Directories are skipped and non-post files are filtered by extension.
    /// A post that fails to parse either aborts the listing or is dropped,
    /// per the configured policy.
    pub fn list(&self) -> Result<Vec<Post>> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.posts_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                let io_err = e
                    .io_error()
                    .map(|io_e| io::Error::new(io_e.kind(), io_e.to_string()))
                    .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "walk error"));
                Error::storage(&self.posts_dir, io_err)
            })?;
            let path = entry.path();
            if entry.file_type().is_file() && has_post_extension(path) {
                paths.push(path.to_path_buf());
            }
        }
        // The walk order is not promised; sort so "original order" means
        // filename order.
        paths.sort();

        let mut posts = Vec::new();
        for path in paths {
            let slug = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_string(),
                None => continue,
            };
            match self.load_post(&path, &slug) {
                Ok(post) => posts.push(post),
                Err(e) => match self.on_invalid {
                    InvalidPostPolicy::Fail => return Err(e),
                    InvalidPostPolicy::Skip => {
                        tracing::warn!("skipping post {:?}: {}", path, e);
                    }
                },
            }
        }

        Ok(posts)
    }

    /// The `n` most recent posts, newest first.
    ///
    /// Equal dates keep their filename order (stable sort); `n` larger than
    /// the collection clamps rather than erroring.
    pub fn last_n(&self, n: usize) -> Result<Vec<Post>> {
        let mut posts = self.list()?;
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts.truncate(n);
        Ok(posts)
    }

    /// Raw index page source (freeform HTML with renderer directives)
    pub fn index_source(&self) -> Result<String> {
        self.read_content_file(&self.index_file)
    }

    /// The about fragment, passed through unmodified
    pub fn about(&self) -> Result<String> {
        self.read_content_file(&self.about_file)
    }

    /// Raw CSS for the base template; absence yields an empty stylesheet
    pub fn stylesheet(&self) -> Result<String> {
        match self.read_content_file(&self.stylesheet_file) {
            Ok(css) => Ok(css),
            Err(Error::NotFound(_)) => Ok(String::new()),
            Err(e) => Err(e),
        }
    }

    fn load_post(&self, path: &Path, slug: &str) -> Result<Post> {
        let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::NotFound(slug.to_string()),
            _ => Error::storage(path, e),
        })?;
        parser::parse(slug, &raw)
    }

    fn read_content_file(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => {
                Error::NotFound(path.to_string_lossy().into_owned())
            }
            _ => Error::storage(path, e),
        })
    }
}

/// A slug names a single file stem; path separators or parent references
/// cannot match any post file.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.contains('/') && !slug.contains('\\') && !slug.contains("..")
}

fn has_post_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == POST_EXTENSION)
        .unwrap_or(false)
}
