//! Page renderer
//!
//! Every page is produced in two stages: render the inner content (post
//! detail, post list, index body, about fragment), then render the base
//! template with that inner HTML as `page_content`. A page is either built
//! completely or not returned at all; callers never see partial output.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::content::{Post, PostStore};
use crate::error::Result;
use crate::templates::{Context, TemplateResolver, BASE, LIST, POST};
use crate::Blogd;

lazy_static! {
    /// Index directive: `[[blog_last_x N]]`. Anything that does not match
    /// this shape passes through the index source literally.
    static ref LAST_X_DIRECTIVE: Regex = Regex::new(r"\[\[blog_last_x (\d+)\]\]").unwrap();
}

/// One row of the post list template
#[derive(Debug, Serialize)]
struct ListEntry {
    link: String,
    title: String,
    date_display: String,
}

impl ListEntry {
    fn from_post(post: &Post) -> Self {
        Self {
            link: format!("/blog/{}", post.slug),
            title: post.title.clone(),
            date_display: post.date_display.clone(),
        }
    }
}

/// Composes templates and repository data into final HTML
pub struct PageRenderer {
    store: PostStore,
    templates: TemplateResolver,
    site_title: String,
}

impl PageRenderer {
    /// Build the rendering pipeline for an app instance
    pub fn new(blog: &Blogd) -> Result<Self> {
        let templates = TemplateResolver::new(&blog.templates_dir, blog.config.templates)?;
        Ok(Self {
            store: PostStore::new(blog),
            templates,
            site_title: blog.config.title.clone(),
        })
    }

    /// Render a single post page
    pub fn render_post(&self, slug: &str) -> Result<String> {
        let post = self.store.get(slug)?;

        let mut ctx = Context::new();
        ctx.insert("title", &post.title);
        ctx.insert("date_display", &post.date_display);
        ctx.insert("content", &post.content);
        let inner = self.templates.render(POST, &ctx)?;

        self.wrap_base(&post.title, &inner)
    }

    /// Render the full post listing, newest first
    pub fn render_post_list(&self) -> Result<String> {
        let posts = self.store.last_n(usize::MAX)?;
        let entries: Vec<ListEntry> = posts.iter().map(ListEntry::from_post).collect();

        let mut ctx = Context::new();
        ctx.insert("posts", &entries);
        let inner = self.templates.render(LIST, &ctx)?;

        self.wrap_base(&self.site_title, &inner)
    }

    /// Render the index page, expanding its directives
    pub fn render_index(&self) -> Result<String> {
        let source = self.store.index_source()?;
        let inner = self.expand_directives(&source)?;
        self.wrap_base(&self.site_title, &inner)
    }

    /// Render the about page; the fragment passes through unmodified
    pub fn render_about(&self) -> Result<String> {
        let inner = self.store.about()?;
        self.wrap_base(&self.site_title, &inner)
    }

    /// Second stage: wrap pre-rendered inner HTML in the base template
    fn wrap_base(&self, title: &str, inner: &str) -> Result<String> {
        let stylesheet = self.store.stylesheet()?;

        let mut ctx = Context::new();
        ctx.insert("title", title);
        ctx.insert("page_content", inner);
        ctx.insert("stylesheet", &stylesheet);
        self.templates.render(BASE, &ctx)
    }

    /// Replace each well-formed `[[blog_last_x N]]` with a rendered list of
    /// the N most recent posts; malformed directives stay literal.
    fn expand_directives(&self, source: &str) -> Result<String> {
        let mut out = String::with_capacity(source.len());
        let mut last = 0;

        for caps in LAST_X_DIRECTIVE.captures_iter(source) {
            let whole = caps.get(0).unwrap();
            // A digit run too large for usize is malformed, not a directive.
            let n: usize = match caps[1].parse() {
                Ok(n) => n,
                Err(_) => continue,
            };

            out.push_str(&source[last..whole.start()]);
            out.push_str(&self.render_recent(n)?);
            last = whole.end();
        }
        out.push_str(&source[last..]);

        Ok(out)
    }

    /// Link + title + date for the N most recent posts, one line break each
    fn render_recent(&self, n: usize) -> Result<String> {
        let posts = self.store.last_n(n)?;
        let mut out = String::new();
        for post in &posts {
            out.push_str(&format!(
                "<a href=\"/blog/{}\">{}</a> {}<br>\n",
                post.slug, post.title, post.date_display
            ));
        }
        Ok(out)
    }
}
