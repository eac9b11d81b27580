//! Initialize a new blog site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::DATE_FORMAT;

const DEFAULT_CONFIG: &str = r#"# blogd configuration

# Site
title: A blog
author: ''

# Directory layout
content_dir: content
posts_dir: posts
templates_dir: templates

# Content files
index_file: index.html
about_file: about.html
stylesheet_file: style.css

# What a listing does with an unparsable post: fail | skip
on_invalid: fail

# Template compilation: reload | compile-once
templates: reload

# Optional in-memory post cache
cache:
  enabled: false
  capacity: 64

# Include error details in 500 response bodies
expose_errors: true
"#;

const DEFAULT_INDEX: &str = r#"<h1>Welcome</h1>
<p>Recent posts:</p>
[[blog_last_x 5]]
"#;

const DEFAULT_ABOUT: &str = r#"<h1>About</h1>
<p>Words about the author go here.</p>
"#;

const DEFAULT_STYLE: &str = r#"body {
  max-width: 42rem;
  margin: 2rem auto;
  font-family: serif;
}
nav a {
  margin-right: 1rem;
}
.date {
  color: #666;
}
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let content_dir = target_dir.join("content");
    fs::create_dir_all(content_dir.join("posts"))?;
    fs::create_dir_all(content_dir.join("templates"))?;

    fs::write(target_dir.join(crate::CONFIG_FILE), DEFAULT_CONFIG)?;

    // Templates start as copies of the embedded defaults so they can be
    // edited in place.
    fs::write(
        content_dir.join("templates/base.html"),
        include_str!("../templates/defaults/base.html"),
    )?;
    fs::write(
        content_dir.join("templates/post.html"),
        include_str!("../templates/defaults/post.html"),
    )?;
    fs::write(
        content_dir.join("templates/list.html"),
        include_str!("../templates/defaults/list.html"),
    )?;

    fs::write(content_dir.join("index.html"), DEFAULT_INDEX)?;
    fs::write(content_dir.join("about.html"), DEFAULT_ABOUT)?;
    fs::write(content_dir.join("style.css"), DEFAULT_STYLE)?;

    // A sample post dated today
    let today = chrono::Local::now().date_naive().format(DATE_FORMAT);
    let sample_post = format!(
        "Hello World\n{}\n[[tags: meta]]\n\nWelcome to your new blog.\nEdit content/posts/hello-world.post to get started.",
        today
    );
    fs::write(content_dir.join("posts/hello-world.post"), sample_post)?;

    Ok(())
}
