//! Post model

use chrono::NaiveDate;
use serde::Serialize;

/// Date format shared by the post header parser and every display surface.
///
/// Unpadded month and day (`3/4/2023`). Parser and formatter must change
/// together; the display string round-trips through the same format.
pub const DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Canonical extension for post files
pub const POST_EXTENSION: &str = "post";

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    /// Post title, taken verbatim from the first header line
    pub title: String,

    /// Identifier derived from the file stem; never empty, used for lookup
    /// and URL construction
    pub slug: String,

    /// Publish date (calendar date, no time-of-day)
    pub date: NaiveDate,

    /// Display form of the date, unpadded `M/D/YYYY`
    pub date_display: String,

    /// Tags in header order, duplicates kept
    pub tags: Vec<String>,

    /// HTML-safe body with `\n<br>\n` between source lines
    pub content: String,
}

impl Post {
    /// Create a post, deriving the display date from the parsed date
    pub fn new(
        title: String,
        slug: String,
        date: NaiveDate,
        tags: Vec<String>,
        content: String,
    ) -> Self {
        let date_display = date.format(DATE_FORMAT).to_string();
        Self {
            title,
            slug,
            date,
            date_display,
            tags,
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_display_is_unpadded() {
        let date = NaiveDate::from_ymd_opt(2023, 3, 4).unwrap();
        let post = Post::new("t".into(), "s".into(), date, vec![], String::new());
        assert_eq!(post.date_display, "3/4/2023");
    }

    #[test]
    fn test_date_display_round_trips() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let post = Post::new("t".into(), "s".into(), date, vec![], String::new());
        let reparsed = NaiveDate::parse_from_str(&post.date_display, DATE_FORMAT).unwrap();
        assert_eq!(reparsed, date);
    }
}
