//! Post file parser
//!
//! Posts are line-oriented: a fixed four-line header (title, date, optional
//! tag line, blank separator) followed by body lines. The parser works on a
//! raw text blob; file lookup and the not-found/malformed distinction belong
//! to the store.

use chrono::NaiveDate;

use super::post::{Post, DATE_FORMAT};
use crate::error::{Error, Result};

/// Marker inserted between consecutive body lines
const LINE_BREAK: &str = "\n<br>\n";

/// Parse one raw post file into a `Post`.
///
/// The slug is the caller's identifier for the file (its stem); it ends up
/// on the post unchanged and in any error this parse produces.
pub fn parse(slug: &str, raw: &str) -> Result<Post> {
    let mut lines = raw.lines();

    let title = lines
        .next()
        .ok_or_else(|| Error::malformed(slug, "missing title line"))?;

    let date_line = lines
        .next()
        .ok_or_else(|| Error::malformed(slug, "missing date line"))?;
    let date = NaiveDate::parse_from_str(date_line, DATE_FORMAT).map_err(|e| {
        Error::malformed(slug, format!("invalid date '{}': {}", date_line, e))
    })?;

    // Line 3 is always consumed as the tag line, whatever its shape.
    let tags = lines.next().map(parse_tag_line).unwrap_or_default();

    // Blank separator: read and discarded, not validated.
    let _ = lines.next();

    let mut body: Vec<&str> = lines.collect();
    if body.last() == Some(&"") {
        body.pop();
    }
    let content = body.join(LINE_BREAK);

    Ok(Post::new(
        title.to_string(),
        slug.to_string(),
        date,
        tags,
        content,
    ))
}

/// Split a `[[tags: t1 t2 t3]]` line into tags; any other shape yields none.
fn parse_tag_line(line: &str) -> Vec<String> {
    line.strip_prefix("[[tags:")
        .and_then(|rest| rest.strip_suffix("]]"))
        .map(|inner| inner.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_post() {
        let raw = "Title\n3/4/2023\n[[tags: a b]]\n\nline1\nline2";
        let post = parse("my-post", raw).unwrap();
        assert_eq!(post.title, "Title");
        assert_eq!(post.slug, "my-post");
        assert_eq!(post.date, NaiveDate::from_ymd_opt(2023, 3, 4).unwrap());
        assert_eq!(post.date_display, "3/4/2023");
        assert_eq!(post.tags, vec!["a", "b"]);
        assert_eq!(post.content, "line1\n<br>\nline2");
    }

    #[test]
    fn test_empty_tag_line_yields_no_tags() {
        let raw = "Title\n1/2/2006\n\n\nbody";
        let post = parse("p", raw).unwrap();
        assert!(post.tags.is_empty());
        assert_eq!(post.content, "body");
    }

    #[test]
    fn test_non_matching_tag_line_is_consumed_not_body() {
        let raw = "Title\n1/2/2006\nnot a tag line\n\nbody";
        let post = parse("p", raw).unwrap();
        assert!(post.tags.is_empty());
        // The malformed tag line never leaks into the body.
        assert_eq!(post.content, "body");
    }

    #[test]
    fn test_tag_order_and_duplicates_preserved() {
        let raw = "Title\n1/2/2006\n[[tags: z a z]]\n\n";
        let post = parse("p", raw).unwrap();
        assert_eq!(post.tags, vec!["z", "a", "z"]);
    }

    #[test]
    fn test_single_body_line_has_no_trailing_marker() {
        let raw = "Title\n1/2/2006\n\n\nonly line";
        let post = parse("p", raw).unwrap();
        assert_eq!(post.content, "only line");
    }

    #[test]
    fn test_zero_body_lines_yield_empty_content() {
        let raw = "Title\n1/2/2006\n\n";
        let post = parse("p", raw).unwrap();
        assert_eq!(post.content, "");
    }

    #[test]
    fn test_empty_final_line_contributes_nothing() {
        let raw = "Title\n1/2/2006\n\n\nline1\nline2\n";
        let post = parse("p", raw).unwrap();
        assert_eq!(post.content, "line1\n<br>\nline2");
    }

    #[test]
    fn test_blank_line_inside_body_is_kept() {
        let raw = "Title\n1/2/2006\n\n\nline1\n\nline3";
        let post = parse("p", raw).unwrap();
        assert_eq!(post.content, "line1\n<br>\n\n<br>\nline3");
    }

    #[test]
    fn test_iso_date_is_malformed() {
        let raw = "Title\n2023-03-04\n\n\nbody";
        let err = parse("p", raw).unwrap_err();
        assert!(matches!(err, Error::MalformedPost { .. }));
    }

    #[test]
    fn test_unpadded_and_padded_dates_parse() {
        let post = parse("p", "T\n1/2/2006\n\n").unwrap();
        assert_eq!(post.date, NaiveDate::from_ymd_opt(2006, 1, 2).unwrap());
        // Zero-padding is accepted on input; display stays unpadded.
        let post = parse("p", "T\n01/02/2006\n\n").unwrap();
        assert_eq!(post.date_display, "1/2/2006");
    }

    #[test]
    fn test_missing_header_lines_are_malformed() {
        assert!(matches!(
            parse("p", "").unwrap_err(),
            Error::MalformedPost { .. }
        ));
        assert!(matches!(
            parse("p", "Title only").unwrap_err(),
            Error::MalformedPost { .. }
        ));
    }

    #[test]
    fn test_crlf_input() {
        let raw = "Title\r\n3/4/2023\r\n[[tags: a]]\r\n\r\nline1\r\nline2\r\n";
        let post = parse("p", raw).unwrap();
        assert_eq!(post.tags, vec!["a"]);
        assert_eq!(post.content, "line1\n<br>\nline2");
    }
}
