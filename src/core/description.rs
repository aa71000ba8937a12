//! Turns documentation blocks into titles and per-parameter descriptions.
//!
//! Two comment shapes are supported:
//!
//! - parsed JSDoc (interface members): the summary becomes the title and struct fields
//!   are described by `@param <path>.<field>` tags;
//! - raw leading comments (class methods): the title is cleaned the same way and a
//!   parameter is described by the rest of its `@param <name>` line.

use crate::core::error::{ComposeError, ComposeResult};
use crate::core::parsers::jsdoc::JsDoc;

const PARAM_TAG: &str = "@param";

/// Clean a documentation block into a title.
///
/// Cuts at the first `@param`, then strips comment decoration (`*` and `/`) from the
/// start and a closing `*/` plus trailing `*` from the end.
pub fn fetch_description_from_comment(text: &str) -> String {
    let head = match text.find(PARAM_TAG) {
        Some(pos) => &text[..pos],
        None => text,
    };

    let head = head.trim();
    let mut tmp = head.strip_suffix("*/").unwrap_or(head).trim();
    while let Some(rest) = tmp.strip_prefix(['*', '/']) {
        tmp = rest.trim();
    }
    while let Some(rest) = tmp.strip_suffix('*') {
        tmp = rest.trim();
    }
    tmp.to_string()
}

/// Description of a struct field from the `@param` tag that targets it.
pub fn param_tag_description<'a>(doc: &'a JsDoc, field: &str) -> ComposeResult<&'a str> {
    doc.param(field)
        .map(|tag| tag.comment.as_str())
        .ok_or_else(|| ComposeError::NoMatchingTag(field.to_string()))
}

/// Rest of the `@param <name>` line in a raw comment, trimmed. Empty when absent.
pub fn freeform_param_description(comment: &str, name: &str) -> String {
    let key = format!("{} {}", PARAM_TAG, name);
    let mut search = 0;

    while let Some(rel) = comment[search..].find(&key) {
        let start = search + rel + key.len();
        let rest = &comment[start..];
        // `@param zone` must not match `@param zoneId`.
        if rest
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            search = start;
            continue;
        }

        let line = match rest.find('\n') {
            Some(end) => &rest[..end],
            None => rest,
        };
        let line = line.trim();
        let line = line.strip_suffix("*/").unwrap_or(line);
        return line.trim().to_string();
    }

    String::new()
}
