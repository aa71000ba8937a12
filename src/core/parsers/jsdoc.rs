//! JSDoc block parser.
//!
//! swc keeps comments as raw text, so the `/** ... */` blocks attached to interface
//! members, classes and object properties are split here into a summary and the
//! `@param` tags:
//!
//! ```text
//! /**
//!  * Set the temperature bounds   <- comment
//!  * @param args.zone zone         <- ParamTag { name: "args.zone", comment: "zone" }
//!  */
//! ```

use std::sync::LazyLock;

use regex::Regex;
use swc_common::comments::{Comment, CommentKind};

/// `@param {type} name - comment`; type, brackets and dash are optional.
static PARAM_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@param\s+(?:\{[^}]*\}\s*)?\[?([\w$.]+)\S*\s*(?:-\s+)?(.*)$")
        .expect("param tag regex is valid")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamTag {
    /// Declared name, possibly dotted (`args.zone`).
    pub name: String,
    pub comment: String,
}

impl ParamTag {
    /// The last dotted segment of the name: `args.zone` targets `zone`.
    pub fn target(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsDoc {
    /// Text before the first block tag, lines joined with `\n`.
    pub comment: String,
    pub tags: Vec<ParamTag>,
}

enum Section {
    Summary,
    Param(usize),
    OtherTag,
}

impl JsDoc {
    /// Parse the inner text of a block comment. Returns `None` unless it is a
    /// `/** */` documentation block.
    pub fn parse(text: &str) -> Option<JsDoc> {
        let body = text.strip_prefix('*')?;
        if body.starts_with('*') {
            // `/***` separators are not documentation.
            return None;
        }

        let mut summary: Vec<&str> = Vec::new();
        let mut tags: Vec<ParamTag> = Vec::new();
        let mut section = Section::Summary;

        for raw in body.lines() {
            let line = raw.trim_start();
            let line = line.strip_prefix('*').unwrap_or(line).trim();

            if line.starts_with('@') {
                section = match PARAM_TAG_REGEX.captures(line) {
                    Some(caps) => {
                        tags.push(ParamTag {
                            name: caps[1].to_string(),
                            comment: caps[2].trim().to_string(),
                        });
                        Section::Param(tags.len() - 1)
                    }
                    None => Section::OtherTag,
                };
                continue;
            }

            match section {
                Section::Summary => summary.push(line),
                Section::Param(idx) if !line.is_empty() => {
                    let tag = &mut tags[idx];
                    if !tag.comment.is_empty() {
                        tag.comment.push('\n');
                    }
                    tag.comment.push_str(line);
                }
                _ => {}
            }
        }

        Some(JsDoc {
            comment: summary.join("\n").trim().to_string(),
            tags,
        })
    }

    /// The last documentation block among the comments preceding a node.
    pub fn from_comments(comments: &[Comment]) -> Option<JsDoc> {
        comments
            .iter()
            .rev()
            .filter(|c| c.kind == CommentKind::Block)
            .find_map(|c| JsDoc::parse(&c.text))
    }

    /// The first `@param` tag whose target equals `field`.
    pub fn param(&self, field: &str) -> Option<&ParamTag> {
        self.tags.iter().find(|tag| tag.target() == field)
    }
}
