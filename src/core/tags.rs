//! Inline markers embedded in documentation text.
//!
//! A description like `zone #sample:Kitchen` carries plain prose (`zone`) followed by
//! a marker and its payload. Payloads run to the end of the description; there is no
//! closing delimiter, so a description carries at most one payload marker.
//!
//! | Marker               | Payload                                   |
//! |----------------------|-------------------------------------------|
//! | `#sample:`           | example value (number or text)            |
//! | `#dropdown:`         | JSON object mapping option id to label    |
//! | `#class:`            | driver class                              |
//! | `#device:`           | device filter of a `device` argument      |
//! | `#maintenanceAction` | none, presence flag                       |
//!
//! Independently, a whole string of the form `$common.<key>` is an indirection into
//! the shared common dictionary of a locale store.

use indexmap::IndexMap;

use crate::core::data::{Example, LString, PrimitiveKind};
use crate::core::error::{ComposeError, ComposeResult};

/// Prefix of a common-dictionary reference.
pub const COMMON_PREFIX: &str = "$common.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Sample,
    Dropdown,
    Class,
    Device,
    MaintenanceAction,
}

impl Tag {
    pub const ALL: [Tag; 5] = [
        Tag::Sample,
        Tag::Dropdown,
        Tag::Class,
        Tag::Device,
        Tag::MaintenanceAction,
    ];

    /// Markers that carry a payload describing a flow field.
    pub const FIELD_PAYLOADS: [Tag; 3] = [Tag::Sample, Tag::Dropdown, Tag::Device];

    pub fn marker(self) -> &'static str {
        match self {
            Tag::Sample => "#sample:",
            Tag::Dropdown => "#dropdown:",
            Tag::Class => "#class:",
            Tag::Device => "#device:",
            Tag::MaintenanceAction => "#maintenanceAction",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.marker())
    }
}

pub fn has_tag(tag: Tag, text: &str) -> bool {
    text.contains(tag.marker())
}

/// Remove every marker and its payload, keeping the prose before the first marker.
///
/// Text without any marker is returned untouched, surrounding whitespace included.
pub fn strip_tags(text: &str) -> &str {
    let first = Tag::ALL
        .iter()
        .filter_map(|tag| text.find(tag.marker()))
        .min();

    match first {
        Some(pos) => text[..pos].trim(),
        None => text,
    }
}

/// Everything after `tag` up to the end of `text`, trimmed.
pub fn extract_payload(tag: Tag, text: &str) -> ComposeResult<&str> {
    let pos = text.find(tag.marker()).ok_or_else(|| ComposeError::MissingTag {
        tag,
        text: text.to_string(),
    })?;
    Ok(text[pos + tag.marker().len()..].trim())
}

/// Prose before `tag`, trimmed. The marker and anything after it are discarded.
///
/// Used for presence markers such as `#maintenanceAction` whose trailing text is not
/// a payload. Text without the marker is returned untouched.
pub fn remove_tag_text(tag: Tag, text: &str) -> &str {
    match text.find(tag.marker()) {
        Some(pos) => text[..pos].trim(),
        None => text,
    }
}

/// Parse the `#dropdown:` payload, preserving the option order of the JSON object.
pub fn get_dropdown(text: &str) -> ComposeResult<IndexMap<String, String>> {
    let payload = extract_payload(Tag::Dropdown, text)?;
    serde_json::from_str(payload).map_err(|source| ComposeError::MalformedDropdown {
        payload: payload.to_string(),
        source,
    })
}

/// Parse the `#sample:` payload for a field of the given kind.
pub fn get_example(text: &str, kind: PrimitiveKind) -> ComposeResult<Example> {
    let payload = extract_payload(Tag::Sample, text)?;
    match kind {
        PrimitiveKind::Number => serde_json::from_str::<serde_json::Number>(payload)
            .map(Example::Number)
            .map_err(|_| ComposeError::InvalidNumber(payload.to_string())),
        PrimitiveKind::String | PrimitiveKind::Unknown => {
            Ok(Example::Text(LString::english(payload)))
        }
    }
}

pub fn get_class_tag(text: &str) -> ComposeResult<&str> {
    extract_payload(Tag::Class, text)
}

/// The payload marker of a field description, if any.
///
/// Fails with `ConflictingTags` when the description carries more than one of
/// `#sample:`, `#dropdown:` and `#device:`, since each payload would swallow the next.
pub fn payload_tag(text: &str) -> ComposeResult<Option<Tag>> {
    let mut present = Tag::FIELD_PAYLOADS
        .iter()
        .filter_map(|tag| text.find(tag.marker()).map(|pos| (pos, *tag)))
        .collect::<Vec<_>>();
    present.sort_by_key(|(pos, _)| *pos);

    match present.as_slice() {
        [] => Ok(None),
        [(_, tag)] => Ok(Some(*tag)),
        [(_, first), (_, second), ..] => Err(ComposeError::ConflictingTags {
            first: *first,
            second: *second,
            text: text.to_string(),
        }),
    }
}

/// The key of a `$common.<key>` reference.
pub fn common_key(text: &str) -> Option<&str> {
    text.strip_prefix(COMMON_PREFIX).filter(|key| !key.is_empty())
}
