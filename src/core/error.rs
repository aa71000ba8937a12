//! Typed errors raised while building manifest entries and merging locales.
//!
//! These are entry-level failures: the pipeline catches them at the boundary of the
//! Action/Trigger/Driver being built and turns them into issues. I/O and parse
//! failures of whole files use `anyhow` instead and abort the run.

use thiserror::Error;

use crate::core::tags::Tag;

#[derive(Error, Debug)]
pub enum ComposeError {
    /// A required marker is absent from a description.
    #[error("Missing tag {tag} in \"{text}\"")]
    MissingTag { tag: Tag, text: String },

    /// The `#dropdown:` payload is not a JSON object of strings.
    #[error("Failed to parse dropdown {payload}: {source}")]
    MalformedDropdown {
        payload: String,
        #[source]
        source: serde_json::Error,
    },

    /// No `@param` tag targets the given field name.
    #[error("No @param tag matches field '{0}'")]
    NoMatchingTag(String),

    /// A driver class is declared without a documentation comment.
    #[error("Class '{0}' has no documentation comment")]
    MissingClassDoc(String),

    /// The locale store has no value for a manifest field.
    #[error("Missing translation {locale} {path} ({field})")]
    MissingTranslation {
        locale: String,
        path: String,
        field: String,
    },

    /// More than one payload marker in a single description.
    #[error("Conflicting tags {first} and {second} in \"{text}\"")]
    ConflictingTags { first: Tag, second: Tag, text: String },

    /// A `#sample:` payload on a numeric field is not a number.
    #[error("Sample '{0}' is not a number")]
    InvalidNumber(String),

    /// An interface member has no documentation comment.
    #[error("Member '{0}' has no documentation comment")]
    MissingDoc(String),

    /// A method parameter is not an inline object type.
    #[error("Parameter '{0}' must be declared with an inline object type")]
    UnsupportedParameter(String),

    /// A token or argument named like the entry's own title key in the locale store.
    #[error("Field name '{0}' clashes with the entry title in locale files")]
    ReservedFieldName(String),
}

pub type ComposeResult<T> = Result<T, ComposeError>;
