//! Manifest entity builders.
//!
//! Pure functions from declaration IR to manifest entries. Entry-level failures are
//! caught at the entry boundary: the entry is dropped and a `skipped-entry` issue is
//! returned alongside the entries that did build.
//!
//! ## Module Structure
//!
//! - `actions`: interface method signatures to flow actions
//! - `triggers`: interface signatures or `on*` class methods to flow triggers
//! - `drivers`: capabilities object and class documentation to a driver entry

pub mod actions;
pub mod drivers;
pub mod triggers;

pub use actions::build_actions;
pub use drivers::{build_driver, extract_driver, merge_baseline};
pub use triggers::build_triggers;

use crate::core::data::{ArgumentType, ENTRY_TITLE_KEY, PrimitiveKind, TokenType};
use crate::core::error::{ComposeError, ComposeResult};
use crate::issues::Issue;

/// Entries built from one source file, plus the issues raised while building them.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildResult<T> {
    pub entries: Vec<T>,
    pub issues: Vec<Issue>,
}

impl<T> Default for BuildResult<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            issues: Vec::new(),
        }
    }
}

/// Reject token and argument names that would share a key with the entry title.
pub(crate) fn check_field_name(name: &str) -> ComposeResult<()> {
    if name == ENTRY_TITLE_KEY {
        return Err(ComposeError::ReservedFieldName(name.to_string()));
    }
    Ok(())
}

impl From<PrimitiveKind> for TokenType {
    fn from(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::String => TokenType::String,
            PrimitiveKind::Number => TokenType::Number,
            PrimitiveKind::Unknown => TokenType::Unknown,
        }
    }
}

impl From<PrimitiveKind> for ArgumentType {
    fn from(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::String => ArgumentType::Text,
            PrimitiveKind::Number => ArgumentType::Number,
            PrimitiveKind::Unknown => ArgumentType::Unknown,
        }
    }
}
