//! Locale stores: extraction of the base language and injection of every language.
//!
//! ## Module Structure
//!
//! - `common`: `$common.<key>` reference collection
//! - `extract`: rebuilds the base-language store from the canonical manifest
//! - `inject`: overlays a language's store onto the manifest

pub mod common;
pub mod extract;
pub mod inject;

pub use common::CommonCollector;
pub use extract::{COMMON_PLACEHOLDER, ExtractResult, update_base_locale};
pub use inject::add_locale;
