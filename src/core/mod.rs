//! Manifest composition engine.
//!
//! ## Module Structure
//!
//! - `build`: action, trigger and driver builders
//! - `collect`: swc AST to declaration IR
//! - `context`: pipeline orchestration (`ComposeContext`)
//! - `data`: declaration IR, manifest and locale store types
//! - `description`: documentation text cleanup
//! - `error`: typed engine errors
//! - `file_scanner`: driver folder discovery
//! - `locale`: base locale extraction and per-language injection
//! - `parsers`: TypeScript, JSDoc and JSON readers
//! - `tags`: the inline tag language (`#sample:`, `#dropdown:`, ...)
//!
//! ## Pipeline
//!
//! 1. **Parse** (`parsers::typescript`): source file to swc module plus comments
//! 2. **Collect** (`collect::DeclarationCollector`): module-level declarations with docs
//! 3. **Build** (`build`): declarations to triggers, actions and drivers
//! 4. **Localize** (`locale`): refresh the base store, inject every language

pub mod build;
pub mod collect;
pub mod context;
pub mod data;
pub mod description;
pub mod error;
pub mod file_scanner;
pub mod locale;
pub mod parsers;
pub mod tags;

pub use context::{ComposeContext, Composition, Localization};
