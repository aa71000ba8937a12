//! File parsers for source code and JSON inputs.
//!
//! This module provides parsers for different file types:
//! - `typescript`: TypeScript source file parser (uses swc for AST generation)
//! - `jsdoc`: `/** */` documentation block parser
//! - `json`: package, manifest, driver baseline and locale file I/O

pub mod jsdoc;
pub mod json;
pub mod typescript;
