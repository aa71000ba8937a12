//! homey-composer - Homey app manifest generator
//!
//! homey-composer is a CLI tool and library that builds a Homey app manifest
//! (`app.json`) from documentation comments in TypeScript sources, and keeps the
//! per-language locale files in sync with it.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands)
//! - `config`: Configuration file loading and parsing
//! - `core`: Composition engine (parse, collect, build, localize)
//! - `issues`: Issue type definitions and reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
