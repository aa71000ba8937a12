//! Declaration collection: swc AST to declaration IR.
//!
//! A single AST pass per file gathers the module-level interfaces, classes and
//! object-literal variables together with their documentation comments. Builders in
//! `core::build` consume the result without touching swc types.

pub mod declarations;

use std::sync::Arc;

use anyhow::Result;
use swc_common::SourceMap;
use swc_ecma_visit::VisitWith;

pub use declarations::DeclarationCollector;

use crate::core::data::SourceDecls;
use crate::core::parsers::typescript::parse_typescript_source;

/// Parse a TypeScript source and lower it to declarations.
pub fn parse_declarations(code: String, file_path: &str) -> Result<SourceDecls> {
    let source_map: Arc<SourceMap> = Arc::default();
    let parsed = parse_typescript_source(code, file_path, source_map)?;

    let mut collector = DeclarationCollector::new(&parsed.source_map, &parsed.comments);
    parsed.module.visit_with(&mut collector);

    Ok(SourceDecls {
        file_path: file_path.to_string(),
        declarations: collector.declarations,
    })
}
