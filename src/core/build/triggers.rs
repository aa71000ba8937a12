//! Flow triggers.
//!
//! Two declaration shapes are recognised, tried in source order; the first declaration
//! that yields at least one trigger wins.
//!
//! Interface signatures, documented like actions. Examples are optional:
//!
//! ```typescript
//! export interface ITriggers {
//!     /**
//!      * A temperature changed
//!      * @param args.zone zone #sample:Kitchen
//!      */
//!     TemperatureChanged(args: { zone: string }): Promise<void>;
//! }
//! ```
//!
//! Public `on*` class methods, one token per parameter. Examples are mandatory:
//!
//! ```typescript
//! export class Triggers {
//!     /**
//!      * The temperature is too cold
//!      * @param zone zone #sample:Kitchen
//!      */
//!     public onTooCold(zone: string) {}
//! }
//! ```

use tracing::{debug, info};

use crate::core::build::{BuildResult, check_field_name};
use crate::core::data::{
    ClassDecl, ClassMethod, Declaration, Field, InterfaceDecl, LString, MethodSignature,
    ParamType, SourceDecls, Token, Trigger, Visibility,
};
use crate::core::description::{
    fetch_description_from_comment, freeform_param_description, param_tag_description,
};
use crate::core::error::{ComposeError, ComposeResult};
use crate::core::parsers::jsdoc::JsDoc;
use crate::core::tags::{Tag, get_example, payload_tag, strip_tags};
use crate::issues::{EntryKind, NoEntriesIssue, SkippedEntryIssue, SourceLocation};

/// Prefix marking a class method as an event emitter.
const EVENT_PREFIX: &str = "on";

pub fn build_triggers(decls: &SourceDecls) -> BuildResult<Trigger> {
    let mut result = BuildResult::default();

    for decl in &decls.declarations {
        let (name, found) = match decl {
            Declaration::Interface(iface) => {
                (iface.name.as_str(), from_interface(iface, &decls.file_path, &mut result))
            }
            Declaration::Class(class) => (
                class.name.as_deref().unwrap_or("<anonymous>"),
                from_class(class, &decls.file_path, &mut result),
            ),
            Declaration::Variable(_) => continue,
        };

        if found > 0 {
            info!("Found {} triggers in {}", found, name);
            return result;
        }
        debug!("Skipping {}: no triggers", name);
    }

    debug!("Failed to find any triggers in {}", decls.file_path);
    result.issues.push(
        NoEntriesIssue {
            file_path: decls.file_path.clone(),
            kind: EntryKind::Trigger,
        }
        .into(),
    );
    result
}

fn push_entry(
    result: &mut BuildResult<Trigger>,
    built: ComposeResult<Trigger>,
    location: SourceLocation,
    name: &str,
) {
    match built {
        Ok(trigger) => result.entries.push(trigger),
        Err(e) => {
            debug!("Failed to parse trigger {}: {}", name, e);
            result
                .issues
                .push(SkippedEntryIssue::new(location, EntryKind::Trigger, name, &e).into());
        }
    }
}

// ============================================================
// Interface variant
// ============================================================

fn from_interface(iface: &InterfaceDecl, file_path: &str, result: &mut BuildResult<Trigger>) -> usize {
    let before = result.entries.len();
    for method in &iface.methods {
        let built = build_signature_trigger(method);
        push_entry(result, built, SourceLocation::new(file_path, method.line), &method.name);
    }
    result.entries.len() - before
}

fn build_signature_trigger(method: &MethodSignature) -> ComposeResult<Trigger> {
    let doc = method
        .doc
        .as_ref()
        .ok_or_else(|| ComposeError::MissingDoc(method.name.clone()))?;

    let mut tokens = Vec::new();
    for param in &method.params {
        match &param.ty {
            ParamType::Struct(fields) => {
                tokens = fields
                    .iter()
                    .map(|field| build_field_token(field, doc))
                    .collect::<ComposeResult<Vec<_>>>()?;
            }
            ParamType::Primitive(_) => {
                return Err(ComposeError::UnsupportedParameter(param.name.clone()));
            }
        }
    }

    Ok(Trigger {
        id: method.name.clone(),
        title: LString::english(fetch_description_from_comment(&doc.comment)),
        tokens,
    })
}

fn build_field_token(field: &Field, doc: &JsDoc) -> ComposeResult<Token> {
    check_field_name(&field.name)?;
    let desc = param_tag_description(doc, &field.name)?;
    let example = match payload_tag(desc)? {
        Some(Tag::Sample) => Some(get_example(desc, field.kind)?),
        _ => None,
    };

    Ok(Token {
        name: field.name.clone(),
        kind: field.kind.into(),
        title: LString::english(strip_tags(desc)),
        example,
    })
}

// ============================================================
// Class variant
// ============================================================

fn from_class(class: &ClassDecl, file_path: &str, result: &mut BuildResult<Trigger>) -> usize {
    let before = result.entries.len();
    for method in &class.methods {
        let Some(id) = event_id(method) else {
            continue;
        };
        let built = build_method_trigger(id, method);
        push_entry(result, built, SourceLocation::new(file_path, method.line), &method.name);
    }
    result.entries.len() - before
}

/// Trigger id of a public `on<Id>` method.
fn event_id(method: &ClassMethod) -> Option<&str> {
    if method.visibility != Visibility::Public {
        return None;
    }
    method
        .name
        .strip_prefix(EVENT_PREFIX)
        .filter(|id| !id.is_empty())
}

fn build_method_trigger(id: &str, method: &ClassMethod) -> ComposeResult<Trigger> {
    let comment = &method.leading_comment;
    let tokens = method
        .params
        .iter()
        .map(|param| {
            check_field_name(&param.name)?;
            let desc = freeform_param_description(comment, &param.name);
            payload_tag(&desc)?;
            Ok(Token {
                name: param.name.clone(),
                kind: param.kind().into(),
                title: LString::english(strip_tags(&desc)),
                example: Some(get_example(&desc, param.kind())?),
            })
        })
        .collect::<ComposeResult<Vec<_>>>()?;

    Ok(Trigger {
        id: id.to_string(),
        title: LString::english(fetch_description_from_comment(comment)),
        tokens,
    })
}
