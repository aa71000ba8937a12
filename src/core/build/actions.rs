//! Flow actions from interface method signatures.
//!
//! ```typescript
//! export interface IActions {
//!     /**
//!      * Set the zone mode
//!      * @param args.zone zone #sample:Kitchen
//!      * @param args.mode mode #dropdown:{"enabled":"Enabled","disabled":"Disabled"}
//!      */
//!     SetZoneMode(args: { zone: string, mode: string }): Promise<void>;
//! }
//! ```

use tracing::{debug, info};

use crate::core::build::{BuildResult, check_field_name};
use crate::core::data::{
    Action, Argument, ArgumentType, DropdownValue, Field, LString, MethodSignature, ParamType,
    SourceDecls,
};
use crate::core::description::{fetch_description_from_comment, param_tag_description};
use crate::core::error::{ComposeError, ComposeResult};
use crate::core::parsers::jsdoc::JsDoc;
use crate::core::tags::{Tag, extract_payload, get_dropdown, get_example, payload_tag, strip_tags};
use crate::issues::{EntryKind, NoEntriesIssue, SkippedEntryIssue, SourceLocation};

/// Build an action per method signature of every interface in the file.
///
/// Ids are prefixed with `<Interface>.` when the file declares more than one interface.
pub fn build_actions(decls: &SourceDecls) -> BuildResult<Action> {
    let interfaces: Vec<_> = decls.interfaces().collect();
    let prefixed = interfaces.len() > 1;
    let mut result = BuildResult::default();

    for iface in interfaces {
        let before = result.entries.len();
        for method in &iface.methods {
            match build_action(method) {
                Ok(mut action) => {
                    if prefixed {
                        action.id = format!("{}.{}", iface.name, action.id);
                    }
                    result.entries.push(action);
                }
                Err(e) => {
                    debug!("Failed to parse action {}: {}", method.name, e);
                    result.issues.push(
                        SkippedEntryIssue::new(
                            SourceLocation::new(&decls.file_path, method.line),
                            EntryKind::Action,
                            &method.name,
                            &e,
                        )
                        .into(),
                    );
                }
            }
        }

        let count = result.entries.len() - before;
        if count == 0 {
            debug!("Skipping interface {}: no actions", iface.name);
        } else {
            info!("Found {} actions in interface {}", count, iface.name);
        }
    }

    if result.entries.is_empty() {
        debug!("Failed to find any actions in {}", decls.file_path);
        result.issues.push(
            NoEntriesIssue {
                file_path: decls.file_path.clone(),
                kind: EntryKind::Action,
            }
            .into(),
        );
    }
    result
}

fn build_action(method: &MethodSignature) -> ComposeResult<Action> {
    let doc = method
        .doc
        .as_ref()
        .ok_or_else(|| ComposeError::MissingDoc(method.name.clone()))?;

    let mut args = Vec::new();
    for param in &method.params {
        match &param.ty {
            ParamType::Struct(fields) => {
                args = fields
                    .iter()
                    .map(|field| build_argument(field, doc))
                    .collect::<ComposeResult<Vec<_>>>()?;
            }
            ParamType::Primitive(_) => {
                return Err(ComposeError::UnsupportedParameter(param.name.clone()));
            }
        }
    }

    Ok(Action {
        id: method.name.clone(),
        title: LString::english(fetch_description_from_comment(&doc.comment)),
        args,
    })
}

fn build_argument(field: &Field, doc: &JsDoc) -> ComposeResult<Argument> {
    check_field_name(&field.name)?;
    let desc = param_tag_description(doc, &field.name)?;
    let title = LString::english(strip_tags(desc));

    let argument = match payload_tag(desc)? {
        Some(Tag::Device) => Argument {
            filter: Some(extract_payload(Tag::Device, desc)?.to_string()),
            ..Argument::scalar(&field.name, ArgumentType::Device, title)
        },
        Some(Tag::Dropdown) => {
            let values = get_dropdown(desc)?
                .into_iter()
                .map(|(id, label)| DropdownValue {
                    id,
                    label: LString::english(label),
                })
                .collect();
            Argument {
                values: Some(values),
                ..Argument::scalar(&field.name, ArgumentType::Dropdown, title)
            }
        }
        Some(Tag::Sample) => Argument {
            example: Some(get_example(desc, field.kind)?),
            ..Argument::scalar(&field.name, field.kind.into(), title)
        },
        _ => Argument::scalar(&field.name, field.kind.into(), title),
    };
    Ok(argument)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::core::build::actions::*;
    use crate::core::collect::parse_declarations;
    use crate::issues::{Issue, Rule};

    fn build(source: &str) -> BuildResult<Action> {
        build_actions(&parse_declarations(source.to_string(), "actions.ts").unwrap())
    }

    #[test]
    fn test_full_example() {
        let source = r#"
export interface IActions {
    /**
     * Set the temperature bounds of a zone
     * @param args.zone zone #sample:Kitchen
     * @param args.temperature temperature #sample:21
     */
    SetTemperatureBounds(args: { zone: string, temperature: number }): Promise<void>;
    /**
     * Set the zone mode
     * @param args.zone $common.zone
     * @param args.mode mode #dropdown:{"disabled":"Disabled","enabled":"Enabled"}
     */
    SetZoneMode(args: { zone: string, mode: string }): Promise<void>;
}
"#;
        let result = build(source);
        assert!(result.issues.is_empty());
        assert_eq!(
            serde_json::to_value(&result.entries).unwrap(),
            json!([
                {
                    "id": "SetTemperatureBounds",
                    "title": {"en": "Set the temperature bounds of a zone"},
                    "args": [
                        {"name": "zone", "type": "text", "title": {"en": "zone"}, "example": {"en": "Kitchen"}},
                        {"name": "temperature", "type": "number", "title": {"en": "temperature"}, "example": 21}
                    ]
                },
                {
                    "id": "SetZoneMode",
                    "title": {"en": "Set the zone mode"},
                    "args": [
                        {"name": "zone", "type": "text", "title": {"en": "$common.zone"}},
                        {
                            "name": "mode",
                            "type": "dropdown",
                            "title": {"en": "mode"},
                            "values": [
                                {"id": "disabled", "label": {"en": "Disabled"}},
                                {"id": "enabled", "label": {"en": "Enabled"}}
                            ]
                        }
                    ]
                }
            ])
        );
    }

    #[test]
    fn test_device_argument() {
        let source = r#"
interface IActions {
    /**
     * Turn on
     * @param args.device thermostat #device:driver_id=zone-temperature
     */
    TurnOn(args: { device: string }): Promise<void>;
}
"#;
        let result = build(source);
        let arg = &result.entries[0].args[0];
        assert_eq!(arg.kind, ArgumentType::Device);
        assert_eq!(arg.filter.as_deref(), Some("driver_id=zone-temperature"));
        assert_eq!(arg.title.en(), Some("thermostat"));
    }

    #[test]
    fn test_multiple_interfaces_prefix_ids() {
        let source = r#"
interface Zones {
    /** Reset */
    Reset(args: {}): Promise<void>;
}
interface Empty {}
interface Lights {
    /** Toggle */
    Toggle(args: {}): Promise<void>;
}
"#;
        let ids: Vec<String> = build(source).entries.into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["Zones.Reset", "Lights.Toggle"]);
    }

    #[test]
    fn test_failed_entries_are_skipped() {
        let source = r#"
interface IActions {
    Undocumented(args: { zone: string }): Promise<void>;
    /**
     * Conflicting
     * @param args.mode mode #sample:a #dropdown:{"a":"A"}
     */
    Conflicting(args: { mode: string }): Promise<void>;
    /** Primitive */
    Primitive(zone: string): Promise<void>;
    /**
     * Good
     * @param args.zone zone
     */
    Good(args: { zone: string }): Promise<void>;
}
"#;
        let result = build(source);
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].id, "Good");

        let skipped: Vec<(&str, &str)> = result
            .issues
            .iter()
            .filter_map(|issue| match issue {
                Issue::SkippedEntry(s) => Some((s.name.as_str(), s.reason.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(skipped.len(), 3);
        assert_eq!(skipped[0].0, "Undocumented");
        assert!(skipped[1].1.starts_with("Conflicting tags #sample: and #dropdown:"));
        assert_eq!(
            skipped[2].1,
            "Parameter 'zone' must be declared with an inline object type"
        );
    }

    #[test]
    fn test_missing_param_tag_skips_action() {
        let source = r#"
interface IActions {
    /**
     * Set
     * @param args.zone zone
     */
    Set(args: { zone: string, mode: string }): Promise<void>;
}
"#;
        let result = build(source);
        assert!(result.entries.is_empty());
        assert_eq!(result.issues[0].rule(), Rule::SkippedEntry);
        assert_eq!(result.issues[1].rule(), Rule::NoEntries);
    }

    #[test]
    fn test_argument_named_title_skips_action() {
        let source = r#"
interface IActions {
    /**
     * Notify
     * @param args.title title
     * @param args.message message
     */
    Notify(args: { title: string, message: string }): Promise<void>;

    /**
     * Beep
     * @param args.volume volume #sample:3
     */
    Beep(args: { volume: number }): Promise<void>;
}
"#;
        let result = build(source);
        let ids: Vec<&str> = result.entries.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["Beep"]);
        assert_eq!(result.issues.len(), 1);
        assert!(matches!(
            &result.issues[0],
            Issue::SkippedEntry(s) if s.name == "Notify" && s.reason.contains("'title'")
        ));
    }

    #[test]
    fn test_no_interfaces() {
        let result = build("export const x = 1;");
        assert!(result.entries.is_empty());
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].rule(), Rule::NoEntries);
    }
}
