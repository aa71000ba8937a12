//! Refreshes the base-language locale store from the canonical manifest.
//!
//! The `flows.triggers`, `flows.actions` and `drivers` sections are rebuilt from
//! scratch on every run, so entries removed from source disappear from the store.
//! `common` and every unrelated section are carried over; new common references are
//! seeded with `"TODO"` for a translator to fill in.

use indexmap::IndexMap;
use tracing::debug;

use crate::core::data::{
    App, ArgumentType, BASE_LANGUAGE, CapabilityLocale, DriverLocale, ENTRY_TITLE_KEY,
    EntryLocale, Example, FieldLocale, LString, LocaleStore, TokenType,
};
use crate::core::locale::common::CommonCollector;
use crate::issues::{EntryKind, Issue, MissingExampleIssue};

/// Value given to common keys that have no text yet.
pub const COMMON_PLACEHOLDER: &str = "TODO";

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractResult {
    pub store: LocaleStore,
    pub issues: Vec<Issue>,
}

/// A field of a flow card, seen the same way for tokens and arguments.
struct FieldRef<'a> {
    name: &'a str,
    title: &'a LString,
    example: Option<&'a Example>,
    /// Whether the field carries a translatable example.
    textual: bool,
}

pub fn update_base_locale(app: &App, mut store: LocaleStore) -> ExtractResult {
    let mut collector = CommonCollector::new();
    let mut issues = Vec::new();

    let mut triggers = IndexMap::new();
    for trigger in &app.flow.triggers {
        let fields = trigger.tokens.iter().map(|token| FieldRef {
            name: &token.name,
            title: &token.title,
            example: token.example.as_ref(),
            textual: token.kind == TokenType::String,
        });
        let entry = extract_entry(
            EntryKind::Trigger,
            &trigger.id,
            &trigger.title,
            fields,
            &mut collector,
            &mut issues,
        );
        triggers.insert(trigger.id.clone(), entry);
    }

    let mut actions = IndexMap::new();
    for action in &app.flow.actions {
        let fields = action.args.iter().map(|arg| FieldRef {
            name: &arg.name,
            title: &arg.title,
            example: arg.example.as_ref(),
            textual: arg.kind == ArgumentType::Text,
        });
        let entry = extract_entry(
            EntryKind::Action,
            &action.id,
            &action.title,
            fields,
            &mut collector,
            &mut issues,
        );
        actions.insert(action.id.clone(), entry);
    }

    let mut drivers = IndexMap::new();
    for driver in &app.drivers {
        let Some(id) = &driver.id else {
            continue;
        };
        let capabilities = driver.capabilities_options.as_ref().map(|options| {
            options
                .iter()
                .map(|(capability, option)| {
                    let title = option.title.en().map(str::to_string);
                    (capability.clone(), CapabilityLocale { title })
                })
                .collect::<IndexMap<_, _>>()
        });
        drivers.insert(
            id.clone(),
            DriverLocale {
                name: driver.name.as_ref().and_then(LString::en).map(str::to_string),
                capabilities,
            },
        );
    }

    for key in collector.keys {
        if store.common_value(&key).is_none() {
            debug!("Adding common key {}", key);
            store.common.insert(key, COMMON_PLACEHOLDER.to_string());
        }
    }
    store.flows.triggers = Some(triggers);
    store.flows.actions = Some(actions);
    store.drivers = drivers;

    ExtractResult { store, issues }
}

fn extract_entry<'a>(
    kind: EntryKind,
    id: &str,
    title: &LString,
    fields: impl Iterator<Item = FieldRef<'a>>,
    collector: &mut CommonCollector,
    issues: &mut Vec<Issue>,
) -> EntryLocale {
    let mut entry = EntryLocale::default();
    collector.collect_into(title.en().unwrap_or_default(), &mut entry.title);

    for field in fields {
        if field.name == ENTRY_TITLE_KEY {
            debug!("Skipping field {} of {}: clashes with the entry title", field.name, id);
            continue;
        }
        let mut locale = FieldLocale::default();
        collector.collect_into(field.title.en().unwrap_or_default(), &mut locale.title);

        if field.textual {
            let example = match field.example.and_then(Example::as_text).and_then(LString::en) {
                Some(text) if !text.is_empty() => text.to_string(),
                _ => {
                    debug!("Missing example at {} {}", id, field.name);
                    issues.push(
                        MissingExampleIssue {
                            locale: BASE_LANGUAGE.to_string(),
                            kind,
                            entry_id: id.to_string(),
                            field: field.name.to_string(),
                        }
                        .into(),
                    );
                    format!("TODO: Add example at {} {}", id, field.name)
                }
            };
            collector.collect_into(&example, &mut locale.example);
        }

        if !locale.is_empty() {
            entry.fields.insert(field.name.to_string(), locale);
        }
    }
    entry
}
