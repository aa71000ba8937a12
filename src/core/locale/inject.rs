//! Overlays one language's locale store onto the manifest.
//!
//! Every `LString` of a flow card or driver gets a `<code>` entry taken from the store.
//! A canonical `$common.<key>` reference falls back to the store's own `common`
//! dictionary. Anything that cannot be resolved is reported and left unset, never
//! guessed. Running the same store twice yields the same manifest.

use indexmap::IndexMap;
use tracing::debug;

use crate::core::data::{App, EntryLocale, Example, LString, LocaleStore};
use crate::core::tags::common_key;
use crate::issues::{EntryKind, Issue, MissingLocaleEntryIssue, MissingTranslationIssue};

/// Injection state for one language.
struct Injector<'a> {
    code: &'a str,
    store: &'a LocaleStore,
    issues: Vec<Issue>,
}

impl Injector<'_> {
    /// Set `target[code]` from the store value, or from `common` for a canonical
    /// `$common.` reference.
    fn apply(&mut self, value: Option<&str>, target: &mut LString, path: &str, field: &str) {
        if let Some(text) = value.filter(|v| !v.is_empty()) {
            target.set(self.code, text);
            return;
        }

        if let Some(text) = target
            .en()
            .and_then(common_key)
            .and_then(|key| self.store.common_value(key))
        {
            target.set(self.code, text.to_string());
            return;
        }

        debug!("Ignoring missing translation {} {} ({})", self.code, path, field);
        self.issues.push(
            MissingTranslationIssue {
                locale: self.code.to_string(),
                path: path.to_string(),
                field: field.to_string(),
            }
            .into(),
        );
    }

    fn missing_entry(&mut self, kind: EntryKind, id: &str) {
        debug!("Ignoring missing {} {} in {}", kind, id, self.code);
        self.issues.push(
            MissingLocaleEntryIssue {
                locale: self.code.to_string(),
                kind,
                entry_id: id.to_string(),
            }
            .into(),
        );
    }

    fn entry<'e>(
        &mut self,
        section: &'e IndexMap<String, EntryLocale>,
        kind: EntryKind,
        id: &str,
    ) -> Option<&'e EntryLocale> {
        let entry = section.get(id);
        if entry.is_none() {
            self.missing_entry(kind, id);
        }
        entry
    }

    fn flows(&mut self, app: &mut App) {
        let store = self.store;
        if let Some(section) = &store.flows.triggers {
            for trigger in &mut app.flow.triggers {
                let Some(entry) = self.entry(section, EntryKind::Trigger, &trigger.id) else {
                    continue;
                };
                let path = format!("triggers.{}", trigger.id);
                self.apply(entry.title.as_deref(), &mut trigger.title, &path, "title");

                for token in &mut trigger.tokens {
                    let path = format!("{}.{}", path, token.name);
                    let field = entry.fields.get(&token.name);
                    self.apply(
                        field.and_then(|f| f.title.as_deref()),
                        &mut token.title,
                        &path,
                        "title",
                    );
                    if let Some(example) = token.example.as_mut().and_then(Example::as_text_mut) {
                        self.apply(
                            field.and_then(|f| f.example.as_deref()),
                            example,
                            &path,
                            "example",
                        );
                    }
                }
            }
        }

        if let Some(section) = &store.flows.actions {
            for action in &mut app.flow.actions {
                let Some(entry) = self.entry(section, EntryKind::Action, &action.id) else {
                    continue;
                };
                let path = format!("actions.{}", action.id);
                self.apply(entry.title.as_deref(), &mut action.title, &path, "title");

                for arg in &mut action.args {
                    let path = format!("{}.{}", path, arg.name);
                    let field = entry.fields.get(&arg.name);
                    self.apply(
                        field.and_then(|f| f.title.as_deref()),
                        &mut arg.title,
                        &path,
                        "title",
                    );
                    if let Some(example) = arg.example.as_mut().and_then(Example::as_text_mut) {
                        self.apply(
                            field.and_then(|f| f.example.as_deref()),
                            example,
                            &path,
                            "example",
                        );
                    }
                }
            }
        }
    }

    fn drivers(&mut self, app: &mut App) {
        let store = self.store;
        let section = &store.drivers;
        if section.is_empty() {
            return;
        }

        for driver in &mut app.drivers {
            let Some(id) = driver.id.as_deref() else {
                continue;
            };
            let Some(entry) = section.get(id) else {
                self.missing_entry(EntryKind::Driver, id);
                continue;
            };
            let path = format!("drivers.{}", id);

            if let Some(name) = driver.name.as_mut() {
                self.apply(entry.name.as_deref(), name, &path, "name");
            }
            if let Some(options) = driver.capabilities_options.as_mut() {
                for (capability, option) in options.iter_mut() {
                    let value = entry
                        .capabilities
                        .as_ref()
                        .and_then(|caps| caps.get(capability))
                        .and_then(|cap| cap.title.as_deref());
                    let path = format!("{}.{}", path, capability);
                    self.apply(value, &mut option.title, &path, "title");
                }
            }
        }
    }
}

/// Add language `code` to every translatable string of `app`.
pub fn add_locale(code: &str, app: &mut App, store: &LocaleStore) -> Vec<Issue> {
    let mut injector = Injector {
        code,
        store,
        issues: Vec::new(),
    };
    injector.flows(app);
    injector.drivers(app);
    injector.issues
}
