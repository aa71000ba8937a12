//! Manifest types: the app, its flow cards and its drivers.
//!
//! Fields the composer does not generate (e.g. `pair`, `permissions`, flow
//! `conditions`) are kept in `extra` maps so a baseline passes through unchanged.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Language code of the canonical text stored directly in the manifest.
pub const BASE_LANGUAGE: &str = "en";

/// Translated text keyed by language code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LString(IndexMap<String, String>);

impl LString {
    /// A string with only the canonical English text.
    pub fn english(text: impl Into<String>) -> Self {
        let mut map = IndexMap::new();
        map.insert(BASE_LANGUAGE.to_string(), text.into());
        Self(map)
    }

    pub fn en(&self) -> Option<&str> {
        self.get(BASE_LANGUAGE)
    }

    pub fn get(&self, language: &str) -> Option<&str> {
        self.0.get(language).map(String::as_str)
    }

    pub fn set(&mut self, language: &str, text: impl Into<String>) {
        self.0.insert(language.to_string(), text.into());
    }

    pub fn contains(&self, language: &str) -> bool {
        self.0.contains_key(language)
    }
}

/// Example value of a token or argument.
///
/// Numeric fields carry a plain number; every other field carries translatable text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Example {
    Number(Number),
    Text(LString),
}

impl Example {
    pub fn as_text(&self) -> Option<&LString> {
        match self {
            Example::Text(text) => Some(text),
            Example::Number(_) => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut LString> {
        match self {
            Example::Text(text) => Some(text),
            Example::Number(_) => None,
        }
    }
}

// ============================================================
// Flow cards
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    String,
    Number,
    Unknown,
}

/// A payload field of a trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TokenType,
    pub title: LString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Example>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    pub id: String,
    pub title: LString,
    #[serde(default)]
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentType {
    Text,
    Number,
    Dropdown,
    Device,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownValue {
    pub id: String,
    pub label: LString,
}

/// An input field of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ArgumentType,
    pub title: LString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Example>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<DropdownValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl Argument {
    pub fn scalar(name: impl Into<String>, kind: ArgumentType, title: LString) -> Self {
        Self {
            name: name.into(),
            kind,
            title,
            example: None,
            values: None,
            filter: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub title: LString,
    #[serde(default)]
    pub args: Vec<Argument>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flows {
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================
// Drivers
// ============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityOption {
    pub title: LString,
    #[serde(
        rename = "maintenanceAction",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub maintenance_action: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Images {
    pub large: String,
    pub small: String,
}

impl Images {
    /// Conventional image locations inside a driver folder.
    pub fn for_folder(folder: &str) -> Self {
        Self {
            large: format!("/drivers/{}/assets/images/large.png", folder),
            small: format!("/drivers/{}/assets/images/small.png", folder),
        }
    }
}

/// A driver entry. Every field is optional so the same type describes both a
/// `driver.compose.json` baseline and the values extracted from source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<LString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities_options: Option<IndexMap<String, CapabilityOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Images>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================
// App
// ============================================================

/// The application manifest (`app.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct App {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bugs: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Value>,
    #[serde(default)]
    pub flow: Flows,
    #[serde(default)]
    pub drivers: Vec<Driver>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::core::data::manifest::*;

    #[test]
    fn test_lstring_serializes_as_map() {
        let mut title = LString::english("Zone");
        title.set("sv", "Zon");
        assert_eq!(serde_json::to_value(&title).unwrap(), json!({"en": "Zone", "sv": "Zon"}));
        assert_eq!(title.en(), Some("Zone"));
        assert!(!title.contains("nl"));
    }

    #[test]
    fn test_example_shapes() {
        let number: Example = serde_json::from_value(json!(14.5)).unwrap();
        assert!(matches!(number, Example::Number(_)));
        assert_eq!(serde_json::to_value(&number).unwrap(), json!(14.5));

        let text: Example = serde_json::from_value(json!({"en": "Kitchen"})).unwrap();
        assert_eq!(text, Example::Text(LString::english("Kitchen")));
    }

    #[test]
    fn test_argument_skips_absent_fields() {
        let arg = Argument::scalar("zone", ArgumentType::Text, LString::english("$common.zone"));
        assert_eq!(
            serde_json::to_value(&arg).unwrap(),
            json!({"name": "zone", "type": "text", "title": {"en": "$common.zone"}})
        );
    }

    #[test]
    fn test_driver_keeps_unknown_fields() {
        let driver: Driver = serde_json::from_value(json!({
            "pair": [{"id": "list_devices", "template": "list_devices"}],
            "capabilities": ["onoff"]
        }))
        .unwrap();
        assert_eq!(driver.capabilities, vec!["onoff"]);
        assert!(driver.extra.contains_key("pair"));

        let round: Value = serde_json::to_value(&driver).unwrap();
        assert_eq!(round["pair"][0]["id"], json!("list_devices"));
    }

    #[test]
    fn test_app_keeps_unknown_fields() {
        let app: App = serde_json::from_value(json!({
            "sdk": 2,
            "flow": {"conditions": []}
        }))
        .unwrap();
        assert_eq!(app.extra["sdk"], json!(2));
        assert!(app.flow.extra.contains_key("conditions"));
        assert!(app.flow.triggers.is_empty());
    }
}
