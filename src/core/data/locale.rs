//! Locale store types (`locales/<code>.json`).
//!
//! ```json
//! {
//!   "common": { "zone": "Zone" },
//!   "flows": {
//!     "triggers": { "TooCold": { "title": "...", "zone": { "title": "...", "example": "..." } } },
//!     "actions":  { "SetZoneMode": { "title": "...", "mode": { "title": "..." } } }
//!   },
//!   "drivers": { "zone-temperature": { "name": "...", "capabilities": { "onoff": { "title": "..." } } } }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Key of an entry's own title inside a flow entry object, unavailable as a field name.
pub const ENTRY_TITLE_KEY: &str = "title";

/// Translations of a token or argument.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLocale {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl FieldLocale {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.example.is_none()
    }
}

/// Translations of a trigger or action: its title plus one object per field name.
///
/// Hand-edited files may carry values that are not field objects, such as a note for
/// translators. Those are dropped with a warning instead of failing the whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntryLocale {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub fields: IndexMap<String, FieldLocale>,
}

impl<'de> Deserialize<'de> for EntryLocale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut entry = EntryLocale::default();

        for (key, value) in raw {
            if key == ENTRY_TITLE_KEY {
                match value {
                    Value::String(title) => entry.title = Some(title),
                    Value::Null => {}
                    other => warn!("Ignoring non-string entry title {}", other),
                }
                continue;
            }
            match serde_json::from_value::<FieldLocale>(value) {
                Ok(field) => {
                    entry.fields.insert(key, field);
                }
                Err(e) => warn!("Ignoring locale value '{}': {}", key, e),
            }
        }
        Ok(entry)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowLocales {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggers: Option<IndexMap<String, EntryLocale>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<IndexMap<String, EntryLocale>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityLocale {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverLocale {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<IndexMap<String, CapabilityLocale>>,
}

/// All translations of one language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocaleStore {
    #[serde(default)]
    pub common: IndexMap<String, String>,
    #[serde(default)]
    pub flows: FlowLocales,
    #[serde(default)]
    pub drivers: IndexMap<String, DriverLocale>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LocaleStore {
    /// Non-empty value of a common dictionary key.
    pub fn common_value(&self, key: &str) -> Option<&str> {
        self.common
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}
