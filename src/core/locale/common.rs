use crate::core::tags::common_key;

/// Separates `$common.<key>` references from inline text while building a locale store.
#[derive(Debug, Default)]
pub struct CommonCollector {
    /// Referenced keys in order of appearance, duplicates included.
    pub keys: Vec<String>,
}

impl CommonCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the key of a common reference. Returns whether `value` was one.
    pub fn collect(&mut self, value: &str) -> bool {
        match common_key(value) {
            Some(key) => {
                self.keys.push(key.to_string());
                true
            }
            None => false,
        }
    }

    /// Copy `value` into `slot` unless it is a common reference, which is only recorded.
    pub fn collect_into(&mut self, value: &str, slot: &mut Option<String>) {
        if !self.collect(value) {
            *slot = Some(value.to_string());
        }
    }
}
