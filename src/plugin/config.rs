//! Per-plugin configuration
//!
//! Plugins declare the keys they understand along with a default and a
//! description. Users override values with `set`, usually before the
//! plugins have initialized. Lookups resolve override, then default, then
//! the empty string.

use std::collections::BTreeMap;

/// One configurable plugin option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub plugin: String,
    pub key: String,
    pub default: String,
    pub description: String,
    /// User override, if any
    pub value: Option<String>,
}

impl ConfigEntry {
    fn new(plugin: &str, key: &str) -> Self {
        Self {
            plugin: plugin.to_string(),
            key: key.to_string(),
            default: String::new(),
            description: String::new(),
            value: None,
        }
    }

    /// Value in effect: override, else default
    pub fn effective(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.default)
    }
}

/// Store of all plugin options, keyed by (plugin, key)
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    entries: BTreeMap<(String, String), ConfigEntry>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an option
    ///
    /// Re-declaring updates the default and description. Once the user has
    /// overridden the key, declarations only fill fields that are still empty.
    pub fn declare(&mut self, plugin: &str, key: &str, default: &str, description: &str) {
        let entry = self
            .entries
            .entry((plugin.to_string(), key.to_string()))
            .or_insert_with(|| ConfigEntry::new(plugin, key));

        if entry.value.is_none() {
            entry.default = default.to_string();
            entry.description = description.to_string();
            return;
        }
        if entry.default.is_empty() {
            entry.default = default.to_string();
        }
        if entry.description.is_empty() {
            entry.description = description.to_string();
        }
    }

    /// Override an option
    pub fn set(&mut self, plugin: &str, key: &str, value: &str) {
        self.entries
            .entry((plugin.to_string(), key.to_string()))
            .or_insert_with(|| ConfigEntry::new(plugin, key))
            .value = Some(value.to_string());
    }

    /// Value in effect for an option, empty if unknown
    pub fn get(&self, plugin: &str, key: &str) -> &str {
        self.entry(plugin, key).map_or("", ConfigEntry::effective)
    }

    /// Option read as a flag; `fallback` when empty or unrecognized
    pub fn get_bool(&self, plugin: &str, key: &str, fallback: bool) -> bool {
        parse_flag(self.get(plugin, key)).unwrap_or(fallback)
    }

    pub fn entry(&self, plugin: &str, key: &str) -> Option<&ConfigEntry> {
        self.entries.get(&(plugin.to_string(), key.to_string()))
    }

    /// All entries, ordered by plugin then key
    pub fn entries(&self) -> impl Iterator<Item = &ConfigEntry> {
        self.entries.values()
    }

    /// Entries belonging to one plugin
    pub fn plugin_entries<'a>(&'a self, plugin: &'a str) -> impl Iterator<Item = &'a ConfigEntry> {
        self.entries().filter(move |entry| entry.plugin == plugin)
    }
}

/// Parse a boolean value from string
pub fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
