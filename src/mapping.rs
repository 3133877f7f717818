// src/mapping.rs

//! Converter configuration and collection name mapping
//!
//! The mapping table drives the conversion loop: (source name → destination
//! name) pairs with unique keys, iterated in sorted key order so conversion
//! order is deterministic. Configuration is TOML, matching how other
//! front-end settings are shipped.

use crate::error::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Table of source → destination collection names
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct NameMapping {
    entries: BTreeMap<String, String>,
}

impl NameMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `source` to `dest`, replacing any previous entry for `source`
    pub fn insert(&mut self, source: impl Into<String>, dest: impl Into<String>) {
        self.entries.insert(source.into(), dest.into());
    }

    /// Map `source` to `dest` unless `source` is already mapped
    ///
    /// First writer wins; used to extend a configured mapping with identity
    /// entries without overriding explicit ones.
    pub fn insert_if_absent(&mut self, source: &str, dest: &str) {
        if !self.entries.contains_key(source) {
            self.entries.insert(source.to_string(), dest.to_string());
        }
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries.get(source).map(String::as_str)
    }

    /// (source, destination) pairs in sorted source-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(source, dest)| (source.as_str(), dest.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Configuration for an [`EventConverter`](crate::convert::EventConverter)
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Instance label; prefixes the names of derived collections so that
    /// multiple converter instances writing into one store cannot collide
    pub label: String,
    /// Also convert every source collection not named in `collections`,
    /// storing it under its own name
    pub convert_all: bool,
    /// Explicit source → destination name mapping
    pub collections: NameMapping,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            label: "relic".to_string(),
            convert_all: false,
            collections: NameMapping::new(),
        }
    }
}

impl ConverterConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_if_absent_first_writer_wins() {
        let mut mapping = NameMapping::new();
        mapping.insert("Hits", "VXDHits");
        mapping.insert_if_absent("Hits", "Hits");
        mapping.insert_if_absent("Tracks", "Tracks");

        assert_eq!(mapping.get("Hits"), Some("VXDHits"));
        assert_eq!(mapping.get("Tracks"), Some("Tracks"));
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn test_iteration_is_key_sorted() {
        let mut mapping = NameMapping::new();
        mapping.insert("Zed", "Z");
        mapping.insert("Alpha", "A");

        let sources: Vec<_> = mapping.iter().map(|(s, _)| s).collect();
        assert_eq!(sources, vec!["Alpha", "Zed"]);
    }

    #[test]
    fn test_config_from_toml() {
        let config = ConverterConfig::from_toml_str(
            r#"
            label = "front"
            convert_all = true

            [collections]
            "TrackerHits" = "VXDTrackerHits"
            "Tracks" = "Tracks"
            "#,
        )
        .unwrap();

        assert_eq!(config.label, "front");
        assert!(config.convert_all);
        assert_eq!(config.collections.get("TrackerHits"), Some("VXDTrackerHits"));
    }

    #[test]
    fn test_config_defaults() {
        let config = ConverterConfig::from_toml_str("").unwrap();
        assert_eq!(config.label, "relic");
        assert!(!config.convert_all);
        assert!(config.collections.is_empty());
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        assert!(ConverterConfig::from_toml_str("no_such_option = 1").is_err());
    }
}
