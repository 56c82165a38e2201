//! Entry-point configuration types.
//!
//! A [`ProjectConfig`] maps entry names to user-authored [`RawEntryConfig`]s.
//! Augmentation turns each one into an [`AugmentedEntryConfig`], which is
//! never mutated in place: rewriting the entry pointer yields a new value.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Name of the entry bundled by the dev server.
pub const START_ENTRY: &str = "cwbStart";

/// Bundler configuration exactly as the user wrote it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawEntryConfig(Value);

impl RawEntryConfig {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The declared entry file, if the config has one.
    pub fn entry_file(&self) -> Option<&str> {
        self.0.get("entry").and_then(Value::as_str)
    }
}

impl From<Value> for RawEntryConfig {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Entry name to raw config, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectConfig {
    entries: IndexMap<String, RawEntryConfig>,
}

impl ProjectConfig {
    pub fn new(entries: IndexMap<String, RawEntryConfig>) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&RawEntryConfig> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawEntryConfig)> {
        self.entries.iter().map(|(name, cfg)| (name.as_str(), cfg))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, RawEntryConfig)> for ProjectConfig {
    fn from_iter<I: IntoIterator<Item = (String, RawEntryConfig)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A finalized bundler configuration for one entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedEntryConfig {
    name: String,
    value: Value,
}

impl AugmentedEntryConfig {
    /// Wrap an already-augmented value. The value must carry a string `entry`.
    pub(crate) fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Entry point name this config belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Absolute path of the entry file.
    pub fn entry_file(&self) -> PathBuf {
        PathBuf::from(self.value["entry"].as_str().unwrap_or_default())
    }

    /// On-disk output directory, if one is set.
    pub fn output_path(&self) -> Option<PathBuf> {
        self.value
            .pointer("/output/path")
            .and_then(Value::as_str)
            .map(PathBuf::from)
    }

    /// Loader aliases embedded in the config, keyed without the `-loader` suffix.
    pub fn loader_paths(&self) -> IndexMap<String, PathBuf> {
        self.value
            .pointer("/resolveLoader/alias")
            .and_then(Value::as_object)
            .map(|alias| {
                alias
                    .iter()
                    .filter_map(|(key, path)| {
                        let key = key.strip_suffix("-loader")?;
                        Some((key.to_string(), PathBuf::from(path.as_str()?)))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// A copy of this config pointing at a different entry file.
    pub fn with_entry(&self, entry: &Path) -> Self {
        let mut value = self.value.clone();
        value["entry"] = Value::String(entry.to_string_lossy().into_owned());
        Self {
            name: self.name.clone(),
            value,
        }
    }

    /// Serialize the config as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_config_keeps_declaration_order() {
        let config: ProjectConfig = serde_json::from_str(
            r#"{ "zeta": { "entry": "z.jsx" }, "alpha": { "entry": "a.jsx" }, "mid": { "entry": "m.jsx" } }"#,
        )
        .unwrap();
        let names: Vec<_> = config.names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_raw_entry_file() {
        let raw = RawEntryConfig::new(json!({ "entry": "src/app.jsx" }));
        assert_eq!(raw.entry_file(), Some("src/app.jsx"));

        let raw = RawEntryConfig::new(json!({ "entry": ["a.js", "b.js"] }));
        assert_eq!(raw.entry_file(), None);
    }

    #[test]
    fn test_with_entry_leaves_original_untouched() {
        let cfg = AugmentedEntryConfig::new("app", json!({ "entry": "/p/src/app.jsx" }));
        let rewritten = cfg.with_entry(Path::new("/tmp/cwb-app-1.jsx"));

        assert_eq!(cfg.entry_file(), PathBuf::from("/p/src/app.jsx"));
        assert_eq!(rewritten.entry_file(), PathBuf::from("/tmp/cwb-app-1.jsx"));
        assert_eq!(rewritten.name(), "app");
    }

    #[test]
    fn test_loader_paths_reads_aliases() {
        let cfg = AugmentedEntryConfig::new(
            "app",
            json!({
                "entry": "x.js",
                "resolveLoader": { "alias": { "css-loader": "/l/css-loader", "other": "/x" } }
            }),
        );
        let loaders = cfg.loader_paths();
        assert_eq!(loaders.len(), 1);
        assert_eq!(loaders["css"], PathBuf::from("/l/css-loader"));
    }
}
