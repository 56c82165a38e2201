//! Entry configuration augmentation.
//!
//! Merges resolved loader paths and mode-specific output settings into a raw
//! bundler configuration. Pure: the raw config is cloned, never modified.

use serde_json::{json, Map, Value};
use std::path::Path;

use crate::config::{AugmentedEntryConfig, RawEntryConfig};
use crate::error::{BuildError, Result};
use crate::loaders::ResolvedLoaderPaths;

/// How the augmented config will be consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Served from memory by the dev server
    Interactive,
    /// Written to the output directory
    Static,
}

impl BuildMode {
    fn bundler_mode(self) -> &'static str {
        match self {
            BuildMode::Interactive => "development",
            BuildMode::Static => "production",
        }
    }
}

/// Produces [`AugmentedEntryConfig`]s for a single project.
#[derive(Debug, Clone, Copy)]
pub struct EntryConfigAugmenter<'a> {
    loaders: &'a ResolvedLoaderPaths,
    cwd: &'a Path,
    out_dir: &'a Path,
}

impl<'a> EntryConfigAugmenter<'a> {
    /// `out_dir` may be relative; it is resolved against `cwd`.
    pub fn new(loaders: &'a ResolvedLoaderPaths, cwd: &'a Path, out_dir: &'a Path) -> Self {
        Self {
            loaders,
            cwd,
            out_dir,
        }
    }

    /// Augment one entry's raw configuration for `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::ConfigShape`] when the config is not an object,
    /// has no string `entry`, or its `resolveLoader` / `module.rules` slots
    /// hold something other than an object / array.
    pub fn augment(
        &self,
        name: &str,
        raw: &RawEntryConfig,
        mode: BuildMode,
    ) -> Result<AugmentedEntryConfig> {
        let shape_err = |reason: &str| BuildError::ConfigShape {
            entry: name.to_string(),
            reason: reason.to_string(),
        };

        let mut root = raw
            .as_value()
            .as_object()
            .cloned()
            .ok_or_else(|| shape_err("expected a JSON object"))?;

        let entry = match root.get("entry").and_then(Value::as_str) {
            Some(entry) if !entry.trim().is_empty() => entry.to_string(),
            _ => return Err(shape_err("missing string 'entry' field")),
        };
        root.insert(
            "entry".to_string(),
            path_value(&self.cwd.join(entry)),
        );

        let alias = object_slot(&mut root, "resolveLoader")
            .ok_or_else(|| shape_err("'resolveLoader' must be an object"))
            .and_then(|resolve_loader| {
                object_slot(resolve_loader, "alias")
                    .ok_or_else(|| shape_err("'resolveLoader.alias' must be an object"))
            })?;
        for (key, path) in self.loaders.iter() {
            alias.insert(format!("{}-loader", key), path_value(path));
        }

        // The entry is swapped for a composed copy; keep the project's own
        // node_modules reachable wherever that copy lives.
        let project_modules = path_value(&self.cwd.join("node_modules"));
        let modules = object_slot(&mut root, "resolve")
            .ok_or_else(|| shape_err("'resolve' must be an object"))
            .and_then(|resolve| {
                resolve
                    .entry("modules".to_string())
                    .or_insert_with(|| json!(["node_modules"]))
                    .as_array_mut()
                    .ok_or_else(|| shape_err("'resolve.modules' must be an array"))
            })?;
        if !modules.contains(&project_modules) {
            modules.insert(0, project_modules);
        }

        let rules = object_slot(&mut root, "module")
            .ok_or_else(|| shape_err("'module' must be an object"))
            .and_then(|module| {
                array_slot(module, "rules")
                    .ok_or_else(|| shape_err("'module.rules' must be an array"))
            })?;
        rules.extend(self.style_rules());

        root.insert("mode".to_string(), json!(mode.bundler_mode()));

        let output =
            object_slot(&mut root, "output").ok_or_else(|| shape_err("'output' must be an object"))?;
        match mode {
            BuildMode::Interactive => {
                output.remove("path");
                output.insert("publicPath".to_string(), json!("/"));
            }
            BuildMode::Static => {
                let path = self.cwd.join(self.out_dir).join(name);
                output.insert("path".to_string(), path_value(&path));
            }
        }

        tracing::debug!(entry = name, ?mode, "augmented entry config");
        Ok(AugmentedEntryConfig::new(name, Value::Object(root)))
    }

    fn style_rules(&self) -> [Value; 2] {
        let l = self.loaders;
        let css_chain = [&l.style, &l.css, &l.autoprefixer];
        let css: Vec<Value> = css_chain.iter().map(|p| path_value(p)).collect();
        let mut scss = css.clone();
        scss.push(path_value(&l.sass));

        [
            json!({ "test": "\\.css$", "use": css }),
            json!({ "test": "\\.scss$", "use": scss }),
        ]
    }
}

fn path_value(path: &Path) -> Value {
    Value::String(path.to_string_lossy().into_owned())
}

/// Get `map[key]` as an object, inserting an empty one if absent.
fn object_slot<'m>(map: &'m mut Map<String, Value>, key: &str) -> Option<&'m mut Map<String, Value>> {
    map.entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
}

/// Get `map[key]` as an array, inserting an empty one if absent.
fn array_slot<'m>(map: &'m mut Map<String, Value>, key: &str) -> Option<&'m mut Vec<Value>> {
    map.entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
}
