//! webpack-specific config handling.
//!
//! Configs travel as JSON, but webpack wants `RegExp` rule tests and a
//! module it can `require`. The config is written as a CommonJS module that
//! revives string `test`/`exclude` fields before exporting.

use cwb_build::{AugmentedEntryConfig, RawEntryConfig, ToolkitError, ToolkitResult};
use serde_json::{json, Map, Value};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const REVIVE_RULES: &str = r#"const revive = (rules) => (rules || []).forEach((rule) => {
  if (typeof rule.test === 'string') rule.test = new RegExp(rule.test);
  if (typeof rule.exclude === 'string') rule.exclude = new RegExp(rule.exclude);
  if (Array.isArray(rule.oneOf)) revive(rule.oneOf);
});
revive(config.module && config.module.rules);
"#;

/// Append script transform rules for the given loaders to `module.rules`.
///
/// `babel` handles `.js`/`.jsx` outside `node_modules`, `json` handles
/// `.json`. Other keys are ignored.
pub(crate) fn with_script_rules(
    raw: &RawEntryConfig,
    loaders: &[(&'static str, &Path)],
) -> ToolkitResult<RawEntryConfig> {
    let mut root = raw
        .as_value()
        .as_object()
        .cloned()
        .ok_or_else(|| ToolkitError::Failed("expected a JSON object".to_string()))?;

    let module = root
        .entry("module")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| ToolkitError::Failed("'module' must be an object".to_string()))?;
    let rules = module
        .entry("rules")
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| ToolkitError::Failed("'module.rules' must be an array".to_string()))?;

    for (key, path) in loaders {
        let loader = path.to_string_lossy();
        match *key {
            "babel" => rules.push(json!({
                "test": "\\.jsx?$",
                "exclude": "node_modules",
                "use": [loader],
            })),
            "json" => rules.push(json!({ "test": "\\.json$", "use": [loader] })),
            _ => {}
        }
    }

    Ok(RawEntryConfig::new(Value::Object(root)))
}

/// Render `config` as a CommonJS module.
pub(crate) fn config_module_source(config: &AugmentedEntryConfig) -> ToolkitResult<String> {
    Ok(format!(
        "// Generated by cwb for entry '{}'\nconst config = {};\n{}module.exports = config;\n",
        config.name(),
        config.to_json_pretty()?,
        REVIVE_RULES
    ))
}

/// Write the config module to a temp file, deleted when dropped.
pub(crate) fn write_config_module(config: &AugmentedEntryConfig) -> ToolkitResult<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix(&format!("cwb-webpack-{}-", config.name()))
        .suffix(".cjs")
        .tempfile()?;
    file.write_all(config_module_source(config)?.as_bytes())?;
    file.flush()?;
    Ok(file)
}
