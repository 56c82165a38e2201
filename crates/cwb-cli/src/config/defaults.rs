use std::path::PathBuf;

use crate::config::CommandSpec;

pub fn default_package_name() -> String {
    "chcokr-webapp-build".to_string()
}

pub fn default_out_dir() -> PathBuf {
    PathBuf::from("dist")
}

pub fn default_required_paths() -> Vec<PathBuf> {
    vec![PathBuf::from("package.json"), PathBuf::from("src")]
}

pub fn default_compile_check() -> CommandSpec {
    CommandSpec::new(
        "node_modules/.bin/babel",
        &["src", "--extensions", ".js,.jsx", "--out-dir", "node_modules/.cache/cwb-compile-check"],
    )
}

pub fn default_lint() -> CommandSpec {
    CommandSpec::new("node_modules/.bin/eslint", &["--ext", ".js,.jsx", "src"])
}

pub fn default_port() -> u16 {
    8080
}

pub fn default_host() -> String {
    "127.0.0.1".to_string()
}
