//! Paths to the loaders and server packages shipped inside the build package.
//!
//! Everything lives under `<cwd>/node_modules/<package>/`. Nothing is checked
//! for existence here; the path check runs earlier in the pipeline.

use std::path::{Path, PathBuf};

/// Absolute paths to every build-time transform loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLoaderPaths {
    pub style: PathBuf,
    pub css: PathBuf,
    pub sass: PathBuf,
    pub autoprefixer: PathBuf,
    pub babel: PathBuf,
    pub json: PathBuf,
}

impl ResolvedLoaderPaths {
    /// Resolve loader paths for a project rooted at `cwd`.
    ///
    /// Each loader is `<cwd>/node_modules/<package_name>/dist/<key>-loader`.
    pub fn resolve(cwd: &Path, package_name: &str) -> Self {
        let dist = package_root(cwd, package_name).join("dist");
        let loader = |key: &str| dist.join(format!("{}-loader", key));

        Self {
            style: loader("style"),
            css: loader("css"),
            sass: loader("sass"),
            autoprefixer: loader("autoprefixer"),
            babel: loader("babel"),
            json: loader("json"),
        }
    }

    /// Every loader as `(key, path)`, in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Path)> {
        [
            ("style", self.style.as_path()),
            ("css", self.css.as_path()),
            ("sass", self.sass.as_path()),
            ("autoprefixer", self.autoprefixer.as_path()),
            ("babel", self.babel.as_path()),
            ("json", self.json.as_path()),
        ]
        .into_iter()
    }

    /// Script transform loaders handed to the toolkit's single-entry helper.
    pub fn script_loaders(&self) -> Vec<(&'static str, &Path)> {
        self.iter()
            .filter(|(key, _)| matches!(*key, "babel" | "json"))
            .collect()
    }

    /// Stylesheet loaders wired in by augmentation.
    pub fn style_loaders(&self) -> Vec<(&'static str, &Path)> {
        self.iter()
            .filter(|(key, _)| !matches!(*key, "babel" | "json"))
            .collect()
    }
}

/// Package directories the dev-server launcher runs from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerDependencyPaths {
    pub webpack: PathBuf,
    pub webpack_dev_server: PathBuf,
}

impl ServerDependencyPaths {
    /// Resolve the bundler and dev-server packages nested in the build package.
    pub fn resolve(cwd: &Path, package_name: &str) -> Self {
        let nested = package_root(cwd, package_name).join("node_modules");
        Self {
            webpack: nested.join("webpack"),
            webpack_dev_server: nested.join("webpack-dev-server"),
        }
    }
}

fn package_root(cwd: &Path, package_name: &str) -> PathBuf {
    cwd.join("node_modules").join(package_name)
}
