//! Fixed text injected ahead of user code and into the output directory.

/// Contents of the `.gitignore` seeded into a freshly recreated output directory.
pub const OUTPUT_GITIGNORE: &str = "*\n!.gitignore\n";

/// Bootstrap text prepended to every temporary entry file.
///
/// It loads the build package's polyfill before the user's entry module runs.
/// Dev-server and static builds use the same text.
pub fn bootstrap_text(package_name: &str) -> String {
    format!(
        "// Start: CWB-generated output\n\
         require('{}/dist/polyfill.jsx');\n\
         // End: CWB-generated output\n",
        package_name
    )
}
