//! The fixed pre-flight sequence that runs before any configuration work.
//!
//! Stages run strictly in [`PREFLIGHT`] order. The first failure stops the
//! sequence; later stages never run.

use std::fmt;

use crate::error::{BuildError, Result};
use crate::toolkit::Toolkit;

/// A named pre-flight stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Required project paths exist
    CheckPaths,
    /// The declared build configuration is structurally valid
    ValidateConfig,
    /// The git pre-commit hook is installed
    InstallHook,
    /// A subset of sources compiles
    CompileCheck,
    /// A subset of sources passes lint
    Lint,
}

/// Pre-flight stages in execution order.
pub const PREFLIGHT: [Stage; 5] = [
    Stage::CheckPaths,
    Stage::ValidateConfig,
    Stage::InstallHook,
    Stage::CompileCheck,
    Stage::Lint,
];

impl Stage {
    /// Short kebab-case name used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Stage::CheckPaths => "check-paths",
            Stage::ValidateConfig => "validate-config",
            Stage::InstallHook => "install-hook",
            Stage::CompileCheck => "compile-check",
            Stage::Lint => "lint",
        }
    }

    async fn run(self, toolkit: &dyn Toolkit) -> Result<()> {
        let outcome = match self {
            Stage::CheckPaths => toolkit.check_paths_exist().await,
            Stage::ValidateConfig => toolkit.validate_config().await,
            Stage::InstallHook => toolkit.install_precommit_hook().await,
            Stage::CompileCheck => toolkit.run_compile_check().await,
            Stage::Lint => toolkit.run_lint_check().await,
        };

        outcome.map_err(|e| BuildError::Preflight {
            stage: self,
            message: e.to_string(),
        })
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run every pre-flight stage in order, stopping at the first failure.
pub async fn run_preflight(toolkit: &dyn Toolkit) -> Result<()> {
    for stage in PREFLIGHT {
        tracing::info!(stage = stage.name(), "running pre-flight step");
        stage.run(toolkit).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_preflight_order() {
        let names: Vec<_> = PREFLIGHT.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "check-paths",
                "validate-config",
                "install-hook",
                "compile-check",
                "lint"
            ]
        );
    }

    #[test]
    fn test_stage_names_distinct() {
        let names: HashSet<_> = PREFLIGHT.iter().map(|s| s.name()).collect();
        assert_eq!(names.len(), PREFLIGHT.len());
    }

    #[test]
    fn test_display_matches_name() {
        assert_eq!(Stage::InstallHook.to_string(), "install-hook");
    }
}
