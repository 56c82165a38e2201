#[cfg(test)]
mod tests {
    use crate::config::{CommandSpec, CwbSettings, CONFIG_FILE_NAME};
    use crate::error::{CliError, ConfigError};
    use serial_test::serial;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) {
        std::fs::write(dir.join(CONFIG_FILE_NAME), content).unwrap();
    }

    fn clear_env() {
        unsafe {
            std::env::remove_var("CWB_OUTDIR");
            std::env::remove_var("CWB_PACKAGENAME");
            std::env::remove_var("CWB_TEMPDIR");
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_config_file() {
        clear_env();
        let dir = TempDir::new().unwrap();

        let settings = CwbSettings::load(dir.path(), None).unwrap();
        assert_eq!(settings.package_name, "chcokr-webapp-build");
        assert_eq!(settings.out_dir, PathBuf::from("dist"));
        assert_eq!(settings.temp_dir, None);
        assert_eq!(
            settings.required_paths,
            vec![PathBuf::from("package.json"), PathBuf::from("src")]
        );
        assert_eq!(settings.dev_server.port, 8080);
        assert_eq!(settings.dist_server.host, "127.0.0.1");
        assert!(settings.webpack_configs.is_empty());
    }

    #[test]
    #[serial]
    fn test_file_values_and_entry_order() {
        clear_env();
        let dir = TempDir::new().unwrap();
        write_config(
            dir.path(),
            r#"{
                "outDir": "build",
                "devServer": { "port": 3000 },
                "lint": { "program": "eslint", "args": ["lib"] },
                "webpackConfigs": {
                    "zeta": { "entry": "./src/zeta.js" },
                    "alpha": { "entry": "./src/alpha.js" },
                    "cwbStart": { "entry": "./src/index.jsx" }
                }
            }"#,
        );

        let settings = CwbSettings::load(dir.path(), None).unwrap();
        assert_eq!(settings.out_dir, PathBuf::from("build"));
        assert_eq!(settings.dev_server.port, 3000);
        assert_eq!(settings.lint, CommandSpec::new("eslint", &["lib"]));
        assert_eq!(settings.package_name, "chcokr-webapp-build");

        let names: Vec<_> = settings.webpack_configs.names().collect();
        assert_eq!(names, ["zeta", "alpha", "cwbStart"]);
        assert!(settings.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), r#"{ "outDir": "build", "packageName": "from-file" }"#);

        unsafe {
            std::env::set_var("CWB_OUTDIR", "public");
            std::env::set_var("CWB_TEMPDIR", "tmp");
        }
        let settings = CwbSettings::load(dir.path(), None).unwrap();
        clear_env();

        assert_eq!(settings.out_dir, PathBuf::from("public"));
        assert_eq!(settings.package_name, "from-file");
        assert_eq!(
            settings.resolved_temp_dir(dir.path()),
            Some(dir.path().join("tmp"))
        );
    }

    #[test]
    #[serial]
    fn test_explicit_config_path_must_exist() {
        clear_env();
        let dir = TempDir::new().unwrap();

        let err = CwbSettings::load(dir.path(), Some(Path::new("missing.json"))).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::NotFound(_))));
    }

    #[test]
    #[serial]
    fn test_invalid_json_is_config_error() {
        clear_env();
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), "{ not json");

        let err = CwbSettings::load(dir.path(), None).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    #[serial]
    fn test_webpack_configs_must_be_a_map() {
        clear_env();
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), r#"{ "webpackConfigs": ["app"] }"#);

        let err = CwbSettings::load(dir.path(), None).unwrap_err();
        assert!(err.to_string().contains("webpackConfigs"));
    }

    fn with_entries(json: serde_json::Value) -> CwbSettings {
        CwbSettings {
            webpack_configs: serde_json::from_value(json).unwrap(),
            ..CwbSettings::default()
        }
    }

    #[test]
    fn test_validate_requires_entries() {
        let err = CwbSettings::default().validate().unwrap_err();
        assert!(err.to_string().contains("webpackConfigs"));
    }

    #[test]
    fn test_validate_entry_shape() {
        let settings = with_entries(serde_json::json!({ "app": "./src/app.js" }));
        assert!(settings.validate().unwrap_err().to_string().contains("webpackConfigs.app"));

        let settings = with_entries(serde_json::json!({ "app": { "entry": 42 } }));
        assert!(settings
            .validate()
            .unwrap_err()
            .to_string()
            .contains("webpackConfigs.app.entry"));
    }

    #[test]
    fn test_validate_out_dir_inside_project() {
        let entries = serde_json::json!({ "app": { "entry": "./src/app.js" } });

        for out_dir in ["dist", "build/out", "./public"] {
            let settings = CwbSettings {
                out_dir: PathBuf::from(out_dir),
                ..with_entries(entries.clone())
            };
            assert!(settings.validate().is_ok(), "{out_dir}");
        }

        for out_dir in ["", ".", "./", "..", "../dist", "src/..", "/", "/var/www", "src", "package.json"] {
            let settings = CwbSettings {
                out_dir: PathBuf::from(out_dir),
                ..with_entries(entries.clone())
            };
            let err = settings.validate().unwrap_err();
            assert!(
                matches!(err, CliError::Config(ConfigError::InvalidValue { ref field, .. }) if field == "outDir"),
                "{out_dir}: {err}"
            );
        }
    }

    #[test]
    fn test_validate_out_dir_names_clashing_required_path() {
        let settings = CwbSettings {
            out_dir: PathBuf::from("web"),
            required_paths: vec![PathBuf::from("package.json"), PathBuf::from("./web/index.html")],
            ..with_entries(serde_json::json!({ "app": { "entry": "./src/app.js" } }))
        };
        let msg = settings.validate().unwrap_err().to_string();
        assert!(msg.contains("web/index.html"));
    }

    #[test]
    fn test_validate_entry_names() {
        let settings = with_entries(serde_json::json!({ "../escape": { "entry": "a.js" } }));
        assert!(settings.validate().is_err());

        let settings = with_entries(serde_json::json!({ "admin_v2-beta": { "entry": "a.js" } }));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_ports_and_commands() {
        let mut settings = with_entries(serde_json::json!({ "app": { "entry": "a.js" } }));
        settings.dist_server.port = 0;
        assert!(settings.validate().unwrap_err().to_string().contains("distServer.port"));

        let mut settings = with_entries(serde_json::json!({ "app": { "entry": "a.js" } }));
        settings.compile_check.program = String::new();
        assert!(settings.validate().unwrap_err().to_string().contains("compileCheck.program"));
    }

    #[test]
    fn test_command_display() {
        let command = CommandSpec::new("node_modules/.bin/eslint", &["--ext", ".js,.jsx", "src"]);
        assert_eq!(command.display(), "node_modules/.bin/eslint --ext .js,.jsx src");
    }
}
