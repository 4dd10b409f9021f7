#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Format};
    use crate::config::loading::{ENV_PREFIX, KEYS};
    use crate::config::*;
    use crate::error::{CliError, ConfigError};
    use pymdoc::OutputMode;
    use serial_test::serial;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args() -> Cli {
        Cli {
            file: PathBuf::from("module.py"),
            ..Default::default()
        }
    }

    fn clear_env() {
        for key in KEYS {
            let var = format!("{}{}", ENV_PREFIX, key.to_uppercase());
            unsafe { std::env::remove_var(var) };
        }
    }

    #[test]
    #[serial]
    fn test_clear_env_resets_every_setting() {
        for key in KEYS {
            let var = format!("{}{}", ENV_PREFIX, key.to_uppercase());
            unsafe { std::env::set_var(var, "[") };
        }
        clear_env();
        let temp = TempDir::new().unwrap();
        assert_eq!(Settings::load(&args(), temp.path()).unwrap(), Settings::default());
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let settings = Settings::load(&args(), temp.path()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.extension, "md");
        assert_eq!(settings.indent, 4);
        assert_eq!(settings.fence_language, "python");
        assert!(settings.signatures);
        assert_eq!(settings.output_mode(), OutputMode::Console);
    }

    #[test]
    #[serial]
    fn test_file_then_env_then_cli() {
        clear_env();
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "indent = 2\nextension = \"markdown\"\noutput_file = \"file.md\"\n",
        )
        .unwrap();

        let settings = Settings::load(&args(), temp.path()).unwrap();
        assert_eq!(settings.indent, 2);
        assert_eq!(settings.extension, "markdown");
        assert_eq!(settings.output_file, Some(PathBuf::from("file.md")));

        unsafe { std::env::set_var("PYMDOC_INDENT", "8") };
        let settings = Settings::load(&args(), temp.path()).unwrap();
        assert_eq!(settings.indent, 8);

        let cli = Cli {
            output_file: Some(PathBuf::from("cli.md")),
            no_signatures: true,
            ..args()
        };
        let settings = Settings::load(&cli, temp.path()).unwrap();
        assert_eq!(settings.output_file, Some(PathBuf::from("cli.md")));
        assert_eq!(settings.indent, 8);
        assert!(!settings.signatures);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_explicit_config_must_exist() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let cli = Cli {
            config: Some(temp.path().join("missing.toml")),
            ..args()
        };
        let err = Settings::load(&cli, temp.path()).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::NotFound(_))));
    }

    #[test]
    #[serial]
    fn test_unknown_keys_are_rejected() {
        clear_env();
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "colour = true\n").unwrap();
        let err = Settings::load(&args(), temp.path()).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_validation() {
        assert!(Settings::default().validate().is_ok());

        for indent in [0, 17] {
            assert!(
                Settings {
                    indent,
                    ..Settings::default()
                }
                .validate()
                .is_err()
            );
        }

        assert!(
            Settings {
                extension: ".md".to_string(),
                ..Settings::default()
            }
            .validate()
            .is_err()
        );

        assert!(
            Settings {
                filter: Some("(".to_string()),
                ..Settings::default()
            }
            .validate()
            .is_err()
        );

        assert!(
            Settings {
                format: Format::Json,
                output_path: Some(PathBuf::from("docs")),
                ..Settings::default()
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn test_single_file_wins_over_directory() {
        let settings = Settings {
            output_file: Some(PathBuf::from("all.md")),
            output_path: Some(PathBuf::from("docs")),
            ..Settings::default()
        };
        assert_eq!(settings.output_mode(), OutputMode::SingleFile(PathBuf::from("all.md")));

        let settings = Settings {
            output_path: Some(PathBuf::from("docs")),
            ..Settings::default()
        };
        assert_eq!(settings.output_mode(), OutputMode::PerSymbol(PathBuf::from("docs")));
    }

    #[test]
    fn test_extract_options() {
        let settings = Settings {
            indent: 2,
            fence_language: "py".to_string(),
            signatures: false,
            filter: Some("^api_".to_string()),
            ..Settings::default()
        };
        let options = settings.extract_options().unwrap();
        assert_eq!(options.style.indent, 2);
        assert_eq!(options.style.fence_language, "py");
        assert!(!options.signatures);
        assert!(options.filter.unwrap().is_match("api_call"));
    }
}
