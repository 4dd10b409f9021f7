use crate::cli::{Cli, Format};
use crate::config::Settings;
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file picked up from the working directory.
pub const CONFIG_FILE_NAME: &str = "pymdoc.toml";

pub(crate) const ENV_PREFIX: &str = "PYMDOC_";

pub(crate) const KEYS: [&str; 8] = [
    "output_file",
    "output_path",
    "extension",
    "indent",
    "fence_language",
    "signatures",
    "filter",
    "format",
];

/// Values given on the command line; unset flags leave lower layers alone.
#[derive(Debug, Default, Serialize)]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    output_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    signatures: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<Format>,
}

impl From<&Cli> for CliOverrides {
    fn from(args: &Cli) -> Self {
        Self {
            output_file: args.output_file.clone(),
            output_path: args.output_path.clone(),
            extension: args.extension.clone(),
            signatures: args.no_signatures.then_some(false),
            filter: args.filter.clone(),
            format: args.format,
        }
    }
}

impl Settings {
    /// Load settings from every source and validate them.
    /// Priority: CLI args > environment variables > config file > defaults
    ///
    /// Without `--config`, `pymdoc.toml` is looked up in `cwd`.
    pub fn load(args: &Cli, cwd: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match &args.config {
            Some(path) if path.is_file() => Some(path.clone()),
            Some(path) => return Err(ConfigError::NotFound(path.clone()).into()),
            None => {
                let default_path = cwd.join(CONFIG_FILE_NAME);
                default_path.is_file().then_some(default_path)
            }
        };

        if let Some(path) = config_file {
            debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Toml::file(path));
        }

        // PYMDOC_INDENT, PYMDOC_OUTPUT_FILE, ...
        figment = figment.merge(Env::prefixed(ENV_PREFIX).only(&KEYS));

        figment = figment.merge(Serialized::defaults(CliOverrides::from(args)));

        let settings: Self = figment.extract().map_err(|e| ConfigError::Invalid {
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }
}
