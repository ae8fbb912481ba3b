use std::fs;
use std::path::Path;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::domain::DEFAULT_NAMESPACE;
use crate::error::CoordError;
use crate::registry::DEFAULT_ORGANISM;

pub const ENV_INPUT: &str = "INPUT_FILE_DEFAULT";
pub const ENV_LOAD_FILE: &str = "INPUT_FILE_LOAD";
pub const ENV_CURATOR_LOG: &str = "LOG_CUR";
pub const ENV_NOMEN_MISMATCH: &str = "QC_NomenMisMatch";
pub const ENV_CHR_MISMATCH: &str = "QC_ChrMisMatch";
pub const ENV_MULTIPLE_COORDS: &str = "QC_MultipleCoords";
pub const ENV_REGISTRY: &str = "REGISTRY_FILE";
pub const ENV_NAMESPACE: &str = "XREF_NAMESPACE";
pub const ENV_ORGANISM: &str = "REGISTRY_ORGANISM";

/// One layer of settings. Every field is optional so layers can be merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub input: Option<Utf8PathBuf>,
    #[serde(default)]
    pub load_file: Option<Utf8PathBuf>,
    #[serde(default)]
    pub curator_log: Option<Utf8PathBuf>,
    #[serde(default)]
    pub nomen_mismatch_report: Option<Utf8PathBuf>,
    #[serde(default)]
    pub chr_mismatch_report: Option<Utf8PathBuf>,
    #[serde(default)]
    pub multiple_coords_report: Option<Utf8PathBuf>,
    #[serde(default)]
    pub registry: Option<Utf8PathBuf>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub organism: Option<String>,
}

impl Settings {
    /// Reads the environment layer. Empty values count as unset.
    pub fn from_env<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let path = |name: &str| get(name).map(Utf8PathBuf::from);
        Self {
            input: path(ENV_INPUT),
            load_file: path(ENV_LOAD_FILE),
            curator_log: path(ENV_CURATOR_LOG),
            nomen_mismatch_report: path(ENV_NOMEN_MISMATCH),
            chr_mismatch_report: path(ENV_CHR_MISMATCH),
            multiple_coords_report: path(ENV_MULTIPLE_COORDS),
            registry: path(ENV_REGISTRY),
            namespace: get(ENV_NAMESPACE),
            organism: get(ENV_ORGANISM),
        }
    }

    /// Fields set in `higher` replace those in `self`.
    pub fn merge(self, higher: Settings) -> Settings {
        Settings {
            input: higher.input.or(self.input),
            load_file: higher.load_file.or(self.load_file),
            curator_log: higher.curator_log.or(self.curator_log),
            nomen_mismatch_report: higher.nomen_mismatch_report.or(self.nomen_mismatch_report),
            chr_mismatch_report: higher.chr_mismatch_report.or(self.chr_mismatch_report),
            multiple_coords_report: higher
                .multiple_coords_report
                .or(self.multiple_coords_report),
            registry: higher.registry.or(self.registry),
            namespace: higher.namespace.or(self.namespace),
            organism: higher.organism.or(self.organism),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub load_file: Utf8PathBuf,
    pub curator_log: Utf8PathBuf,
    pub nomen_mismatch_report: Utf8PathBuf,
    pub chr_mismatch_report: Utf8PathBuf,
    pub multiple_coords_report: Utf8PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub input: Utf8PathBuf,
    pub registry: Utf8PathBuf,
    pub outputs: OutputPaths,
    pub namespace: String,
    pub organism: String,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Layers the optional JSON file, the process environment and `overrides`.
    pub fn resolve(
        config_path: Option<&str>,
        overrides: Settings,
    ) -> Result<ResolvedConfig, CoordError> {
        let file = match config_path {
            Some(path) => Self::read_file(Path::new(path))?,
            None => Settings::default(),
        };
        Self::resolve_layers(file, |name| std::env::var(name).ok(), overrides)
    }

    pub fn read_file(path: &Path) -> Result<Settings, CoordError> {
        let content =
            fs::read_to_string(path).map_err(|_| CoordError::ConfigRead(path.to_path_buf()))?;
        serde_json::from_str(&content).map_err(|err| CoordError::ConfigParse(err.to_string()))
    }

    pub fn resolve_layers<F>(
        file: Settings,
        env: F,
        overrides: Settings,
    ) -> Result<ResolvedConfig, CoordError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = file.merge(Settings::from_env(env)).merge(overrides);
        Self::resolve_settings(settings)
    }

    /// Checks that every required path is present, reporting all gaps at once.
    pub fn resolve_settings(settings: Settings) -> Result<ResolvedConfig, CoordError> {
        let mut missing = Vec::new();
        let mut require = |value: Option<Utf8PathBuf>, name: &str| {
            if value.is_none() {
                missing.push(name.to_string());
            }
            value.unwrap_or_default()
        };

        let input = require(settings.input, ENV_INPUT);
        let load_file = require(settings.load_file, ENV_LOAD_FILE);
        let curator_log = require(settings.curator_log, ENV_CURATOR_LOG);
        let nomen_mismatch_report = require(settings.nomen_mismatch_report, ENV_NOMEN_MISMATCH);
        let chr_mismatch_report = require(settings.chr_mismatch_report, ENV_CHR_MISMATCH);
        let multiple_coords_report =
            require(settings.multiple_coords_report, ENV_MULTIPLE_COORDS);
        let registry = require(settings.registry, ENV_REGISTRY);

        if !missing.is_empty() {
            return Err(CoordError::MissingSettings(missing));
        }

        Ok(ResolvedConfig {
            input,
            registry,
            outputs: OutputPaths {
                load_file,
                curator_log,
                nomen_mismatch_report,
                chr_mismatch_report,
                multiple_coords_report,
            },
            namespace: settings
                .namespace
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            organism: settings
                .organism
                .unwrap_or_else(|| DEFAULT_ORGANISM.to_string()),
        })
    }
}
