//! Layered configuration for `htest-gen`.
//!
//! Settings are merged in increasing precedence from built-in defaults, an
//! optional `htest-gen.toml`, `HTEST_GEN_`-prefixed environment variables, and
//! finally the command line. Nested keys use `__` in environment variable
//! names, for example `HTEST_GEN_VOCABULARY__SUITE_MARKER`.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::error::GenError;
use crate::vocabulary::{MarkerVocabulary, Profile, VocabularyOverrides};

/// Configuration file consulted when no explicit path is given. It is looked
/// up in the working directory and then its ancestors.
pub const DEFAULT_CONFIG_FILE: &str = "htest-gen.toml";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "HTEST_GEN_";

/// Source directory used when none is configured.
pub const DEFAULT_SOURCE_DIR: &str = "../../unittest";

/// Fully merged generator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Built-in vocabulary the overrides are layered onto.
    pub profile: Profile,
    /// Directory holding the hand-written test sources.
    #[serde(deserialize_with = "crate::lossy::path")]
    pub source_dir: Utf8PathBuf,
    /// Namespace applied to every file, replacing any declared in sources.
    #[serde(deserialize_with = "crate::lossy::option_string")]
    pub lib_name: Option<String>,
    /// Per-field replacements for the profile's vocabulary.
    pub vocabulary: VocabularyOverrides,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            source_dir: Utf8PathBuf::from(DEFAULT_SOURCE_DIR),
            lib_name: None,
            vocabulary: VocabularyOverrides::default(),
        }
    }
}

impl GeneratorConfig {
    /// Resolves the effective vocabulary: the profile's with overrides applied.
    #[must_use]
    pub fn resolved_vocabulary(&self) -> MarkerVocabulary {
        self.profile.vocabulary().apply(&self.vocabulary)
    }

    /// Returns the namespace override, treating a blank value as absent.
    #[must_use]
    pub fn namespace_override(&self) -> Option<&str> {
        self.lib_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Command-line values that take precedence over every other layer.
///
/// Absent fields are skipped so they never mask lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CliOverrides {
    /// Profile selected with `--profile`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    /// Positional source directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<Utf8PathBuf>,
    /// Positional library name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lib_name: Option<String>,
}

/// Builds the layered figment without extracting it.
///
/// With `config_path` set, that file must exist; otherwise
/// [`DEFAULT_CONFIG_FILE`] is used when present.
///
/// # Errors
///
/// Returns [`GenError::ConfigNotFound`] if an explicit configuration file is
/// missing.
pub fn figment(config_path: Option<&Utf8Path>, cli: &CliOverrides) -> Result<Figment, GenError> {
    let file = match config_path {
        Some(path) if !path.is_file() => {
            return Err(GenError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        Some(path) => path.to_path_buf(),
        None => Utf8PathBuf::from(DEFAULT_CONFIG_FILE),
    };

    Ok(Figment::from(Serialized::defaults(GeneratorConfig::default()))
        .merge(Toml::file(file.as_std_path()))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .merge(Serialized::defaults(cli)))
}

/// Loads the merged configuration.
///
/// # Errors
///
/// Returns [`GenError::ConfigNotFound`] for a missing explicit file and
/// [`GenError::Config`] when any layer fails to deserialize.
pub fn load(config_path: Option<&Utf8Path>, cli: &CliOverrides) -> Result<GeneratorConfig, GenError> {
    Ok(figment(config_path, cli)?.extract()?)
}
