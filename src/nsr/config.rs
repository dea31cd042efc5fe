//! Configuration loader for the nsr toolchain.
//!
//! `defaults/nsr.default.toml` is embedded into the crate so that the documented defaults
//! and runtime behavior stay in sync. Callers layer user files and command-line overrides
//! on top of those defaults via [`Loader`] before deserializing into [`NsrConfig`].

use crate::nsr::assembling::DeindentGlue;
use crate::nsr::classifying::IndentPolicy;
use crate::nsr::pipeline::ParseOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../../defaults/nsr.default.toml");

/// Top-level configuration consumed by nsr applications.
#[derive(Debug, Clone, Deserialize)]
pub struct NsrConfig {
    pub parser: ParserConfig,
    pub output: OutputConfig,
    pub styles: StylesConfig,
}

/// Mirrors the knobs of the core parser.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    pub tab_width: usize,
    pub deindent_glue: DeindentGlue,
    pub indent_policy: IndentPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
    pub show_line_numbers: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StylesConfig {
    pub files: Vec<PathBuf>,
}

impl From<&ParserConfig> for ParseOptions {
    fn from(config: &ParserConfig) -> Self {
        ParseOptions {
            tab_width: config.tab_width,
            deindent_glue: config.deindent_glue,
            indent_policy: config.indent_policy,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (command-line flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<NsrConfig, ConfigError> {
        let config: NsrConfig = self.builder.build()?.try_deserialize()?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<NsrConfig, ConfigError> {
    Loader::new().build()
}
