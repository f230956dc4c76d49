//! Shared configuration loader for the Army Markdown toolchain.
//!
//! `defaults/amd.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`AmdConfig`].

use amd_babel::{RenderOptions, WriterRules};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/amd.default.toml");

/// File picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "amd.toml";

/// Top-level configuration consumed by Army Markdown applications.
#[derive(Debug, Clone, Deserialize)]
pub struct AmdConfig {
    pub render: RenderConfig,
    pub writer: WriterConfig,
    pub pdf: PdfConfig,
}

/// LaTeX rendering knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub document_class: String,
}

impl From<RenderConfig> for RenderOptions {
    fn from(config: RenderConfig) -> Self {
        RenderOptions {
            document_class: config.document_class,
        }
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        RenderOptions {
            document_class: config.document_class.clone(),
        }
    }
}

/// Mirrors the knobs exposed by the Army Markdown writer.
#[derive(Debug, Clone, Deserialize)]
pub struct WriterConfig {
    pub indent_string: String,
}

impl From<WriterConfig> for WriterRules {
    fn from(config: WriterConfig) -> Self {
        WriterRules {
            indent_string: config.indent_string,
            ..WriterRules::default()
        }
    }
}

impl From<&WriterConfig> for WriterRules {
    fn from(config: &WriterConfig) -> Self {
        WriterRules {
            indent_string: config.indent_string.clone(),
            ..WriterRules::default()
        }
    }
}

/// PDF export settings. Empty strings mean "not configured".
#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
    pub engine: String,
    pub class_dir: String,
}

impl PdfConfig {
    pub fn engine(&self) -> Option<PathBuf> {
        non_empty_path(&self.engine)
    }

    pub fn class_dir(&self) -> Option<PathBuf> {
        non_empty_path(&self.class_dir)
    }
}

fn non_empty_path(value: &str) -> Option<PathBuf> {
    let value = value.trim();
    (!value.is_empty()).then(|| PathBuf::from(value))
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

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<AmdConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<AmdConfig, ConfigError> {
    Loader::new().build()
}
