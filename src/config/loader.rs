use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::SpecFile;
use crate::flags::{FlagDef, FlagError, Parser};

/// Errors that can occur when loading a spec file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read spec file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse spec file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Spec validation failed: {message}")]
    ValidationError { message: String },

    #[error("Invalid flag declaration: {0}")]
    Flag(#[from] FlagError),
}

impl SpecFile {
    /// Returns the path to the default spec file.
    ///
    /// Uses `~/.config/argflags/flags.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("argflags").join("flags.toml")
    }

    /// Loads the default spec file.
    ///
    /// - If the file doesn't exist, returns `SpecFile::default()`.
    /// - Otherwise behaves like [`SpecFile::load_from`].
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no spec file, using defaults");
            return Ok(SpecFile::default());
        }

        Self::load_from(&path)
    }

    /// Reads, parses and validates the spec file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let spec = Self::from_toml_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        spec.validate()?;
        tracing::debug!(path = %path.display(), flags = spec.flags.len(), "loaded spec file");
        Ok(spec)
    }

    /// Parses spec TOML without validating it.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Validates the spec.
    ///
    /// Checks:
    /// - Every flag has a non-empty name
    /// - Options, ids and defaults are accepted by a fresh parser
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(pos) = self.flags.iter().position(|f| f.name.is_empty()) {
            return Err(ConfigError::ValidationError {
                message: format!("flag #{} has an empty name", pos + 1),
            });
        }

        self.build_parser()?;
        Ok(())
    }

    /// Registration definitions for every flag, in file order.
    pub fn flag_defs(&self) -> impl Iterator<Item = FlagDef> + '_ {
        self.flags.iter().map(|f| f.to_def())
    }

    /// A parser with these options and flags registered, without callbacks.
    pub fn build_parser(&self) -> Result<Parser, ConfigError> {
        let mut parser = Parser::new(self.options.clone())?;
        for def in self.flag_defs() {
            parser.register(def)?;
        }
        Ok(parser)
    }
}
