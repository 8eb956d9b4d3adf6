//! Parser options — prefix, separator and strict mode, with validation.

use serde::{Deserialize, Serialize};

use crate::flags::error::FlagError;

/// Parse-session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Marks a token as a flag (default `"-"`).
    #[serde(default = "default_flag_prefix")]
    pub flag_prefix: String,
    /// Splits a flag id from an inline value (default `"="`).
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Fail on unknown flag ids instead of skipping them (default `true`).
    #[serde(default = "default_strict_flags")]
    pub strict_flags: bool,
}

fn default_flag_prefix() -> String {
    "-".to_string()
}

fn default_separator() -> String {
    "=".to_string()
}

fn default_strict_flags() -> bool {
    true
}

impl Default for Options {
    fn default() -> Self {
        Self {
            flag_prefix: default_flag_prefix(),
            separator: default_separator(),
            strict_flags: default_strict_flags(),
        }
    }
}

impl Options {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.flag_prefix = prefix.into();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_flags = strict;
        self
    }

    /// Checks:
    /// - `flag_prefix` is non-empty (otherwise every token is a flag)
    /// - `separator` is non-empty (otherwise every id is empty)
    pub fn validate(&self) -> Result<(), FlagError> {
        if self.flag_prefix.is_empty() {
            return Err(FlagError::InvalidOptions {
                reason: "flag_prefix must not be empty".to_string(),
            });
        }
        if self.separator.is_empty() {
            return Err(FlagError::InvalidOptions {
                reason: "separator must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let o = Options::default();
        assert_eq!(o.flag_prefix, "-");
        assert_eq!(o.separator, "=");
        assert!(o.strict_flags);
        assert!(o.validate().is_ok());
    }

    #[test]
    fn empty_strings_rejected() {
        assert!(Options::default().with_prefix("").validate().is_err());
        assert!(Options::default().with_separator("").validate().is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let o: Options = toml::from_str("strict_flags = false").unwrap();
        assert_eq!(o.flag_prefix, "-");
        assert_eq!(o.separator, "=");
        assert!(!o.strict_flags);
    }
}
