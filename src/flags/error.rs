//! Error types for registration, parsing and callback dispatch.

use serde::Serialize;
use thiserror::Error;

/// Reason reported for an id that is not in the registry.
pub const INVALID_FLAG_ID: &str = "invalid flag id used";
/// Reason reported when a value is missing or does not coerce.
pub const COULD_NOT_SET_VALUE: &str = "could not set flag value";

/// Errors produced by the flag registry, the parser and callbacks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlagError {
    /// Flag id not present in the registry (strict mode only).
    #[error("{flag_id}: invalid flag id used")]
    UnknownFlag { flag_id: String },

    /// Non-bool flag matched with no inline value and no following token.
    #[error("{flag_id}: could not set flag value")]
    MissingValue { flag_id: String },

    /// Value string does not convert to the flag's declared type.
    #[error("{flag_id}: could not set flag value ('{value}')")]
    InvalidValue { flag_id: String, value: String },

    /// Name or alias already registered.
    #[error("{flag_id}: duplicate flag id")]
    DuplicateId { flag_id: String },

    /// Name or alias is the empty string.
    #[error("flag '{flag}' declares an empty id")]
    EmptyId { flag: String },

    /// Default value variant disagrees with the declared type.
    #[error("{flag_id}: default value does not match type {expected}")]
    DefaultMismatch { flag_id: String, expected: String },

    /// Parser options cannot be used.
    #[error("invalid parser options: {reason}")]
    InvalidOptions { reason: String },

    /// A flag callback reported failure.
    #[error("{flag_id}: {message}")]
    Callback { flag_id: String, message: String },
}

impl FlagError {
    /// Build a callback failure for `flag_id`.
    pub fn callback(flag_id: impl Into<String>, message: impl Into<String>) -> Self {
        FlagError::Callback {
            flag_id: flag_id.into(),
            message: message.into(),
        }
    }

    /// The flag id that caused the error, if any.
    pub fn flag_id(&self) -> Option<&str> {
        match self {
            FlagError::UnknownFlag { flag_id }
            | FlagError::MissingValue { flag_id }
            | FlagError::InvalidValue { flag_id, .. }
            | FlagError::DuplicateId { flag_id }
            | FlagError::DefaultMismatch { flag_id, .. }
            | FlagError::Callback { flag_id, .. } => Some(flag_id),
            FlagError::EmptyId { .. } | FlagError::InvalidOptions { .. } => None,
        }
    }

    /// Short fixed reason, without the flag id.
    pub fn reason(&self) -> &str {
        match self {
            FlagError::UnknownFlag { .. } => INVALID_FLAG_ID,
            FlagError::MissingValue { .. } | FlagError::InvalidValue { .. } => COULD_NOT_SET_VALUE,
            FlagError::DuplicateId { .. } => "duplicate flag id",
            FlagError::EmptyId { .. } => "empty flag id",
            FlagError::DefaultMismatch { .. } => "default value does not match flag type",
            FlagError::InvalidOptions { .. } => "invalid parser options",
            FlagError::Callback { message, .. } => message,
        }
    }
}

/// Flat `{ok, flag_id, error}` view of a parse or dispatch result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Outcome {
    pub fn success() -> Self {
        Self {
            ok: true,
            flag_id: None,
            error: None,
        }
    }
}

impl From<&FlagError> for Outcome {
    fn from(err: &FlagError) -> Self {
        Self {
            ok: false,
            flag_id: err.flag_id().map(str::to_string),
            error: Some(err.reason().to_string()),
        }
    }
}

impl<T> From<&Result<T, FlagError>> for Outcome {
    fn from(result: &Result<T, FlagError>) -> Self {
        match result {
            Ok(_) => Outcome::success(),
            Err(e) => Outcome::from(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_invalid_share_reason() {
        let missing = FlagError::MissingValue {
            flag_id: "name".into(),
        };
        let invalid = FlagError::InvalidValue {
            flag_id: "count".into(),
            value: "12abc".into(),
        };
        assert_eq!(missing.reason(), COULD_NOT_SET_VALUE);
        assert_eq!(invalid.reason(), COULD_NOT_SET_VALUE);
        assert_eq!(invalid.flag_id(), Some("count"));
    }

    #[test]
    fn outcome_from_error() {
        let result: Result<(), FlagError> = Err(FlagError::UnknownFlag {
            flag_id: "bogus".into(),
        });
        let outcome = Outcome::from(&result);
        assert!(!outcome.ok);
        assert_eq!(outcome.flag_id.as_deref(), Some("bogus"));
        assert_eq!(outcome.error.as_deref(), Some(INVALID_FLAG_ID));
    }

    #[test]
    fn outcome_success_omits_fields() {
        let json = serde_json::to_string(&Outcome::success()).unwrap();
        assert_eq!(json, r#"{"ok":true}"#);
    }
}
