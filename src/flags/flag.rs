//! Flag definitions and their typed values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::flags::error::FlagError;

/// Declared type of a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagType {
    /// Stores the value string verbatim.
    String,
    /// Floating point value.
    Number,
    /// Presence flag, never takes a value.
    Bool,
}

impl FlagType {
    /// Data a flag of this type holds when no default is given.
    pub fn zero(self) -> FlagData {
        match self {
            FlagType::String => FlagData::Text(String::new()),
            FlagType::Number => FlagData::Number(0.0),
            FlagType::Bool => FlagData::Bool(false),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FlagType::String => "string",
            FlagType::Number => "number",
            FlagType::Bool => "bool",
        }
    }
}

impl fmt::Display for FlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default or parsed value of a flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagData {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FlagData {
    /// The flag type this variant belongs to.
    pub fn kind(&self) -> FlagType {
        match self {
            FlagData::Text(_) => FlagType::String,
            FlagData::Number(_) => FlagType::Number,
            FlagData::Bool(_) => FlagType::Bool,
        }
    }
}

impl From<&str> for FlagData {
    fn from(value: &str) -> Self {
        FlagData::Text(value.to_string())
    }
}

impl From<String> for FlagData {
    fn from(value: String) -> Self {
        FlagData::Text(value)
    }
}

impl From<f64> for FlagData {
    fn from(value: f64) -> Self {
        FlagData::Number(value)
    }
}

impl From<bool> for FlagData {
    fn from(value: bool) -> Self {
        FlagData::Bool(value)
    }
}

/// Hook run by `Parser::call` for a triggered flag.
pub type Callback = Box<dyn FnMut(&mut Flag) -> Result<(), FlagError>>;

/// A registered flag and its current state.
///
/// Identity, type and value are read-only from outside the crate. The value
/// only changes through [`Flag::set_value`], which keeps it in step with the
/// declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct Flag {
    name: String,
    kind: FlagType,
    aliases: Vec<String>,
    data: FlagData,
    /// Text shown in the listing.
    pub description: String,
    /// Set once the flag is matched during a parse pass.
    pub triggered: bool,
}

impl Flag {
    pub(crate) fn new(
        name: String,
        description: String,
        kind: FlagType,
        aliases: Vec<String>,
        data: FlagData,
    ) -> Self {
        Self {
            name,
            kind,
            aliases,
            data,
            description,
            triggered: false,
        }
    }

    /// Canonical id.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FlagType {
        self.kind
    }

    /// Additional ids resolving to this flag.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Default before parsing, parsed value after.
    pub fn data(&self) -> &FlagData {
        &self.data
    }

    /// Put back registration-time state.
    pub(crate) fn restore(&mut self, default: FlagData) {
        self.data = default;
        self.triggered = false;
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.data {
            FlagData::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.data {
            FlagData::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.data {
            FlagData::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Coerce `value` into this flag's type and store it.
    ///
    /// Number parsing takes the whole string: empty input, whitespace,
    /// trailing characters and non-finite values (`inf`, `nan`) all fail.
    /// Bool flags ignore `value` and become `true`.
    pub fn set_value(&mut self, value: &str) -> Result<(), FlagError> {
        self.data = match self.kind {
            FlagType::String => FlagData::Text(value.to_string()),
            FlagType::Number => {
                let n = value
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| FlagError::InvalidValue {
                        flag_id: self.name.clone(),
                        value: value.to_string(),
                    })?;
                FlagData::Number(n)
            }
            FlagType::Bool => FlagData::Bool(true),
        };
        self.triggered = true;
        Ok(())
    }
}

/// Registration-time description of a flag.
pub struct FlagDef {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) kind: FlagType,
    pub(crate) aliases: Vec<String>,
    pub(crate) default: Option<FlagData>,
    pub(crate) callback: Option<Callback>,
}

impl FlagDef {
    pub fn new(name: impl Into<String>, kind: FlagType) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind,
            aliases: Vec::new(),
            default: None,
            callback: None,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FlagType::String)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FlagType::Number)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FlagType::Bool)
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Value held until the flag is matched. Must agree with the declared type.
    pub fn default_value(mut self, value: impl Into<FlagData>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Hook invoked by `Parser::call` when the flag was triggered.
    pub fn on_trigger<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut Flag) -> Result<(), FlagError> + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FlagType {
        self.kind
    }

    /// Name followed by every alias.
    pub(crate) fn ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

impl fmt::Debug for FlagDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagDef")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("kind", &self.kind)
            .field("aliases", &self.aliases)
            .field("default", &self.default)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}
