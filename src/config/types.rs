use serde::{Deserialize, Serialize};

use crate::flags::{FlagData, FlagDef, FlagType, Options};

/// Root of a flag spec file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecFile {
    /// Parser options. Missing keys take the parser defaults.
    #[serde(default)]
    pub options: Options,
    /// Flags in registration order.
    #[serde(default)]
    pub flags: Vec<FlagEntry>,
}

/// One `[[flags]]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagEntry {
    /// Canonical id (e.g., "count").
    pub name: String,
    /// Value type: "string", "number" or "bool".
    #[serde(rename = "type")]
    pub kind: FlagType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Value held until the flag is matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<FlagData>,
}

impl FlagEntry {
    /// Registration definition for this entry, without a callback.
    pub fn to_def(&self) -> FlagDef {
        let def = FlagDef::new(self.name.clone(), self.kind)
            .description(self.description.clone())
            .aliases(self.aliases.iter().cloned());
        match &self.default {
            Some(data) => def.default_value(data.clone()),
            None => def,
        }
    }
}
