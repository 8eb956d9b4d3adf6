//! Flag registry — owns flag storage and the id lookup index.
//!
//! Flags are stored in an append-only slot list. The index maps every name
//! and alias to a [`FlagHandle`] (a slot position), so handles stay valid no
//! matter how many flags are registered later.

use std::collections::{HashMap, HashSet};

use crate::flags::error::FlagError;
use crate::flags::flag::{Callback, Flag, FlagData, FlagDef};

/// Stable reference to a registered flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagHandle(usize);

impl FlagHandle {
    /// Registration order position.
    pub fn index(self) -> usize {
        self.0
    }
}

struct Slot {
    flag: Flag,
    default: FlagData,
    callback: Option<Callback>,
}

/// Registered flags plus the name/alias index.
#[derive(Default)]
pub struct FlagRegistry {
    slots: Vec<Slot>,
    table: HashMap<String, FlagHandle>,
}

impl FlagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a flag under its name and every alias.
    ///
    /// Fails without inserting anything when an id is empty, already taken,
    /// or repeated within `def`, or when the default disagrees with the type.
    pub fn register(&mut self, def: FlagDef) -> Result<FlagHandle, FlagError> {
        let mut seen = HashSet::new();
        for id in def.ids() {
            if id.is_empty() {
                return Err(FlagError::EmptyId {
                    flag: def.name.clone(),
                });
            }
            if self.table.contains_key(id) || !seen.insert(id) {
                return Err(FlagError::DuplicateId {
                    flag_id: id.to_string(),
                });
            }
        }

        let default = match def.default {
            Some(data) if data.kind() != def.kind => {
                return Err(FlagError::DefaultMismatch {
                    flag_id: def.name,
                    expected: def.kind.to_string(),
                });
            }
            Some(data) => data,
            None => def.kind.zero(),
        };

        let handle = FlagHandle(self.slots.len());
        self.table.insert(def.name.clone(), handle);
        for alias in &def.aliases {
            self.table.insert(alias.clone(), handle);
        }

        tracing::debug!(
            flag = %def.name,
            kind = %def.kind,
            aliases = ?def.aliases,
            "registered flag"
        );

        self.slots.push(Slot {
            flag: Flag::new(
                def.name,
                def.description,
                def.kind,
                def.aliases,
                default.clone(),
            ),
            default,
            callback: def.callback,
        });

        Ok(handle)
    }

    /// Handle for a name or alias.
    pub fn handle(&self, id: &str) -> Option<FlagHandle> {
        self.table.get(id).copied()
    }

    pub fn get(&self, id: &str) -> Option<&Flag> {
        self.handle(id).map(|h| self.flag(h))
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Flag> {
        let handle = self.handle(id)?;
        Some(self.flag_mut(handle))
    }

    /// Flag behind a handle issued by this registry.
    ///
    /// # Panics
    ///
    /// Panics if `handle` came from a different registry with more flags.
    pub fn flag(&self, handle: FlagHandle) -> &Flag {
        &self.slots[handle.0].flag
    }

    /// Mutable flag behind a handle issued by this registry.
    ///
    /// # Panics
    ///
    /// Panics if `handle` came from a different registry with more flags.
    pub fn flag_mut(&mut self, handle: FlagHandle) -> &mut Flag {
        &mut self.slots[handle.0].flag
    }

    /// All flags in registration order.
    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.slots.iter().map(|s| &s.flag)
    }

    /// Raw id → handle index, names and aliases alike.
    pub fn table(&self) -> &HashMap<String, FlagHandle> {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Clear `triggered` and restore every flag's default data.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.flag.restore(slot.default.clone());
        }
    }

    /// One `{prefix}{name}\t\t{description}` line per flag.
    pub fn describe(&self, prefix: &str) -> String {
        let mut output = String::new();
        for flag in self.flags() {
            output.push_str(prefix);
            output.push_str(flag.name());
            output.push_str("\t\t");
            output.push_str(&flag.description);
            output.push('\n');
        }
        output
    }

    /// Run callbacks of triggered flags in registration order.
    ///
    /// Stops at the first callback error and returns it.
    pub(crate) fn dispatch(&mut self) -> Result<(), FlagError> {
        for slot in &mut self.slots {
            if !slot.flag.triggered {
                continue;
            }
            let Some(callback) = slot.callback.as_mut() else {
                continue;
            };
            tracing::trace!(flag = %slot.flag.name(), "invoking flag callback");
            callback(&mut slot.flag)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for FlagRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlagRegistry")
            .field("flags", &self.flags().collect::<Vec<_>>())
            .field("table", &self.table)
            .finish()
    }
}
