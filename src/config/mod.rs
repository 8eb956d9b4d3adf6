//! Flag spec files: TOML declarations of parser options and flags.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{FlagEntry, SpecFile};
