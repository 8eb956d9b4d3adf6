//! Flag parsing for argflags.
//!
//! ```text
//! FlagDef → FlagRegistry → Parser::parse → Parser::call → read flags / flagless
//! ```
//!
//! Registration builds the id index once. Parsing is a single left-to-right
//! pass that mutates flag state in place and collects positional arguments.

mod classifier;
mod error;
mod flag;
mod options;
mod parser;
mod registry;

pub use classifier::{classify_token, is_flag, Token};
pub use error::{FlagError, Outcome, COULD_NOT_SET_VALUE, INVALID_FLAG_ID};
pub use flag::{Callback, Flag, FlagData, FlagDef, FlagType};
pub use options::Options;
pub use parser::Parser;
pub use registry::{FlagHandle, FlagRegistry};
