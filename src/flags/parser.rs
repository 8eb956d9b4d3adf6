//! Parser — raw args + registry → typed flag values and flagless args.

use std::fmt;

use crate::flags::classifier::{classify_token, Token};
use crate::flags::error::FlagError;
use crate::flags::flag::{Flag, FlagDef, FlagType};
use crate::flags::options::Options;
use crate::flags::registry::{FlagHandle, FlagRegistry};

/// A parse session: options, registered flags and the collected positionals.
#[derive(Debug, Default)]
pub struct Parser {
    options: Options,
    registry: FlagRegistry,
    flagless: Vec<String>,
}

impl Parser {
    /// Create a parser with an empty registry.
    pub fn new(options: Options) -> Result<Self, FlagError> {
        Self::with_registry(options, FlagRegistry::new())
    }

    /// Create a parser over an existing registry.
    pub fn with_registry(options: Options, registry: FlagRegistry) -> Result<Self, FlagError> {
        options.validate()?;
        Ok(Self {
            options,
            registry,
            flagless: Vec::new(),
        })
    }

    pub fn register(&mut self, def: FlagDef) -> Result<FlagHandle, FlagError> {
        self.registry.register(def)
    }

    /// Parse `args` left to right in a single pass.
    ///
    /// Flag state and the flagless list are updated in place. On error the
    /// scan stops and everything handled before the failing token is kept.
    pub fn parse<I, S>(&mut self, args: I) -> Result<(), FlagError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.flagless.clear();

        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let arg = arg.as_ref();

            let (id, inline) = match classify_token(arg, &self.options) {
                Token::Positional(text) => {
                    self.flagless.push(text.to_string());
                    continue;
                }
                Token::Flag { id, inline } => (id, inline),
            };

            let Some(handle) = self.registry.handle(id) else {
                if self.options.strict_flags {
                    tracing::debug!(flag = %id, "unknown flag id");
                    return Err(FlagError::UnknownFlag {
                        flag_id: id.to_string(),
                    });
                }
                tracing::debug!(flag = %id, "skipping unknown flag id");
                continue;
            };

            let flag = self.registry.flag_mut(handle);

            if flag.kind() == FlagType::Bool {
                tracing::trace!(flag = %id, "bool flag set");
                flag.set_value("")?;
                continue;
            }

            // Inline value wins when non-empty, otherwise take the next token.
            let result = match inline.filter(|v| !v.is_empty()) {
                Some(value) => flag.set_value(value),
                None => match args.next() {
                    Some(next) => flag.set_value(next.as_ref()),
                    None => Err(FlagError::MissingValue {
                        flag_id: id.to_string(),
                    }),
                },
            };

            // Errors carry the id as written, which may be an alias.
            match result {
                Ok(()) => tracing::trace!(flag = %id, data = ?flag.data(), "flag value set"),
                Err(FlagError::InvalidValue { value, .. }) => {
                    tracing::debug!(flag = %id, value = %value, "could not coerce flag value");
                    return Err(FlagError::InvalidValue {
                        flag_id: id.to_string(),
                        value,
                    });
                }
                Err(e) => {
                    tracing::debug!(flag = %id, "missing flag value");
                    return Err(e);
                }
            }
        }

        tracing::debug!(flagless = self.flagless.len(), "parse finished");
        Ok(())
    }

    /// Invoke callbacks of triggered flags in registration order.
    ///
    /// Returns the first callback error without running the rest.
    pub fn call(&mut self) -> Result<(), FlagError> {
        self.registry.dispatch().inspect_err(|e| {
            tracing::debug!(error = %e, "flag callback failed");
        })
    }

    /// Lookup by name or alias.
    pub fn get(&self, id: &str) -> Option<&Flag> {
        self.registry.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Flag> {
        self.registry.get_mut(id)
    }

    /// Arguments that were not flags, in input order.
    pub fn flagless(&self) -> &[String] {
        &self.flagless
    }

    pub fn registry(&self) -> &FlagRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut FlagRegistry {
        &mut self.registry
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Help-style listing using this parser's prefix.
    pub fn describe(&self) -> String {
        self.registry.describe(&self.options.flag_prefix)
    }
}

impl fmt::Display for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
