//! Token classifier — one raw argument → positional or flag pieces.

use crate::flags::options::Options;

/// A single classified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Not a flag. Kept verbatim in the flagless list.
    Positional(&'a str),
    /// Prefixed token, split at the first separator.
    Flag {
        /// Text between the prefix and the separator (or end of token).
        id: &'a str,
        /// Text after the separator. `None` when no separator was found.
        /// `Some("")` when the separator ends the token.
        inline: Option<&'a str>,
    },
}

/// True when `arg` is strictly longer than the prefix and starts with it.
pub fn is_flag(arg: &str, prefix: &str) -> bool {
    arg.len() > prefix.len() && arg.starts_with(prefix)
}

/// Classify one argument against `options`.
///
/// The separator search starts after the prefix, so a separator that overlaps
/// the prefix never matches inside it.
pub fn classify_token<'a>(arg: &'a str, options: &Options) -> Token<'a> {
    if !is_flag(arg, &options.flag_prefix) {
        return Token::Positional(arg);
    }

    let body = &arg[options.flag_prefix.len()..];

    match body.find(options.separator.as_str()) {
        Some(at) => Token::Flag {
            id: &body[..at],
            inline: Some(&body[at + options.separator.len()..]),
        },
        None => Token::Flag {
            id: body,
            inline: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(prefix: &str, separator: &str) -> Options {
        Options {
            flag_prefix: prefix.into(),
            separator: separator.into(),
            strict_flags: true,
        }
    }

    #[test]
    fn bare_prefix_is_positional() {
        let o = opts("-", "=");
        assert_eq!(classify_token("-", &o), Token::Positional("-"));
        assert_eq!(classify_token("", &o), Token::Positional(""));
        assert_eq!(classify_token("file.txt", &o), Token::Positional("file.txt"));
    }

    #[test]
    fn double_dash_with_single_prefix_keeps_dash_in_id() {
        let o = opts("-", "=");
        assert_eq!(
            classify_token("--bogus", &o),
            Token::Flag {
                id: "-bogus",
                inline: None
            }
        );
    }

    #[test]
    fn splits_at_first_separator() {
        let o = opts("-", "=");
        assert_eq!(
            classify_token("-define=a=b", &o),
            Token::Flag {
                id: "define",
                inline: Some("a=b")
            }
        );
        assert_eq!(
            classify_token("-name=", &o),
            Token::Flag {
                id: "name",
                inline: Some("")
            }
        );
    }

    #[test]
    fn multi_char_separator() {
        let o = opts("--", "::");
        assert_eq!(
            classify_token("--level::3", &o),
            Token::Flag {
                id: "level",
                inline: Some("3")
            }
        );
        assert_eq!(
            classify_token("--level:3", &o),
            Token::Flag {
                id: "level:3",
                inline: None
            }
        );
    }

    #[test]
    fn separator_inside_prefix_is_ignored() {
        let o = opts("--", "-");
        assert_eq!(
            classify_token("--out-x", &o),
            Token::Flag {
                id: "out",
                inline: Some("x")
            }
        );
    }

    #[test]
    fn multibyte_prefix_and_separator() {
        let o = opts("→", "∶");
        assert_eq!(
            classify_token("→key∶välue", &o),
            Token::Flag {
                id: "key",
                inline: Some("välue")
            }
        );
    }
}
