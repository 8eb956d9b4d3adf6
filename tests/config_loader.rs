use argflags::config::{ConfigError, SpecFile};
use argflags::flags::{FlagData, FlagType};
use std::fs;
use tempfile::TempDir;

fn write_spec(content: &str) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("flags.toml");
    fs::write(&path, content).expect("Failed to write spec file");
    (temp_dir, path)
}

/// Test that SpecFile::default_path() ends with the expected filename.
#[test]
fn test_default_path_ends_with_expected() {
    let path = SpecFile::default_path();
    assert!(path.ends_with("argflags/flags.toml"));
}

/// Test that a full spec file loads with options and flags in order.
#[test]
fn test_load_full_spec() {
    let (_dir, path) = write_spec(
        r#"
[options]
flag_prefix = "--"
separator = ":"
strict_flags = false

[[flags]]
name = "count"
type = "number"
description = "How many"
aliases = ["c"]
default = 3

[[flags]]
name = "name"
type = "string"
default = "anon"

[[flags]]
name = "verbose"
type = "bool"
"#,
    );

    let spec = SpecFile::load_from(&path).unwrap();
    assert_eq!(spec.options.flag_prefix, "--");
    assert_eq!(spec.options.separator, ":");
    assert!(!spec.options.strict_flags);

    assert_eq!(spec.flags.len(), 3);
    assert_eq!(spec.flags[0].aliases, vec!["c"]);
    assert_eq!(spec.flags[1].default, Some(FlagData::Text("anon".into())));
    assert_eq!(spec.flags[2].kind, FlagType::Bool);
    assert!(spec.flags[2].default.is_none());

    let mut parser = spec.build_parser().unwrap();
    parser.parse(["--c:5", "--bogus", "file"]).unwrap();
    assert_eq!(parser.get("count").unwrap().as_number(), Some(5.0));
    assert_eq!(parser.get("name").unwrap().as_str(), Some("anon"));
    assert_eq!(parser.flagless(), ["file"]);
    assert_eq!(parser.describe(), "--count\t\tHow many\n--name\t\t\n--verbose\t\t\n");
}

/// Test that a missing file reports a read error with its path.
#[test]
fn test_missing_file_is_read_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");
    match SpecFile::load_from(&path) {
        Err(ConfigError::ReadError { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected ReadError, got {:?}", other),
    }
}

/// Test that malformed TOML reports a parse error.
#[test]
fn test_malformed_toml_is_parse_error() {
    let (_dir, path) = write_spec("[[flags]\nname = ");
    assert!(matches!(
        SpecFile::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

/// Test that an unknown flag type is a parse error.
#[test]
fn test_unknown_type_is_parse_error() {
    let (_dir, path) = write_spec(
        r#"
[[flags]]
name = "x"
type = "list"
"#,
    );
    assert!(matches!(
        SpecFile::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

/// Test that a default of the wrong type fails validation.
#[test]
fn test_mismatched_default_fails_validation() {
    let (_dir, path) = write_spec(
        r#"
[[flags]]
name = "count"
type = "number"
default = "three"
"#,
    );
    let err = SpecFile::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Flag(_)));
    assert!(err.to_string().contains("count"));
}

/// Test that empty option strings fail validation.
#[test]
fn test_empty_separator_fails_validation() {
    let (_dir, path) = write_spec(
        r#"
[options]
separator = ""
"#,
    );
    assert!(matches!(
        SpecFile::load_from(&path),
        Err(ConfigError::Flag(_))
    ));
}
