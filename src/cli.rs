//! `argflags` command: parse arguments against a spec file and print a JSON report.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use crate::config::SpecFile;
use crate::flags::{self, Flag, FlagData, FlagError, FlagType, Outcome};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "argflags",
    version,
    about = "Parse arguments against a flag spec file and print the result as JSON"
)]
pub struct Cli {
    /// Flag spec file (defaults to ~/.config/argflags/flags.toml)
    #[arg(long, value_name = "PATH")]
    pub spec: Option<PathBuf>,

    /// Override the flag prefix from the spec file
    #[arg(long, value_name = "PREFIX", allow_hyphen_values = true)]
    pub prefix: Option<String>,

    /// Override the name/value separator from the spec file
    #[arg(long, value_name = "SEP", allow_hyphen_values = true)]
    pub separator: Option<String>,

    /// Skip unknown flags instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// Print the flag listing and exit
    #[arg(long)]
    pub describe: bool,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,

    /// Arguments to parse, after `--`
    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// How a run ended, when it got as far as parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    ParseFailed,
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Success => ExitCode::SUCCESS,
            RunStatus::ParseFailed => ExitCode::from(1),
        }
    }
}

/// Final state of one flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlagReport {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FlagType,
    pub triggered: bool,
    pub value: FlagData,
}

impl From<&Flag> for FlagReport {
    fn from(flag: &Flag) -> Self {
        Self {
            name: flag.name().to_string(),
            kind: flag.kind(),
            triggered: flag.triggered,
            value: flag.data().clone(),
        }
    }
}

/// JSON document printed by the command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(flatten)]
    pub outcome: Outcome,
    pub flags: Vec<FlagReport>,
    pub flagless: Vec<String>,
}

impl Report {
    pub fn new(parser: &flags::Parser, result: &Result<(), FlagError>) -> Self {
        Self {
            outcome: Outcome::from(result),
            flags: parser.registry().flags().map(FlagReport::from).collect(),
            flagless: parser.flagless().to_vec(),
        }
    }
}

fn log_trigger(flag: &mut Flag) -> Result<(), FlagError> {
    tracing::info!(flag = %flag.name(), value = ?flag.data(), "flag triggered");
    Ok(())
}

fn load_spec(cli: &Cli) -> anyhow::Result<SpecFile> {
    match &cli.spec {
        Some(path) => SpecFile::load_from(path)
            .with_context(|| format!("could not load spec file {}", path.display())),
        None => SpecFile::load().context("could not load default spec file"),
    }
}

/// Build a parser from the spec file and CLI overrides.
pub fn build_parser(cli: &Cli) -> anyhow::Result<flags::Parser> {
    let spec = load_spec(cli)?;

    let mut options = spec.options.clone();
    if let Some(prefix) = &cli.prefix {
        options.flag_prefix = prefix.clone();
    }
    if let Some(separator) = &cli.separator {
        options.separator = separator.clone();
    }
    if cli.lenient {
        options.strict_flags = false;
    }

    let mut parser = flags::Parser::new(options).context("invalid parser options")?;
    for def in spec.flag_defs() {
        parser.register(def.on_trigger(log_trigger))?;
    }
    Ok(parser)
}

/// Run the command, writing the listing or the JSON report to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<RunStatus> {
    let mut parser = build_parser(cli)?;

    if cli.describe {
        out.write_all(parser.describe().as_bytes())?;
        return Ok(RunStatus::Success);
    }

    let result = parser.parse(&cli.args).and_then(|()| parser.call());
    let report = Report::new(&parser, &result);

    if cli.pretty {
        serde_json::to_writer_pretty(&mut *out, &report)?;
    } else {
        serde_json::to_writer(&mut *out, &report)?;
    }
    writeln!(out)?;

    Ok(match result {
        Ok(()) => RunStatus::Success,
        Err(e) => {
            tracing::warn!(error = %e, "parse failed");
            RunStatus::ParseFailed
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn cli(spec: &tempfile::NamedTempFile, args: &[&str]) -> Cli {
        let mut argv = vec!["argflags", "--spec", spec.path().to_str().unwrap()];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    const SPEC: &str = r#"
        [[flags]]
        name = "count"
        type = "number"
        default = 1

        [[flags]]
        name = "quiet"
        type = "bool"
    "#;

    #[test]
    fn trailing_args_require_double_dash() {
        let spec = spec_file(SPEC);
        let parsed = cli(&spec, &["--", "-count=4", "file"]);
        assert_eq!(parsed.args, vec!["-count=4", "file"]);
    }

    #[test]
    fn run_reports_values_and_flagless() {
        let spec = spec_file(SPEC);
        let mut out = Vec::new();
        let status = run(&cli(&spec, &["--", "-count=4", "file"]), &mut out).unwrap();
        assert_eq!(status, RunStatus::Success);

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["flags"][0]["value"], 4.0);
        assert_eq!(json["flags"][1]["triggered"], false);
        assert_eq!(json["flagless"][0], "file");
    }

    #[test]
    fn run_reports_failure() {
        let spec = spec_file(SPEC);
        let mut out = Vec::new();
        let status = run(&cli(&spec, &["--", "-nope"]), &mut out).unwrap();
        assert_eq!(status, RunStatus::ParseFailed);

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["flag_id"], "nope");
        assert_eq!(json["error"], "invalid flag id used");
    }

    #[test]
    fn overrides_apply_on_top_of_spec() {
        let spec = spec_file(SPEC);
        let parser = build_parser(&cli(&spec, &["--prefix=--", "--lenient"])).unwrap();
        assert_eq!(parser.options().flag_prefix, "--");
        assert!(!parser.options().strict_flags);
    }

    #[test]
    fn describe_uses_effective_prefix() {
        let spec = spec_file(SPEC);
        let mut out = Vec::new();
        run(&cli(&spec, &["--prefix=+", "--describe"]), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "+count\t\t\n+quiet\t\t\n");
    }
}
