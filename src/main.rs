use std::io;
use std::process::ExitCode;

use argflags::cli::{self, Cli};
use clap::Parser;

fn main() -> ExitCode {
    argflags::logging::init_tracing();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();

    match cli::run(&cli, &mut stdout) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
