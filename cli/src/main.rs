use anyhow::Result;
use clap::Parser;
use docfind::{run, Cli};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<ExitCode> {
    // stdout carries the JSON payload
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();
    let stdout = io::stdout();
    let code = run(&cli, &mut stdout.lock(), io::stdin().lock())?;
    Ok(ExitCode::from(code))
}
