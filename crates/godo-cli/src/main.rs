mod commands;
mod settings;

use anyhow::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GODO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let parsed = godo_core::args::parse(&args);
    debug!("parsed arguments:\n{parsed}");

    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let stdout = std::io::stdout();
    commands::run(&parsed, &cwd, &mut stdout.lock())
}
