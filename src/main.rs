use aks_audit::{cli::Cli, config};
use clap::Parser;
use std::process;

/// Exit code when the run completed but controls failed
const EXIT_CONTROLS_FAILED: i32 = 2;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(EXIT_CONTROLS_FAILED),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run() -> anyhow::Result<bool> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    // Load configuration
    let config = config::load_config(cli.config.as_deref())?;

    Ok(aks_audit::run_command(cli.command, config)?)
}
