//! Slurmify entry point.

use clap::Parser;
use slurmify::audit::AuditLogger;
use slurmify::cli::Cli;
use slurmify::config::{Config, Settings};
use slurmify::error::SlurmifyError;
use slurmify::runner;

use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("Slurmify {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[slurmify] Fatal Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), SlurmifyError> {
    // Load config layers, command line last
    let cwd = std::env::current_dir().ok();
    let mut settings = Settings::load(cwd.as_deref(), cli.config.as_deref())?;
    settings.merge(cli.overrides());
    let config = Config::resolve(cli.input, settings.clone())?;

    // Audit logging (if enabled); never fatal
    let mut audit = settings
        .audit_path()
        .and_then(|path| match AuditLogger::open(path) {
            Ok(logger) => Some(logger),
            Err(e) => {
                eprintln!(
                    "[slurmify] Warning: could not open audit log {}: {}",
                    path.display(),
                    e
                );
                None
            }
        });

    let summary = runner::run(&config, audit.as_mut())?;

    println!(
        "[slurmify] Generated {} script(s) in {}/",
        summary.generated,
        config.output_dir.display()
    );
    println!(
        "[slurmify] Logs destination in {}/",
        config.logs_dir.display()
    );
    Ok(())
}
