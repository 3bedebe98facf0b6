use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;

use agrolytics_cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    agrolytics_observability::init_with(cli.log_format);

    // The only clock read; every command in this run sees the same instant.
    let now = Utc::now();

    match agrolytics_cli::run(&cli, now) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = ?err, "command failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
