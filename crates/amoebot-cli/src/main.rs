//! amoebot-report binary
//!
//! Prints circuit and analysis reports for amoebot model files.

use std::process::ExitCode;

use amoebot_cli::{execute, usage, Command, ReportConfig, ReportError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn run() -> Result<String, ReportError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;
    let config = ReportConfig::from_env()?;
    tracing::debug!(?command, ?config, "starting");
    execute(&command, &config)
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "amoebot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run() {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(e, ReportError::Usage(_)) {
                eprintln!();
                eprintln!("{}", usage());
            }
            ExitCode::from(e.exit_code())
        }
    }
}
