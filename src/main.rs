use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error};

use ari_probe::{
    config::{LoggingConfig, Overrides, Settings},
    telemetry, AriResolver, Error, RenewalChecker, ReqwestFetcher,
};

/// Query ACME Renewal Information for PEM certificates
#[derive(Parser, Debug)]
#[command(name = "ari-probe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// ACME server directory URL
    #[arg(long = "acme", value_name = "URL")]
    acme: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Configuration file path
    #[arg(short = 'c', long = "config", env = "ARI_CONFIG")]
    config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long = "timeout", value_name = "SECS")]
    timeout: Option<u64>,

    /// Emit JSON log lines
    #[arg(long = "json-logs")]
    json_logs: bool,

    /// PEM certificate files to check
    #[arg(value_name = "CERT")]
    certificates: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            match telemetry::init_logging(&LoggingConfig::default()) {
                Ok(()) => error!(error = %err, "Invalid configuration"),
                Err(log_err) => {
                    eprintln!("{}", log_err);
                    eprintln!("Invalid configuration: {:#}", err);
                }
            }
            return exit_code(&err);
        }
    };

    if let Err(err) = telemetry::init_logging(&settings.logging) {
        eprintln!("{}", err);
        return ExitCode::from(err.kind().exit_code());
    }

    match run(&settings, &cli.certificates).await {
        Ok(count) => {
            debug!(count, "All certificates checked");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(url = %settings.acme.directory_url, error = %err, "Error processing certificates");
            exit_code(&err)
        }
    }
}

/// Load settings and apply command-line overrides
fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;

    settings.apply_overrides(&Overrides {
        directory_url: cli.acme.clone(),
        timeout_secs: cli.timeout,
        verbose: cli.verbose,
        structured: cli.json_logs,
    });
    settings.validate()?;

    Ok(settings)
}

async fn run(settings: &Settings, certificates: &[PathBuf]) -> Result<usize> {
    let fetcher = ReqwestFetcher::new()?;
    let resolver = AriResolver::new(fetcher, settings.resolver_config());
    let checker = RenewalChecker::new(resolver);

    let count = checker.check_all(certificates, &mut io::stdout()).await?;
    Ok(count)
}

fn exit_code(err: &anyhow::Error) -> ExitCode {
    ExitCode::from(exit_status(err))
}

/// Exit status for `err`, 1 when it is not a crate error
fn exit_status(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<Error>()
        .map(|e| e.kind().exit_code())
        .unwrap_or(1)
}
