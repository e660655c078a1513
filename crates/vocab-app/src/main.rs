use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vocab_config::paths::PathsConfig;
use vocab_config::{Config, ConfigError};

mod pipeline;


use self::pipeline::RunReport;

#[derive(Parser, Debug)]
#[command(
    name = "vocab-export",
    about = "Export e-reader vocabulary lookups with dictionary definitions to an Anki-ready CSV"
)]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Device vocabulary database (e.g. vocab.db)
    #[arg(long)]
    db: Option<PathBuf>,

    /// JSON dictionary mapping words to definitions
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Destination CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// Config file (if any) overlaid with command line values
    fn into_config(self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::new(),
        };

        config.paths.overlay(PathsConfig {
            source_db: self.db,
            dictionary: self.dictionary,
            output: self.output,
        });

        if let Some(level) = self.log_level {
            config.log.level = level;
        }

        Ok(config)
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},sqlx=warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .init();
}

async fn run(config: Config) -> anyhow::Result<RunReport> {
    let paths = config.paths.resolve()?;
    let report = pipeline::run(&paths)
        .await
        .context("Vocabulary export failed")?;
    Ok(report)
}

/// Log how the run ended
fn log_outcome(result: &anyhow::Result<RunReport>) {
    match result {
        Ok(report) => tracing::info!(
            "Output saved to {} ({} of {} lookups written, {} without a definition)",
            report.output.display(),
            report.written,
            report.extracted,
            report.dropped
        ),
        Err(e) => tracing::error!("{e:#}"),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = Cli::parse().into_config();

    let level = config
        .as_ref()
        .map(|config| config.log.level.as_str())
        .unwrap_or("info");
    init_tracing(level);

    let result = match config {
        Ok(config) => run(config).await,
        Err(e) => Err(e.into()),
    };

    log_outcome(&result);
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
