mod args;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use args::{Args, Command, SkippedAction};
use prscan::alerts::TracingAlertSink;
use prscan::config::AppConfig;
use prscan::logging::{init_logging, LoggingConfig};
use prscan::skipped::SkipStateCodec;
use prscan::types::ScanRun;
use prscan::ReportingEngine;

fn main() -> Result<()> {
    let args = Args::parse();

    let logging = LoggingConfig {
        level: if args.verbose { Level::DEBUG } else { Level::INFO },
        format: args.log_format,
        ..LoggingConfig::default()
    };
    init_logging(logging).map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path.clone()),
        None => AppConfig::load(),
    }
    .context("failed to load configuration")?;

    match args.command {
        Command::Plan { input } => {
            let run = ScanRun::load(&input)
                .with_context(|| format!("failed to load run description {}", input.display()))?;

            let engine = ReportingEngine::from_config(&config)?;
            let mut alerts = config.alerts.queue();
            let plan = engine.plan(&run, &mut alerts);

            println!("{}", serde_json::to_string_pretty(&plan)?);

            let mut sink = TracingAlertSink {
                channel: config.alerts.channel.clone(),
            };
            let sent = alerts.flush_to(&mut sink)?;
            tracing::debug!(sent, "Alerts flushed");
        }
        Command::Skipped {
            action: SkippedAction::Parse { input },
        } => {
            let body = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let codec = config.skipped_files.codec();
            if let Some(report) = codec.decode(&body) {
                for file in report.files() {
                    println!("{}", file);
                }
            } else {
                tracing::info!("No skipped-files section found in {}", input.display());
            }
        }
    }

    Ok(())
}
