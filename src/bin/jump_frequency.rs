use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

use jump_frequency::config::AnalysisConfig;
use jump_frequency::report;

/// Formats log timestamps in the system's local timezone instead of UTC.
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Local::now();
        write!(w, "{}", now.format("%Y-%m-%dT%H:%M:%S%.3f"))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Frequency of single-day price jumps", long_about = None)]
struct Args {
    /// YAML config file (defaults to ./jump_frequency.yaml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Price history CSV, oldest row first
    #[arg(long)]
    input: Option<PathBuf>,

    /// Chart image path (SVG)
    #[arg(long, conflicts_with = "no_chart")]
    output: Option<PathBuf>,

    /// Print a text histogram instead of writing a chart image
    #[arg(long)]
    no_chart: bool,

    /// Asset name used in the report
    #[arg(long)]
    asset: Option<String>,
}

impl Args {
    fn apply(self, cfg: &mut AnalysisConfig) {
        if let Some(input) = self.input {
            cfg.input = input;
        }
        if let Some(output) = self.output {
            cfg.output = Some(output);
        }
        if self.no_chart {
            cfg.output = None;
        }
        if let Some(asset) = self.asset {
            cfg.asset = asset;
        }
    }
}

fn main() -> ExitCode {
    // RUST_LOG overrides the default "info" level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_timer(LocalTimer)
        .init();

    let args = Args::parse();

    // Fail fast on a missing or invalid config.
    let mut cfg = match AnalysisConfig::load(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            error!("❌ Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    args.apply(&mut cfg);

    info!("🚀 Counting {} daily jumps...", cfg.asset);

    let table = match jump_frequency::run(&cfg) {
        Ok(t) => t,
        Err(e) => {
            error!("❌ Analysis failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for line in report::summary_lines(&table, &cfg.asset) {
        println!("{}", line);
    }
    if cfg.output.is_none() {
        println!("\n{}", report::text_histogram(&table, &cfg.asset));
    }

    ExitCode::SUCCESS
}
