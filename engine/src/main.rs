// Command-line front end: CSV export in, indicator table out on stdout.
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use engine::config::PipelineSettings;
use engine::data::CsvFileSource;
use engine::pipeline::{export, PipelineOrchestrator};
use shared::models::LookbackPeriod;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Csv,
}

#[derive(Parser, Debug)]
#[command(
    name = "dashboard-engine",
    about = "Computes SMA, RSI and MACD histogram with Buy/Sell/Hold signals for a daily price CSV"
)]
struct Cli {
    /// Provider CSV export (Date,Open,High,Low,Close[,Adj Close][,Volume])
    csv_path: PathBuf,

    /// Ticker label for the output; defaults to the file name
    #[arg(short, long)]
    symbol: Option<String>,

    /// Lookback window: 30d, 90d, 180d, 1y or 2y
    #[arg(short, long, default_value = "90d", value_parser = LookbackPeriod::from_str)]
    period: LookbackPeriod,

    /// JSON file with indicator periods and RSI thresholds
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

impl Cli {
    fn symbol(&self) -> String {
        self.symbol.clone().unwrap_or_else(|| {
            self.csv_path
                .file_stem()
                .map(|s| s.to_string_lossy().to_uppercase())
                .unwrap_or_else(|| "UNKNOWN".to_string())
        })
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => PipelineSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => PipelineSettings::default(),
    };

    let symbol = cli.symbol();
    info!(symbol = %symbol, period = %cli.period, path = %cli.csv_path.display(), "Starting indicator pipeline");

    let source = CsvFileSource::new(&cli.csv_path);
    let table = PipelineOrchestrator::new(&settings)?.run_source(&source, &symbol, cli.period)?;

    let stdout = io::stdout().lock();
    match cli.format {
        OutputFormat::Json => export::write_json(&table, stdout)?,
        OutputFormat::Csv => export::write_csv(&table, stdout)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout only carries the table.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("dashboard-engine").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["data/aapl.csv"]).unwrap();
        assert_eq!(cli.symbol(), "AAPL");
        assert_eq!(cli.period, LookbackPeriod::Days90);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_all_options() {
        let cli = parse(&[
            "--symbol", "RELIANCE.NS", "prices.csv", "--period", "2y", "--format", "csv", "--config", "s.json",
        ])
        .unwrap();
        assert_eq!(cli.symbol(), "RELIANCE.NS");
        assert_eq!(cli.csv_path, PathBuf::from("prices.csv"));
        assert_eq!(cli.period, LookbackPeriod::Year2);
        assert_eq!(cli.format, OutputFormat::Csv);
        assert_eq!(cli.config, Some(PathBuf::from("s.json")));
    }

    #[test]
    fn test_short_flags() {
        let cli = parse(&["-s", "MSFT", "-p", "30d", "-f", "csv", "x.csv"]).unwrap();
        assert_eq!(cli.symbol(), "MSFT");
        assert_eq!(cli.period, LookbackPeriod::Days30);
        assert_eq!(cli.format, OutputFormat::Csv);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["a.csv", "--period", "7d"]).is_err());
        assert!(parse(&["a.csv", "--format", "xml"]).is_err());
        assert!(parse(&["a.csv", "--symbol"]).is_err());
        assert!(parse(&["a.csv", "b.csv"]).is_err());
        assert!(parse(&["a.csv", "--verbose"]).is_err());
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
