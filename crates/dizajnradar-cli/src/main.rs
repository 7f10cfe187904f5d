use std::process;

use chrono::Local;
use clap::{Parser, ValueEnum};
use log::LevelFilter;

use dizajnradar::aggregate::scrape_all;
use dizajnradar::fetch::HttpFetcher;
use dizajnradar::pipeline::{self, PipelineConfig};
use dizajnradar::store::{Store, StoreConfig, preview_table};

#[derive(Parser)]
#[command(name = "dizajnradar")]
#[command(about = "Aggregates design competition listings into a Supabase table", long_about = None)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[arg(long, help = "Preview the result instead of writing to the store")]
    dry_run: bool,

    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value = "text",
        help = "Preview format when not writing to the store"
    )]
    format: OutputFormat,

    #[arg(
        long,
        value_name = "DAYS",
        help = "Drop records whose deadline is more than DAYS in the past"
    )]
    stale_days: Option<i64>,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn serialize_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Error serializing to JSON: {}", e);
            process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    let fetcher = HttpFetcher::new().unwrap_or_else(|e| {
        log::error!("Error creating HTTP client: {}", e);
        process::exit(1);
    });

    let today = Local::now().date_naive();
    let all = scrape_all(&fetcher, today).await;
    if all.is_empty() {
        log::error!("No competitions found across any source");
        process::exit(1);
    }

    let mut config = PipelineConfig::default();
    if let Some(days) = cli.stale_days {
        config.stale_after_days = days;
    }
    let records = pipeline::run(all, today, &config);

    let store_config = StoreConfig::from_env();
    match store_config.credentials() {
        Some((url, key)) if !cli.dry_run => {
            let store = Store::new(url, key).unwrap_or_else(|e| {
                log::error!("Error creating store client: {}", e);
                process::exit(1);
            });
            match store.replace_all(&records).await {
                Ok(inserted) => log::info!("Inserted {} unique competitions", inserted),
                Err(e) => {
                    log::error!("Store write failed: {}", e);
                    process::exit(1);
                }
            }
        }
        _ => {
            if store_config.credentials().is_none() {
                log::warn!("No store credentials configured — dry run");
            }
            match cli.format {
                OutputFormat::Text => print!("{}", preview_table(&records)),
                OutputFormat::Json => serialize_json(&records),
            }
        }
    }
}
