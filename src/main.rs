//! Commodity Rates - Main Entry Point
//!
//! Fetches commodity rates against a base asset and prints them inverted.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use commodity_rates::{
    csv_output::save_rates_csv, FetcherConfig, RateFetcher, RateRequest, API_BASE_URL,
    API_KEY_ENV, DEFAULT_ENDPOINT,
};

/// Commodity Rates - Fetch inverted commodity rates
#[derive(Parser, Debug)]
#[command(name = "commodity-rates")]
#[command(about = "Fetch commodity rates from commodities-api.com and invert them")]
struct Args {
    /// Base currency or asset (e.g. USD, BTC)
    #[arg(short, long)]
    base: String,

    /// Commodity symbols, comma separated (e.g. COFFEE,LUMBER,XAU)
    #[arg(short, long, value_delimiter = ',', required = true)]
    symbols: Vec<String>,

    /// API endpoint
    #[arg(short, long, default_value = DEFAULT_ENDPOINT, conflicts_with = "date")]
    endpoint: String,

    /// Historical date (YYYY-MM-DD)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// API base URL
    #[arg(long, default_value = API_BASE_URL)]
    base_url: String,

    /// API access key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    access_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Also write the inverted rates to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = FetcherConfig {
        base_url: args.base_url,
        access_key: args.access_key,
        timeout: args.timeout.map(Duration::from_secs),
    };
    let fetcher = RateFetcher::new(config)?;

    let request = match args.date {
        Some(date) => RateRequest::historical(&args.base, &args.symbols, date),
        None => RateRequest::new(&args.base, &args.symbols).with_endpoint(&args.endpoint),
    };

    info!(
        base = %request.base,
        symbols = %request.symbols_param(),
        endpoint = %request.endpoint,
        "fetching rates"
    );
    let envelope = fetcher.fetch(&request).await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&envelope).context("Failed to serialize response")?
    );

    if let Some(csv_path) = &args.csv {
        match envelope.rates() {
            Some(rates) => {
                save_rates_csv(csv_path, rates)?;
                info!(path = ?csv_path, count = rates.len(), "saved rates");
            }
            None => info!("response has no rates, skipping CSV output"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;

    #[test]
    fn test_args_debug_assert() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_access_key_reads_env_var() {
        let cmd = Args::command();
        let arg = cmd
            .get_arguments()
            .find(|a| a.get_id() == "access_key")
            .unwrap();
        assert_eq!(arg.get_env(), Some(OsStr::new(API_KEY_ENV)));
    }

    #[test]
    fn test_parse_symbols_and_date() {
        let args = Args::try_parse_from([
            "commodity-rates",
            "--base",
            "BTC",
            "--symbols",
            "COFFEE,XAU",
            "--date",
            "2024-01-15",
        ])
        .unwrap();
        assert_eq!(args.symbols, vec!["COFFEE", "XAU"]);
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(args.endpoint, DEFAULT_ENDPOINT);
    }
}
