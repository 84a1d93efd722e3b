//! `eprel-scraper` command-line entry point.
//!
//! ```text
//! eprel-scraper [--debug] [--headless] [--config <path>] [--output <path>]
//! ```
//!
//! Requires a running WebDriver endpoint (chromedriver on
//! `http://localhost:9515` unless configured otherwise).

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::EnvFilter;

use eprel_scraper::{Error, Result, Scraper, ScraperConfig};

// ============================================================================
// Types
// ============================================================================

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
struct Args {
    debug: bool,
    headless: bool,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl Args {
    /// Parse command-line arguments.
    fn parse() -> Result<Self> {
        Self::from_args(std::env::args().skip(1))
    }

    fn from_args(raw: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut args = Self::default();
        let mut raw = raw.into_iter();

        while let Some(arg) = raw.next() {
            match arg.as_str() {
                "--debug" => args.debug = true,
                "--headless" => args.headless = true,
                "--config" => args.config = Some(value_of(&arg, raw.next())?),
                "--output" => args.output = Some(value_of(&arg, raw.next())?),
                other => return Err(Error::config(format!("unknown argument '{other}'"))),
            }
        }

        Ok(args)
    }
}

fn value_of(flag: &str, value: Option<String>) -> Result<PathBuf> {
    value
        .map(PathBuf::from)
        .ok_or_else(|| Error::config(format!("{flag} requires a path")))
}

// ============================================================================
// Functions
// ============================================================================

/// Initialize tracing/logging. `RUST_LOG` takes precedence.
fn init_logging(debug: bool) {
    let default = if debug {
        "eprel_scraper=debug"
    } else {
        "eprel_scraper=info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_config(args: &Args) -> Result<ScraperConfig> {
    let mut config = match &args.config {
        Some(path) => ScraperConfig::from_file(path)?,
        None => ScraperConfig::default(),
    };

    if args.headless {
        config.browser.headless = true;
    }
    if let Some(output) = &args.output {
        config.output = output.clone();
    }

    Ok(config)
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    info!(
        start = %config.start_url,
        output = %config.output.display(),
        headless = config.browser.headless,
        "Starting scrape"
    );

    let summary = Scraper::new(config)?.run().await?;
    info!(
        pages = summary.pages,
        records = summary.records,
        "Scrape finished"
    );

    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("[ERROR] {e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(args.debug);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR] {e}");
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
