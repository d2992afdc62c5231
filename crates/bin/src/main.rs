//! GICS CLI binary.
//!
//! Classifies sector / industry / sub-industry assignments against the GICS
//! hierarchy, looks up index peers and fetches company fundamentals.

mod fetch;
mod report;

use clap::{Parser, Subcommand, ValueEnum};
use gics::{Gics, GicsSector, HierarchyLevel, TaxonomyError};
use gics_data::{ApiKeyConfig, DataConfig, DemoSource, FmpClient, FundamentalsSource, Statement};
use serde_json::json;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gics")]
#[command(about = "GICS classification, peer lookup and fundamentals", long_about = None)]
#[command(version)]
struct Cli {
    /// GICS hierarchy CSV [default: $GICS_HIERARCHY or the bundled table]
    #[arg(long, global = true)]
    hierarchy: Option<PathBuf>,

    /// Constituents CSV [default: $GICS_CONSTITUENTS or the bundled S&P 500 list]
    #[arg(long, global = true)]
    constituents: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a sector / industry / sub-industry assignment
    Classify {
        /// Sector name, shorthand ("it", "staples") or code ("45")
        #[arg(long)]
        sector: String,

        /// Industry
        #[arg(long)]
        industry: Option<String>,

        /// Sub-industry; fills in the industry when that is omitted
        #[arg(long)]
        sub_industry: Option<String>,

        /// Also require the industry to sit under the sector
        #[arg(long)]
        strict: bool,
    },

    /// Check whether an industry sits under a sector
    BelongsTo {
        /// Industry
        industry: String,

        /// Sector name, shorthand or code
        sector: String,
    },

    /// Show index members with their common names and classifications
    Equity {
        /// Ticker symbols
        #[arg(required = true)]
        symbols: Vec<String>,
    },

    /// List index members sharing a symbol's classification
    Peers {
        /// Ticker symbol
        symbol: String,

        /// Level to compare at (sector, industry, sub-industry)
        #[arg(long, default_value = "sub-industry")]
        level: HierarchyLevel,
    },

    /// List sectors, or one sector's industries and sub-industries
    Sectors {
        /// Sector to expand
        #[arg(long)]
        sector: Option<String>,
    },

    /// Fetch fundamentals from Financial Modeling Prep
    Fundamentals {
        /// Ticker symbols
        #[arg(required = true)]
        symbols: Vec<String>,

        /// Dataset (overview, balance-sheet, income, cash-flow)
        #[arg(long, default_value = "overview")]
        statement: Statement,

        /// Serve saved responses instead of calling the API
        #[arg(long)]
        demo: bool,

        /// API key, or the name of an entry in the key file
        #[arg(long)]
        api_key: Option<String>,

        /// JSON key file to read the key from
        #[arg(long)]
        key_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = DataConfig::from_env();
    if let Some(path) = cli.hierarchy {
        config.hierarchy_path = path;
    }
    if let Some(path) = cli.constituents {
        config.constituents_path = path;
    }
    let format = cli.format;

    match cli.command {
        Commands::Classify {
            sector,
            industry,
            sub_industry,
            strict,
        } => {
            let gics = Gics::from_config(&config)?;
            let sector = gics.resolve_sector(&sector);
            let industry = industry.as_deref();
            let sub_industry = sub_industry.as_deref();

            let classification = if strict {
                gics.classify_strict(&sector, industry, sub_industry)?
            } else {
                gics.classify(&sector, industry, sub_industry)?
            };
            report::classification(&gics, &classification, format)?;
        }
        Commands::BelongsTo { industry, sector } => {
            let gics = Gics::from_config(&config)?;
            let sector = gics.resolve_sector(&sector);
            let belongs = gics.belongs_to(&industry, &sector);

            match format {
                Format::Json => report::json(&json!({
                    "industry": industry,
                    "sector": sector,
                    "belongs_to": belongs,
                }))?,
                Format::Text if belongs => println!("{} belongs to {}", industry, sector),
                Format::Text => println!("{} does not belong to {}", industry, sector),
            }
        }
        Commands::Equity { symbols } => {
            let gics = Gics::from_config(&config)?;
            let equities = symbols
                .iter()
                .map(|symbol| {
                    let symbol = symbol.trim().to_uppercase();
                    gics.equity(&symbol)
                        .ok_or(TaxonomyError::UnknownSymbol(symbol))
                })
                .collect::<Result<Vec<_>, _>>()?;
            report::equities(&equities, format)?;
        }
        Commands::Peers { symbol, level } => {
            let gics = Gics::from_config(&config)?;
            let symbol = symbol.trim().to_uppercase();
            let equity = gics
                .equity(&symbol)
                .ok_or_else(|| TaxonomyError::UnknownSymbol(symbol.clone()))?;
            let peers = gics.peers(&symbol, level).unwrap_or_default();
            report::peers(&gics, &equity, level, &peers, format)?;
        }
        Commands::Sectors { sector } => {
            let gics = Gics::from_config(&config)?;
            match sector {
                Some(sector) => {
                    let sector = gics.resolve_sector(&sector);
                    // Rejects unknown sectors with the list of valid ones.
                    gics.classify(&sector, None, None)?;
                    report::sector_tree(&gics, &sector, format)?;
                }
                None => report::sectors(&gics, format)?,
            }
        }
        Commands::Fundamentals {
            symbols,
            statement,
            demo,
            api_key,
            key_file,
        } => {
            let source: Box<dyn FundamentalsSource> = if demo {
                Box::new(DemoSource::from_path(&config.fixtures_path)?)
            } else {
                let mut keys = ApiKeyConfig::new();
                if let Some(key) = api_key {
                    keys = keys.with_key(key);
                }
                if let Some(file) = key_file {
                    keys = keys.with_key_file(file);
                }
                Box::new(FmpClient::from_config(&keys)?)
            };

            info!(source = source.name(), %statement, symbols = symbols.len(), "fetching fundamentals");
            let records = fetch::fundamentals(source.as_ref(), statement, &symbols).await?;
            report::fundamentals(source.name(), &records, format)?;
        }
    }

    Ok(())
}

/// Log to stderr so `--format json` output stays clean.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Two-digit code for an official sector name, if it has one.
fn sector_code(name: &str) -> Option<u8> {
    GicsSector::parse(name)
        .filter(|s| s.name() == name)
        .map(|s| s.code())
}
