use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use asset_sync::{Reconciler, SqliteBarStore, providers::build_source_client};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use market_data_ingestor::models::asset::AssetClass;
use shared_utils::{config::AppConfig, logging::init_tracing};

#[derive(Parser)]
#[command(version, about = "Asset Sync CLI: maintain the local daily-bar cache")]
struct Cli {
    /// Settings file (defaults to $CONFIG_FILE_PATH or config/settings.toml).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Overrides `database_url` from the settings.
    #[arg(long, global = true, value_name = "PATH")]
    database_url: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Apply pending schema migrations.
    Migrate,
    /// Print the latest cached date for a symbol.
    Latest {
        symbol: String,
        /// equity | stock | us_equity | crypto
        asset_class: AssetClass,
    },
    /// Bring the cache up to date for a range without scoring.
    Sync(RangeArgs),
    /// Print cached bars for a range.
    Show {
        #[command(flatten)]
        range: RangeArgs,
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct RangeArgs {
    symbol: String,
    /// equity | stock | us_equity | crypto
    asset_class: AssetClass,
    /// Inclusive start date (YYYY-MM-DD).
    start: NaiveDate,
    /// Inclusive end date (YYYY-MM-DD).
    end: NaiveDate,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info");
    let cli = Cli::parse();

    let mut cfg = AppConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.database_url {
        cfg.database_url = url;
    }
    let store = SqliteBarStore::open(cfg.database_url.clone())?;

    match cli.cmd {
        Cmd::Migrate => {
            println!("migrations applied to {}", store.database_url());
        }
        Cmd::Latest {
            symbol,
            asset_class,
        } => match store.try_latest_date(&symbol, asset_class)? {
            Some(d) => println!("{symbol} ({asset_class}): {d}"),
            None => println!("{symbol} ({asset_class}): no cached bars"),
        },
        Cmd::Sync(RangeArgs {
            symbol,
            asset_class,
            start,
            end,
        }) => {
            let source = build_source_client(&cfg)?;
            let reconciler = Reconciler::new(Arc::new(store.clone()), source);
            let r = reconciler.reconcile(&symbol, asset_class, start, end).await?;

            println!(
                "{symbol} ({asset_class}) {start}..={end}: {} bars, fetched {}, inserted {}{}",
                r.series.len(),
                r.fetched,
                r.inserted,
                if r.source_failed {
                    " (source unavailable, cache only)"
                } else {
                    ""
                }
            );
            println!("cached rows: {}", store.count(&symbol, asset_class)?);
        }
        Cmd::Show {
            range:
                RangeArgs {
                    symbol,
                    asset_class,
                    start,
                    end,
                },
            json,
        } => {
            let series = store.try_read_range(&symbol, asset_class, start, end)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&series.bars)?);
            } else {
                println!(
                    "{:<10} {:>12} {:>12} {:>12} {:>12} {:>14} {:>8}",
                    "date", "open", "high", "low", "close", "volume", "trades"
                );
                for b in &series.bars {
                    println!(
                        "{:<10} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>14.2} {:>8}",
                        b.date, b.open, b.high, b.low, b.close, b.volume, b.trade_count
                    );
                }
            }
        }
    }

    Ok(())
}
