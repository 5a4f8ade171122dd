use std::{path::PathBuf, sync::Arc};

use anyhow::{Result, anyhow};
use asset_sync::{SqliteBarStore, providers::build_source_client};
use chrono::NaiveDate;
use clap::Parser;
use market_data_ingestor::models::asset::AssetClass;
use shared_utils::{config::AppConfig, logging::init_tracing};
use system_manager::{
    ScoringPipeline,
    collaborators::{LogNotifier, NeutralSentiment, StubAccountManager},
    decision::DecisionMaker,
    job::{JobRequest, TradingJob},
};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info, warn};
use trend_analysis::TrendConfig;

#[derive(Parser)]
#[command(version, about = "Score a symbol's trend from cached and freshly fetched daily bars")]
struct Cli {
    /// Trading symbol (e.g. AAPL, BTC/USD).
    symbol: String,
    /// stock | equity | us_equity | crypto
    asset_class: AssetClass,
    /// Inclusive start date (YYYY-MM-DD).
    start: NaiveDate,
    /// Inclusive end date (YYYY-MM-DD).
    end: NaiveDate,

    /// Short SMA window (defaults to the configured value).
    #[arg(long)]
    short_window: Option<usize>,
    /// Long SMA window (defaults to the configured value).
    #[arg(long)]
    long_window: Option<usize>,
    /// Slope window over the strength series (defaults to the configured value).
    #[arg(long)]
    trend_window: Option<usize>,

    /// Settings file (defaults to $CONFIG_FILE_PATH or config/settings.toml).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the per-bar analysis table as JSON.
    #[arg(long)]
    table: bool,

    /// Re-run on a six-field cron schedule ("sec min hour dom mon dow")
    /// until interrupted.
    #[arg(long, value_name = "EXPR")]
    cron: Option<String>,
}

async fn run_once(job: &TradingJob, req: &JobRequest, table: bool) -> Result<()> {
    let report = job.run(req).await?;
    if table {
        println!("{}", serde_json::to_string_pretty(&report.samples)?);
    }
    println!(
        "{} ({}) {}..={}: score {} -> {:?}",
        req.symbol, req.asset_class, req.start, req.end, report.score, report.decision.action
    );
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info");
    let cli = Cli::parse();

    let cfg = AppConfig::load(cli.config.as_deref())?;
    let trend = TrendConfig::new(
        cli.short_window.unwrap_or(cfg.trend.short_window),
        cli.long_window.unwrap_or(cfg.trend.long_window),
        cli.trend_window.unwrap_or(cfg.trend.trend_window),
    )?;

    let store = SqliteBarStore::open_or_degrade(cfg.database_url.clone());
    let source = build_source_client(&cfg)?;
    let pipeline = ScoringPipeline::from_parts(Arc::new(store), source);

    let job = Arc::new(TradingJob::new(
        pipeline,
        trend,
        DecisionMaker::new(cfg.decision),
        Arc::new(StubAccountManager::default()),
        Arc::new(NeutralSentiment),
        Arc::new(LogNotifier),
    ));
    let req = JobRequest {
        symbol: cli.symbol,
        asset_class: cli.asset_class,
        start: cli.start,
        end: cli.end,
    };

    info!(symbol = %req.symbol, asset_class = %req.asset_class, "starting");

    let Some(expr) = cli.cron else {
        return run_once(&job, &req, cli.table).await;
    };

    // First run right away, then on schedule.
    if let Err(e) = run_once(&job, &req, cli.table).await {
        error!(error = ?e, "job failed");
    }

    let mut sched = JobScheduler::new().await.map_err(|e| anyhow!("{e:?}"))?;
    let table = cli.table;
    let cron_job = Job::new_async(expr.as_str(), move |_id, _sched| {
        let job = job.clone();
        let req = req.clone();
        Box::pin(async move {
            if let Err(e) = run_once(&job, &req, table).await {
                error!(error = ?e, "job failed");
            }
        })
    })
    .map_err(|e| anyhow!("invalid cron expression {expr:?}: {e:?}"))?;

    sched.add(cron_job).await.map_err(|e| anyhow!("{e:?}"))?;
    sched.start().await.map_err(|e| anyhow!("{e:?}"))?;
    info!(schedule = %expr, "scheduler running, press Ctrl+C to stop");

    shutdown_signal().await;
    warn!("shutdown signal received, stopping scheduler");
    sched.shutdown().await.map_err(|e| anyhow!("{e:?}"))?;
    info!("stopped");
    Ok(())
}
