use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use clap::Parser;

use omnispread_client::analysis::stationary_sigma;
use omnispread_client::config::SERVICE;
use omnispread_client::{
    HttpScanService, PairResult, Period, ScanRequest, TaskClient, TaskStatus, TrackOptions,
    synthesize_spread_path,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "OmniSpread pairs-trading scan client", long_about = None)]
struct Cli {
    /// Tickers to scan (at least two, unless --preset is given)
    tickers: Vec<String>,

    /// Named ticker preset fetched from the service (e.g. mega_tech)
    #[arg(long, conflicts_with = "tickers")]
    preset: Option<String>,

    /// Lookback period: 6mo, 1y, 2y, 3y, 5y or custom
    #[arg(long, default_value = "3y")]
    period: Period,

    /// Sampling interval forwarded to the engine
    #[arg(long, default_value = "1d")]
    interval: String,

    /// Custom range start (YYYY-MM-DD); only used with --period custom
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Custom range end (YYYY-MM-DD); only used with --period custom
    #[arg(long)]
    end_date: Option<NaiveDate>,

    /// Scan service base URL
    #[arg(long, default_value = SERVICE.base_url)]
    base_url: String,

    /// Milliseconds between status polls
    #[arg(long, default_value_t = SERVICE.polling.interval_ms)]
    poll_interval_ms: u64,

    /// Give up after this many polls without a terminal status
    #[arg(long, default_value_t = SERVICE.polling.max_attempts)]
    max_attempts: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();

    let client = TaskClient::new(HttpScanService::new(args.base_url.clone()));

    // C. Resolve tickers, possibly from a server-side preset
    let tickers = match &args.preset {
        Some(name) => {
            let presets = client
                .presets()
                .await
                .context("failed to fetch ticker presets")?;
            presets.get(name).cloned().ok_or_else(|| {
                anyhow!(
                    "unknown preset '{}'; available: {}",
                    name,
                    presets.keys().cloned().collect::<Vec<_>>().join(", ")
                )
            })?
        }
        None => args.tickers.clone(),
    };

    let mut request = ScanRequest::new(tickers, args.period).with_interval(&args.interval);
    if let (Some(start), Some(end)) = (args.start_date, args.end_date) {
        request = request.with_date_range(start, end);
    }

    // D. Submit and track to a terminal state
    let handle = client.submit(&request).await?;
    let options = TrackOptions {
        poll_interval: Duration::from_millis(args.poll_interval_ms),
        max_attempts: args.max_attempts,
    };
    let task = client
        .track(&handle, &options, None, |snapshot| {
            log::info!("Task {}: {}", snapshot.task_id, snapshot.status);
        })
        .await?;

    if task.status == TaskStatus::Failed {
        bail!(
            "scan failed on the server: {}",
            task.error.as_deref().unwrap_or("no detail reported")
        );
    }

    // E. Render
    let results = task.completed_results();
    if results.is_empty() {
        println!("Scan completed: no cointegrated pairs passed the filters.");
        return Ok(());
    }
    print_results(results);
    print_spread_context(&results[0])?;
    Ok(())
}

fn print_results(results: &[PairResult]) {
    println!(
        "{:<14} {:<9} {:>7} {:>6} {:>6} {:>7} {:>14}  {}",
        "PAIR", "METHOD", "Z", "HL", "CORR", "HURST", "P(PROFIT)", "TRADE"
    );
    for result in results {
        if let Err(e) = result.validate() {
            log::warn!("Skipping {}: {}", result.pair, e);
            continue;
        }
        println!(
            "{:<14} {:<9} {:>7.1} {:>6.0} {:>6.2} {:>7.2} {:>5.1}% [{:.0}-{:.0}]  {}",
            result.pair,
            result.method,
            result.z_score,
            result.half_life,
            result.price_corr,
            result.hurst,
            result.prob_profit,
            result.prob_profit_low,
            result.prob_profit_high,
            result.combo,
        );
    }
}

/// Print spread context for the top pair: real history when the engine sent
/// one, otherwise a clearly-labeled synthetic path.
fn print_spread_context(best: &PairResult) -> Result<()> {
    best.validate()
        .with_context(|| format!("result {} failed invariant checks", best.pair))?;

    println!();
    if best.has_history() {
        let newest = best
            .historical_z_scores
            .last()
            .expect("has_history guarantees at least one point");
        println!(
            "{}: engine supplied {} days of real z-score history (latest {:.2} on {})",
            best.pair,
            best.historical_z_scores.len(),
            newest.value,
            newest.time,
        );
        return Ok(());
    }

    let series = synthesize_spread_path(best.half_life, best.z_score, SERVICE.synth.path_days)?;
    let sigma = stationary_sigma(best.half_life);
    let (anchor_date, anchor_value) = series
        .anchor()
        .expect("synthesized series is never empty for the default length");
    println!(
        "{}: no history from the engine; synthesized a {}-day spread path (NOT real data).",
        best.pair,
        series.len()
    );
    println!(
        "  anchor {anchor_date} = {anchor_value:.3} (z {:.1} x sigma {:.3}), bands at +/-{:.3}",
        best.z_score,
        sigma,
        SERVICE.synth.band_sigma * sigma,
    );
    Ok(())
}
