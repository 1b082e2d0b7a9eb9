//! Runs several hedge scenarios over the same spot path in parallel.
//!
//! This example shows how to:
//! 1. Register named scenarios with a BacktestManager
//! 2. Observe outcomes through a listener backed by a channel
//! 3. Export the best scenario as a checksum-protected JSON package

use chrono::{Days, NaiveDate};
use fxoption_rs::prelude::*;
use std::sync::{Arc, mpsc};
use std::thread;
use tracing::{info, warn};

fn spot_path() -> Result<PriceSeries, FxOptionError> {
    let start = NaiveDate::from_ymd_opt(2022, 3, 1).unwrap_or_default();
    let points = (0..120)
        .map(|i| {
            let t = i as f64;
            let spot = 1.08 + 0.0004 * t + 0.01 * (t * 0.21).sin();
            PricePoint::new(start + Days::new(i), spot)
        })
        .collect();
    PriceSeries::new(points)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Starting parallel backtest example");

    let (sender, receiver) = mpsc::channel::<(String, f64)>();
    let listener: OutcomeListener = Arc::new(move |outcome: &ScenarioOutcome| {
        if let Ok(report) = &outcome.result {
            if let Err(e) = sender.send((outcome.name.clone(), report.final_pnl)) {
                warn!("Failed to forward outcome for {}: {}", outcome.name, e);
            }
        }
    });

    let printer = thread::spawn(move || {
        while let Ok((name, pnl)) = receiver.recv() {
            println!("{name:<12} final hedge P&L {pnl:>10.6}");
        }
    });

    let mut manager = BacktestManager::with_listener(listener);
    for (name, strike, sigma) in [
        ("atm_10vol", 1.10, 0.10),
        ("atm_20vol", 1.10, 0.20),
        ("itm_10vol", 1.06, 0.10),
        ("otm_10vol", 1.14, 0.10),
    ] {
        manager.add_scenario(name, BacktestConfig::new(strike, 0.03, 0.01, sigma, 90));
    }

    let outcomes = manager.run_all(Arc::new(spot_path()?));
    drop(manager);
    if printer.join().is_err() {
        warn!("Printer thread panicked");
    }

    let best = outcomes
        .into_iter()
        .filter_map(|outcome| outcome.result.ok())
        .max_by(|a, b| a.final_pnl.total_cmp(&b.final_pnl));

    if let Some(report) = best {
        let package = HedgeReportPackage::new(report)?;
        let json = package.to_json()?;
        let restored = HedgeReportPackage::from_json(&json)?.into_report()?;
        info!(
            "Best scenario strike {} exported ({} bytes, checksum {})",
            restored.config.strike,
            json.len(),
            package.checksum
        );
    }

    info!("Example completed successfully");
    Ok(())
}
