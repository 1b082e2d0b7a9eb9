//! Prices an EUR/USD call and put, infers implied volatility from a quoted
//! premium and backtests a daily delta hedge.
//!
//! Usage:
//!   fx_option_report [series.json]
//!
//! The optional file holds a JSON array of `{"date": "YYYY-MM-DD", "spot": f64}`
//! rows. Without it a synthetic three-month path is used.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use fxoption_rs::prelude::*;
use std::fs;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Scalars a user would enter in a front-end.
#[derive(Debug)]
struct Inputs {
    spot: f64,
    strike: f64,
    sigma: f64,
    time_to_maturity: f64,
    maturity_days: i64,
    domestic_rate: f64,
    foreign_rate: f64,
    quote_spread: f64,
}

impl Default for Inputs {
    fn default() -> Self {
        Self {
            spot: 1.10,
            strike: 1.10,
            sigma: 0.10,
            time_to_maturity: 1.0,
            maturity_days: 60,
            domestic_rate: 0.03,
            foreign_rate: 0.01,
            quote_spread: 0.005,
        }
    }
}

/// Weekday closes oscillating around 1.10
fn synthetic_series(days: usize) -> Result<PriceSeries, FxOptionError> {
    let mut date = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap_or_default();
    let mut points = Vec::with_capacity(days);
    while points.len() < days {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            let i = points.len() as f64;
            let spot = 1.10 + 0.012 * (i * 0.37).sin() + 0.004 * (i * 1.9).cos();
            points.push(PricePoint::new(date, spot));
        }
        date = date + Days::new(1);
    }
    PriceSeries::new(points)
}

fn load_series(path: Option<String>) -> Result<PriceSeries, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            info!("Loading spot series from {}", path);
            let raw = fs::read_to_string(&path)?;
            let rows: Vec<PricePoint> = serde_json::from_str(&raw)?;
            Ok(PriceSeries::from_unsorted(rows)?)
        }
        None => Ok(synthetic_series(90)?),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let inputs = Inputs::default();
    info!("Inputs: {:?}", inputs);

    let call_price = price(
        inputs.spot,
        inputs.strike,
        inputs.domestic_rate,
        inputs.foreign_rate,
        inputs.sigma,
        inputs.time_to_maturity,
        true,
    )?;
    let put_price = price(
        inputs.spot,
        inputs.strike,
        inputs.domestic_rate,
        inputs.foreign_rate,
        inputs.sigma,
        inputs.time_to_maturity,
        false,
    )?;

    let quoted_call = call_price + inputs.quote_spread;
    let iv = implied_vol(
        quoted_call,
        inputs.spot,
        inputs.strike,
        inputs.domestic_rate,
        inputs.foreign_rate,
        inputs.time_to_maturity,
        true,
        &SolverConfig::default(),
    )?;
    if !iv.converged {
        warn!("Implied volatility did not converge, showing best estimate");
    }

    println!("Call price (Garman-Kohlhagen): {call_price:.4}");
    println!("Put price (Garman-Kohlhagen):  {put_price:.4}");
    println!("Implied volatility:            {:.2}%", iv.sigma_percent());

    let series = load_series(std::env::args().nth(1))?;
    let config = BacktestConfig::new(
        inputs.strike,
        inputs.domestic_rate,
        inputs.foreign_rate,
        inputs.sigma,
        inputs.maturity_days,
    );
    let tracks = DeltaHedgeBacktester::new(config.clone())?.run(&series)?;
    let report = HedgeReport::from_tracks(config, tracks);

    println!();
    println!("{:<12} {:>8} {:>6} {:>8} {:>10}", "date", "spot", "dtm", "delta", "cum pnl");
    for track in &report.tracks {
        println!(
            "{:<12} {:>8.4} {:>6} {:>8.4} {:>10.6}",
            track.date, track.spot, track.days_to_maturity, track.delta, track.pnl_hedge_cum
        );
    }

    println!();
    println!("Final hedge P&L:   {:.6}", report.final_pnl);
    println!("Settlement value:  {:.6}", report.settlement_value);
    println!("Premium paid:      {:.6}", report.premium());
    println!("Total P&L:         {:.6}", report.total_pnl_with_settlement());
    println!(
        "Cumulative range:  [{:.6}, {:.6}]",
        report.min_cum_pnl, report.max_cum_pnl
    );
    if let Some(index) = report.expiry_index {
        println!("Expired on:        {}", report.tracks[index].date);
    }

    let package = HedgeReportPackage::new(report)?;
    info!("Report checksum: {}", package.checksum);

    Ok(())
}
