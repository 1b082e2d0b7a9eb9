//! # fxoption-rs
//!
//! Pricing, implied volatility and delta-hedge backtesting for European FX
//! vanilla options under the Garman-Kohlhagen model.
//!
//! ## Components
//!
//! - [`fxoption::GarmanKohlhagen`]: closed-form call/put premium and Greeks.
//! - [`fxoption::solve_iv`]: bisection inversion of the pricer, reporting
//!   whether it converged.
//! - [`backtest::DeltaHedgeBacktester`]: day-by-day hedge of a long call over
//!   a [`backtest::PriceSeries`], yielding one [`backtest::HedgeTrack`] per day.
//! - [`backtest::BacktestManager`]: runs independent scenarios in parallel.
//!
//! Market-data acquisition and presentation are left to the caller: the
//! crate takes a clean spot series and scalar parameters, and returns plain
//! serializable values.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use fxoption_rs::prelude::*;
//!
//! let start = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
//! let points = [1.10, 1.11, 1.09, 1.12, 1.10]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &spot)| PricePoint::new(start + chrono::Days::new(i as u64), spot))
//!     .collect();
//! let series = PriceSeries::new(points).unwrap();
//!
//! let tracks = backtest(&series, 1.10, 0.03, 0.01, 0.10, 5).unwrap();
//! assert_eq!(tracks.len(), 5);
//! assert_eq!(tracks[0].hedge_position, -tracks[0].delta);
//! ```

pub mod backtest;
pub mod fxoption;

/// Commonly used types and functions.
pub mod prelude {
    pub use crate::backtest::{
        BacktestConfig, BacktestManager, DeltaHedgeBacktester, HedgeReport, HedgeReportPackage,
        HedgeTrack, OutcomeListener, PricePoint, PriceSeries, ScenarioOutcome, backtest,
    };
    pub use crate::fxoption::{
        FxOptionError, GarmanKohlhagen, ImpliedVol, MarketSnapshot, OptionSpec, OptionType,
        SolverConfig, delta_call, implied_vol, price, solve_iv,
    };
}
