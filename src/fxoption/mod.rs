//! Garman-Kohlhagen pricing and implied volatility for FX vanillas.
//!
//! # Overview
//!
//! An FX option on EUR/USD pays in USD (the domestic, quote currency) and
//! references one EUR (the foreign, base currency). Garman-Kohlhagen treats
//! the foreign rate as a continuous yield on the spot and the domestic rate
//! as the discount rate, otherwise following Black-Scholes.
//!
//! # Implied Volatility
//!
//! Prices are strictly increasing in volatility, so the volatility that
//! reproduces an observed price is found by bisection over a bracket
//! (default `[1e-4, 5.0]`). A price outside the bracket's reachable range is
//! reported as `NoConvergence` rather than clamped to a boundary.
//!
//! # Example
//!
//! ```
//! use fxoption_rs::fxoption::{GarmanKohlhagen, MarketSnapshot, OptionSpec, SolverConfig, solve_iv};
//!
//! let market = MarketSnapshot::new(1.10, 0.03, 0.01);
//! let option = OptionSpec::call(1.10, 0.10, 1.0);
//!
//! let premium = GarmanKohlhagen::price(&market, &option).unwrap();
//! let iv = solve_iv(&market, &option, premium + 0.005, &SolverConfig::default()).unwrap();
//! assert!(iv.converged && iv.sigma > 0.10);
//! ```

mod error;
mod garman_kohlhagen;
mod solver;
mod types;

pub use error::FxOptionError;
pub use garman_kohlhagen::{GarmanKohlhagen, delta_call, price};
pub use solver::{SolverConfig, implied_vol, solve_iv};
pub use types::{ImpliedVol, MarketSnapshot, OptionSpec, OptionType};
