//! Bisection solver for implied volatility.
//!
//! Finds the volatility at which the Garman-Kohlhagen price equals an
//! observed market price. Vanilla prices are strictly increasing in σ, so a
//! bracket whose endpoint prices straddle the market price always contains
//! exactly one root.

use super::error::FxOptionError;
use super::garman_kohlhagen::GarmanKohlhagen;
use super::types::{ImpliedVol, MarketSnapshot, OptionSpec, OptionType};
use tracing::{trace, warn};

/// Configuration for the bisection solver.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Lower volatility bound (default: 1e-4).
    pub lower: f64,
    /// Upper volatility bound (default: 5.0 = 500%).
    pub upper: f64,
    /// Convergence tolerance on the absolute price difference.
    pub tolerance: f64,
    /// Maximum bisection steps before giving up.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            lower: 1e-4,
            upper: 5.0,
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the volatility bracket.
    #[must_use]
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    fn validate(&self) -> Result<(), FxOptionError> {
        let bracket_ok = self.lower > 0.0 && self.upper > self.lower && self.upper.is_finite();
        if !bracket_ok {
            return Err(FxOptionError::invalid(format!(
                "volatility bracket must satisfy 0 < lower < upper, got [{}, {}]",
                self.lower, self.upper
            )));
        }
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(FxOptionError::invalid(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Solves for implied volatility by bisection.
///
/// Each step prices the option at the bracket midpoint and keeps the half
/// that still contains the market price. The option's own `sigma` field is
/// ignored.
///
/// # Returns
/// - `Ok(ImpliedVol { converged: true, .. })` once the price matches within
///   tolerance
/// - `Ok(ImpliedVol { converged: false, .. })` with the last midpoint when
///   `max_iterations` runs out inside a valid bracket
/// - `Err(NoConvergence)` when the market price is not positive or lies
///   outside the prices reachable at the bracket endpoints
/// - `Err(InvalidParameter)` for invalid option, market or solver inputs, or
///   a non-finite market price
pub fn solve_iv(
    market: &MarketSnapshot,
    option: &OptionSpec,
    market_price: f64,
    config: &SolverConfig,
) -> Result<ImpliedVol, FxOptionError> {
    config.validate()?;

    if !market_price.is_finite() {
        return Err(FxOptionError::invalid(format!(
            "market price must be finite, got {market_price}"
        )));
    }

    let price_at = |vol: f64| GarmanKohlhagen::price(market, &option.with_sigma(vol));

    let mut low = config.lower;
    let mut high = config.upper;

    // Verify the bracket contains the market price; no positive volatility
    // prices a call or put at zero or below
    let price_low = price_at(low)?;
    let price_high = price_at(high)?;
    if market_price <= 0.0
        || market_price < price_low - config.tolerance
        || market_price > price_high + config.tolerance
    {
        let best_estimate = if market_price < price_low || market_price <= 0.0 {
            low
        } else {
            high
        };
        warn!(
            market_price,
            price_low, price_high, "market price outside volatility bracket"
        );
        return Err(FxOptionError::NoConvergence {
            iterations: 0,
            best_estimate,
        });
    }

    let mut mid = 0.5 * (low + high);
    for iteration in 0..config.max_iterations {
        mid = 0.5 * (low + high);
        let diff = price_at(mid)? - market_price;
        trace!(iteration, mid, diff, "bisection step");

        if diff.abs() < config.tolerance {
            return Ok(ImpliedVol {
                sigma: mid,
                iterations: iteration + 1,
                converged: true,
            });
        }

        if diff > 0.0 {
            high = mid;
        } else {
            low = mid;
        }
    }

    warn!(
        iterations = config.max_iterations,
        best_estimate = mid,
        "implied volatility did not converge"
    );
    Ok(ImpliedVol {
        sigma: mid,
        iterations: config.max_iterations,
        converged: false,
    })
}

/// Implied volatility from flat scalar inputs.
///
/// Defaults for the bracket, tolerance and iteration cap come from
/// [`SolverConfig::default`].
#[allow(clippy::too_many_arguments)]
pub fn implied_vol(
    market_price: f64,
    spot: f64,
    strike: f64,
    domestic_rate: f64,
    foreign_rate: f64,
    time_to_maturity: f64,
    is_call: bool,
    config: &SolverConfig,
) -> Result<ImpliedVol, FxOptionError> {
    let market = MarketSnapshot::new(spot, domestic_rate, foreign_rate);
    // Placeholder volatility; the solver substitutes its own trial values.
    let option = OptionSpec::new(
        strike,
        config.lower,
        time_to_maturity,
        OptionType::from_is_call(is_call),
    );
    solve_iv(&market, &option, market_price, config)
}
