//! Types for FX option pricing and implied volatility.

use super::error::FxOptionError;
use serde::{Deserialize, Serialize};

/// Option type of a European FX vanilla.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionType {
    /// Right to buy the base currency at the strike rate.
    Call,
    /// Right to sell the base currency at the strike rate.
    Put,
}

impl OptionType {
    /// Maps the `is_call` flag used by the functional API.
    #[must_use]
    pub fn from_is_call(is_call: bool) -> Self {
        if is_call {
            OptionType::Call
        } else {
            OptionType::Put
        }
    }
}

/// A single day's observed market state.
///
/// Rates are continuously compounded annualized decimals (0.03 for 3%),
/// not percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Spot exchange rate, quote currency per unit of base currency.
    pub spot: f64,
    /// Domestic (quote currency) interest rate.
    pub domestic_rate: f64,
    /// Foreign (base currency) interest rate.
    pub foreign_rate: f64,
}

impl MarketSnapshot {
    /// Creates a new market snapshot.
    #[must_use]
    pub fn new(spot: f64, domestic_rate: f64, foreign_rate: f64) -> Self {
        Self {
            spot,
            domestic_rate,
            foreign_rate,
        }
    }

    /// Checks that the spot is positive and every field is finite.
    pub fn validate(&self) -> Result<(), FxOptionError> {
        if !self.spot.is_finite() || self.spot <= 0.0 {
            return Err(FxOptionError::invalid(format!(
                "spot must be positive, got {}",
                self.spot
            )));
        }
        if !self.domestic_rate.is_finite() || !self.foreign_rate.is_finite() {
            return Err(FxOptionError::invalid(format!(
                "interest rates must be finite, got domestic {} and foreign {}",
                self.domestic_rate, self.foreign_rate
            )));
        }
        Ok(())
    }
}

/// Contract terms of a European FX vanilla, plus the volatility to value it at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Strike rate.
    pub strike: f64,
    /// Annualized volatility (0.10 for 10%).
    pub sigma: f64,
    /// Time to maturity in years.
    pub time_to_maturity: f64,
    /// Call or put.
    pub option_type: OptionType,
}

impl OptionSpec {
    /// Creates a new option specification.
    #[must_use]
    pub fn new(strike: f64, sigma: f64, time_to_maturity: f64, option_type: OptionType) -> Self {
        Self {
            strike,
            sigma,
            time_to_maturity,
            option_type,
        }
    }

    /// Creates a call specification.
    #[must_use]
    pub fn call(strike: f64, sigma: f64, time_to_maturity: f64) -> Self {
        Self::new(strike, sigma, time_to_maturity, OptionType::Call)
    }

    /// Creates a put specification.
    #[must_use]
    pub fn put(strike: f64, sigma: f64, time_to_maturity: f64) -> Self {
        Self::new(strike, sigma, time_to_maturity, OptionType::Put)
    }

    /// Returns a copy valued at a different volatility.
    #[must_use]
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Returns true for calls.
    #[must_use]
    pub fn is_call(&self) -> bool {
        self.option_type == OptionType::Call
    }

    /// Payoff if exercised at `spot` right now.
    ///
    /// For calls: max(0, spot - strike)
    /// For puts: max(0, strike - spot)
    #[must_use]
    pub fn intrinsic_value(&self, spot: f64) -> f64 {
        match self.option_type {
            OptionType::Call => (spot - self.strike).max(0.0),
            OptionType::Put => (self.strike - spot).max(0.0),
        }
    }

    /// Checks strike, volatility and time to maturity are positive and finite.
    pub fn validate(&self) -> Result<(), FxOptionError> {
        if !self.strike.is_finite() || self.strike <= 0.0 {
            return Err(FxOptionError::invalid(format!(
                "strike must be positive, got {}",
                self.strike
            )));
        }
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(FxOptionError::invalid(format!(
                "volatility must be positive, got {}",
                self.sigma
            )));
        }
        if !self.time_to_maturity.is_finite() || self.time_to_maturity <= 0.0 {
            return Err(FxOptionError::invalid(format!(
                "time to maturity must be positive, got {}",
                self.time_to_maturity
            )));
        }
        Ok(())
    }
}

/// Result of an implied volatility solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpliedVol {
    /// Implied volatility, or the best estimate when `converged` is false.
    pub sigma: f64,
    /// Number of bisection steps taken.
    pub iterations: u32,
    /// Whether the price matched within tolerance.
    pub converged: bool,
}

impl ImpliedVol {
    /// Returns the volatility as a percentage (e.g., 10.0 for 10%).
    #[must_use]
    pub fn sigma_percent(&self) -> f64 {
        self.sigma * 100.0
    }

    /// Returns the volatility, or `NoConvergence` carrying the best estimate.
    pub fn require_converged(self) -> Result<f64, FxOptionError> {
        if self.converged {
            Ok(self.sigma)
        } else {
            Err(FxOptionError::NoConvergence {
                iterations: self.iterations,
                best_estimate: self.sigma,
            })
        }
    }
}
