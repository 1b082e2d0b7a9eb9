//! Garman-Kohlhagen pricing model and Greeks.
//!
//! Black-Scholes adapted to FX: the foreign (base currency) rate acts as a
//! continuous dividend yield on the spot, the domestic (quote currency) rate
//! discounts the strike.

use super::error::FxOptionError;
use super::types::{MarketSnapshot, OptionSpec, OptionType};
use std::f64::consts::PI;

/// Square root of 2, precomputed for efficiency.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Garman-Kohlhagen pricing model implementation.
///
/// Stateless: every method is a pure function of its inputs, so the model
/// can be shared freely between threads.
pub struct GarmanKohlhagen;

impl GarmanKohlhagen {
    /// Approximation of the error function (erf).
    ///
    /// Uses Abramowitz and Stegun approximation (formula 7.1.26)
    /// with maximum error of 1.5×10⁻⁷. The result is odd in `x`, which keeps
    /// N(x) + N(-x) = 1 exact and put-call parity tight.
    #[must_use]
    pub fn erf(x: f64) -> f64 {
        const A1: f64 = 0.254829592;
        const A2: f64 = -0.284496736;
        const A3: f64 = 1.421413741;
        const A4: f64 = -1.453152027;
        const A5: f64 = 1.061405429;
        const P: f64 = 0.3275911;

        let sign = if x < 0.0 { -1.0 } else { 1.0 };
        let x = x.abs();

        let t = 1.0 / (1.0 + P * x);
        let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

        sign * y
    }

    /// Standard normal cumulative distribution function, P(Z ≤ x).
    #[must_use]
    pub fn norm_cdf(x: f64) -> f64 {
        0.5 * (1.0 + Self::erf(x / SQRT_2))
    }

    /// Standard normal probability density function.
    #[must_use]
    pub fn norm_pdf(x: f64) -> f64 {
        (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
    }

    /// Calculates the d1 parameter.
    ///
    /// d1 = [ln(S/K) + (rd - rf + σ²/2)T] / (σ√T)
    ///
    /// # Arguments
    /// - `spot`: Spot rate (S)
    /// - `strike`: Strike rate (K)
    /// - `domestic_rate`: Domestic rate (rd)
    /// - `foreign_rate`: Foreign rate (rf)
    /// - `time`: Time to maturity in years (T)
    /// - `vol`: Volatility (σ)
    #[must_use]
    pub fn d1(
        spot: f64,
        strike: f64,
        domestic_rate: f64,
        foreign_rate: f64,
        time: f64,
        vol: f64,
    ) -> f64 {
        let sqrt_time = time.sqrt();
        ((spot / strike).ln() + (domestic_rate - foreign_rate + 0.5 * vol * vol) * time)
            / (vol * sqrt_time)
    }

    /// Calculates the d2 parameter, d2 = d1 - σ√T.
    #[must_use]
    pub fn d2(d1: f64, vol: f64, time: f64) -> f64 {
        d1 - vol * time.sqrt()
    }

    fn checked(market: &MarketSnapshot, option: &OptionSpec) -> Result<f64, FxOptionError> {
        market.validate()?;
        option.validate()?;
        Ok(Self::d1(
            market.spot,
            option.strike,
            market.domestic_rate,
            market.foreign_rate,
            option.time_to_maturity,
            option.sigma,
        ))
    }

    /// Calculates the option premium in quote currency per unit of base.
    ///
    /// For calls: C = S·e^(-rf·T)·N(d1) - K·e^(-rd·T)·N(d2)
    /// For puts:  P = K·e^(-rd·T)·N(-d2) - S·e^(-rf·T)·N(-d1)
    ///
    /// # Errors
    /// `InvalidParameter` if spot, strike, volatility or time to maturity is
    /// not positive, or any input is not finite.
    pub fn price(market: &MarketSnapshot, option: &OptionSpec) -> Result<f64, FxOptionError> {
        let d1 = Self::checked(market, option)?;
        let time = option.time_to_maturity;
        let d2 = Self::d2(d1, option.sigma, time);
        let foreign_discount = (-market.foreign_rate * time).exp();
        let domestic_discount = (-market.domestic_rate * time).exp();

        let value = match option.option_type {
            OptionType::Call => {
                market.spot * foreign_discount * Self::norm_cdf(d1)
                    - option.strike * domestic_discount * Self::norm_cdf(d2)
            }
            OptionType::Put => {
                option.strike * domestic_discount * Self::norm_cdf(-d2)
                    - market.spot * foreign_discount * Self::norm_cdf(-d1)
            }
        };
        // cancellation deep out of the money can leave a tiny negative
        Ok(value.max(0.0))
    }

    /// Calculates spot delta (∂price/∂S).
    ///
    /// For calls: Δ = e^(-rf·T)·N(d1)
    /// For puts:  Δ = e^(-rf·T)·(N(d1) - 1)
    pub fn delta(market: &MarketSnapshot, option: &OptionSpec) -> Result<f64, FxOptionError> {
        let d1 = Self::checked(market, option)?;
        let foreign_discount = (-market.foreign_rate * option.time_to_maturity).exp();

        Ok(match option.option_type {
            OptionType::Call => foreign_discount * Self::norm_cdf(d1),
            OptionType::Put => foreign_discount * (Self::norm_cdf(d1) - 1.0),
        })
    }

    /// Calculates gamma (∂²price/∂S²), identical for calls and puts.
    ///
    /// Γ = e^(-rf·T)·N'(d1) / (S·σ·√T)
    pub fn gamma(market: &MarketSnapshot, option: &OptionSpec) -> Result<f64, FxOptionError> {
        let d1 = Self::checked(market, option)?;
        let time = option.time_to_maturity;
        let foreign_discount = (-market.foreign_rate * time).exp();
        Ok(foreign_discount * Self::norm_pdf(d1) / (market.spot * option.sigma * time.sqrt()))
    }

    /// Calculates vega (∂price/∂σ), identical for calls and puts.
    ///
    /// Vega = S·e^(-rf·T)·N'(d1)·√T
    pub fn vega(market: &MarketSnapshot, option: &OptionSpec) -> Result<f64, FxOptionError> {
        let d1 = Self::checked(market, option)?;
        let time = option.time_to_maturity;
        let foreign_discount = (-market.foreign_rate * time).exp();
        Ok(market.spot * foreign_discount * Self::norm_pdf(d1) * time.sqrt())
    }

    /// Calculates theta as the price change per calendar day.
    pub fn theta(market: &MarketSnapshot, option: &OptionSpec) -> Result<f64, FxOptionError> {
        let d1 = Self::checked(market, option)?;
        let time = option.time_to_maturity;
        let vol = option.sigma;
        let d2 = Self::d2(d1, vol, time);
        let foreign_discount = (-market.foreign_rate * time).exp();
        let domestic_discount = (-market.domestic_rate * time).exp();

        let decay = -market.spot * foreign_discount * Self::norm_pdf(d1) * vol / (2.0 * time.sqrt());

        let theta_annual = match option.option_type {
            OptionType::Call => {
                decay + market.foreign_rate * market.spot * foreign_discount * Self::norm_cdf(d1)
                    - market.domestic_rate
                        * option.strike
                        * domestic_discount
                        * Self::norm_cdf(d2)
            }
            OptionType::Put => {
                decay - market.foreign_rate * market.spot * foreign_discount * Self::norm_cdf(-d1)
                    + market.domestic_rate
                        * option.strike
                        * domestic_discount
                        * Self::norm_cdf(-d2)
            }
        };

        Ok(theta_annual / 365.0)
    }
}

/// Prices a European FX vanilla from flat scalar inputs.
///
/// # Example
/// ```
/// use fxoption_rs::fxoption::price;
///
/// let call = price(1.10, 1.10, 0.03, 0.01, 0.10, 1.0, true).unwrap();
/// let put = price(1.10, 1.10, 0.03, 0.01, 0.10, 1.0, false).unwrap();
/// assert!(call > put);
/// ```
pub fn price(
    spot: f64,
    strike: f64,
    domestic_rate: f64,
    foreign_rate: f64,
    sigma: f64,
    time_to_maturity: f64,
    is_call: bool,
) -> Result<f64, FxOptionError> {
    GarmanKohlhagen::price(
        &MarketSnapshot::new(spot, domestic_rate, foreign_rate),
        &OptionSpec::new(
            strike,
            sigma,
            time_to_maturity,
            OptionType::from_is_call(is_call),
        ),
    )
}

/// Call delta, e^(-rf·T)·N(d1), from flat scalar inputs.
pub fn delta_call(
    spot: f64,
    strike: f64,
    domestic_rate: f64,
    foreign_rate: f64,
    sigma: f64,
    time_to_maturity: f64,
) -> Result<f64, FxOptionError> {
    GarmanKohlhagen::delta(
        &MarketSnapshot::new(spot, domestic_rate, foreign_rate),
        &OptionSpec::call(strike, sigma, time_to_maturity),
    )
}
