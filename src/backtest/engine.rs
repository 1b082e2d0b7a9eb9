//! Daily delta-hedge backtesting engine.
//!
//! Simulates a long call hedged with the underlying, rebalanced once per
//! trading day:
//! 1. Price the call and its delta at the day's spot
//! 2. Realize P&L on the hedge carried in from the previous day
//! 3. Rebalance the hedge to minus the new delta
//! 4. Freeze everything once the option reaches maturity
//!
//! The run is a fold over the series: each day consumes the previous
//! [`HedgeState`] and appends one immutable [`HedgeTrack`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::fxoption::{FxOptionError, GarmanKohlhagen, MarketSnapshot, OptionSpec};

use super::series::{PricePoint, PriceSeries};

/// Day-count basis converting days to maturity into years.
pub const DAYS_PER_YEAR: f64 = 365.0;

fn default_notional() -> f64 {
    1.0
}

/// Model parameters held fixed for the whole backtest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Call strike.
    pub strike: f64,
    /// Domestic (quote currency) rate, continuously compounded.
    pub domestic_rate: f64,
    /// Foreign (base currency) rate, continuously compounded.
    pub foreign_rate: f64,
    /// Annualized volatility used for pricing and delta.
    pub sigma: f64,
    /// Days to maturity as of the first row.
    pub maturity_days: i64,
    /// Units of underlying per contract.
    #[serde(default = "default_notional")]
    pub notional: f64,
}

impl BacktestConfig {
    /// Creates a configuration for one contract on one unit of underlying.
    #[must_use]
    pub fn new(
        strike: f64,
        domestic_rate: f64,
        foreign_rate: f64,
        sigma: f64,
        maturity_days: i64,
    ) -> Self {
        Self {
            strike,
            domestic_rate,
            foreign_rate,
            sigma,
            maturity_days,
            notional: default_notional(),
        }
    }

    /// Sets the number of units of underlying per contract.
    #[must_use]
    pub fn with_notional(mut self, notional: f64) -> Self {
        self.notional = notional;
        self
    }

    /// Checks the fixed parameters before any day is simulated.
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
        if !self.domestic_rate.is_finite() || !self.foreign_rate.is_finite() {
            return Err(FxOptionError::invalid(format!(
                "interest rates must be finite, got domestic {} and foreign {}",
                self.domestic_rate, self.foreign_rate
            )));
        }
        if !self.notional.is_finite() {
            return Err(FxOptionError::invalid(format!(
                "notional must be finite, got {}",
                self.notional
            )));
        }
        Ok(())
    }

    fn market(&self, spot: f64) -> MarketSnapshot {
        MarketSnapshot::new(spot, self.domestic_rate, self.foreign_rate)
    }

    fn call(&self, time_to_maturity: f64) -> OptionSpec {
        OptionSpec::call(self.strike, self.sigma, time_to_maturity)
    }

    /// Days left to maturity on the row at `index`.
    fn days_to_maturity(&self, index: usize) -> Result<i64, FxOptionError> {
        i64::try_from(index)
            .ok()
            .and_then(|index| self.maturity_days.checked_sub(index))
            .ok_or_else(|| {
                FxOptionError::invalid(format!(
                    "maturity of {} days is out of range on row {}",
                    self.maturity_days, index
                ))
            })
    }
}

/// One simulated trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HedgeTrack {
    /// Trading date.
    pub date: NaiveDate,
    /// Spot at the close.
    pub spot: f64,
    /// Calendar days left to maturity; zero or negative once expired.
    pub days_to_maturity: i64,
    /// Call delta, zero once expired.
    pub delta: f64,
    /// Units of underlying held after rebalancing (short for a long call).
    pub hedge_position: f64,
    /// P&L of the position carried into the day over the day's spot move.
    pub pnl_hedge: f64,
    /// Running sum of `pnl_hedge`.
    pub pnl_hedge_cum: f64,
    /// Model value of the call, or its cash settlement on the final row.
    pub option_value: f64,
}

/// State carried from one day to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
enum HedgeState {
    /// Nothing simulated yet.
    Start,
    /// Option alive; values are from the previous day.
    Active {
        delta: f64,
        hedge_position: f64,
        spot: f64,
        pnl_cum: f64,
    },
    /// Option matured; the hedge is frozen.
    Expired { hedge_position: f64, pnl_cum: f64 },
}

/// Delta-hedge backtester for a long FX call.
#[derive(Debug, Clone)]
pub struct DeltaHedgeBacktester {
    config: BacktestConfig,
}

impl DeltaHedgeBacktester {
    /// Creates a backtester after validating the configuration.
    pub fn new(config: BacktestConfig) -> Result<Self, FxOptionError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this backtester runs with.
    #[must_use]
    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Runs the backtest, producing one row per day of `series`.
    ///
    /// The first row with `days_to_maturity <= 0` settles the option at its
    /// intrinsic value; every later row is frozen with zero delta, zero P&L
    /// and the last pre-expiry hedge. Without an expiry inside the series the
    /// last row is settled instead.
    pub fn run(&self, series: &PriceSeries) -> Result<Vec<HedgeTrack>, FxOptionError> {
        let points = series.points();
        let last_index = points.len().saturating_sub(1);
        // every row's days to maturity lies between these two
        self.config.days_to_maturity(last_index)?;
        debug!(
            rows = points.len(),
            strike = self.config.strike,
            sigma = self.config.sigma,
            maturity_days = self.config.maturity_days,
            "starting delta-hedge backtest"
        );

        let (final_state, tracks) = points.iter().enumerate().try_fold(
            (HedgeState::Start, Vec::with_capacity(points.len())),
            |(state, mut tracks), (index, point)| {
                let (next, track) = self.step(state, index, point, index == last_index)?;
                trace!(
                    index,
                    date = %track.date,
                    delta = track.delta,
                    hedge_position = track.hedge_position,
                    pnl_hedge = track.pnl_hedge,
                    "hedge day"
                );
                tracks.push(track);
                Ok::<_, FxOptionError>((next, tracks))
            },
        )?;

        debug!(
            rows = tracks.len(),
            expired = matches!(final_state, HedgeState::Expired { .. }),
            final_pnl = tracks.last().map_or(0.0, |track| track.pnl_hedge_cum),
            "delta-hedge backtest finished"
        );
        Ok(tracks)
    }

    fn step(
        &self,
        state: HedgeState,
        index: usize,
        point: &PricePoint,
        is_last: bool,
    ) -> Result<(HedgeState, HedgeTrack), FxOptionError> {
        let days_to_maturity = self.config.days_to_maturity(index)?;
        let time_to_maturity = days_to_maturity as f64 / DAYS_PER_YEAR;
        let notional = self.config.notional;

        let frozen = |hedge_position: f64, pnl_cum: f64, option_value: f64| HedgeTrack {
            date: point.date,
            spot: point.spot,
            days_to_maturity,
            delta: 0.0,
            hedge_position,
            pnl_hedge: 0.0,
            pnl_hedge_cum: pnl_cum,
            option_value,
        };

        match state {
            HedgeState::Expired {
                hedge_position,
                pnl_cum,
            } => Ok((state, frozen(hedge_position, pnl_cum, 0.0))),
            HedgeState::Start | HedgeState::Active { .. } if time_to_maturity <= 0.0 => {
                let (hedge_position, pnl_cum) = match state {
                    HedgeState::Active {
                        hedge_position,
                        pnl_cum,
                        ..
                    } => (hedge_position, pnl_cum),
                    _ => (0.0, 0.0),
                };
                debug!(index, date = %point.date, "option expired");
                let settlement = (point.spot - self.config.strike).max(0.0);
                Ok((
                    HedgeState::Expired {
                        hedge_position,
                        pnl_cum,
                    },
                    frozen(hedge_position, pnl_cum, settlement),
                ))
            }
            HedgeState::Start | HedgeState::Active { .. } => {
                let market = self.config.market(point.spot);
                let option = self.config.call(time_to_maturity);
                let delta = GarmanKohlhagen::delta(&market, &option)?;
                let model_value = GarmanKohlhagen::price(&market, &option)?;
                let option_value = if is_last {
                    (point.spot - self.config.strike).max(0.0)
                } else {
                    model_value
                };

                let (hedge_position, pnl_hedge, pnl_cum) = match state {
                    HedgeState::Active {
                        delta: prev_delta,
                        hedge_position: prev_hedge,
                        spot: prev_spot,
                        pnl_cum,
                    } => {
                        let pnl_hedge = (point.spot - prev_spot) * prev_hedge;
                        let hedge_position = prev_hedge - (delta - prev_delta) * notional;
                        (hedge_position, pnl_hedge, pnl_cum + pnl_hedge)
                    }
                    _ => (-delta * notional, 0.0, 0.0),
                };

                Ok((
                    HedgeState::Active {
                        delta,
                        hedge_position,
                        spot: point.spot,
                        pnl_cum,
                    },
                    HedgeTrack {
                        date: point.date,
                        spot: point.spot,
                        days_to_maturity,
                        delta,
                        hedge_position,
                        pnl_hedge,
                        pnl_hedge_cum: pnl_cum,
                        option_value,
                    },
                ))
            }
        }
    }
}

/// Backtests a one-unit delta hedge from flat scalar inputs.
pub fn backtest(
    series: &PriceSeries,
    strike: f64,
    domestic_rate: f64,
    foreign_rate: f64,
    sigma: f64,
    maturity_days: i64,
) -> Result<Vec<HedgeTrack>, FxOptionError> {
    DeltaHedgeBacktester::new(BacktestConfig::new(
        strike,
        domestic_rate,
        foreign_rate,
        sigma,
        maturity_days,
    ))?
    .run(series)
}
