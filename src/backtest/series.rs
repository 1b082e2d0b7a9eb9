//! Daily spot series consumed by the backtester.

use crate::fxoption::FxOptionError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// One trading day's observed spot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading date.
    pub date: NaiveDate,
    /// Spot exchange rate at the close.
    pub spot: f64,
}

impl PricePoint {
    /// Creates a new price point.
    #[must_use]
    pub fn new(date: NaiveDate, spot: f64) -> Self {
        Self { date, spot }
    }
}

/// Validated spot series: non-empty, strictly increasing dates, positive spots.
///
/// One row is one trading day. Row index, not the calendar distance between
/// dates, measures elapsed time in the backtest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series from rows that must already be in date order.
    ///
    /// # Errors
    /// - `EmptySeries` if `points` is empty
    /// - `UnsortedSeries` at the first row whose date does not strictly
    ///   follow its predecessor (duplicates included)
    /// - `InvalidParameter` for a non-positive or non-finite spot
    pub fn new(points: Vec<PricePoint>) -> Result<Self, FxOptionError> {
        if points.is_empty() {
            return Err(FxOptionError::EmptySeries);
        }

        for (index, point) in points.iter().enumerate() {
            if !point.spot.is_finite() || point.spot <= 0.0 {
                return Err(FxOptionError::invalid(format!(
                    "spot on {} must be positive, got {}",
                    point.date, point.spot
                )));
            }
            if index > 0 && points[index - 1].date >= point.date {
                return Err(FxOptionError::UnsortedSeries {
                    index,
                    previous: points[index - 1].date,
                    current: point.date,
                });
            }
        }

        trace!(rows = points.len(), "price series validated");
        Ok(Self { points })
    }

    /// Sorts rows by date, then validates them as in [`PriceSeries::new`].
    ///
    /// Duplicate dates are still rejected.
    pub fn from_unsorted(mut points: Vec<PricePoint>) -> Result<Self, FxOptionError> {
        points.sort_by_key(|point| point.date);
        Self::new(points)
    }

    /// Rows in date order.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Number of trading days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a validated series; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First trading day.
    #[must_use]
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Last trading day.
    #[must_use]
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Spot column.
    #[must_use]
    pub fn spots(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.spot).collect()
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = FxOptionError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}
