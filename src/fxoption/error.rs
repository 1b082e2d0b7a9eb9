//! Error types for FX option pricing, implied volatility and backtesting.

use chrono::NaiveDate;
use std::fmt;

/// Errors produced by the pricer, the implied volatility solver and the
/// delta-hedge backtester.
#[derive(Debug, Clone, PartialEq)]
pub enum FxOptionError {
    /// A pricing or backtest input is out of its domain (non-positive spot,
    /// strike, volatility or time to maturity, non-finite values, bad bracket).
    InvalidParameter {
        /// Description of the invalid parameter.
        message: String,
    },

    /// The bisection bracket does not contain the market price.
    NoConvergence {
        /// Number of iterations attempted.
        iterations: u32,
        /// Best volatility estimate when the solver gave up.
        best_estimate: f64,
    },

    /// The price series handed to the backtester has no rows.
    EmptySeries,

    /// The price series is not strictly increasing by date.
    UnsortedSeries {
        /// Index of the offending row.
        index: usize,
        /// Date of the row before it.
        previous: NaiveDate,
        /// Date of the offending row.
        current: NaiveDate,
    },

    /// A report could not be serialized.
    SerializationError {
        /// Underlying serializer message.
        message: String,
    },

    /// A report package could not be deserialized.
    DeserializationError {
        /// Underlying deserializer message.
        message: String,
    },

    /// The stored checksum of a report package does not match its payload.
    ChecksumMismatch {
        /// Checksum stored in the package.
        expected: String,
        /// Checksum computed from the payload.
        actual: String,
    },

    /// The report package was written with an unknown format version.
    UnsupportedVersion {
        /// Version found in the package.
        found: u32,
        /// Version this build understands.
        expected: u32,
    },

    /// A backtest worker thread terminated without reporting a result.
    WorkerFailed {
        /// Name of the scenario the worker was running.
        scenario: String,
    },
}

impl FxOptionError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        FxOptionError::InvalidParameter {
            message: message.into(),
        }
    }
}

impl fmt::Display for FxOptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FxOptionError::InvalidParameter { message } => {
                write!(f, "invalid parameter: {message}")
            }
            FxOptionError::NoConvergence {
                iterations,
                best_estimate,
            } => {
                write!(
                    f,
                    "implied volatility did not converge after {iterations} iterations, best estimate: {best_estimate:.6}"
                )
            }
            FxOptionError::EmptySeries => write!(f, "price series is empty"),
            FxOptionError::UnsortedSeries {
                index,
                previous,
                current,
            } => {
                write!(
                    f,
                    "price series is not strictly increasing at row {index}: {current} follows {previous}"
                )
            }
            FxOptionError::SerializationError { message } => {
                write!(f, "serialization failed: {message}")
            }
            FxOptionError::DeserializationError { message } => {
                write!(f, "deserialization failed: {message}")
            }
            FxOptionError::ChecksumMismatch { expected, actual } => {
                write!(f, "checksum mismatch: expected {expected}, got {actual}")
            }
            FxOptionError::UnsupportedVersion { found, expected } => {
                write!(
                    f,
                    "unsupported report version: {found} (expected {expected})"
                )
            }
            FxOptionError::WorkerFailed { scenario } => {
                write!(f, "backtest worker for scenario {scenario} failed")
            }
        }
    }
}

impl std::error::Error for FxOptionError {}
