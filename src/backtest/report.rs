//! Backtest summary and checksum-protected export

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::trace;
use uuid::Uuid;

use super::engine::{BacktestConfig, HedgeTrack};
use crate::fxoption::FxOptionError;

/// Summary of one completed delta-hedge backtest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HedgeReport {
    /// Identifier of this run
    pub run_id: Uuid,

    /// Parameters the run used
    pub config: BacktestConfig,

    /// Per-day rows in date order
    pub tracks: Vec<HedgeTrack>,

    /// Cumulative hedge P&L on the last row
    pub final_pnl: f64,

    /// Lowest cumulative hedge P&L over the run
    pub min_cum_pnl: f64,

    /// Highest cumulative hedge P&L over the run
    pub max_cum_pnl: f64,

    /// Cash settlement of the call on the final processed row
    pub settlement_value: f64,

    /// Row at which the option expired, if it expired inside the series
    pub expiry_index: Option<usize>,
}

impl HedgeReport {
    /// Summarizes the rows produced by a backtest run.
    pub fn from_tracks(config: BacktestConfig, tracks: Vec<HedgeTrack>) -> Self {
        let expiry_index = tracks.iter().position(|track| track.days_to_maturity <= 0);
        let settlement_row = expiry_index.or_else(|| tracks.len().checked_sub(1));
        let settlement_value = settlement_row
            .and_then(|index| tracks.get(index))
            .map_or(0.0, |track| track.option_value);

        let final_pnl = tracks.last().map_or(0.0, |track| track.pnl_hedge_cum);
        let (min_cum_pnl, max_cum_pnl) = tracks
            .iter()
            .map(|track| track.pnl_hedge_cum)
            .fold(None, |range: Option<(f64, f64)>, pnl| match range {
                Some((low, high)) => Some((low.min(pnl), high.max(pnl))),
                None => Some((pnl, pnl)),
            })
            .unwrap_or((0.0, 0.0));

        let report = Self {
            run_id: Uuid::new_v4(),
            config,
            tracks,
            final_pnl,
            min_cum_pnl,
            max_cum_pnl,
            settlement_value,
            expiry_index,
        };
        trace!("hedge report {}: final_pnl {}", report.run_id, report.final_pnl);
        report
    }

    /// Cumulative hedge P&L against date, for plotting
    pub fn cumulative_pnl_path(&self) -> Vec<(NaiveDate, f64)> {
        self.tracks
            .iter()
            .map(|track| (track.date, track.pnl_hedge_cum))
            .collect()
    }

    /// Premium paid for the call, taken from the first row's option value
    pub fn premium(&self) -> f64 {
        self.tracks.first().map_or(0.0, |track| track.option_value)
    }

    /// P&L of the hedged long call: hedge P&L plus settlement, less the premium
    pub fn total_pnl_with_settlement(&self) -> f64 {
        self.final_pnl + self.settlement_value - self.premium()
    }

    /// Number of simulated days
    pub fn trading_days(&self) -> usize {
        self.tracks.len()
    }
}

/// Format version used for checksum-enabled report packages.
pub const HEDGE_REPORT_FORMAT_VERSION: u32 = 1;

/// Wrapper that provides checksum validation for `HedgeReport` instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HedgeReportPackage {
    /// Version of the report schema for forward compatibility.
    pub version: u32,
    /// Report payload.
    pub report: HedgeReport,
    /// Hex-encoded SHA-256 of the serialized report.
    pub checksum: String,
}

impl HedgeReportPackage {
    /// Creates a new package computing the checksum of the report contents.
    pub fn new(report: HedgeReport) -> Result<Self, FxOptionError> {
        let checksum = Self::compute_checksum(&report)?;

        Ok(Self {
            version: HEDGE_REPORT_FORMAT_VERSION,
            report,
            checksum,
        })
    }

    /// Serializes the package to JSON.
    pub fn to_json(&self) -> Result<String, FxOptionError> {
        serde_json::to_string(self).map_err(|error| FxOptionError::SerializationError {
            message: error.to_string(),
        })
    }

    /// Deserializes the package from JSON.
    pub fn from_json(data: &str) -> Result<Self, FxOptionError> {
        serde_json::from_str(data).map_err(|error| FxOptionError::DeserializationError {
            message: error.to_string(),
        })
    }

    /// Validates the checksum and version.
    pub fn validate(&self) -> Result<(), FxOptionError> {
        if self.version != HEDGE_REPORT_FORMAT_VERSION {
            return Err(FxOptionError::UnsupportedVersion {
                found: self.version,
                expected: HEDGE_REPORT_FORMAT_VERSION,
            });
        }

        let computed = Self::compute_checksum(&self.report)?;
        if computed != self.checksum {
            return Err(FxOptionError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual: computed,
            });
        }

        Ok(())
    }

    /// Consumes the package and returns the validated report.
    pub fn into_report(self) -> Result<HedgeReport, FxOptionError> {
        self.validate()?;
        Ok(self.report)
    }

    fn compute_checksum(report: &HedgeReport) -> Result<String, FxOptionError> {
        let payload =
            serde_json::to_vec(report).map_err(|error| FxOptionError::SerializationError {
                message: error.to_string(),
            })?;

        let mut hasher = Sha256::new();
        hasher.update(payload);

        let checksum_bytes = hasher.finalize();
        Ok(format!("{:x}", checksum_bytes))
    }
}
