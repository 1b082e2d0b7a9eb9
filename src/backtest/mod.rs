//! Daily delta-hedge backtesting over historical spot series.

pub mod engine;
/// Parallel execution of independent scenarios with outcome routing.
pub mod manager;
pub mod report;
pub mod series;

pub use engine::{BacktestConfig, DAYS_PER_YEAR, DeltaHedgeBacktester, HedgeTrack, backtest};
pub use manager::{BacktestManager, OutcomeListener, ScenarioOutcome};
pub use report::{HEDGE_REPORT_FORMAT_VERSION, HedgeReport, HedgeReportPackage};
pub use series::{PricePoint, PriceSeries};
