//! Parallel execution of independent backtest scenarios.
//!
//! Each scenario runs on its own worker thread over a shared, read-only
//! price series, with at most `max_workers` threads alive at once. Finished
//! reports are routed back through a channel.

use super::engine::{BacktestConfig, DeltaHedgeBacktester};
use super::report::HedgeReport;
use super::series::PriceSeries;
use crate::fxoption::FxOptionError;
use std::collections::{BTreeMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use tracing::{error, info, warn};

/// Result of one named scenario.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    /// Scenario name.
    pub name: String,
    /// Report, or the error that stopped this scenario.
    pub result: Result<HedgeReport, FxOptionError>,
}

/// Callback invoked for every outcome as it arrives.
pub type OutcomeListener = Arc<dyn Fn(&ScenarioOutcome) + Send + Sync>;

/// Worker cap used when the available parallelism cannot be queried.
const FALLBACK_WORKERS: usize = 4;

/// Runs a set of named backtest configurations against one price series.
pub struct BacktestManager {
    /// Scenario configurations indexed by name
    scenarios: BTreeMap<String, BacktestConfig>,
    /// Optional observer of outcomes
    listener: Option<OutcomeListener>,
    /// Upper bound on concurrently running worker threads
    max_workers: usize,
}

impl Default for BacktestManager {
    fn default() -> Self {
        Self {
            scenarios: BTreeMap::new(),
            listener: None,
            max_workers: thread::available_parallelism()
                .map_or(FALLBACK_WORKERS, NonZeroUsize::get),
        }
    }
}

impl BacktestManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager that reports every outcome to `listener`.
    pub fn with_listener(listener: OutcomeListener) -> Self {
        Self {
            listener: Some(listener),
            ..Self::default()
        }
    }

    /// Limit the number of worker threads alive at once; zero means one.
    #[must_use]
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    /// Maximum number of worker threads `run_all` keeps alive at once.
    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Add or replace a scenario.
    pub fn add_scenario(&mut self, name: &str, config: BacktestConfig) {
        if self.scenarios.insert(name.to_string(), config).is_some() {
            info!("Replaced backtest scenario: {}", name);
        } else {
            info!("Added backtest scenario: {}", name);
        }
    }

    /// Get a scenario's configuration by name.
    pub fn get_scenario(&self, name: &str) -> Option<&BacktestConfig> {
        self.scenarios.get(name)
    }

    /// Names of all scenarios, sorted.
    pub fn scenarios(&self) -> Vec<String> {
        self.scenarios.keys().cloned().collect()
    }

    /// Remove a scenario.
    pub fn remove_scenario(&mut self, name: &str) -> Option<BacktestConfig> {
        let result = self.scenarios.remove(name);
        if result.is_some() {
            info!("Removed backtest scenario: {}", name);
        }
        result
    }

    /// Check if a scenario exists.
    pub fn has_scenario(&self, name: &str) -> bool {
        self.scenarios.contains_key(name)
    }

    /// Number of scenarios.
    pub fn scenario_count(&self) -> usize {
        self.scenarios.len()
    }

    /// Run every scenario on a worker thread and collect the outcomes.
    ///
    /// Scenarios run in name order, in batches of at most `max_workers`
    /// threads; a batch is joined before the next one starts. Outcomes are
    /// returned sorted by scenario name. A failing scenario yields an `Err`
    /// outcome and does not affect the others.
    pub fn run_all(&self, series: Arc<PriceSeries>) -> Vec<ScenarioOutcome> {
        let scenarios: Vec<(&String, &BacktestConfig)> = self.scenarios.iter().collect();
        let mut outcomes = Vec::with_capacity(scenarios.len());

        for batch in scenarios.chunks(self.max_workers) {
            self.run_batch(batch, &series, &mut outcomes);
        }

        outcomes.sort_by(|a, b| a.name.cmp(&b.name));
        info!("All backtest workers finished");
        outcomes
    }

    /// Run one batch of scenarios concurrently, appending their outcomes.
    fn run_batch(
        &self,
        batch: &[(&String, &BacktestConfig)],
        series: &Arc<PriceSeries>,
        outcomes: &mut Vec<ScenarioOutcome>,
    ) {
        let (sender, receiver) = mpsc::channel();
        let mut workers = Vec::with_capacity(batch.len());

        for &(name, config) in batch {
            let sender = sender.clone();
            let series = Arc::clone(series);
            let name = name.clone();
            let config = config.clone();

            let handle = thread::spawn({
                let name = name.clone();
                move || {
                    let result = DeltaHedgeBacktester::new(config.clone())
                        .and_then(|backtester| backtester.run(&series))
                        .map(|tracks| HedgeReport::from_tracks(config, tracks));

                    if let Err(e) = sender.send(ScenarioOutcome {
                        name: name.clone(),
                        result,
                    }) {
                        error!("Failed to send outcome for {}: {}", name, e);
                    }
                }
            });
            workers.push((name, handle));
        }
        drop(sender);

        info!("Started {} backtest workers", workers.len());

        let mut reported = HashSet::with_capacity(workers.len());
        while let Ok(outcome) = receiver.recv() {
            self.process_outcome(&outcome);
            reported.insert(outcome.name.clone());
            outcomes.push(outcome);
        }

        for (name, handle) in workers {
            let joined = handle.join();
            if joined.is_err() || !reported.contains(&name) {
                let outcome = ScenarioOutcome {
                    result: Err(FxOptionError::WorkerFailed {
                        scenario: name.clone(),
                    }),
                    name,
                };
                self.process_outcome(&outcome);
                outcomes.push(outcome);
            }
        }
    }

    /// Log one outcome and forward it to the listener.
    fn process_outcome(&self, outcome: &ScenarioOutcome) {
        match &outcome.result {
            Ok(report) => info!(
                "Scenario {}: {} days, final hedge P&L {:.6}, settlement {:.6}",
                outcome.name,
                report.trading_days(),
                report.final_pnl,
                report.settlement_value
            ),
            Err(e) => warn!("Scenario {} failed: {}", outcome.name, e),
        }

        if let Some(listener) = &self.listener {
            listener(outcome);
        }
    }
}
