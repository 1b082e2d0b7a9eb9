#[cfg(test)]
mod tests {
    use chrono::{Datelike, Days, NaiveDate, Weekday};
    use fxoption_rs::prelude::*;
    use std::sync::Arc;

    /// Weekday-only dates starting Monday 2022-01-03.
    fn trading_days(count: usize) -> Vec<NaiveDate> {
        let mut date = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
        let mut days = Vec::with_capacity(count);
        while days.len() < count {
            if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                days.push(date);
            }
            date = date + Days::new(1);
        }
        days
    }

    fn series(spots: &[f64]) -> PriceSeries {
        let points = trading_days(spots.len())
            .into_iter()
            .zip(spots)
            .map(|(date, &spot)| PricePoint::new(date, spot))
            .collect();
        PriceSeries::new(points).unwrap()
    }

    /// Deterministic zig-zag path around 1.10.
    fn zig_zag(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| 1.10 + 0.004 * ((i % 7) as f64 - 3.0) + 0.0005 * i as f64)
            .collect()
    }

    #[test]
    fn test_five_day_reference_scenario() {
        let tracks = backtest(&series(&[1.10, 1.11, 1.09, 1.12, 1.10]), 1.10, 0.03, 0.01, 0.10, 5)
            .unwrap();
        assert_eq!(tracks.len(), 5);
        assert!(tracks.iter().any(|track| track.pnl_hedge_cum != 0.0));
        assert_eq!(tracks[4].option_value, 0.0);
    }

    #[test]
    fn test_cumulative_sum_law() {
        let tracks = backtest(&series(&zig_zag(40)), 1.10, 0.03, 0.01, 0.10, 60).unwrap();
        assert_eq!(tracks[0].pnl_hedge, 0.0);
        assert_eq!(tracks[0].hedge_position, -tracks[0].delta);
        for pair in tracks.windows(2) {
            let diff = pair[1].pnl_hedge_cum - pair[0].pnl_hedge_cum - pair[1].pnl_hedge;
            assert!(diff.abs() < 1e-14);
        }
    }

    #[test]
    fn test_hedge_tracks_negative_delta_while_active() {
        let tracks = backtest(&series(&zig_zag(20)), 1.10, 0.03, 0.01, 0.10, 60).unwrap();
        for track in &tracks {
            assert!((track.hedge_position + track.delta).abs() < 1e-12);
            assert!(track.delta > 0.0 && track.delta < 1.0);
        }
    }

    #[test]
    fn test_expiry_freeze_over_long_series() {
        let spots = zig_zag(30);
        let tracks = backtest(&series(&spots), 1.09, 0.03, 0.01, 0.10, 10).unwrap();
        assert_eq!(tracks.len(), 30);

        let expiry = tracks
            .iter()
            .position(|track| track.days_to_maturity <= 0)
            .unwrap();
        assert_eq!(expiry, 10);

        let frozen_hedge = tracks[expiry - 1].hedge_position;
        let frozen_pnl = tracks[expiry - 1].pnl_hedge_cum;
        assert!((tracks[expiry].option_value - (spots[expiry] - 1.09).max(0.0)).abs() < 1e-12);
        for track in &tracks[expiry..] {
            assert_eq!(track.delta, 0.0);
            assert_eq!(track.pnl_hedge, 0.0);
            assert_eq!(track.hedge_position, frozen_hedge);
            assert_eq!(track.pnl_hedge_cum, frozen_pnl);
        }
        assert!(tracks[expiry + 1..].iter().all(|track| track.option_value == 0.0));
    }

    #[test]
    fn test_rejects_bad_inputs_before_simulating() {
        assert!(matches!(
            PriceSeries::new(Vec::new()),
            Err(FxOptionError::EmptySeries)
        ));

        let days = trading_days(2);
        let reversed = vec![PricePoint::new(days[1], 1.10), PricePoint::new(days[0], 1.11)];
        assert!(matches!(
            PriceSeries::new(reversed),
            Err(FxOptionError::UnsortedSeries { index: 1, .. })
        ));

        let s = series(&[1.10, 1.11]);
        assert!(matches!(
            backtest(&s, 1.10, 0.03, 0.01, -0.1, 5),
            Err(FxOptionError::InvalidParameter { .. })
        ));
        assert!(matches!(
            backtest(&s, 0.0, 0.03, 0.01, 0.1, 5),
            Err(FxOptionError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_report_export_round_trip() {
        let config = BacktestConfig::new(1.10, 0.03, 0.01, 0.10, 15);
        let tracks = DeltaHedgeBacktester::new(config.clone())
            .unwrap()
            .run(&series(&zig_zag(20)))
            .unwrap();
        let report = HedgeReport::from_tracks(config, tracks);
        assert_eq!(report.expiry_index, Some(15));
        assert_eq!(report.cumulative_pnl_path().len(), 20);
        assert!(report.min_cum_pnl <= report.final_pnl && report.final_pnl <= report.max_cum_pnl);

        let json = HedgeReportPackage::new(report.clone())
            .unwrap()
            .to_json()
            .unwrap();
        let restored = HedgeReportPackage::from_json(&json)
            .unwrap()
            .into_report()
            .unwrap();
        assert_eq!(restored, report);
    }

    #[test]
    fn test_parallel_runs_match_sequential() {
        let s = series(&zig_zag(25));
        let configs = [
            ("atm", BacktestConfig::new(1.10, 0.03, 0.01, 0.10, 30)),
            ("itm", BacktestConfig::new(1.05, 0.03, 0.01, 0.10, 30)),
            ("hi_vol", BacktestConfig::new(1.10, 0.03, 0.01, 0.35, 30)),
        ];

        let mut manager = BacktestManager::new();
        for (name, config) in &configs {
            manager.add_scenario(name, config.clone());
        }
        let outcomes = manager.run_all(Arc::new(s.clone()));
        assert_eq!(outcomes.len(), configs.len());

        for (name, config) in configs {
            let sequential = DeltaHedgeBacktester::new(config).unwrap().run(&s).unwrap();
            let outcome = outcomes.iter().find(|o| o.name == name).unwrap();
            let report = outcome.result.as_ref().unwrap();
            assert_eq!(report.tracks, sequential);
        }
    }
}
