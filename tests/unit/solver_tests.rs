#[cfg(test)]
mod tests {
    use fxoption_rs::prelude::*;

    #[test]
    fn test_round_trip_across_volatilities() {
        let config = SolverConfig::default();
        for sigma0 in [0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 3.5, 4.9] {
            let market_price = price(1.10, 1.10, 0.03, 0.01, sigma0, 1.0, true).unwrap();
            let result =
                implied_vol(market_price, 1.10, 1.10, 0.03, 0.01, 1.0, true, &config).unwrap();
            assert!(result.converged, "no convergence for σ0={sigma0}");
            assert!(
                (result.sigma - sigma0).abs() < 1e-4,
                "σ0={sigma0} recovered as {}",
                result.sigma
            );
        }
    }

    #[test]
    fn test_round_trip_for_puts() {
        let config = SolverConfig::default();
        for strike in [1.00, 1.10, 1.20] {
            let market_price = price(1.10, strike, 0.03, 0.01, 0.18, 0.5, false).unwrap();
            let result =
                implied_vol(market_price, 1.10, strike, 0.03, 0.01, 0.5, false, &config).unwrap();
            assert!(result.converged);
            assert!((result.sigma - 0.18).abs() < 1e-4);
        }
    }

    #[test]
    fn test_market_spread_raises_implied_vol() {
        // The model price plus a spread implies more volatility than was used
        let model_price = price(1.10, 1.10, 0.03, 0.01, 0.10, 1.0, true).unwrap();
        let result = implied_vol(
            model_price + 0.005,
            1.10,
            1.10,
            0.03,
            0.01,
            1.0,
            true,
            &SolverConfig::default(),
        )
        .unwrap();
        assert!(result.converged);
        assert!(result.sigma > 0.10);
        assert!(result.sigma < 0.15);
    }

    #[test]
    fn test_unreachable_price_is_no_convergence() {
        let result = implied_vol(
            2.0,
            1.10,
            1.10,
            0.03,
            0.01,
            1.0,
            true,
            &SolverConfig::default(),
        );
        match result {
            Err(FxOptionError::NoConvergence { best_estimate, .. }) => {
                assert_eq!(best_estimate, 5.0)
            }
            other => panic!("expected NoConvergence, got {other:?}"),
        }
    }

    #[test]
    fn test_narrow_bracket_excluding_root() {
        let market_price = price(1.10, 1.10, 0.03, 0.01, 0.30, 1.0, true).unwrap();
        let config = SolverConfig::new().with_bounds(0.05, 0.2);
        let result = implied_vol(market_price, 1.10, 1.10, 0.03, 0.01, 1.0, true, &config);
        assert!(matches!(
            result,
            Err(FxOptionError::NoConvergence { best_estimate, .. }) if best_estimate == 0.2
        ));
    }

    #[test]
    fn test_invalid_solver_inputs() {
        let config = SolverConfig::default();
        assert!(matches!(
            implied_vol(0.05, -1.10, 1.10, 0.03, 0.01, 1.0, true, &config),
            Err(FxOptionError::InvalidParameter { .. })
        ));
        assert!(matches!(
            implied_vol(0.05, 1.10, 1.10, 0.03, 0.01, -1.0, true, &config),
            Err(FxOptionError::InvalidParameter { .. })
        ));
        assert!(matches!(
            implied_vol(f64::NAN, 1.10, 1.10, 0.03, 0.01, 1.0, true, &config),
            Err(FxOptionError::InvalidParameter { .. })
        ));
        let zero_tolerance = SolverConfig::new().with_tolerance(0.0);
        assert!(matches!(
            implied_vol(0.05, 1.10, 1.10, 0.03, 0.01, 1.0, true, &zero_tolerance),
            Err(FxOptionError::InvalidParameter { .. })
        ));
    }
}
