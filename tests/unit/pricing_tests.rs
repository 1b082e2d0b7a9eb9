#[cfg(test)]
mod tests {
    use fxoption_rs::prelude::*;

    const PARITY_TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_reference_atm_prices() {
        let call = price(1.10, 1.10, 0.03, 0.01, 0.10, 1.0, true).unwrap();
        let put = price(1.10, 1.10, 0.03, 0.01, 0.10, 1.0, false).unwrap();
        assert!((call - 0.0546).abs() < 1e-3, "call = {call}");
        assert!((put - 0.0331).abs() < 1e-3, "put = {put}");
    }

    #[test]
    fn test_put_call_parity_grid() {
        for &spot in &[0.85, 1.10, 1.35] {
            for &strike in &[0.90, 1.10, 1.30] {
                for &(domestic_rate, foreign_rate) in &[(0.03, 0.01), (-0.005, 0.02), (0.0, 0.0)] {
                    for &sigma in &[0.05, 0.2, 0.8] {
                        for &time in &[0.02, 0.5, 3.0] {
                            let call =
                                price(spot, strike, domestic_rate, foreign_rate, sigma, time, true)
                                    .unwrap();
                            let put =
                                price(spot, strike, domestic_rate, foreign_rate, sigma, time, false)
                                    .unwrap();
                            let forward_diff = spot * (-foreign_rate * time).exp()
                                - strike * (-domestic_rate * time).exp();
                            assert!(
                                (call - put - forward_diff).abs() < PARITY_TOLERANCE,
                                "parity broken for S={spot} K={strike} σ={sigma} T={time}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_price_increasing_in_sigma() {
        let market = MarketSnapshot::new(1.10, 0.03, 0.01);
        for option in [OptionSpec::call(1.10, 0.0, 1.0), OptionSpec::put(1.05, 0.0, 0.5)] {
            let mut previous = GarmanKohlhagen::price(&market, &option.with_sigma(0.02)).unwrap();
            for step in 1..100 {
                let sigma = 0.02 + step as f64 * 0.02;
                let current = GarmanKohlhagen::price(&market, &option.with_sigma(sigma)).unwrap();
                assert!(current > previous, "not increasing at σ={sigma}");
                previous = current;
            }
        }
    }

    #[test]
    fn test_delta_call_matches_finite_difference() {
        let bump = 1e-5;
        let up = price(1.10 + bump, 1.08, 0.03, 0.01, 0.12, 0.75, true).unwrap();
        let down = price(1.10 - bump, 1.08, 0.03, 0.01, 0.12, 0.75, true).unwrap();
        let delta = delta_call(1.10, 1.08, 0.03, 0.01, 0.12, 0.75).unwrap();
        assert!((delta - (up - down) / (2.0 * bump)).abs() < 1e-4);
    }

    #[test]
    fn test_invalid_inputs_are_rejected_not_nan() {
        let cases = [
            (0.0, 1.10, 0.10, 1.0),
            (1.10, -1.0, 0.10, 1.0),
            (1.10, 1.10, 0.0, 1.0),
            (1.10, 1.10, 0.10, 0.0),
            (f64::NAN, 1.10, 0.10, 1.0),
        ];
        for (spot, strike, sigma, time) in cases {
            assert!(matches!(
                price(spot, strike, 0.03, 0.01, sigma, time, true),
                Err(FxOptionError::InvalidParameter { .. })
            ));
            assert!(matches!(
                delta_call(spot, strike, 0.03, 0.01, sigma, time),
                Err(FxOptionError::InvalidParameter { .. })
            ));
        }
    }
}
