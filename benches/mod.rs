use chrono::{Days, NaiveDate};
use criterion::{Criterion, criterion_group, criterion_main};
use fxoption_rs::prelude::*;
use std::hint::black_box;

fn year_of_spots() -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
    let points = (0..252)
        .map(|i| {
            let spot = 1.10 + 0.01 * (i as f64 * 0.3).sin();
            PricePoint::new(start + Days::new(i as u64), spot)
        })
        .collect();
    PriceSeries::new(points).unwrap()
}

fn bench_pricing(c: &mut Criterion) {
    c.bench_function("garman_kohlhagen_call", |b| {
        b.iter(|| {
            price(
                black_box(1.10),
                black_box(1.12),
                0.03,
                0.01,
                black_box(0.10),
                0.5,
                true,
            )
        })
    });
}

fn bench_implied_vol(c: &mut Criterion) {
    let config = SolverConfig::default();
    let market_price = price(1.10, 1.12, 0.03, 0.01, 0.11, 0.5, true).unwrap();
    c.bench_function("implied_vol_bisection", |b| {
        b.iter(|| {
            implied_vol(
                black_box(market_price),
                1.10,
                1.12,
                0.03,
                0.01,
                0.5,
                true,
                &config,
            )
        })
    });
}

fn bench_backtest(c: &mut Criterion) {
    let series = year_of_spots();
    c.bench_function("delta_hedge_backtest_252_days", |b| {
        b.iter(|| backtest(black_box(&series), 1.10, 0.03, 0.01, 0.10, 365))
    });
}

criterion_group!(benches, bench_pricing, bench_implied_vol, bench_backtest);
criterion_main!(benches);
