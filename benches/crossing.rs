//! Benchmark harness using Criterion for the crossing pass.
//!
//! Measures:
//! - Order submission with no match (book scan only)
//! - Submission that settles against a resting counter-order
//! - Mixed seeded workload at growing book sizes

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use grn_exchange::{Exchange, Side, WalletId};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;

/// Exchange with `n` funded wallets (large fiat and coin balances).
fn funded_exchange(n: usize) -> (Exchange, Vec<WalletId>) {
    let mut exchange = Exchange::new();
    let ids = (0..n)
        .map(|i| {
            exchange
                .create_wallet(&format!("w{i}"), Decimal::from(10_000_000_000u64))
                .expect("funded wallet")
        })
        .collect();
    (exchange, ids)
}

/// Benchmark: submission that finds no counter-order.
fn bench_submit_no_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_no_match");

    for book_size in [10usize, 100, 1000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(book_size),
            &book_size,
            |b, &book_size| {
                let (mut exchange, ids) = funded_exchange(2);
                // Pre-populate one side only, so nothing ever crosses.
                for _ in 0..book_size {
                    exchange.submit_order(ids[0], Side::Buy, Decimal::ONE).unwrap();
                }
                b.iter(|| {
                    black_box(
                        exchange
                            .submit_order(ids[1], Side::Buy, Decimal::ONE)
                            .unwrap(),
                    )
                })
            },
        );
    }

    group.finish();
}

/// Benchmark: submission that settles immediately.
fn bench_submit_with_match(c: &mut Criterion) {
    c.bench_function("submit_with_match", |b| {
        let (mut exchange, ids) = funded_exchange(2);
        b.iter(|| {
            // Each iteration pairs a fresh sell with a fresh buy.
            exchange.submit_order(ids[0], Side::Sell, Decimal::ONE).unwrap();
            black_box(
                exchange
                    .submit_order(ids[1], Side::Buy, Decimal::ONE)
                    .unwrap(),
            )
        })
    });
}

/// Benchmark: seeded mixed workload.
fn bench_mixed_workload(c: &mut Criterion) {
    c.bench_function("mixed_workload", |b| {
        let (mut exchange, ids) = funded_exchange(16);
        let mut rng = ChaCha8Rng::seed_from_u64(0xDEADBEEF);
        b.iter(|| {
            let wallet = ids[rng.gen_range(0..ids.len())];
            let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
            let quantity = Decimal::from(rng.gen_range(1..20u32));
            black_box(exchange.submit_order(wallet, side, quantity).ok())
        })
    });
}

criterion_group!(
    benches,
    bench_submit_no_match,
    bench_submit_with_match,
    bench_mixed_workload,
);

criterion_main!(benches);
