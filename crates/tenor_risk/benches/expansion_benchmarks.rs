//! Criterion benchmarks for tenor expansion and summary aggregation.
//!
//! Benchmarks cover:
//! - Single tenor and spread expansion
//! - Sequential vs rayon-parallel position expansion
//! - Summary pivot over expanded rows

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tenor_core::TenorMappings;
use tenor_risk::{expand_spread, expand_tenor, DeltaSummary, Position, PositionExpander};

/// Reference book cycled to `n` rows.
fn generate_positions(n: usize) -> Vec<Position> {
    let book = [
        (100.0, "H6", "HTT", "HTT_Front"),
        (1000.0, "Q2-26", "HTTMID", "Longhorn"),
        (100.0, "H2-26", "HTT", "HTT_Back"),
        (-75.0, "Cal27", "HTT", "HTT_Back"),
        (100.0, "Z6/Z7", "CLBR Boxes", "HOUBR_rolls"),
        (-1400.0, "Q2-26/Q3-26", "HTT Rolls", "HTT_Rolls"),
        (-120.0, "J6/Q2-26", "WDF", "Freight"),
    ];

    book.iter()
        .cycle()
        .take(n)
        .enumerate()
        .map(|(i, (qty, tenor, product, strategy))| {
            Position::new(qty * (1.0 + (i % 7) as f64), *tenor, *product, *strategy)
        })
        .collect()
}

fn bench_single_tenor(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_tenor");
    let mappings = TenorMappings::default();

    for tenor in ["H6", "Q2-26", "H2-2026", "Cal27"] {
        group.bench_with_input(BenchmarkId::new("expand", tenor), &tenor, |b, tenor| {
            b.iter(|| black_box(expand_tenor(black_box(tenor), 100.0, &mappings)))
        });
    }

    for spread in ["Z6/Z7", "Q2-26/Q3-26", "J6/Q2-26", "Cal27/Q1-28"] {
        group.bench_with_input(BenchmarkId::new("spread", spread), &spread, |b, spread| {
            b.iter(|| black_box(expand_spread(black_box(spread), -120.0, &mappings)))
        });
    }

    group.finish();
}

fn bench_position_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("position_expansion");
    group.sample_size(30);
    let expander = PositionExpander::default();

    for n_rows in [100, 1_000, 10_000] {
        let positions = generate_positions(n_rows);

        group.bench_with_input(
            BenchmarkId::new("sequential", n_rows),
            &positions,
            |b, positions| b.iter(|| black_box(expander.expand(positions))),
        );
        group.bench_with_input(
            BenchmarkId::new("parallel", n_rows),
            &positions,
            |b, positions| b.iter(|| black_box(expander.expand_par(positions))),
        );
    }

    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("delta_summary");
    let expander = PositionExpander::default();

    for n_rows in [100, 10_000] {
        let rows = match expander.expand(&generate_positions(n_rows)) {
            Ok(output) => output.rows,
            Err(e) => panic!("reference book failed to expand: {e}"),
        };
        group.bench_with_input(BenchmarkId::new("pivot", n_rows), &rows, |b, rows| {
            b.iter(|| black_box(DeltaSummary::from_rows(rows)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_tenor,
    bench_position_expansion,
    bench_summary
);
criterion_main!(benches);
