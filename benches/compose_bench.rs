use std::fmt::Write as _;
use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use penguin_explorer::ChartComposer;
use penguin_explorer::core::{BinPlan, Dataset, Record};
use penguin_explorer::interaction::{ReactiveBinder, SelectionChange};
use penguin_explorer::render::NullSurface;
use penguin_explorer::source::parse_dataset;

const SPECIES: [&str; 3] = ["Adelie", "Chinstrap", "Gentoo"];

fn generated_dataset(rows: usize) -> Dataset {
    let records = (0..rows)
        .map(|i| {
            let t = i as f64;
            Record::new(
                SPECIES[i % SPECIES.len()],
                Some(32.0 + (t * 0.37) % 28.0),
                Some(13.0 + (t * 0.11) % 8.5),
                Some(172.0 + (t * 1.3) % 59.0),
                Some(2700.0 + (t * 17.0) % 3600.0),
            )
        })
        .collect();
    Dataset::new(records).expect("valid generated dataset")
}

fn generated_csv(rows: usize) -> String {
    let mut csv = String::from(
        "species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year\n",
    );
    for i in 0..rows {
        let t = i as f64;
        let _ = writeln!(
            csv,
            "{},Biscoe,{:.1},{:.1},{:.0},{:.0},female,2008",
            SPECIES[i % SPECIES.len()],
            32.0 + (t * 0.37) % 28.0,
            13.0 + (t * 0.11) % 8.5,
            172.0 + (t * 1.3) % 59.0,
            2700.0 + (t * 17.0) % 3600.0,
        );
    }
    csv
}

fn bench_parse_dataset_344(c: &mut Criterion) {
    let csv = generated_csv(344);
    c.bench_function("parse_dataset_344", |b| {
        b.iter(|| {
            let _ = parse_dataset(black_box(csv.as_bytes())).expect("parse");
        })
    });
}

fn bench_compose_344(c: &mut Criterion) {
    let composer = ChartComposer::with_default_config(Arc::new(generated_dataset(344)));
    c.bench_function("compose_344", |b| {
        b.iter(|| {
            let _ = composer
                .compose(black_box("flipper_length_mm"), black_box("bill_length_mm"))
                .expect("compose");
        })
    });
}

fn bench_compose_10k(c: &mut Criterion) {
    let composer = ChartComposer::with_default_config(Arc::new(generated_dataset(10_000)));
    c.bench_function("compose_10k", |b| {
        b.iter(|| {
            let _ = composer
                .compose(black_box("body_mass_g"), black_box("bill_depth_mm"))
                .expect("compose");
        })
    });
}

fn bench_bin_plan(c: &mut Criterion) {
    c.bench_function("bin_plan_nice", |b| {
        b.iter(|| {
            let _ = BinPlan::nice(black_box((2700.0, 6300.0)), black_box(10)).expect("plan");
        })
    });
}

fn bench_binder_dispatch(c: &mut Criterion) {
    let composer = ChartComposer::with_default_config(Arc::new(generated_dataset(344)));
    let binder = ReactiveBinder::new(composer, NullSurface::default()).expect("binder");
    let keys = ["bill_length_mm", "bill_depth_mm", "body_mass_g", "flipper_length_mm"];
    let mut next = 0usize;

    c.bench_function("binder_dispatch_344", |b| {
        b.iter(|| {
            let key = keys[next % keys.len()];
            next += 1;
            let _ = binder
                .dispatch(black_box(SelectionChange::x(key)))
                .expect("dispatch");
        })
    });
}

criterion_group!(
    benches,
    bench_parse_dataset_344,
    bench_compose_344,
    bench_compose_10k,
    bench_bin_plan,
    bench_binder_dispatch
);
criterion_main!(benches);
