//! Hot-path benchmarks: the per-packet filter work must fit the frame budget.

use criterion::{Criterion, criterion_group, criterion_main};
use opentouch_filters::{ScrollAccumulator, SimpleAverage, to_hid_value};
use std::hint::black_box;

fn bench_average(c: &mut Criterion) {
    c.bench_function("simple_average_filter", |b| {
        let mut avg = SimpleAverage::<5>::new();
        let mut x = 0i32;
        b.iter(|| {
            x = (x + 17) % 6143;
            black_box(avg.filter(black_box(x)))
        });
    });
}

fn bench_noise_gate(c: &mut Criterion) {
    c.bench_function("to_hid_value", |b| {
        let mut d = -400i32;
        b.iter(|| {
            d = if d > 400 { -400 } else { d + 7 };
            black_box(to_hid_value(black_box(d), 11.0, 0.21))
        });
    });
}

fn bench_scroll_accumulator(c: &mut Criterion) {
    c.bench_function("scroll_accumulator_push", |b| {
        let mut acc = ScrollAccumulator::new();
        b.iter(|| black_box(acc.push(black_box(0.23))));
    });
}

criterion_group!(
    benches,
    bench_average,
    bench_noise_gate,
    bench_scroll_accumulator
);
criterion_main!(benches);
