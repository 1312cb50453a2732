#[macro_use]
extern crate criterion;

use rand::Rng;
use rand_distr::Normal;
use rand_distr::Uniform;
use std::hint::black_box;

use classbreaks::{QuantileOptions, jenks, quantile_breaks};
use criterion::Criterion;

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("jenks 2k i32, Uniform: 0 - 250", |bencher| {
        let mut rng = rand::rng();
        let range = Uniform::new(0, 250).unwrap();

        let data: Vec<i32> = (0..2_000).map(|_| rng.sample(range)).collect();
        bencher.iter(|| {
            jenks(black_box(&data), black_box(7)).unwrap();
        });
    });

    c.bench_function("jenks 2k f64, Gaussian: mu = 3, sigma = 1", |bencher| {
        let mut rng = rand::rng();
        let range = Normal::new(3.0, 1.0).unwrap();

        let data: Vec<f64> = (0..2_000).map(|_| rng.sample(range)).collect();
        bencher.iter(|| {
            jenks(black_box(&data), black_box(7)).unwrap();
        });
    });

    c.bench_function("quantile 110k f64, Gaussian: mu = 3, sigma = 1", |bencher| {
        let mut rng = rand::rng();
        let range = Normal::new(3.0, 1.0).unwrap();
        let options = QuantileOptions::default().with_nb(7);

        let data: Vec<f64> = (0..110_000).map(|_| rng.sample(range)).collect();
        bencher.iter(|| {
            quantile_breaks(black_box(&data), black_box(&options)).unwrap();
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
