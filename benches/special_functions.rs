use criterion::{black_box, criterion_group, criterion_main, Criterion};
use probdist::integrate::simpson_default;
use probdist::special::{digamma, erf, gamma, regularized_lower_gamma, ErfMethod};
use probdist::{Distribution, Gamma, Poisson};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("gamma", |b| b.iter(|| gamma(black_box(7.3))));
    c.bench_function("digamma", |b| b.iter(|| digamma(black_box(2.4))));
    c.bench_function("erf_approximate", |b| {
        b.iter(|| erf(black_box(0.8), ErfMethod::Approximate))
    });
    c.bench_function("erf_exact", |b| b.iter(|| erf(black_box(0.8), ErfMethod::Exact)));
    c.bench_function("regularized_lower_gamma", |b| {
        b.iter(|| regularized_lower_gamma(black_box(3.5), black_box(2.)))
    });
    c.bench_function("simpson_sine", |b| {
        b.iter(|| simpson_default(f64::sin, 0., black_box(std::f64::consts::PI)))
    });

    let g = Gamma::new(0, 2.5, 1.5).unwrap();
    c.bench_function("gamma_quantile", |b| b.iter(|| g.quantile(black_box(0.3))));
    let p = Poisson::new(0, 30.).unwrap();
    c.bench_function("poisson_sample", |b| b.iter(|| p.sample()));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
