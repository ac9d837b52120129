use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vela_util::Symbol;

fn bench_intern_unique(c: &mut Criterion) {
    c.bench_function("intern_unique_strings", |b| {
        b.iter(|| {
            for i in 0..1000 {
                black_box(Symbol::intern(&format!("ident_{i}")));
            }
        });
    });
}

fn bench_intern_repeated(c: &mut Criterion) {
    c.bench_function("intern_repeated_string", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                black_box(Symbol::intern("the_same_identifier"));
            }
        });
    });
}

criterion_group!(benches, bench_intern_unique, bench_intern_repeated);
criterion_main!(benches);
