use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vela_par::AstArena;
use vela_util::diagnostic::Handler;

const SAMPLE: &str = r#"
i32 add(i32 a, i32 b) :: i32 {
    return a + b;
}

i32 main() :: i32 {
    i32 total = 0;
    for (i32 i = 0; i < 100; i++) {
        total = add(total, i);
    }
    bool done = total > 0 ? true :: false;
    return total;
}
"#;

fn bench_parse_sample_program(c: &mut Criterion) {
    c.bench_function("parse_sample_program", |b| {
        b.iter(|| {
            let mut handler = Handler::new();
            let arena = AstArena::new();
            let root = vela_par::parse(black_box(SAMPLE), &arena, &mut handler);
            black_box(root);
        });
    });
}

criterion_group!(benches, bench_parse_sample_program);
criterion_main!(benches);
