use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vela_lex::Lexer;
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
    return total;
}
"#;

fn bench_tokenize_sample_program(c: &mut Criterion) {
    c.bench_function("tokenize_sample_program", |b| {
        b.iter(|| {
            let mut handler = Handler::new();
            let lexer = Lexer::new(black_box(SAMPLE), &mut handler);
            let tokens: Vec<_> = lexer.collect();
            black_box(tokens);
        });
    });
}

criterion_group!(benches, bench_tokenize_sample_program);
criterion_main!(benches);
