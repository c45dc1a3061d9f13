use criterion::{criterion_group, criterion_main, Criterion};
use docfind_core::{IndexBuilder, Normalizer, QueryEngine, QueryLimits};

fn bench_query(c: &mut Criterion) {
    let n = Normalizer::default();
    let mut b = IndexBuilder::new(&n);
    for i in 0..2_000 {
        let text = format!("alpha beta{} gamma{} alpha delta", i % 7, i % 13);
        b.add_text(&format!("doc{i:04}.txt"), &text).unwrap();
    }
    let index = b.finish();
    let engine = QueryEngine::new(&index, &n, QueryLimits::default());

    c.bench_function("single_term", |bch| bch.iter(|| engine.search("alpha").unwrap()));
    c.bench_function("three_term_and", |bch| bch.iter(|| engine.search("alpha beta3 gamma5").unwrap()));
}

criterion_group!(benches, bench_query);
criterion_main!(benches);
