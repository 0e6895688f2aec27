use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use breezedb::query::{parse_query, QuerySyntax};

fn script(statements: usize) -> String {
    (0..statements)
        .map(|i| {
            format!(
                "CREATE FIELD %id{i}%; %int%; %name{i}%; %str%; IN %t{i}%; AT %db%;"
            )
        })
        .collect::<Vec<_>>()
        .join(" >> ")
}

fn criterion_benchmark(c: &mut Criterion) {
    let syntax = QuerySyntax::default();
    for statements in [1usize, 10, 100] {
        let query = script(statements);
        c.bench_function(&format!("parse {} statements", statements), |b| {
            b.iter(|| parse_query(black_box(&syntax), black_box(&query)))
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
