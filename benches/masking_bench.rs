use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sql_obfuscator::obfuscator::{caching_sql_obfuscator, default_sql_obfuscator, SqlObfuscator};
use sql_obfuscator::{DefaultSqlObfuscator, SqlDialect};
use std::hint::black_box;

fn create_statements(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            format!(
                "SELECT id, name FROM users WHERE id = {} AND email = 'user{}@test{}.com' \
                 AND created > '2024-01-{:02}' /* batch {} */ AND active = true",
                i,
                i % 100,
                i % 10,
                1 + i % 28,
                i % 7
            )
        })
        .collect()
}

fn masking_benchmark(c: &mut Criterion) {
    let statements = create_statements(1000);
    let bytes: usize = statements.iter().map(String::len).sum();

    let mut group = c.benchmark_group("masking");
    group.throughput(Throughput::Bytes(bytes as u64));

    for dialect in [SqlDialect::Any, SqlDialect::Mysql, SqlDialect::Postgres, SqlDialect::Oracle] {
        let obfuscator = DefaultSqlObfuscator::with_dialect(dialect);
        group.bench_with_input(BenchmarkId::new("dialect", dialect), &statements, |b, statements| {
            b.iter(|| {
                for sql in statements {
                    black_box(obfuscator.obfuscate_sql(black_box(sql)));
                }
            });
        });
    }
    group.finish();
}

fn caching_benchmark(c: &mut Criterion) {
    let statements = create_statements(100);

    let mut group = c.benchmark_group("caching");
    group.bench_function("uncached", |b| {
        let obfuscator = default_sql_obfuscator();
        b.iter(|| {
            for sql in &statements {
                black_box(obfuscator.obfuscate_sql(black_box(sql)));
            }
        });
    });
    group.bench_function("cached", |b| {
        let obfuscator = caching_sql_obfuscator(Box::new(default_sql_obfuscator()));
        b.iter(|| {
            for sql in &statements {
                black_box(obfuscator.obfuscate_sql(black_box(sql)));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, masking_benchmark, caching_benchmark);
criterion_main!(benches);
