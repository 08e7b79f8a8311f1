use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::SeedableRng;

pub fn reader_throughput_bench(c: &mut Criterion) {
    let mb = match std::env::var("READER_THROUGHPUT_MB") {
        Ok(val) => match val.parse::<usize>() {
            Ok(val) => val,
            Err(_) => panic!["Failed to parse env var READER_THROUGHPUT_MB={} as an integer", val],
        },
        Err(_) => 10,
    };
    let weights = Default::default();
    let mut rng = rand::prelude::StdRng::seed_from_u64(43);
    let input = performance::generate_random_document(
        &mut rng,
        mb * 1000 * 1000,
        (5, 20),
        (0, 30),
        4,
        &weights,
    );

    let mut group = c.benchmark_group("reader-throughput");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.sample_size(10);

    group.bench_function("reader_throughput_chars", |b| {
        b.iter(|| performance::run_in_icsv(&input, performance::config()))
    });

    group.bench_function("reader_throughput_utf8", |b| {
        b.iter(|| performance::run_in_icsv_from_bytes(input.as_bytes(), performance::config()))
    });

    group.bench_function("reader_throughput_default_config", |b| {
        b.iter(|| performance::run_in_icsv(&input, Default::default()))
    });
}

criterion_group!(benches, reader_throughput_bench);
criterion_main!(benches);
