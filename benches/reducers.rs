use criterion::{criterion_group, criterion_main, Criterion};
use popmunge::commands::{reduce_het, reduce_pi_dxy_fst};
use popmunge::io::{PiawkaIterator, POPMUNGE_TSV};
use popmunge::stats::DiversityAccumulator;
use popmunge::test_utilities::{random_piawka_file, NRANDOM_LOCI};

fn bench_reducers(c: &mut Criterion) {
    // create the benchmark group
    let mut group = c.benchmark_group("reducers");

    // create the test data
    let dir = tempfile::tempdir().unwrap();
    let input = random_piawka_file(dir.path(), NRANDOM_LOCI);

    // configure the sample size for the group
    group.sample_size(10);

    group.bench_function("parse_only", |b| {
        b.iter(|| {
            let mut accumulator = DiversityAccumulator::new();
            for record in PiawkaIterator::new(&input).unwrap() {
                accumulator.push(&record.unwrap());
            }
            accumulator.dxy_table().len()
        });
    });

    group.bench_function("het", |b| {
        b.iter(|| reduce_het(&input, &POPMUNGE_TSV).unwrap());
    });

    group.bench_function("pi_dxy_fst", |b| {
        b.iter(|| reduce_pi_dxy_fst(&input, &POPMUNGE_TSV).unwrap());
    });
}

criterion_group!(benches, bench_reducers);
criterion_main!(benches);
