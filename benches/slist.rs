use criterion::{
    criterion_group,
    criterion_main,
    BenchmarkId,
    Criterion,
    Throughput,
};
use rand::{
    rngs::SmallRng,
    seq::SliceRandom,
    SeedableRng,
};
use slist::{
    Config,
    SList,
};

static SIZES: [u32; 4] = [1 << 8, 1 << 10, 1 << 12, 1 << 14];
static LEVELS: [usize; 3] = [1, 4, 12];

fn shuffled(n: u32) -> Vec<u32> {
    let mut values: Vec<u32> = (0..n).collect();
    values.shuffle(&mut SmallRng::seed_from_u64(n as u64));
    values
}

fn filled(max_level: usize, values: &[u32]) -> SList<u32> {
    let mut list = SList::seeded(Config::new(max_level), 42).unwrap();
    list.extend(values.iter().copied());
    list
}

pub fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &size in SIZES.iter() {
        let values = shuffled(size);
        group.throughput(Throughput::Elements(size as u64));
        for &max_level in LEVELS.iter() {
            group.bench_with_input(
                BenchmarkId::new(format!("levels/{}", max_level), size),
                &values,
                |b, values| b.iter(|| filled(max_level, values)),
            );
        }
    }
    group.finish();
}

pub fn find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");
    for &size in SIZES.iter() {
        let values = shuffled(size);
        group.throughput(Throughput::Elements(size as u64));
        for &max_level in LEVELS.iter() {
            let mut list = filled(max_level, &values);
            group.bench_with_input(
                BenchmarkId::new(format!("levels/{}", max_level), size),
                &values,
                |b, values| b.iter(|| values.iter().filter(|v| list.find(v)).count()),
            );
            list.reset_cost();
            values.iter().for_each(|v| {
                list.find(v);
            });
            println!(
                "find levels/{} size {}: {:.2} hops per search",
                max_level,
                size,
                list.cost() as f64 / size as f64
            );
        }
    }
    group.finish();
}

pub fn remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    for &size in SIZES.iter() {
        let values = shuffled(size);
        group.throughput(Throughput::Elements(size as u64));
        let max_level = 12;
        group.bench_with_input(BenchmarkId::from_parameter(size), &values, |b, values| {
            b.iter_batched(
                || filled(max_level, values),
                |mut list| {
                    for v in values.iter() {
                        list.remove(v);
                    }
                    list
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets =
    insert,
    find,
    remove,
);
criterion_main!(benches);
