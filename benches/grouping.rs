use std::{hint::black_box, time::Duration};

use criterion::{Criterion, criterion_group, criterion_main};
use group_nest::{CountingGroupedCollection, GroupedCollection, Grouper};
use rand::{RngExt, SeedableRng, rngs::StdRng};

fn grouping(criterion: &mut Criterion) {
    let seed = 0;
    let mut rng = StdRng::seed_from_u64(seed);

    let nums: Vec<i64> = std::iter::repeat_with(|| rng.random_range(-10_000..=10_000))
        .take(100_000)
        .collect();

    println!("Seed: {seed}");
    println!("First 10 elements: {:?}", &nums[..10]);

    let mut group = criterion.benchmark_group("grouping");

    group.bench_function("construct_two_levels", |bencher| {
        bencher.iter(|| black_box(two_levels(&nums)));
    });

    group.bench_function("add_all", |bencher| {
        bencher.iter(|| black_box(add_all(&nums)));
    });

    group.bench_function("count_by_residue", |bencher| {
        bencher.iter(|| black_box(count_by_residue(&nums)));
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_secs(3))
        .measurement_time(Duration::from_secs(10));
    targets = grouping
}
criterion_main!(benches);

fn groupers() -> Vec<Grouper<i64>> {
    vec![
        Grouper::new("negative", |n: &i64| *n < 0),
        Grouper::new("residue", |n: &i64| n.rem_euclid(100)),
    ]
}

fn two_levels(nums: &[i64]) -> GroupedCollection<i64> {
    GroupedCollection::new(nums.iter().copied(), groupers()).unwrap()
}

fn add_all(nums: &[i64]) -> GroupedCollection<i64> {
    let mut grouped = GroupedCollection::new(std::iter::empty(), groupers()).unwrap();
    for &num in nums {
        grouped.add(num).unwrap();
    }
    grouped
}

fn count_by_residue(nums: &[i64]) -> CountingGroupedCollection<i64> {
    CountingGroupedCollection::new(
        nums.iter().copied(),
        Grouper::new("residue", |n: &i64| n.rem_euclid(100)),
    )
    .unwrap()
}
