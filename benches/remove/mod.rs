use criterion::{
    measurement::Measurement, BatchSize, BenchmarkGroup, BenchmarkId, Criterion, Throughput,
};
use hbtree::AvlTree;

use crate::Lfsr;

#[derive(Debug, Clone, Copy)]
struct BenchName {
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new("n_values", v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("remove");

    for n_values in [100, 1_000, 10_000] {
        bench_param(&mut g, n_values)
    }
}

/// Measure the time needed to remove all `n_values` keys from a tree, in a
/// different order than they were inserted.
fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    // Generate the tree.
    let mut rand = Lfsr::default();
    let mut keys = Vec::with_capacity(n_values);
    let mut t = AvlTree::default();

    for _i in 0..n_values {
        let key = rand.next();
        t.insert(key, 42_usize);
        keys.push(key);
    }

    // Remove the keys from the middle out, exercising removals of nodes with
    // two children.
    let (a, b) = keys.split_at(n_values / 2);
    let order = a.iter().rev().chain(b.iter()).copied().collect::<Vec<_>>();

    let bench_name = BenchName { n_values };
    g.throughput(Throughput::Elements(n_values as _)); // Keys removed per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || t.clone(),
            |mut t| {
                for key in &order {
                    assert!(t.remove(key).is_some());
                }
                t
            },
            BatchSize::LargeInput,
        );
    });
}
