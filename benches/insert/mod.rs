use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};
use hbtree::{Avl, AvlTree};

use crate::Lfsr;

#[derive(Debug, Clone, Copy)]
struct BenchName {
    bench_name: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.bench_name), v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("insert");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_random(&mut g, n_values);
        bench_ascending(&mut g, n_values);
        bench_random_no_early_exit(&mut g, n_values);
    }
}

macro_rules! insert_bench {
    (
        $name:ident,
        $new_tree:expr,
        $next_key:expr
    ) => {
        paste::paste! {
            /// Measure the time needed to insert `n_values` keys into an empty
            /// tree.
            fn [<bench_ $name>]<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
            where
                M: Measurement,
            {
                let bench_name = BenchName {
                    n_values,
                    bench_name: stringify!($name),
                };

                g.throughput(Throughput::Elements(n_values as _)); // Keys inserted per second
                g.bench_function(BenchmarkId::from(bench_name), |b| {
                    b.iter_batched(
                        || ($new_tree, Lfsr::default()),
                        |(mut t, mut rand)| {
                            for i in 0..n_values {
                                let key = $next_key(&mut rand, i);
                                t.insert(key, 42_usize);
                            }
                            t
                        },
                        criterion::BatchSize::PerIteration,
                    );
                });
            }
        }
    };
}

insert_bench!(random, AvlTree::default(), |r: &mut Lfsr, _i: usize| r.next());
insert_bench!(ascending, AvlTree::default(), |_r: &mut Lfsr, i: usize| i as u16);
insert_bench!(
    random_no_early_exit,
    AvlTree::with_discipline(Avl::with_early_exit(false)),
    |r: &mut Lfsr, _i: usize| r.next()
);
