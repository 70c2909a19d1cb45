use super::*;
extern crate test;
use test::Bencher;

use rand::{Rng, SeedableRng};

const BENCH_LEN: usize = 100_000;

fn random_values(len: usize) -> Vec<i64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    (0..len).map(|_| rng.gen_range(-1_000_000..1_000_000)).collect()
}

#[bench]
fn bench_accumulator(b: &mut Bencher) {
    let mut rng = rand::thread_rng();
    let mut acc = RangeAccumulator::<i64>::new(BENCH_LEN);
    let mut shadow = vec![0; BENCH_LEN];
    b.iter(|| {
        // the shadow array makes the rounds slower, but keeps them checked
        let action = random_round_action(&mut rng, BENCH_LEN);
        run_round(&action, &mut acc, &mut shadow);
    });
}

#[bench]
fn bench_sparse_table_queries(b: &mut Bencher) {
    let mut rng = rand::thread_rng();
    let table = SparseTable::new(&random_values(BENCH_LEN)).unwrap();
    b.iter(|| {
        let (lo, hi) = random_inclusive_range(&mut rng, BENCH_LEN);
        test::bench::black_box(table.arg_min(lo, hi))
    });
}

#[bench]
fn bench_wavelet_kth(b: &mut Bencher) {
    let mut rng = rand::thread_rng();
    let tree = WaveletTree::new(&random_values(BENCH_LEN)).unwrap();
    b.iter(|| {
        let (l, r) = random_inclusive_range(&mut rng, BENCH_LEN);
        let k = rng.gen_range(1..=r - l + 1);
        test::bench::black_box(tree.kth(l, r, k))
    });
}

#[bench]
fn bench_coverage_updates(b: &mut Bencher) {
    let mut rng = rand::thread_rng();
    let mut tree = CoverageTree::<i64>::with_capacity(BENCH_LEN).unwrap();
    b.iter(|| {
        let (lo, hi) = random_inclusive_range(&mut rng, BENCH_LEN);
        let _ = tree.update_index(lo, hi, 1);
        test::bench::black_box(tree.query_all())
    });
}
