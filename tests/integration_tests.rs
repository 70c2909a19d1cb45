#![cfg_attr(feature = "bench", feature(test))]

mod common;
use common::*;

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use rqtrees::*;

const NUM_ROUNDS: usize = if cfg!(not(miri)) { 10_000 } else { 100 }; // miri is too slow

#[test]
fn accumulator_consistency() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    const LEN: usize = 200;
    let mut acc = RangeAccumulator::new(LEN);
    let mut shadow = vec![0i64; LEN];
    for _ in 0..NUM_ROUNDS {
        let action = random_round_action(&mut rng, LEN);
        run_round(&action, &mut acc, &mut shadow);
    }
    assert_eq!(acc.to_vec(), shadow);
}

#[test]
fn accumulator_2d_consistency() {
    let mut rng = StdRng::seed_from_u64(17);
    const ROWS: usize = 12;
    const COLS: usize = 9;
    let mut grid = RangeAccumulator2D::<i64>::new(ROWS, COLS);
    let mut shadow = [[0i64; COLS]; ROWS];
    for _ in 0..NUM_ROUNDS / 10 {
        let (r1, r2) = random_inclusive_range(&mut rng, ROWS);
        let (c1, c2) = random_inclusive_range(&mut rng, COLS);
        if rng.gen() {
            let value = rng.gen_range(-MAX_ADD..=MAX_ADD);
            grid.add_inclusive((r1, c1), (r2, c2), value).unwrap();
            for row in &mut shadow[r1..=r2] {
                row[c1..=c2].iter_mut().for_each(|x| *x += value);
            }
        } else {
            let expected: i64 = shadow[r1..=r2]
                .iter()
                .map(|row| row[c1..=c2].iter().sum::<i64>())
                .sum();
            assert_eq!(grid.query_inclusive((r1, c1), (r2, c2)), Ok(expected));
        }
    }
}

#[test]
fn sparse_table_all_ranges() {
    let mut rng = StdRng::seed_from_u64(3);
    for len in [1, 2, 3, 7, 8, 9, 33] {
        let values: Vec<i64> = (0..len).map(|_| rng.gen_range(-5..5)).collect();
        let table = SparseTable::new(&values).unwrap();
        for lo in 0..len {
            for hi in lo..len {
                let (min, at) = brute_min(&values, lo, hi);
                assert_eq!(table.min(lo, hi), Ok(min));
                assert_eq!(table.arg_min(lo, hi), Ok(at), "{values:?} {lo}..={hi}");
            }
        }
    }
}

#[test]
fn wavelet_all_ranges() {
    let mut rng = StdRng::seed_from_u64(11);
    for len in [1, 2, 5, 16, 40] {
        let values: Vec<i64> = (0..len).map(|_| rng.gen_range(-20..20)).collect();
        let tree = WaveletTree::new(&values).unwrap();
        for l in 0..len {
            for r in l..len {
                let sorted = brute_sorted(&values, l, r);
                for (k, expected) in sorted.iter().enumerate() {
                    assert_eq!(tree.kth(l, r, k + 1), Ok(*expected));
                }
                for x in -21..=21 {
                    let le = sorted.iter().filter(|&&v| v <= x).count();
                    let eq = sorted.iter().filter(|&&v| v == x).count();
                    assert_eq!(tree.count_less_equal(l, r, x), Ok(le));
                    assert_eq!(tree.count(l, r, x), Ok(eq));
                }
            }
        }
    }
}

#[test]
fn coverage_consistency() {
    let mut rng = StdRng::seed_from_u64(99);
    let breakpoints: Vec<i64> = {
        let raw: Vec<i64> = (0..60).map(|_| rng.gen_range(-1000..1000)).collect();
        sort_and_remove_dupes(raw)
    };
    let mut tree = CoverageTree::from_coordinates(breakpoints.clone());
    let mut model = CoverageModel::new(breakpoints.clone());
    let segments = tree.segment_count();

    for _ in 0..NUM_ROUNDS / 5 {
        let (lo, hi) = random_inclusive_range(&mut rng, segments);
        let delta = rng.gen_range(-2..=2);
        let accepted = model.update_index(lo, hi, delta);
        assert_eq!(tree.update_index(lo, hi, delta).is_ok(), accepted);

        assert_eq!(tree.query_all(), model.covered_len());
        let pos = rng.gen_range(0..segments);
        assert_eq!(tree.is_covered(pos), Ok(model.counts[pos] > 0));
        for covered in [true, false] {
            assert_eq!(tree.next_index(pos, covered), Ok(model.next(pos, covered)));
            assert_eq!(
                tree.previous_index(pos, covered),
                Ok(model.previous(pos, covered))
            );
        }
        let (a, b) = (rng.gen_range(-1100..1100), rng.gen_range(-1100..1100));
        let (x_lo, x_hi) = (a.min(b), a.max(b));
        assert_eq!(tree.query_x(x_lo, x_hi), Ok(model.covered_len_x(x_lo, x_hi)));
    }
    let covered = (0..segments).filter(|&i| model.counts[i] > 0).count();
    assert_eq!(tree.count_all(), covered);
    assert_eq!(tree.query_index(0, segments - 1), Ok(covered));
}

#[test]
fn union_area_matches_rasterizing() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..200 {
        let rects: Vec<Rect<i64>> = (0..rng.gen_range(0..8))
            .map(|_| {
                let (x1, x2) = random_inclusive_range(&mut rng, 30);
                let (y1, y2) = random_inclusive_range(&mut rng, 30);
                Rect::from((x1 as i64, y1 as i64, x2 as i64, y2 as i64))
            })
            .collect();
        assert_eq!(union_area(&rects), Ok(brute_union_area(&rects)), "{rects:?}");
    }
}
