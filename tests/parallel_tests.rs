use duosort::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[test]
fn test_parallel_constant_input() {
    let mut data = vec![5i32; 1000];
    par_sort(&mut data, 4).unwrap();
    assert_eq!(data, vec![5i32; 1000]);
}

#[test]
fn test_parallel_matches_serial_on_permutation() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut data: Vec<u32> = (0..1_000_000).collect();
    data.shuffle(&mut rng);

    let mut serial = data.clone();
    sort(&mut serial);

    par_sort(&mut data, 4).unwrap();

    assert_eq!(data, serial);
    assert_eq!(data[0], 0);
    assert_eq!(data[999_999], 999_999);
}

#[test]
fn test_parallel_random_i64() {
    let mut rng = StdRng::seed_from_u64(43);
    let mut data: Vec<i64> = (0..300_000).map(|_| rng.random()).collect();
    let mut expected = data.clone();
    expected.sort_unstable();

    par_sort(&mut data, 8).unwrap();
    assert_eq!(data, expected);
}

#[test]
fn test_parallel_degrees() {
    let mut rng = StdRng::seed_from_u64(44);
    let data: Vec<i32> = (0..50_000).map(|_| rng.random_range(-1000..1000)).collect();
    let mut expected = data.clone();
    expected.sort_unstable();

    for parallelism in [0, 1, 2, 3, 4, 16] {
        let mut ours = data.clone();
        par_sort(&mut ours, parallelism).unwrap();
        assert_eq!(ours, expected, "parallelism {parallelism}");
    }
}

#[test]
fn test_parallel_below_threshold_degrades() {
    // Too short to decompose; must still sort through the sequential engine.
    let mut data = vec![3i32, 1, 4, 1, 5, 9, 2, 6];
    par_sort(&mut data, 8).unwrap();
    assert_eq!(data, vec![1, 1, 2, 3, 4, 5, 6, 9]);
}

#[test]
fn test_parallel_custom_order() {
    let mut rng = StdRng::seed_from_u64(45);
    let mut data: Vec<i64> = (0..200_000).map(|_| rng.random()).collect();
    let mut expected = data.clone();
    expected.sort_unstable_by(|a, b| b.cmp(a));

    par_sort_by(&mut data, |a, b| b < a, 4).unwrap();
    assert_eq!(data, expected);
}

#[test]
fn test_parallel_range() {
    let mut rng = StdRng::seed_from_u64(46);
    let mut data: Vec<i32> = (0..100_000).map(|_| rng.random()).collect();
    let head = data[..1000].to_vec();
    let tail = data[99_000..].to_vec();

    let mut expected_mid = data[1000..99_000].to_vec();
    expected_mid.sort_unstable();

    par_sort_range(&mut data, 1000, 99_000, 4).unwrap();

    assert_eq!(&data[..1000], &head[..]);
    assert_eq!(&data[99_000..], &tail[..]);
    assert_eq!(&data[1000..99_000], &expected_mid[..]);
}

#[test]
fn test_parallel_range_errors() {
    let mut data = vec![1, 2, 3];
    assert!(matches!(
        par_sort_range(&mut data, 0, 9, 4),
        Err(SortError::InvalidRange { .. })
    ));
    assert!(matches!(
        par_sort_range_by(&mut data, 2, 0, |a: &i32, b: &i32| a < b, 4),
        Err(SortError::InvalidRange { .. })
    ));
}

#[test]
fn test_parallel_presorted_short_circuits() {
    let mut data: Vec<u64> = (0..500_000).collect();
    let expected = data.clone();
    par_sort(&mut data, 4).unwrap();
    assert_eq!(data, expected);
}

#[test]
fn test_parallel_structured_runs() {
    // Long pre-sorted blocks exercise the parallel run merge.
    let mut rng = StdRng::seed_from_u64(47);
    let mut data: Vec<i64> = Vec::new();
    for block_index in 0..8 {
        let mut block: Vec<i64> = (0..40_000).map(|_| rng.random_range(0..1_000_000)).collect();
        block.sort_unstable();
        if block_index % 3 == 2 {
            block.reverse();
        }
        data.extend_from_slice(&block);
    }

    let mut expected = data.clone();
    expected.sort_unstable();
    par_sort(&mut data, 4).unwrap();
    assert_eq!(data, expected);
}

#[test]
fn test_parallel_duplicate_heavy() {
    let mut rng = StdRng::seed_from_u64(48);
    let mut data: Vec<i32> = (0..400_000).map(|_| rng.random_range(0..30)).collect();
    let mut expected = data.clone();
    expected.sort_unstable();

    par_sort(&mut data, 4).unwrap();
    assert_eq!(data, expected);
}

#[test]
fn test_parallel_floats() {
    let mut rng = StdRng::seed_from_u64(49);
    let mut data: Vec<f64> = (0..200_000)
        .map(|_| {
            if rng.random_range(0..50) == 0 {
                f64::NAN
            } else {
                rng.random_range(-1e9..1e9)
            }
        })
        .collect();
    let nan_count = data.iter().filter(|x| x.is_nan()).count();

    par_sort(&mut data, 4).unwrap();

    let tail_nans = data.iter().rev().take_while(|x| x.is_nan()).count();
    assert_eq!(tail_nans, nan_count);
    let prefix = &data[..data.len() - nan_count];
    assert!(prefix.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_comparator_panic_propagates() {
    // A panicking comparator must surface on the calling thread instead of
    // deadlocking the pool, and the slice must still hold valid values.
    let mut data: Vec<i32> = (0..50_000).map(|i| (i * 31) % 1999).collect();
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        par_sort_by(
            &mut data,
            |a, b| {
                if *a == 1000 {
                    panic!("comparator rejected value");
                }
                a < b
            },
            4,
        )
    }));
    assert!(outcome.is_err());
    assert_eq!(data.len(), 50_000);
    assert!(data.iter().all(|&x| (0..1999).contains(&x)));
}
