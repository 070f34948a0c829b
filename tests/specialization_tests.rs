use duosort::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn check_counting<T>(data: Vec<T>)
where
    T: Ord + Copy + std::fmt::Debug + Sortable,
{
    let mut expected = data.clone();
    expected.sort_unstable();

    let mut ours = data;
    sort(&mut ours);
    assert_eq!(ours, expected);
}

#[test]
fn test_signed_bytes_uniform() {
    let mut rng = StdRng::seed_from_u64(1);
    let data: Vec<i8> = (0..10_000).map(|_| rng.random()).collect();
    check_counting(data);
}

#[test]
fn test_unsigned_bytes_uniform() {
    let mut rng = StdRng::seed_from_u64(2);
    let data: Vec<u8> = (0..10_000).map(|_| rng.random()).collect();
    check_counting(data);
}

#[test]
fn test_signed_shorts_uniform() {
    let mut rng = StdRng::seed_from_u64(3);
    let data: Vec<i16> = (0..100_000).map(|_| rng.random()).collect();
    check_counting(data);
}

#[test]
fn test_unsigned_shorts_uniform() {
    let mut rng = StdRng::seed_from_u64(4);
    let data: Vec<u16> = (0..100_000).map(|_| rng.random()).collect();
    check_counting(data);
}

#[test]
fn test_byte_threshold_boundary() {
    // Both sides of the counting-sort engagement size must agree.
    let mut rng = StdRng::seed_from_u64(5);
    for len in [0, 1, 31, 63, 64, 65, 200] {
        let data: Vec<u8> = (0..len).map(|_| rng.random()).collect();
        check_counting(data);

        let data: Vec<i8> = (0..len).map(|_| rng.random()).collect();
        check_counting(data);
    }
}

#[test]
fn test_short_threshold_boundary() {
    let mut rng = StdRng::seed_from_u64(6);
    for len in [1749, 1750, 1751, 5000] {
        let data: Vec<u16> = (0..len).map(|_| rng.random()).collect();
        check_counting(data);

        let data: Vec<i16> = (0..len).map(|_| rng.random()).collect();
        check_counting(data);
    }
}

#[test]
fn test_signed_extremes() {
    let mut data: Vec<i8> = vec![0, i8::MAX, i8::MIN, -1, 1, i8::MIN, i8::MAX, 0];
    sort(&mut data);
    assert_eq!(
        data,
        vec![i8::MIN, i8::MIN, -1, 0, 0, 1, i8::MAX, i8::MAX]
    );

    let mut data: Vec<i16> = (0..4000)
        .map(|i| if i % 2 == 0 { i16::MIN } else { i16::MAX })
        .collect();
    sort(&mut data);
    assert!(data[..2000].iter().all(|&x| x == i16::MIN));
    assert!(data[2000..].iter().all(|&x| x == i16::MAX));
}

#[test]
fn test_sparse_short_domain() {
    // Only a few distinct keys across the 16-bit domain: sparse emission.
    let mut rng = StdRng::seed_from_u64(7);
    let keys = [-30_000i16, -7, 0, 12, 29_999];
    let data: Vec<i16> = (0..50_000)
        .map(|_| keys[rng.random_range(0..keys.len())])
        .collect();
    check_counting(data);
}

#[test]
fn test_dense_byte_domain() {
    // More elements than half the domain: dense emission.
    let mut rng = StdRng::seed_from_u64(8);
    let data: Vec<u8> = (0..100_000).map(|_| rng.random()).collect();
    check_counting(data);
}

#[test]
fn test_narrow_keys_parallel_entry() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut data: Vec<u16> = (0..200_000).map(|_| rng.random()).collect();
    let mut expected = data.clone();
    expected.sort_unstable();

    par_sort(&mut data, 4).unwrap();
    assert_eq!(data, expected);
}

#[test]
fn test_bytes_with_custom_comparator_take_generic_path() {
    // A comparator disables the histogram path; result must still be right.
    let mut rng = StdRng::seed_from_u64(10);
    let mut data: Vec<u8> = (0..10_000).map(|_| rng.random()).collect();
    let mut expected = data.clone();
    expected.sort_unstable_by(|a, b| b.cmp(a));

    sort_by(&mut data, |a, b| b < a);
    assert_eq!(data, expected);
}
