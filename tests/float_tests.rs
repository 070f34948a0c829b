use duosort::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_float_basic() {
    let mut data = vec![3.5f64, -1.25, 0.5, 2.0, -7.75];
    sort(&mut data);
    assert_eq!(data, vec![-7.75, -1.25, 0.5, 2.0, 3.5]);
}

#[test]
fn test_nan_and_zero_discipline() {
    let mut data = vec![1.0f64, f64::NAN, -0.0, 0.0, -1.0, f64::NAN, 2.0];
    sort(&mut data);

    // Non-NaN prefix in order, with -0.0 before +0.0.
    assert_eq!(data[0], -1.0);
    assert!(data[1] == 0.0 && data[1].is_sign_negative());
    assert!(data[2] == 0.0 && data[2].is_sign_positive());
    assert_eq!(data[3], 1.0);
    assert_eq!(data[4], 2.0);

    // NaNs occupy exactly the trailing slots.
    assert!(data[5].is_nan());
    assert!(data[6].is_nan());
}

#[test]
fn test_nan_count_is_exact() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut data: Vec<f32> = (0..10_000)
        .map(|_| {
            if rng.random_range(0..10) == 0 {
                f32::NAN
            } else {
                rng.random_range(-1000.0..1000.0)
            }
        })
        .collect();
    let nan_count = data.iter().filter(|x| x.is_nan()).count();

    sort(&mut data);

    let tail_nans = data.iter().rev().take_while(|x| x.is_nan()).count();
    assert_eq!(tail_nans, nan_count);
    let prefix = &data[..data.len() - nan_count];
    assert!(prefix.iter().all(|x| !x.is_nan()));
    assert!(prefix.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_negative_zero_block() {
    let mut data = vec![0.0f64, -0.0, 1.0, -0.0, 0.0, -1.0, -0.0];
    sort(&mut data);

    assert_eq!(data[0], -1.0);
    // Three -0.0 then two +0.0, ordered by sign bit.
    for (i, x) in data[1..6].iter().enumerate() {
        assert_eq!(*x, 0.0);
        assert_eq!(x.is_sign_negative(), i < 3, "zero block broken at {i}");
    }
    assert_eq!(data[6], 1.0);
}

#[test]
fn test_all_nan() {
    let mut data = vec![f32::NAN; 64];
    sort(&mut data);
    assert!(data.iter().all(|x| x.is_nan()));
}

#[test]
fn test_infinities() {
    let mut data = vec![
        f64::INFINITY,
        1.0,
        f64::NEG_INFINITY,
        -1.0,
        f64::MAX,
        f64::MIN,
    ];
    sort(&mut data);
    assert_eq!(
        data,
        vec![
            f64::NEG_INFINITY,
            f64::MIN,
            -1.0,
            1.0,
            f64::MAX,
            f64::INFINITY
        ]
    );
}

#[test]
fn test_float_multiset_preserved() {
    let mut rng = StdRng::seed_from_u64(22);
    let data: Vec<f64> = (0..50_000)
        .map(|_| match rng.random_range(0..20) {
            0 => f64::NAN,
            1 => -0.0,
            2 => 0.0,
            _ => rng.random_range(-1e9..1e9),
        })
        .collect();

    let mut bits_before: Vec<u64> = data.iter().map(|x| x.to_bits()).collect();
    bits_before.sort_unstable();

    let mut ours = data.clone();
    sort(&mut ours);

    // Exact multiset of bit patterns modulo the legal -0.0 / +0.0 swap, so
    // compare with the zero sign normalised away on both sides.
    let normalise = |bits: u64| {
        if bits == (-0.0f64).to_bits() {
            0.0f64.to_bits()
        } else {
            bits
        }
    };
    let mut bits_after: Vec<u64> = ours.iter().map(|x| normalise(x.to_bits())).collect();
    bits_after.sort_unstable();
    let bits_before: Vec<u64> = bits_before.into_iter().map(normalise).collect();

    assert_eq!(bits_before, bits_after);

    // And the zero counts per sign are individually preserved.
    let neg_zeros_in = data
        .iter()
        .filter(|x| x.to_bits() == (-0.0f64).to_bits())
        .count();
    let neg_zeros_out = ours
        .iter()
        .filter(|x| x.to_bits() == (-0.0f64).to_bits())
        .count();
    assert_eq!(neg_zeros_in, neg_zeros_out);
}

#[test]
fn test_float_matches_std_total_cmp_on_nan_free() {
    let mut rng = StdRng::seed_from_u64(23);
    let mut data: Vec<f32> = (0..20_000).map(|_| rng.random_range(-1e6..1e6)).collect();
    let mut expected = data.clone();
    expected.sort_unstable_by(f32::total_cmp);

    sort(&mut data);
    assert_eq!(data, expected);
}
