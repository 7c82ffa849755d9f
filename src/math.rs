use num::Float;

/// Rounds to one decimal place, like Python's `round(x, 1)`.
///
/// Rounding happens on the exact decimal expansion of `x`, so `0.15`, which
/// is stored as `0.1499..`, goes down. Only exact ties go to the even digit.
pub(crate) fn round_tenths(x: f64) -> f64 {
    format!("{x:.1}").parse().expect("unreachable")
}

/// Arithmetic mean of a non-empty slice.
pub(crate) fn mean<F: Float>(values: &[F]) -> F {
    let sum = values.iter().copied().fold(F::zero(), |acc, v| acc + v);

    sum / F::from(values.len()).expect("unreachable")
}

#[test]
fn test_round_tenths() {
    assert_eq!(round_tenths(0.44), 0.4);
    assert_eq!(round_tenths(0.46), 0.5);
    assert_eq!(round_tenths(8.0), 8.0);
    assert_eq!(round_tenths(0.25), 0.2);
    assert_eq!(round_tenths(0.75), 0.8);
    assert_eq!(round_tenths(-0.25), -0.2);
    assert_eq!(round_tenths(0.0), 0.0);
}

#[test]
fn test_round_tenths_uses_stored_value() {
    assert_eq!(round_tenths(0.05), 0.1);
    assert_eq!(round_tenths(0.15), 0.1);
    assert_eq!(round_tenths(0.35), 0.3);
    assert_eq!(round_tenths(0.45), 0.5);
    assert_eq!(round_tenths(0.65), 0.7);
    assert_eq!(round_tenths(0.95), 0.9);
    // 7 / 20 as computed by a ramp
    assert_eq!(round_tenths(7. / 20.), 0.3);
}

#[test]
fn test_mean() {
    assert_eq!(mean(&[0., 5., 10.]), 5.);
    assert_eq!(mean(&[0., 5., 15., 20.]), 10.);
}
