//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Clamp a value into the range `[min, max]`.
///
/// NaN values are mapped to `min`, so a bad reading can never command more
/// than the lower limit.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T
where
    T: Float
{
    if value.is_nan() {
        return *min
    }

    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Arithmetic mean of the values, or `None` if there are none.
pub fn mean<T>(values: &[T]) -> Option<T>
where
    T: Float
{
    if values.is_empty() {
        return None;
    }

    let sum = values.iter().fold(T::zero(), |acc, v| acc + *v);

    T::from(values.len()).map(|n| sum / n)
}

/// Round to the nearest integer, with values exactly halfway between two
/// integers going to the even one (banker's rounding).
pub fn round_half_even<T>(value: T) -> T
where
    T: Float
{
    let two = T::one() + T::one();
    let half = T::one() / two;

    if (value - value.trunc()).abs() == half {
        (value / two).round() * two
    }
    else {
        value.round()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(&50.0, &0.0, &100.0), 50.0);
        assert_eq!(clamp(&102.0, &0.0, &100.0), 100.0);
        assert_eq!(clamp(&-3.0, &0.0, &100.0), 0.0);
        assert_eq!(clamp(&f64::NAN, &0.0, &100.0), 0.0);
        assert_eq!(clamp(&f64::INFINITY, &0.0, &100.0), 100.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean::<f64>(&[]), None);
        assert_eq!(mean(&[2.0, 4.0, 6.0]), Some(4.0));
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_half_even(0.5), 0.0);
        assert_eq!(round_half_even(1.5), 2.0);
        assert_eq!(round_half_even(2.5), 2.0);
        assert_eq!(round_half_even(54.5), 54.0);
        assert_eq!(round_half_even(55.5), 56.0);
        assert_eq!(round_half_even(-3.5), -4.0);
        assert_eq!(round_half_even(54.49), 54.0);
        assert_eq!(round_half_even(54.51), 55.0);
        assert_eq!(round_half_even(7.0), 7.0);
    }
}
