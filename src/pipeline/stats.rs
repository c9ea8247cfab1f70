//! Small numeric helpers shared by binning and trend analysis

/// Arithmetic mean of the finite values, or NaN when there are none.
pub fn nan_mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));

    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Computes the `p`-th quantile of pre-sorted data using linear interpolation
/// between closest ranks (R-7, the numpy default).
///
/// Returns `None` if `sorted` is empty or `p` is outside `[0, 1]`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || !(0.0..=1.0).contains(&p) {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }

    let h = (n - 1) as f64 * p;
    let j = h.floor() as usize;
    let g = h - h.floor();

    if j + 1 >= n {
        Some(sorted[n - 1])
    } else {
        Some((1.0 - g) * sorted[j] + g * sorted[j + 1])
    }
}

/// Minimum and maximum of the non-NaN values
pub fn nan_min_max(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Lower sentinel for a finite minimum: `min - 1`, or the next float below
/// `min` when its magnitude is too large for the subtraction to change it.
pub fn sentinel_below(min: f64) -> f64 {
    let shifted = min - 1.0;
    if shifted < min {
        return shifted;
    }
    let bits = min.to_bits();
    if min > 0.0 {
        f64::from_bits(bits - 1)
    } else {
        f64::from_bits(bits + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_mean_skips_nan() {
        assert!((nan_mean([1.0, f64::NAN, 3.0]) - 2.0).abs() < 1e-12);
        assert!(nan_mean([f64::NAN]).is_nan());
        assert!(nan_mean(Vec::<f64>::new()).is_nan());
    }

    #[test]
    fn test_quantile_matches_linear_interpolation() {
        let data: Vec<f64> = (1..=100).map(|v| v as f64).collect();
        assert!((quantile_sorted(&data, 0.1).unwrap() - 10.9).abs() < 1e-9);
        assert!((quantile_sorted(&data, 0.5).unwrap() - 50.5).abs() < 1e-9);
        assert_eq!(quantile_sorted(&data, 1.0), Some(100.0));
        assert_eq!(quantile_sorted(&data, 0.0), Some(1.0));
    }

    #[test]
    fn test_quantile_edge_cases() {
        assert_eq!(quantile_sorted(&[], 0.5), None);
        assert_eq!(quantile_sorted(&[7.0], 0.3), Some(7.0));
        assert_eq!(quantile_sorted(&[1.0, 2.0], 1.5), None);
    }

    #[test]
    fn test_nan_min_max() {
        assert_eq!(nan_min_max([3.0, f64::NAN, -1.0, 8.0]), Some((-1.0, 8.0)));
        assert_eq!(nan_min_max([f64::NAN]), None);
    }

    #[test]
    fn test_sentinel_below_large_magnitudes() {
        assert_eq!(sentinel_below(1.0), 0.0);
        assert_eq!(sentinel_below(-3.5), -4.5);

        for min in [1e17, -1e17, f64::MAX, 2f64.powi(53)] {
            let sentinel = sentinel_below(min);
            assert!(sentinel < min, "{} not below {}", sentinel, min);
        }
    }
}
