//! Anomaly injection: missing samples, outliers, Gaussian noise.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Corruption parameters applied to a normalized series.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnomalyParams {
    /// Percentage of samples replaced by the missing marker (0-100).
    pub missing_percentage: f64,
    /// Percentage of samples replaced by out-of-band outliers (0-100).
    pub outlier_percentage: f64,
    /// Gaussian noise standard deviation; 0 disables noise entirely.
    pub noise_level: f64,
}

/// Inject anomalies into `values`, returning the corrupted series and
/// the outlier mask.
///
/// Missing and outlier counts are `round(pct / 100 * len)` each. Both
/// sets are drawn in a single without-replacement sample, so they are
/// always disjoint; when rounding would overflow the series length,
/// missing positions take priority and the outlier count is truncated.
/// Missing positions become `NaN` with a false mask entry; outlier
/// positions get a uniform draw from `±[3, 5)` and a true mask entry;
/// every untouched position gets `Normal(0, noise_level)` noise. With
/// all three parameters zero the series is returned bit-identical.
pub fn inject(mut values: Vec<f64>, params: &AnomalyParams, seed: u64) -> (Vec<f64>, Vec<bool>) {
    let len = values.len();
    let mut anomaly = vec![false; len];
    if len == 0 {
        return (values, anomaly);
    }

    let mut rng = StdRng::seed_from_u64(seed);

    let n_missing = percentage_count(params.missing_percentage, len).min(len);
    let n_outliers = percentage_count(params.outlier_percentage, len).min(len - n_missing);

    let picked = rand::seq::index::sample(&mut rng, len, n_missing + n_outliers).into_vec();
    let (missing_idx, outlier_idx) = picked.split_at(n_missing);

    let mut corrupted = vec![false; len];
    for &i in picked.iter() {
        corrupted[i] = true;
    }

    if params.noise_level > 0.0 {
        if let Ok(normal) = Normal::new(0.0, params.noise_level) {
            for (i, v) in values.iter_mut().enumerate() {
                if !corrupted[i] {
                    *v += normal.sample(&mut rng);
                }
            }
        }
    }

    for &i in missing_idx {
        values[i] = f64::NAN;
    }
    for &i in outlier_idx {
        let magnitude = rng.gen_range(3.0..5.0);
        values[i] = if rng.gen_bool(0.5) { magnitude } else { -magnitude };
        anomaly[i] = true;
    }

    (values, anomaly)
}

fn percentage_count(percentage: f64, len: usize) -> usize {
    (percentage / 100.0 * len as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize) -> Vec<f64> {
        (0..len).map(|i| i as f64 / len as f64).collect()
    }

    #[test]
    fn test_zero_parameters_are_identity() {
        let input = ramp(50);
        let (output, anomaly) = inject(input.clone(), &AnomalyParams::default(), 42);
        assert_eq!(output, input);
        assert!(anomaly.iter().all(|a| !a));
    }

    #[test]
    fn test_missing_and_outlier_sets_are_disjoint() {
        let params = AnomalyParams {
            missing_percentage: 30.0,
            outlier_percentage: 30.0,
            noise_level: 0.0,
        };
        let (values, anomaly) = inject(ramp(100), &params, 7);
        let missing = values.iter().filter(|v| v.is_nan()).count();
        let outliers = anomaly.iter().filter(|a| **a).count();
        assert_eq!(missing, 30);
        assert_eq!(outliers, 30);
        for (v, a) in values.iter().zip(anomaly.iter()) {
            // A position is never both missing and an outlier.
            assert!(!(v.is_nan() && *a));
        }
    }

    #[test]
    fn test_outliers_fall_outside_normalized_band() {
        let params = AnomalyParams {
            missing_percentage: 0.0,
            outlier_percentage: 20.0,
            noise_level: 0.0,
        };
        let (values, anomaly) = inject(ramp(50), &params, 3);
        for (v, a) in values.iter().zip(anomaly.iter()) {
            if *a {
                assert!(v.abs() >= 3.0 && v.abs() < 5.0);
            }
        }
    }

    #[test]
    fn test_counts_round_half_up() {
        // 2.5% of 100 rounds to 3 missing samples.
        let params = AnomalyParams {
            missing_percentage: 2.5,
            outlier_percentage: 0.0,
            noise_level: 0.0,
        };
        let (values, _) = inject(ramp(100), &params, 11);
        assert_eq!(values.iter().filter(|v| v.is_nan()).count(), 3);
    }

    #[test]
    fn test_rounding_overflow_truncates_outliers() {
        // 50% + 50% of 3 samples rounds to 2 + 2; missing wins the slot.
        let params = AnomalyParams {
            missing_percentage: 50.0,
            outlier_percentage: 50.0,
            noise_level: 0.0,
        };
        let (values, anomaly) = inject(ramp(3), &params, 5);
        assert_eq!(values.iter().filter(|v| v.is_nan()).count(), 2);
        assert_eq!(anomaly.iter().filter(|a| **a).count(), 1);
    }

    #[test]
    fn test_noise_perturbs_every_clean_position() {
        let params = AnomalyParams {
            missing_percentage: 0.0,
            outlier_percentage: 0.0,
            noise_level: 0.1,
        };
        let input = ramp(100);
        let (output, _) = inject(input.clone(), &params, 13);
        let changed = input
            .iter()
            .zip(output.iter())
            .filter(|(a, b)| a != b)
            .count();
        assert!(changed > 90);
    }

    #[test]
    fn test_same_seed_same_corruption() {
        let params = AnomalyParams {
            missing_percentage: 10.0,
            outlier_percentage: 10.0,
            noise_level: 0.2,
        };
        let (a, mask_a) = inject(ramp(200), &params, 99);
        let (b, mask_b) = inject(ramp(200), &params, 99);
        assert_eq!(mask_a, mask_b);
        for (x, y) in a.iter().zip(b.iter()) {
            assert!(x == y || (x.is_nan() && y.is_nan()));
        }
    }

    #[test]
    fn test_empty_input() {
        let params = AnomalyParams {
            missing_percentage: 50.0,
            outlier_percentage: 50.0,
            noise_level: 1.0,
        };
        let (values, anomaly) = inject(vec![], &params, 1);
        assert!(values.is_empty());
        assert!(anomaly.is_empty());
    }
}
