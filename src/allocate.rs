//! Proportional dimension reconciliation.
//!
//! Scales a set of optimal sizes to hit a target total while holding a
//! per-cell floor. Width and height are reconciled independently.

/// Reconcile optimal sizes against a target total.
///
/// - `target_total` of None: no fixed total; each value is floor-clamped
///   only (the typical row-height case).
/// - sum(optimal) <= target: every value scales up uniformly, conserving
///   the total exactly.
/// - sum(optimal) > target: every value scales down uniformly, but each
///   result is clamped at `min_size`. When many cells hit the floor the
///   final sum may exceed the target; that is accepted behavior, not an
///   error.
///
/// An all-zero or empty input with a target degenerates to an even split.
pub fn reconcile(optimal: &[f32], target_total: Option<f32>, min_size: f32) -> Vec<f32> {
    let Some(target) = target_total else {
        return optimal.iter().map(|&v| v.max(min_size)).collect();
    };

    let sum: f32 = optimal.iter().sum();
    if sum <= 0.0 {
        if optimal.is_empty() {
            return Vec::new();
        }
        let even = target / optimal.len() as f32;
        return vec![even.max(min_size); optimal.len()];
    }

    let scale = target / sum;
    if scale >= 1.0 {
        optimal.iter().map(|&v| v * scale).collect()
    } else {
        optimal.iter().map(|&v| (v * scale).max(min_size)).collect()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_up_conserves_total() {
        let out = reconcile(&[50.0, 100.0, 50.0], Some(400.0), 25.0);
        assert_eq!(out, vec![100.0, 200.0, 100.0]);
        assert_eq!(out.iter().sum::<f32>(), 400.0);
    }

    #[test]
    fn test_scale_down_proportional() {
        let out = reconcile(&[100.0, 300.0], Some(200.0), 25.0);
        assert_eq!(out, vec![50.0, 150.0]);
    }

    #[test]
    fn test_floor_never_undershot() {
        let out = reconcile(&[100.0, 100.0, 100.0], Some(30.0), 25.0);
        for v in &out {
            assert!(*v >= 25.0);
        }
        // Floor clamps push the total past the target; accepted.
        assert!(out.iter().sum::<f32>() > 30.0);
    }

    #[test]
    fn test_no_target_is_floor_clamp_only() {
        let out = reconcile(&[30.0, 50.0, 20.0], None, 25.0);
        assert_eq!(out, vec![30.0, 50.0, 25.0]);
    }

    #[test]
    fn test_zero_sum_splits_evenly() {
        let out = reconcile(&[0.0, 0.0], Some(100.0), 25.0);
        assert_eq!(out, vec![50.0, 50.0]);
    }

    #[test]
    fn test_empty_input() {
        assert!(reconcile(&[], Some(100.0), 25.0).is_empty());
        assert!(reconcile(&[], None, 25.0).is_empty());
    }
}
