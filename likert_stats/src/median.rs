use log::debug;

/// Computes the tie-adjusted (Tukey interpolated) median of a list of answers.
///
/// Likert answers are heavily tied, so the plain median jumps between whole
/// values. This median shifts the plain median `M` towards the side that
/// holds more answers:
///
/// ```text
/// M + (ng - nl) / (2 * ne)
/// ```
///
/// where `nl`, `ne` and `ng` count the answers below, equal to and above `M`.
/// When no answer equals `M` (even count with distinct middle values), `M` is
/// returned unchanged.
///
/// Only finite, strictly positive values are kept, further restricted to
/// `allowed` when it is provided. If nothing is left, the result is 0: a
/// sentinel for "no data", which no real answer can take.
///
/// ```
/// use likert_stats::tie_adjusted_median;
///
/// assert_eq!(tie_adjusted_median(&[2.0, 2.0, 3.0, 3.0, 4.0, 4.0], None), 3.0);
/// assert_eq!(tie_adjusted_median(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], Some(&[1.0, 2.0, 3.0])), 2.0);
/// assert_eq!(tie_adjusted_median(&[], None), 0.0);
/// ```
pub fn tie_adjusted_median(values: &[f64], allowed: Option<&[f64]>) -> f64 {
    let mut valid: Vec<f64> = values
        .iter()
        .cloned()
        .filter(|v| v.is_finite() && *v > 0.0)
        .filter(|v| allowed.map_or(true, |a| a.contains(v)))
        .collect();
    if valid.is_empty() {
        return 0.0;
    }
    valid.sort_by(f64::total_cmp);

    let mid = valid.len() / 2;
    let m = if valid.len() % 2 == 0 {
        (valid[mid - 1] + valid[mid]) / 2.0
    } else {
        valid[mid]
    };

    let (mut nl, mut ne, mut ng) = (0usize, 0usize, 0usize);
    for v in valid.iter() {
        if *v < m {
            nl += 1;
        } else if *v == m {
            ne += 1;
        } else {
            ng += 1;
        }
    }
    debug!(
        "tie_adjusted_median: n: {} basic median: {} nl: {} ne: {} ng: {}",
        valid.len(),
        m,
        nl,
        ne,
        ng
    );

    if ne > 0 {
        m + (ng as f64 - nl as f64) / (2.0 * ne as f64)
    } else {
        m
    }
}

/// Computes the median by linear interpolation at position `(N - 1) / 2`.
///
/// This is a general-purpose median with no notion of a response scale:
/// values are not filtered apart from NaN, which cannot be ordered.
/// Returns `None` for an empty input.
///
/// ```
/// use likert_stats::interpolated_median;
///
/// assert_eq!(interpolated_median(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
/// assert_eq!(interpolated_median(&[]), None);
/// ```
pub fn interpolated_median(values: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().cloned().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let position = (sorted.len() - 1) as f64 / 2.0;
    let lower_idx = position.floor() as usize;
    let upper_idx = position.ceil() as usize;
    let lower = sorted[lower_idx];
    if lower_idx == upper_idx {
        return Some(lower);
    }
    let upper = sorted[upper_idx];
    Some(lower + (upper - lower) * (position - lower_idx as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(tie_adjusted_median(&[], None), 0.0);
    }

    #[test]
    fn odd_count() {
        assert!(close(tie_adjusted_median(&[5.0, 3.0, 7.0], None), 5.0));
    }

    #[test]
    fn allowed_values_restrict_before_computing() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert!(close(
            tie_adjusted_median(&values, Some(&[1.0, 2.0, 3.0])),
            2.0
        ));
    }

    #[test]
    fn allowed_values_excluding_everything() {
        assert_eq!(tie_adjusted_median(&[4.0, 5.0], Some(&[1.0])), 0.0);
    }

    #[test]
    fn ties_at_the_median() {
        assert!(close(
            tie_adjusted_median(&[2.0, 2.0, 3.0, 3.0, 4.0, 4.0], None),
            3.0
        ));
        // M = 5, nl = 1, ne = 3, ng = 1
        assert!(close(
            tie_adjusted_median(&[4.0, 5.0, 5.0, 5.0, 6.0], None),
            5.0
        ));
        // M = 5, nl = 0, ne = 3, ng = 2: shifted up by 2 / 6
        assert!(close(
            tie_adjusted_median(&[5.0, 5.0, 5.0, 6.0, 6.0], None),
            5.0 + 1.0 / 3.0
        ));
        // M = 2, nl = 1, ne = 2, ng = 0: shifted down by 1 / 4
        assert!(close(tie_adjusted_median(&[1.0, 2.0, 2.0], None), 1.75));
    }

    #[test]
    fn no_tie_at_the_median() {
        assert!(close(
            tie_adjusted_median(&[1.0, 2.0, 3.0, 5.0, 6.0], None),
            3.0
        ));
        assert!(close(tie_adjusted_median(&[3.0, 4.0, 5.0, 6.0], None), 4.5));
    }

    #[test]
    fn zero_and_negative_are_ignored() {
        assert!(close(
            tie_adjusted_median(&[-1.0, 0.0, 2.0, 4.0, 6.0], None),
            4.0
        ));
        assert_eq!(tie_adjusted_median(&[-3.0, 0.0], None), 0.0);
    }

    #[test]
    fn non_finite_values_are_ignored() {
        let values = [f64::NAN, 3.0, f64::INFINITY, 5.0, 4.0];
        assert!(close(tie_adjusted_median(&values, None), 4.0));
    }

    #[test]
    fn permutations_give_the_same_median() {
        let values = [5.0, 1.0, 5.0, 3.0, 6.0, 3.0, 5.0, 2.0];
        let expected = tie_adjusted_median(&values, None);
        let mut rotated = values.to_vec();
        for _ in 0..values.len() {
            rotated.rotate_left(1);
            assert_eq!(tie_adjusted_median(&rotated, None), expected);
        }
        let mut reversed = values.to_vec();
        reversed.reverse();
        assert_eq!(tie_adjusted_median(&reversed, None), expected);
    }

    #[test]
    fn interpolated_empty_is_none() {
        assert_eq!(interpolated_median(&[]), None);
        assert_eq!(interpolated_median(&[f64::NAN]), None);
    }

    #[test]
    fn interpolated_basic() {
        assert_eq!(interpolated_median(&[1.0, 3.0, 2.0]), Some(2.0));
        assert_eq!(interpolated_median(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
        assert_eq!(interpolated_median(&[10.0, 20.0, 30.0, 40.0]), Some(25.0));
        assert_eq!(interpolated_median(&[1.0, 2.0, 2.0, 3.0]), Some(2.0));
    }

    #[test]
    fn interpolated_keeps_zero_and_negatives() {
        assert_eq!(interpolated_median(&[-2.0, 0.0, 4.0]), Some(0.0));
        assert_eq!(interpolated_median(&[0.0, 0.0]), Some(0.0));
    }
}
