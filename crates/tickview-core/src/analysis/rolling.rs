//! Column arithmetic over closing prices.
//!
//! Both functions return one entry per input value; `None` marks positions
//! without enough history.

/// Trailing arithmetic mean over `window` values.
///
/// The first `window - 1` entries are `None`. Every mean is computed from its
/// own slice, so the result never depends on earlier calls.
pub fn moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 || window > values.len() {
        return vec![None; values.len()];
    }

    let mut out = vec![None; window - 1];
    out.extend(
        values
            .windows(window)
            .map(|slice| Some(slice.iter().sum::<f64>() / window as f64)),
    );
    out
}

/// Day-over-day change in percent: `100 * (v[t] - v[t-1]) / v[t-1]`.
///
/// The first entry is `None`, as is any entry whose predecessor is zero.
pub fn percent_change(values: &[f64]) -> Vec<Option<f64>> {
    if values.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(values.len());
    out.push(None);
    out.extend(values.windows(2).map(|pair| {
        let (prev, curr) = (pair[0], pair[1]);
        (prev != 0.0).then(|| 100.0 * (curr - prev) / prev)
    }));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Option<f64>, expected: f64) {
        let value = actual.expect("value should be defined");
        assert!(
            (value - expected).abs() < 1e-9,
            "expected {expected}, got {value}"
        );
    }

    #[test]
    fn moving_average_aligns_to_trailing_rows() {
        let ma = moving_average(&[10.0, 20.0, 30.0, 40.0], 2);
        assert_eq!(ma[0], None);
        assert_close(ma[1], 15.0);
        assert_close(ma[2], 25.0);
        assert_close(ma[3], 35.0);
    }

    #[test]
    fn window_of_one_echoes_input() {
        let ma = moving_average(&[3.0, 4.0], 1);
        assert_eq!(ma, vec![Some(3.0), Some(4.0)]);
    }

    #[test]
    fn window_equal_to_len_defines_only_last() {
        let ma = moving_average(&[1.0, 2.0, 3.0], 3);
        assert_eq!(ma, vec![None, None, Some(2.0)]);
    }

    #[test]
    fn oversized_or_zero_window_defines_nothing() {
        assert_eq!(moving_average(&[1.0, 2.0], 3), vec![None, None]);
        assert_eq!(moving_average(&[1.0, 2.0], 0), vec![None, None]);
    }

    #[test]
    fn percent_change_matches_definition() {
        let returns = percent_change(&[10.0, 20.0, 30.0, 40.0]);
        assert_eq!(returns[0], None);
        assert_close(returns[1], 100.0);
        assert_close(returns[2], 50.0);
        assert_close(returns[3], 100.0 / 3.0);
    }

    #[test]
    fn percent_change_of_single_value_is_undefined() {
        assert_eq!(percent_change(&[5.0]), vec![None]);
        assert!(percent_change(&[]).is_empty());
    }
}
