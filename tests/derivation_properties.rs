//! Behavior tests for the derivation pipeline
//!
//! These tests pin down the column arithmetic the dashboard depends on:
//! how many derived values exist, where they sit, and what they equal.

use tickview_core::{
    derive, present, AnalysisError, ChartPanel, PriceRow, PriceTable, Presentation, Symbol,
    TradingDate,
};

fn table_from_closes(closes: &[f64]) -> PriceTable {
    let mut date = TradingDate::parse("2021-02-01").expect("valid date");
    let mut rows = Vec::with_capacity(closes.len());
    for &close in closes {
        rows.push(PriceRow::close_only(date, close).expect("valid row"));
        date = date.next_day().expect("next day exists");
    }
    PriceTable::new(Symbol::parse("TEST").expect("valid symbol"), rows).expect("valid table")
}

fn closes(n: usize) -> Vec<f64> {
    (0..n).map(|i| 100.0 + (i as f64 * 1.7).sin() * 5.0).collect()
}

// =============================================================================
// Moving average
// =============================================================================

#[test]
fn moving_average_has_n_minus_w_plus_one_values_on_the_trailing_rows() {
    for n in 2..=12 {
        for w in 1..=n {
            // Given: a table of n rows and a window w within bounds
            let table = table_from_closes(&closes(n));

            // When: the derived columns are computed
            let derived = derive(&table, w).expect("window within bounds");

            // Then: exactly the last n - w + 1 rows carry a moving average
            let defined: Vec<usize> = derived
                .rows
                .iter()
                .enumerate()
                .filter(|(_, row)| row.moving_average.is_some())
                .map(|(i, _)| i)
                .collect();
            assert_eq!(defined.len(), n - w + 1, "n={n} w={w}");
            assert_eq!(defined.first().copied(), Some(w - 1), "n={n} w={w}");
            assert_eq!(defined.last().copied(), Some(n - 1), "n={n} w={w}");
        }
    }
}

#[test]
fn moving_average_is_the_trailing_mean() {
    // Given: a known close series
    let values = closes(15);
    let table = table_from_closes(&values);

    // When: a 4-day average is derived
    let derived = derive(&table, 4).expect("valid window");

    // Then: each defined value equals the mean of the last four closes
    for (i, row) in derived.rows.iter().enumerate().skip(3) {
        let expected = values[i - 3..=i].iter().sum::<f64>() / 4.0;
        let actual = row.moving_average.expect("defined from index 3");
        assert!((actual - expected).abs() < 1e-9, "row {i}");
    }
}

// =============================================================================
// Percent return
// =============================================================================

#[test]
fn percent_return_has_n_minus_one_values_from_second_row() {
    // Given: a table of 9 rows
    let values = closes(9);
    let table = table_from_closes(&values);

    // When: derived with any window
    let derived = derive(&table, 3).expect("valid window");

    // Then: the first return is undefined and the rest follow the formula
    assert_eq!(derived.rows[0].percent_return, None);
    assert_eq!(
        derived
            .rows
            .iter()
            .filter(|row| row.percent_return.is_some())
            .count(),
        8
    );
    for t in 1..values.len() {
        let expected = 100.0 * (values[t] - values[t - 1]) / values[t - 1];
        let actual = derived.rows[t].percent_return.expect("defined");
        assert!((actual - expected).abs() < 1e-9, "row {t}");
    }
}

#[test]
fn worked_example_from_ten_to_forty() {
    // Given: closes 10, 20, 30, 40 and a 2-day window
    let table = table_from_closes(&[10.0, 20.0, 30.0, 40.0]);

    // When: derived
    let derived = derive(&table, 2).expect("valid window");

    // Then: MA = [NaN, 15, 25, 35], returns = [NaN, 100, 50, 33.33]
    let ma: Vec<Option<f64>> = derived.rows.iter().map(|r| r.moving_average).collect();
    assert_eq!(ma, vec![None, Some(15.0), Some(25.0), Some(35.0)]);

    let returns: Vec<Option<f64>> = derived.rows.iter().map(|r| r.percent_return).collect();
    assert_eq!(returns[0], None);
    assert_eq!(returns[1], Some(100.0));
    assert_eq!(returns[2], Some(50.0));
    let last = returns[3].expect("defined");
    assert!((last - 33.333_333_333).abs() < 1e-6);
}

// =============================================================================
// Boundaries
// =============================================================================

#[test]
fn fewer_than_two_rows_skips_derivation() {
    // Given: a single-row table
    let table = table_from_closes(&[42.0]);

    // When: derivation is attempted
    let result = derive(&table, 1);

    // Then: no columns are computed
    assert_eq!(result, Err(AnalysisError::InsufficientRows { rows: 1 }));

    // And: the dashboard shows an error instead of charts
    let Presentation::Unavailable { notice } = present(&table, 1) else {
        panic!("single row must not produce a dashboard");
    };
    assert!(notice.is_error());
    assert!(notice.message().contains("Not enough data to perform analysis"));
}

#[test]
fn window_larger_than_table_is_rejected() {
    // Given: a 5-row table
    let table = table_from_closes(&closes(5));

    // When: a 6-day window is requested
    let result = derive(&table, 6);

    // Then: the window is refused rather than clamped
    assert!(matches!(result, Err(AnalysisError::Window(_))));
}

#[test]
fn full_table_keeps_rows_with_undefined_values_while_charts_drop_them() {
    // Given: 30 rows and a 20-day window
    let table = table_from_closes(&closes(30));

    // When: the dashboard is built
    let Presentation::Dashboard(view) = present(&table, 20) else {
        panic!("expected dashboard");
    };

    // Then: the table shows every row
    assert_eq!(view.table.len(), 30);

    // And: the price chart covers only the 11 rows with an average
    let ChartPanel::Chart(price) = &view.price_chart else {
        panic!("expected price chart");
    };
    assert_eq!(price.series.len(), 2);
    assert!(price.series.iter().all(|series| series.points.len() == 11));

    // And: the return chart covers the 29 rows with a return
    let chart = view.return_chart.chart().expect("return chart");
    assert_eq!(chart.series[0].points.len(), 29);
}
