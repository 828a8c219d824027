use serde::{Deserialize, Serialize};

use crate::analysis::derive::DerivedTable;
use crate::TradingDate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: TradingDate,
    pub value: f64,
}

/// One named line on a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn new(name: impl Into<String>, points: Vec<ChartPoint>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}

/// Line chart handed to a renderer: titles plus one or more series sharing a
/// date axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    /// Smallest and largest value across all series.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|series| series.points.iter().map(|point| point.value))
            .fold(None, |bounds, value| match bounds {
                None => Some((value, value)),
                Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
            })
    }

    pub fn date_bounds(&self) -> Option<(TradingDate, TradingDate)> {
        let mut dates = self
            .series
            .iter()
            .flat_map(|series| series.points.iter().map(|point| point.date));
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), date| {
            (lo.min(date), hi.max(date))
        }))
    }
}

/// Close and moving average over rows where the average is defined, or
/// `None` when no such row exists.
pub fn price_chart(derived: &DerivedTable) -> Option<ChartSpec> {
    let points = derived.moving_average_points();
    if points.is_empty() {
        return None;
    }

    let close = points
        .iter()
        .map(|&(date, close, _)| ChartPoint { date, value: close })
        .collect();
    let average = points
        .iter()
        .map(|&(date, _, ma)| ChartPoint { date, value: ma })
        .collect();

    Some(ChartSpec {
        title: format!(
            "{} Price & {}-Day Moving Average",
            derived.symbol, derived.window
        ),
        x_label: String::from("Date"),
        y_label: String::from("Price (USD)"),
        series: vec![
            ChartSeries::new("Close Price", close),
            ChartSeries::new(derived.window.column_name(), average),
        ],
    })
}

/// Percent return over rows where the return is defined, or `None` when no
/// such row exists.
pub fn return_chart(derived: &DerivedTable) -> Option<ChartSpec> {
    let points: Vec<ChartPoint> = derived
        .return_points()
        .into_iter()
        .map(|(date, value)| ChartPoint { date, value })
        .collect();
    if points.is_empty() {
        return None;
    }

    Some(ChartSpec {
        title: format!("{} Daily Percent Returns", derived.symbol),
        x_label: String::from("Date"),
        y_label: String::from("Percent Return (%)"),
        series: vec![ChartSeries::new("Percent Return", points)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::derive::derive;
    use crate::{PriceRow, PriceTable, Symbol};

    fn derived(closes: &[f64], window: usize) -> DerivedTable {
        let mut date = TradingDate::parse("2024-03-01").expect("date");
        let mut rows = Vec::new();
        for &close in closes {
            rows.push(PriceRow::close_only(date, close).expect("row"));
            date = date.next_day().expect("next day");
        }
        let table = PriceTable::new(Symbol::parse("AAPL").expect("symbol"), rows).expect("table");
        derive(&table, window).expect("derive")
    }

    #[test]
    fn price_chart_has_close_and_ma_series_of_equal_length() {
        let chart = price_chart(&derived(&[10.0, 20.0, 30.0, 40.0], 2)).expect("chart");
        assert_eq!(chart.title, "AAPL Price & 2-Day Moving Average");
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name, "Close Price");
        assert_eq!(chart.series[1].name, "MA2");
        assert_eq!(chart.series[0].points.len(), 3);
        assert_eq!(chart.series[1].points.len(), 3);
        assert_eq!(chart.series[1].points[0].value, 15.0);
        assert_eq!(chart.series[0].points[0].date.format_iso(), "2024-03-02");
    }

    #[test]
    fn return_chart_starts_at_second_row() {
        let chart = return_chart(&derived(&[10.0, 20.0, 30.0], 1)).expect("chart");
        assert_eq!(chart.y_label, "Percent Return (%)");
        assert_eq!(chart.series[0].points.len(), 2);
        assert_eq!(chart.series[0].points[0].date.format_iso(), "2024-03-02");
    }

    #[test]
    fn bounds_span_all_series() {
        let chart = price_chart(&derived(&[10.0, 20.0, 30.0, 40.0], 2)).expect("chart");
        assert_eq!(chart.value_bounds(), Some((15.0, 40.0)));
        let (first, last) = chart.date_bounds().expect("dates");
        assert_eq!(first.format_iso(), "2024-03-02");
        assert_eq!(last.format_iso(), "2024-03-04");
    }
}
