//! Terminal line charts.
//!
//! [`ChartRenderer`] is the seam between chart data and a drawing surface.
//! [`TerminalChart`] draws a [`ChartSpec`] with ratatui's `Chart` widget into
//! an off-screen buffer and prints the buffer row by row.

use std::io::{self, Write};

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget};
use tickview_core::{ChartSpec, TradingDate};

const SERIES_COLORS: [Color; 3] = [Color::Cyan, Color::Yellow, Color::Magenta];

/// Draws a chart specification to a writer.
pub trait ChartRenderer {
    fn render(&self, chart: &ChartSpec, out: &mut dyn Write) -> io::Result<()>;
}

/// Fixed-size ratatui chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalChart {
    width: u16,
    height: u16,
}

impl TerminalChart {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Draws `chart` into a buffer of this size. Dates map to julian days on
    /// the x axis.
    pub fn draw(&self, chart: &ChartSpec) -> Buffer {
        let area = Rect::new(0, 0, self.width, self.height);
        let mut buffer = Buffer::empty(area);

        let points: Vec<Vec<(f64, f64)>> = chart
            .series
            .iter()
            .map(|series| {
                series
                    .points
                    .iter()
                    .map(|point| (julian_day(point.date), point.value))
                    .collect()
            })
            .collect();

        let datasets: Vec<Dataset> = chart
            .series
            .iter()
            .zip(&points)
            .zip(SERIES_COLORS.iter().cycle())
            .map(|((series, data), &color)| {
                // A lone point has no segment to draw.
                let graph_type = if data.len() > 1 {
                    GraphType::Line
                } else {
                    GraphType::Scatter
                };
                Dataset::default()
                    .name(series.name.clone())
                    .marker(Marker::Braille)
                    .graph_type(graph_type)
                    .style(Style::default().fg(color))
                    .data(data)
            })
            .collect();

        let (x_axis, y_axis) = axes(chart);
        Chart::new(datasets)
            .block(
                Block::default()
                    .title(format!(" {} ", chart.title))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .x_axis(x_axis)
            .y_axis(y_axis)
            .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
            .render(area, &mut buffer);

        buffer
    }
}

impl ChartRenderer for TerminalChart {
    fn render(&self, chart: &ChartSpec, out: &mut dyn Write) -> io::Result<()> {
        let buffer = self.draw(chart);
        let width = usize::from(buffer.area.width).max(1);
        for row in buffer.content.chunks(width) {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            writeln!(out, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

fn axes(chart: &ChartSpec) -> (Axis<'static>, Axis<'static>) {
    let label_style = Style::default().fg(Color::DarkGray);
    let mut x_axis = Axis::default()
        .title(chart.x_label.clone())
        .style(label_style)
        .bounds([0.0, 1.0]);
    let mut y_axis = Axis::default()
        .title(chart.y_label.clone())
        .style(label_style)
        .bounds([0.0, 1.0]);

    if let Some((first, last)) = chart.date_bounds() {
        let (lo, hi) = widen(julian_day(first), julian_day(last));
        x_axis = x_axis.bounds([lo, hi]).labels(vec![
            Span::raw(first.format_iso()),
            Span::raw(last.format_iso()),
        ]);
    }
    if let Some((lo, hi)) = chart.value_bounds() {
        let (lo, hi) = widen(lo, hi);
        y_axis = y_axis.bounds([lo, hi]).labels(vec![
            Span::raw(format!("{lo:.2}")),
            Span::raw(format!("{:.2}", (lo + hi) / 2.0)),
            Span::raw(format!("{hi:.2}")),
        ]);
    }

    (x_axis, y_axis)
}

/// Axis bounds need a non-empty span.
fn widen(lo: f64, hi: f64) -> (f64, f64) {
    if hi > lo {
        (lo, hi)
    } else {
        (lo - 1.0, hi + 1.0)
    }
}

fn julian_day(date: TradingDate) -> f64 {
    f64::from(date.into_inner().to_julian_day())
}
