use std::io::{self, Write};

use tickview_core::DerivedRow;

const MISSING: &str = "NaN";

/// Writes the derived table with right-aligned numeric columns. Undefined
/// values print as `NaN`. With `limit`, only the last `limit` rows are shown.
pub fn write_table<W: Write>(
    out: &mut W,
    rows: &[DerivedRow],
    ma_column: &str,
    limit: Option<usize>,
) -> io::Result<()> {
    let headers = [
        "Date",
        "Open",
        "High",
        "Low",
        "Close",
        "Adj Close",
        "Volume",
        ma_column,
        "Percent Return",
    ];

    let skipped = limit.map_or(0, |limit| rows.len().saturating_sub(limit));
    let cells: Vec<[String; 9]> = rows[skipped..].iter().map(row_cells).collect();

    let mut widths = headers.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let header_line = headers
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (header, width))| align(header, width, index == 0))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{header_line}")?;
    writeln!(out, "{}", "-".repeat(header_line.len()))?;

    if skipped > 0 {
        writeln!(out, "... {skipped} earlier rows not shown")?;
    }

    for row in &cells {
        let line = row
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(index, (cell, width))| align(cell, width, index == 0))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(out, "{line}")?;
    }

    Ok(())
}

fn row_cells(row: &DerivedRow) -> [String; 9] {
    let price = &row.price;
    [
        price.date.format_iso(),
        money(price.open),
        money(price.high),
        money(price.low),
        money(Some(price.close)),
        money(price.adj_close),
        price
            .volume
            .map_or_else(|| String::from(MISSING), |volume| volume.to_string()),
        money(row.moving_average),
        row.percent_return
            .map_or_else(|| String::from(MISSING), |value| format!("{value:.4}")),
    ]
}

fn money(value: Option<f64>) -> String {
    value.map_or_else(|| String::from(MISSING), |value| format!("{value:.2}"))
}

fn align(cell: &str, width: usize, left: bool) -> String {
    if left {
        format!("{cell:<width$}")
    } else {
        format!("{cell:>width$}")
    }
}
