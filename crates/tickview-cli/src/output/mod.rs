pub mod chart;
pub mod table;

use std::fmt;
use std::io::Write;

use serde::Serialize;
use tickview_core::{ChartPanel, DashboardView, Notice, Presentation};

use self::chart::{ChartRenderer, TerminalChart};
use crate::cli::{Cli, OutputFormat};
use crate::error::CliError;

/// Writes notices and dashboard views in the selected format. JSON output is
/// one document per line.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    format: OutputFormat,
    chart: TerminalChart,
    rows: Option<usize>,
}

impl Renderer {
    pub fn new(format: OutputFormat, chart: TerminalChart, rows: Option<usize>) -> Self {
        Self {
            format,
            chart,
            rows,
        }
    }

    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(
            cli.format,
            TerminalChart::new(cli.chart_width, cli.chart_height),
            cli.rows,
        )
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn notice<W: Write>(&self, out: &mut W, notice: &Notice) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Json => write_json(out, notice),
            OutputFormat::Text => {
                let level = match notice {
                    Notice::Success(_) => "ok",
                    Notice::Error(_) => "error",
                    Notice::Warning(_) => "warning",
                };
                writeln!(out, "[{level}] {}", notice.message())?;
                Ok(())
            }
        }
    }

    pub fn presentation<W: Write>(
        &self,
        out: &mut W,
        presentation: &Presentation,
    ) -> Result<(), CliError> {
        match (self.format, presentation) {
            (OutputFormat::Json, _) => write_json(out, presentation),
            (OutputFormat::Text, Presentation::NoData) => {
                writeln!(out, "No data loaded. Fetch a ticker to see the dashboard.")?;
                Ok(())
            }
            (OutputFormat::Text, Presentation::Unavailable { notice }) => self.notice(out, notice),
            (OutputFormat::Text, Presentation::Dashboard(view)) => self.dashboard(out, view),
        }
    }

    /// Any other output: `Display` for text, serde for JSON.
    pub fn value<W, T>(&self, out: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + fmt::Display,
    {
        match self.format {
            OutputFormat::Json => write_json(out, value),
            OutputFormat::Text => {
                writeln!(out, "{value}")?;
                Ok(())
            }
        }
    }

    fn dashboard<W: Write>(&self, out: &mut W, view: &DashboardView) -> Result<(), CliError> {
        writeln!(out, "{}", view.heading)?;
        writeln!(out, "{}", "=".repeat(view.heading.len()))?;
        table::write_table(out, &view.table, &view.ma_column, self.rows)?;

        for panel in [&view.price_chart, &view.return_chart] {
            writeln!(out)?;
            match panel {
                ChartPanel::Chart(spec) => self.chart.render(spec, out)?,
                ChartPanel::Warning { message } => {
                    self.notice(out, &Notice::Warning(message.clone()))?
                }
            }
        }

        Ok(())
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), CliError> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
