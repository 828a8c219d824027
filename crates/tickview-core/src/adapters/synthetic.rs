use std::future::Future;
use std::pin::Pin;

use time::Weekday;

use crate::data_source::{HistoryRequest, PriceSource, ProviderId, SourceError};
use crate::{PriceRow, PriceTable, Symbol};

/// Offline price source producing a deterministic weekday series per symbol.
#[derive(Debug, Clone, Default)]
pub struct SyntheticSource;

impl SyntheticSource {
    fn generate(&self, req: &HistoryRequest) -> Result<PriceTable, SourceError> {
        let seed = symbol_seed(&req.symbol);
        let mut state = seed | 1;
        let mut close = 40.0 + (seed % 2_000) as f64 / 10.0;
        let mut rows = Vec::new();
        let mut date = Some(req.range.start());

        while let Some(current) = date.filter(|d| req.range.contains(*d)) {
            let weekday = current.into_inner().weekday();
            if !matches!(weekday, Weekday::Saturday | Weekday::Sunday) {
                state = next_state(state);
                // Daily move in [-2%, +2%).
                let drift = ((state >> 33) % 4_000) as f64 / 100_000.0 - 0.02;
                let open = close;
                close = (open * (1.0 + drift)).max(0.01);
                let high = open.max(close) * 1.005;
                let low = open.min(close) * 0.995;
                let volume = 1_000_000 + (state >> 40) % 9_000_000;

                rows.push(PriceRow::new(
                    current,
                    Some(round_cents(open)),
                    Some(round_cents(high)),
                    Some(round_cents(low)),
                    round_cents(close),
                    Some(round_cents(close)),
                    Some(volume),
                )?);
            }
            date = current.next_day();
        }

        Ok(PriceTable::new(req.symbol.clone(), rows)?)
    }
}

impl PriceSource for SyntheticSource {
    fn id(&self) -> ProviderId {
        ProviderId::Synthetic
    }

    fn daily_history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceTable, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let table = self.generate(&req)?;
            tracing::info!(symbol = %req.symbol, rows = table.len(), "generated synthetic history");
            Ok(table)
        })
    }
}

fn symbol_seed(symbol: &Symbol) -> u64 {
    symbol.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(byte as u64)
    })
}

fn next_state(state: u64) -> u64 {
    state
        .wrapping_mul(6_364_136_223_846_793_005)
        .wrapping_add(1_442_695_040_888_963_407)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
