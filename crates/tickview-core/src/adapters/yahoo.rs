use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::data_source::{HistoryRequest, PriceSource, ProviderId, SourceError};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient, DEFAULT_TIMEOUT_MS};
use crate::{PriceRow, PriceTable, TradingDate};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Daily history from the Yahoo Finance v8 chart endpoint.
///
/// One request per fetch; no retry. Rows without a usable close are dropped,
/// everything else is passed through untouched.
#[derive(Clone)]
pub struct YahooSource {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
}

impl Default for YahooSource {
    fn default() -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()))
    }
}

impl YahooSource {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    fn chart_url(&self, req: &HistoryRequest) -> String {
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=history&includeAdjustedClose=true",
            self.base_url,
            urlencoding::encode(req.symbol.as_str()),
            req.range.start().midnight_unix_timestamp(),
            req.range.end().midnight_unix_timestamp(),
        )
    }

    async fn fetch_history(&self, req: HistoryRequest) -> Result<PriceTable, SourceError> {
        let request = HttpRequest::get(self.chart_url(&req))
            .with_header("referer", "https://finance.yahoo.com/")
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        tracing::info!(
            symbol = %req.symbol,
            start = %req.range.start(),
            end = %req.range.end(),
            "requesting yahoo daily history"
        );

        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            let detail = parse_error_description(&response.body)
                .unwrap_or_else(|| format!("yahoo returned status {}", response.status));
            return Err(match response.status {
                404 => SourceError::not_found(detail),
                429 => SourceError::rate_limited(detail),
                400 | 422 => SourceError::invalid_request(detail),
                _ => SourceError::unavailable(detail),
            });
        }

        parse_chart(&req, &response.body)
    }
}

impl PriceSource for YahooSource {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn daily_history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceTable, SourceError>> + Send + 'a>> {
        Box::pin(async move { self.fetch_history(req).await })
    }
}

fn parse_chart(req: &HistoryRequest, body: &str) -> Result<PriceTable, SourceError> {
    let chart_response: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = chart_response.chart.error {
        return Err(SourceError::not_found(format!(
            "yahoo chart API error: {}",
            error.describe()
        )));
    }

    let Some(result) = chart_response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
    else {
        return Ok(PriceTable::empty(req.symbol.clone()));
    };

    let Some(timestamps) = result.timestamp else {
        return Ok(PriceTable::empty(req.symbol.clone()));
    };

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let adj_close = result
        .indicators
        .adjclose
        .and_then(|series| series.into_iter().next())
        .map(|series| series.adjclose)
        .unwrap_or_default();
    let gmt_offset = result.meta.and_then(|meta| meta.gmtoffset).unwrap_or(0);

    // Keyed by date so a repeated trailing row replaces the earlier one.
    let mut rows = BTreeMap::new();
    let mut dropped = 0_usize;

    for (i, &ts_value) in timestamps.iter().enumerate() {
        let date = TradingDate::from_unix_timestamp(ts_value.saturating_add(gmt_offset))?;
        if !req.range.contains(date) {
            continue;
        }

        let Some(close) = value_at(&quote.close, i) else {
            dropped += 1;
            continue;
        };

        let volume = quote
            .volume
            .get(i)
            .copied()
            .flatten()
            .and_then(|v| u64::try_from(v).ok());

        match PriceRow::new(
            date,
            value_at(&quote.open, i),
            value_at(&quote.high, i),
            value_at(&quote.low, i),
            close,
            value_at(&adj_close, i),
            volume,
        ) {
            Ok(row) => {
                rows.insert(date, row);
            }
            Err(error) => {
                tracing::debug!(%date, %error, "dropping invalid yahoo row");
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        tracing::debug!(symbol = %req.symbol, dropped, "yahoo rows without usable close");
    }

    PriceTable::new(req.symbol.clone(), rows.into_values().collect()).map_err(SourceError::from)
}

fn parse_error_description(body: &str) -> Option<String> {
    serde_json::from_str::<YahooChartResponse>(body)
        .ok()
        .and_then(|response| response.chart.error)
        .map(|error| error.describe())
}

fn value_at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl YahooChartError {
    fn describe(&self) -> String {
        match (&self.code, &self.description) {
            (Some(code), Some(description)) => format!("{code}: {description}"),
            (None, Some(description)) => description.clone(),
            (Some(code), None) => code.clone(),
            (None, None) => String::from("unknown error"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    meta: Option<YahooChartMeta>,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartMeta {
    #[serde(default)]
    gmtoffset: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
    #[serde(default)]
    adjclose: Option<Vec<YahooAdjClose>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<i64>>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooAdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}
