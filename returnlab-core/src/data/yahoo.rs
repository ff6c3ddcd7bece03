//! Yahoo Finance price provider.
//!
//! Fetches daily adjusted closes from Yahoo's v8 chart API. One request per
//! call; failures are mapped to `DataError` and returned as-is.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes. `CsvProvider` is the offline alternative.

use super::provider::{DataError, PriceProvider, PriceSeries};
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const BASE_URL: &str = "https://query2.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    adjclose: Vec<Option<f64>>,
}

pub struct YahooProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new() -> Result<Self, DataError> {
        Self::with_base_url(BASE_URL)
    }

    /// Point the provider at a different chart endpoint (mirrors, test servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| DataError::NetworkUnreachable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Build the chart API URL for a symbol and date range.
    fn chart_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        let start_ts = start.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
        // period2 is exclusive upstream; the following midnight keeps `end` in range.
        let end_ts = (end + chrono::Duration::days(1))
            .and_time(chrono::NaiveTime::MIN)
            .and_utc()
            .timestamp();
        format!(
            "{}/{symbol}?period1={start_ts}&period2={end_ts}&interval=1d&includeAdjustedClose=true",
            self.base_url
        )
    }

    /// Parse the chart API response into an adjusted-close series.
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<PriceSeries, DataError> {
        let result = resp.chart.result.ok_or_else(|| match resp.chart.error {
            Some(err) if err.code == "Not Found" => DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            },
            Some(err) => {
                DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
            }
            None => DataError::ResponseFormatChanged("empty result with no error".into()),
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        // No timestamps means no trading days in the window.
        let timestamps = data.timestamp.unwrap_or_default();

        let adj_closes = data
            .indicators
            .adjclose
            .and_then(|v| v.into_iter().next())
            .map(|a| a.adjclose)
            .ok_or_else(|| DataError::ResponseFormatChanged("no adjclose data".into()))?;

        let mut points = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            // Null adjclose: the symbol did not trade that day
            if let Some(price) = adj_closes.get(i).copied().flatten() {
                points.push((date, price));
            }
        }

        if points.is_empty() {
            return Err(DataError::EmptyResponse {
                symbol: symbol.to_string(),
            });
        }

        Ok(PriceSeries::new(symbol, points))
    }
}

impl PriceProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch_adjusted_close(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        let url = self.chart_url(symbol, start, end);
        debug!(%url, "requesting chart");

        let resp = self.client.get(&url).send().map_err(|e| {
            DataError::NetworkUnreachable(format!("{symbol}: {e}"))
        })?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        if !status.is_success() {
            return Err(DataError::Http {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            });
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;

        Self::parse_response(symbol, chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve exactly one HTTP response on a local port; returns the base URL.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            // Drain the request head
            while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
        });
        (format!("http://{addr}/v8/finance/chart"), handle)
    }

    fn fetch_july(base_url: &str, symbol: &str) -> Result<PriceSeries, DataError> {
        YahooProvider::with_base_url(base_url)
            .unwrap()
            .fetch_adjusted_close(symbol, d("2012-07-01"), d("2012-07-31"))
    }

    fn parse(symbol: &str, body: &str) -> Result<PriceSeries, DataError> {
        let resp: ChartResponse = serde_json::from_str(body).unwrap();
        YahooProvider::parse_response(symbol, resp)
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    // 2012-07-02, 2012-07-03, 2012-07-05 at 13:30 UTC (US market open)
    const SPY_BODY: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "SPY"},
                "timestamp": [1341235800, 1341322200, 1341495000],
                "indicators": {
                    "quote": [{"close": [136.51, 137.36, 136.47]}],
                    "adjclose": [{"adjclose": [119.31, 120.05, null]}]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn parses_adjusted_closes_and_skips_nulls() {
        let series = parse("SPY", SPY_BODY).unwrap();
        assert_eq!(series.symbol, "SPY");
        assert_eq!(
            series.points,
            vec![(d("2012-07-02"), 119.31), (d("2012-07-03"), 120.05)]
        );
    }

    #[test]
    fn not_found_error_maps_to_symbol_not_found() {
        let body = r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}}"#;
        match parse("NOPE", body) {
            Err(DataError::SymbolNotFound { symbol }) => assert_eq!(symbol, "NOPE"),
            other => panic!("expected SymbolNotFound, got: {other:?}"),
        }
    }

    #[test]
    fn other_chart_error_is_format_change() {
        let body = r#"{"chart": {"result": null, "error": {"code": "Bad Request", "description": "Invalid input"}}}"#;
        assert!(matches!(
            parse("SPY", body),
            Err(DataError::ResponseFormatChanged(msg)) if msg.contains("Bad Request")
        ));
    }

    #[test]
    fn missing_timestamps_is_empty_response() {
        let body = r#"{"chart": {"result": [{"indicators": {"quote": [{}], "adjclose": [{"adjclose": []}]}}], "error": null}}"#;
        assert!(matches!(
            parse("SPY", body),
            Err(DataError::EmptyResponse { .. })
        ));
    }

    #[test]
    fn missing_adjclose_block_is_format_change() {
        let body = r#"{"chart": {"result": [{"timestamp": [1341235800], "indicators": {"quote": [{}]}}], "error": null}}"#;
        assert!(matches!(
            parse("SPY", body),
            Err(DataError::ResponseFormatChanged(_))
        ));
    }

    #[test]
    fn chart_url_covers_end_date() {
        let provider = YahooProvider::with_base_url("http://localhost:1").unwrap();
        let url = provider.chart_url("XOM", d("2012-07-01"), d("2012-07-31"));
        assert_eq!(
            url,
            "http://localhost:1/XOM?period1=1341100800&period2=1343779200&interval=1d&includeAdjustedClose=true"
        );
    }

    #[test]
    fn http_404_maps_to_symbol_not_found() {
        let (url, server) = serve_once("404 Not Found", "");
        let result = fetch_july(&url, "NOPE");
        server.join().unwrap();
        assert!(matches!(result, Err(DataError::SymbolNotFound { symbol }) if symbol == "NOPE"));
    }

    #[test]
    fn other_http_status_maps_to_http_error() {
        let (url, server) = serve_once("500 Internal Server Error", "");
        let result = fetch_july(&url, "SPY");
        server.join().unwrap();
        match result {
            Err(DataError::Http { symbol, status }) => {
                assert_eq!(symbol, "SPY");
                assert_eq!(status, 500);
            }
            other => panic!("expected Http error, got: {other:?}"),
        }
    }

    #[test]
    fn successful_response_is_parsed() {
        let (url, server) = serve_once("200 OK", SPY_BODY);
        let series = fetch_july(&url, "SPY").unwrap();
        server.join().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.first_date(), Some(d("2012-07-02")));
    }

    #[test]
    fn refused_connection_maps_to_network_unreachable() {
        // Bind then drop to get a local port with nothing listening
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let result = fetch_july(&format!("http://127.0.0.1:{port}"), "SPY");
        assert!(matches!(
            result,
            Err(DataError::NetworkUnreachable(msg)) if msg.starts_with("SPY:")
        ));
    }
}
