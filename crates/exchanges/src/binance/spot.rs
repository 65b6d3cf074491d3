use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::http::fetch_normalized;
use crate::normalize::{collect_quotes, json_kind, Decimal};
use crate::{BinanceClient, SpotExchange};
use interface::{ExchangeError, ExchangeId, ExchangeSnapshot};

pub const TICKER_PATH: &str = "/api/v3/ticker/price";

#[derive(Debug, Deserialize)]
struct BinanceSpotPrice {
    symbol: String,
    price: Decimal,
}

/// `[{"symbol": "BTCUSDT", "price": "..."}]` 형식의 평평한 배열
pub fn parse_tickers(body: &str) -> Result<ExchangeSnapshot, ExchangeError> {
    let value: Value = serde_json::from_str(body)?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ExchangeError::Parse(format!(
                "Binance: expected array of tickers, got {}",
                json_kind(&other)
            )))
        }
    };

    Ok(collect_quotes(
        ExchangeId::Binance,
        items,
        |t: &BinanceSpotPrice| (t.symbol.as_str(), &t.price),
    ))
}

#[async_trait]
impl SpotExchange for BinanceClient {
    fn id(&self) -> ExchangeId {
        ExchangeId::Binance
    }

    async fn fetch_all(&self) -> Result<ExchangeSnapshot, ExchangeError> {
        let url = format!("{}{TICKER_PATH}", self.base_url);
        fetch_normalized(&self.http, &url, parse_tickers).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;

    use super::*;
    use crate::test_util::{serve_fixture, serve_fixture_delayed};

    const FIXTURE: &str = r#"[
        {"symbol": "BTCUSDT", "price": "64000.10000000"},
        {"symbol": "ETHBTC", "price": "0.05210000"},
        {"symbol": "DEADUSDT", "price": "0.00000000"}
    ]"#;

    #[test]
    fn test_parse_flat_array() {
        let snapshot = parse_tickers(FIXTURE).unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.price_of("BTCUSDT"), Some(64000.1));
        assert_eq!(snapshot.price_of("ETHBTC"), Some(0.0521));
        assert_eq!(snapshot.price_of("DEADUSDT"), None);
    }

    #[test]
    fn test_parse_error_object_is_parse_error() {
        let err = parse_tickers(r#"{"code": -1003, "msg": "Too many requests"}"#).unwrap_err();
        assert!(matches!(err, ExchangeError::Parse(_)), "{err:?}");

        let err = parse_tickers("<html>oops</html>").unwrap_err();
        assert!(matches!(err, ExchangeError::Parse(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_fetch_all_from_local_server() {
        let base = serve_fixture(TICKER_PATH, "", StatusCode::OK, FIXTURE).await;
        let client = BinanceClient::with_base_url(base, Duration::from_secs(5)).unwrap();

        assert_eq!(client.id(), ExchangeId::Binance);

        let snapshot = client.fetch_all().await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.iter().all(|q| q.price > 0.0));
    }

    #[tokio::test]
    async fn test_fetch_all_http_status_error() {
        let base = serve_fixture(TICKER_PATH, "", StatusCode::IM_A_TEAPOT, "[]").await;
        let client = BinanceClient::with_base_url(base, Duration::from_secs(5)).unwrap();

        match client.fetch_all().await {
            Err(ExchangeError::Status { status, .. }) => {
                assert_eq!(status.as_u16(), 418);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_all_timeout_is_fetch_error() {
        let base = serve_fixture_delayed(
            TICKER_PATH,
            "",
            StatusCode::OK,
            FIXTURE,
            Duration::from_secs(3),
        )
        .await;
        let client = BinanceClient::with_base_url(base, Duration::from_millis(100)).unwrap();

        let err = client.fetch_all().await.unwrap_err();
        assert!(err.is_timeout(), "{err:?}");
    }
}
