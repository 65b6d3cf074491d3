use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::http::fetch_normalized;
use crate::normalize::{collect_quotes, json_kind, Decimal};
use crate::{BybitClient, SpotExchange};
use interface::{ExchangeError, ExchangeId, ExchangeSnapshot};

pub const TICKER_PATH: &str = "/v5/market/tickers?category=spot";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BybitSpotTicker {
    symbol: String,
    last_price: Decimal,
}

/// `{"result": {"list": [...]}}` 중첩 봉투.
/// result 또는 list 키가 없으면 빈 스냅샷.
pub fn parse_tickers(body: &str) -> Result<ExchangeSnapshot, ExchangeError> {
    let value: Value = serde_json::from_str(body)?;

    let mut envelope = match value {
        Value::Object(map) => map,
        other => {
            return Err(ExchangeError::Parse(format!(
                "Bybit: expected object envelope, got {}",
                json_kind(&other)
            )))
        }
    };

    if let Some(code) = envelope.get("retCode").and_then(Value::as_i64) {
        if code != 0 {
            let msg = envelope
                .get("retMsg")
                .and_then(Value::as_str)
                .unwrap_or_default();
            debug!("Bybit retCode {}: {}", code, msg);
        }
    }

    let list = match envelope.remove("result") {
        Some(Value::Object(mut result)) => match result.remove("list") {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        },
        _ => None,
    };

    let Some(items) = list else {
        warn!("Bybit 응답에 result.list 없음, 빈 스냅샷으로 처리");
        return Ok(ExchangeSnapshot::empty());
    };

    Ok(collect_quotes(
        ExchangeId::Bybit,
        items,
        |t: &BybitSpotTicker| (t.symbol.as_str(), &t.last_price),
    ))
}

#[async_trait]
impl SpotExchange for BybitClient {
    fn id(&self) -> ExchangeId {
        ExchangeId::Bybit
    }

    async fn fetch_all(&self) -> Result<ExchangeSnapshot, ExchangeError> {
        let url = format!("{}{TICKER_PATH}", self.base_url);
        fetch_normalized(&self.http, &url, parse_tickers).await
    }
}
