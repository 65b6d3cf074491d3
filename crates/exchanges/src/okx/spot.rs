use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::http::fetch_normalized;
use crate::normalize::{collect_quotes, Decimal};
use crate::{OkxClient, SpotExchange};
use interface::{ExchangeError, ExchangeId, ExchangeSnapshot};

pub const TICKER_PATH: &str = "/api/v5/market/tickers?instType=SPOT";

#[derive(Debug, Deserialize)]
struct OkxResponse {
    code: String,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OkxSpotTicker {
    inst_id: String, // "BTC-USDT"
    last: Decimal,
}

/// `{"code": "0", "data": [...]}` 봉투.
/// code가 "0"이 아니면 오류가 아니라 데이터 없음으로 취급한다.
pub fn parse_tickers(body: &str) -> Result<ExchangeSnapshot, ExchangeError> {
    let response: OkxResponse = serde_json::from_str(body)?;

    if response.code != "0" {
        warn!(
            "OKX API error (spot tickers): {} - {}, 빈 스냅샷으로 처리",
            response.code, response.msg
        );
        return Ok(ExchangeSnapshot::empty());
    }

    // "BTC-USDT" -> "BTCUSDT" 변환은 PriceQuote::new에서 처리
    Ok(collect_quotes(
        ExchangeId::Okx,
        response.data.unwrap_or_default(),
        |t: &OkxSpotTicker| (t.inst_id.as_str(), &t.last),
    ))
}

#[async_trait]
impl SpotExchange for OkxClient {
    fn id(&self) -> ExchangeId {
        ExchangeId::Okx
    }

    async fn fetch_all(&self) -> Result<ExchangeSnapshot, ExchangeError> {
        let url = format!("{}{TICKER_PATH}", self.base_url);
        fetch_normalized(&self.http, &url, parse_tickers).await
    }
}
