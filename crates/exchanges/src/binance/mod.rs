use std::time::Duration;

use interface::ExchangeError;

use crate::http::{build_http, trim_base_url};

pub mod spot;

/// Binance 공개 API 클라이언트 (인증 없음)
#[derive(Clone)]
pub struct BinanceClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
}

impl BinanceClient {
    /// base_url: 테스트 서버나 프록시를 가리킬 때 사용
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ExchangeError> {
        Ok(Self {
            http: build_http(timeout)?,
            base_url: trim_base_url(base_url),
        })
    }
}
