use async_trait::async_trait;

use interface::{ExchangeError, ExchangeId, ExchangeSnapshot};

pub mod binance;
pub mod bybit;
pub mod http;
pub mod okx;

mod normalize;
#[cfg(test)]
mod test_util;

#[async_trait]
pub trait SpotExchange: Send + Sync {
    fn id(&self) -> ExchangeId;

    /// 전체 현물 티커를 가져와 공통 심볼/가격 형식으로 정규화
    async fn fetch_all(&self) -> Result<ExchangeSnapshot, ExchangeError>;
}

// Convenience re-exports
pub use binance::BinanceClient;
pub use bybit::BybitClient;
pub use okx::OkxClient;
