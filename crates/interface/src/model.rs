use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExchangeId {
    Binance,
    #[serde(rename = "OKX")]
    Okx,
    Bybit,
}

impl ExchangeId {
    pub const ALL: [ExchangeId; 3] = [ExchangeId::Binance, ExchangeId::Okx, ExchangeId::Bybit];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeId::Binance => "Binance",
            ExchangeId::Okx => "OKX",
            ExchangeId::Bybit => "Bybit",
        }
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 거래소마다 다른 심볼 표기를 공통 형식으로 변환
/// 예: "btc-usdt", "BTC_USDT", "BTC/USDT" -> "BTCUSDT"
pub fn canonical_symbol(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | '/'))
        .flat_map(char::to_uppercase)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub symbol: String,
    pub price: f64,
}

impl PriceQuote {
    /// 심볼을 정규화하고, 가격이 유한한 양수가 아니면 None
    pub fn new(symbol: &str, price: f64) -> Option<Self> {
        if !price.is_finite() || price <= 0.0 {
            return None;
        }

        let symbol = canonical_symbol(symbol);
        if symbol.is_empty() {
            return None;
        }

        Some(Self { symbol, price })
    }
}

/// 한 거래소에서 한 시점에 가져온 (심볼, 가격) 목록.
///
/// 같은 심볼이 여러 번 나오면 항상 먼저 나온 레코드를 사용한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeSnapshot {
    quotes: Vec<PriceQuote>,
}

impl ExchangeSnapshot {
    pub fn new(quotes: Vec<PriceQuote>) -> Self {
        Self { quotes }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push(&mut self, quote: PriceQuote) {
        self.quotes.push(quote);
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceQuote> {
        self.quotes.iter()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.quotes.iter().map(|q| q.symbol.as_str())
    }

    pub fn price_of(&self, symbol: &str) -> Option<f64> {
        self.quotes
            .iter()
            .find(|q| q.symbol == symbol)
            .map(|q| q.price)
    }

    /// 심볼 -> 가격 인덱스 (중복 시 첫 레코드 우선)
    pub fn price_index(&self) -> HashMap<&str, f64> {
        let mut index = HashMap::with_capacity(self.quotes.len());
        for q in &self.quotes {
            index.entry(q.symbol.as_str()).or_insert(q.price);
        }
        index
    }
}

impl FromIterator<PriceQuote> for ExchangeSnapshot {
    fn from_iter<I: IntoIterator<Item = PriceQuote>>(iter: I) -> Self {
        Self {
            quotes: iter.into_iter().collect(),
        }
    }
}

/// 세 거래소 모두에 상장된 심볼 집합
pub type CommonSymbolSet = BTreeSet<String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadResult {
    pub symbol: String,
    pub spread_pct: f64, // 20.0 == 20%
    pub prices: BTreeMap<ExchangeId, f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_symbol_matches_across_exchanges() {
        assert_eq!(canonical_symbol("BTC-USDT"), "BTCUSDT");
        assert_eq!(canonical_symbol("BTCUSDT"), "BTCUSDT");
        assert_eq!(canonical_symbol("eth_usdt"), "ETHUSDT");
        assert_eq!(canonical_symbol(" sol/usdc "), "SOLUSDC");
    }

    #[test]
    fn test_price_quote_rejects_non_positive_price() {
        assert!(PriceQuote::new("BTCUSDT", 0.0).is_none());
        assert!(PriceQuote::new("BTCUSDT", -1.0).is_none());
        assert!(PriceQuote::new("BTCUSDT", f64::NAN).is_none());
        assert!(PriceQuote::new("BTCUSDT", f64::INFINITY).is_none());
        assert!(PriceQuote::new("--", 1.0).is_none());

        let q = PriceQuote::new("btc-usdt", 42.5).unwrap();
        assert_eq!(q.symbol, "BTCUSDT");
        assert_eq!(q.price, 42.5);
    }

    #[test]
    fn test_duplicate_symbol_first_record_wins() {
        let snapshot: ExchangeSnapshot = [("BTCUSDT", 100.0), ("ETHUSDT", 5.0), ("BTCUSDT", 200.0)]
            .into_iter()
            .filter_map(|(s, p)| PriceQuote::new(s, p))
            .collect();

        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.price_of("BTCUSDT"), Some(100.0));
        assert_eq!(snapshot.price_index().get("BTCUSDT"), Some(&100.0));
        assert_eq!(snapshot.price_of("XRPUSDT"), None);
    }

    #[test]
    fn test_snapshot_serializes_as_plain_array() {
        let snapshot = ExchangeSnapshot::new(vec![PriceQuote::new("BTCUSDT", 1.5).unwrap()]);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"[{"symbol":"BTCUSDT","price":1.5}]"#);
    }

    #[test]
    fn test_exchange_id_display_names() {
        let names: Vec<String> = ExchangeId::ALL.iter().map(|e| e.to_string()).collect();
        assert_eq!(names, vec!["Binance", "OKX", "Bybit"]);
        assert_eq!(serde_json::to_string(&ExchangeId::Okx).unwrap(), r#""OKX""#);
    }
}
