use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use interface::{ExchangeId, ExchangeSnapshot, PriceQuote};

/// 거래소 API는 가격을 보통 문자열로 주지만 숫자도 허용
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Decimal {
    Text(String),
    Number(f64),
}

impl Decimal {
    pub(crate) fn to_f64(&self) -> Option<f64> {
        match self {
            Decimal::Text(s) => s.trim().parse().ok(),
            Decimal::Number(v) => Some(*v),
        }
    }
}

/// 개별 레코드를 정규화한다. 깨진 레코드는 전체 실패 대신 건너뛴다.
pub(crate) fn collect_quotes<T, F>(
    exchange: ExchangeId,
    items: Vec<Value>,
    extract: F,
) -> ExchangeSnapshot
where
    T: DeserializeOwned,
    F: Fn(&T) -> (&str, &Decimal),
{
    let total = items.len();
    let mut out = ExchangeSnapshot::empty();

    for item in items {
        let ticker: T = match serde_json::from_value(item) {
            Ok(t) => t,
            Err(_) => continue,
        };

        let (symbol, price) = extract(&ticker);
        let quote = price.to_f64().and_then(|p| PriceQuote::new(symbol, p));
        if let Some(quote) = quote {
            out.push(quote);
        }
    }

    let skipped = total - out.len();
    if skipped > 0 {
        debug!("{}: {}개 중 {}개 레코드 건너뜀", exchange, total, skipped);
    }

    out
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Row {
        s: String,
        p: Decimal,
    }

    #[test]
    fn test_collect_quotes_skips_bad_records() {
        let items = serde_json::from_str::<Vec<Value>>(
            r#"[
                {"s": "BTCUSDT", "p": "100.5"},
                {"s": "ETHUSDT", "p": 12},
                {"s": "BADUSDT", "p": "abc"},
                {"s": "ZEROUSDT", "p": "0"},
                {"p": "1.0"},
                "garbage"
            ]"#,
        )
        .unwrap();

        let snapshot = collect_quotes(ExchangeId::Binance, items, |r: &Row| (r.s.as_str(), &r.p));

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.price_of("BTCUSDT"), Some(100.5));
        assert_eq!(snapshot.price_of("ETHUSDT"), Some(12.0));
    }
}
