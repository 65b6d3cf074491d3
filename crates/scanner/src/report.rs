use tracing::info;

use crate::pipeline::ScanReport;
use interface::SpreadResult;

/// 사람이 읽는 형식의 리포트 텍스트
pub fn render(report: &ScanReport) -> String {
    let common: Vec<&str> = report.common_symbols.iter().map(String::as_str).collect();

    let mut out = format!("Common symbols ({}): [{}]\n", common.len(), common.join(", "));

    if report.results.is_empty() {
        out.push_str(&format!(
            "No spreads at or above {:.2}%\n",
            report.threshold_pct
        ));
    }

    for result in &report.results {
        out.push_str(&render_result(result));
    }

    out
}

fn render_result(result: &SpreadResult) -> String {
    let prices = result
        .prices
        .iter()
        .map(|(exchange, price)| format!("{exchange}: {price}"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Symbol: {}, Spread: {:.2}%\nPrices: {{{}}}\n",
        result.symbol, result.spread_pct, prices
    )
}

pub fn print_report(report: &ScanReport) {
    print!("{}", render(report));
    info!(
        "공통 심볼 {}개 중 {}개가 {}% 이상",
        report.common_symbols.len(),
        report.results.len(),
        report.threshold_pct
    );
}

pub fn print_json(report: &ScanReport) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;

    use super::*;
    use interface::ExchangeId;

    fn report(results: Vec<SpreadResult>) -> ScanReport {
        ScanReport {
            started_at: Utc::now(),
            finished_at: Utc::now(),
            threshold_pct: 30.0,
            snapshot_sizes: BTreeMap::new(),
            common_symbols: ["ETHUSDT", "BTCUSDT"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            results,
        }
    }

    #[test]
    fn test_render_lists_symbols_and_prices() {
        let result = SpreadResult {
            symbol: "BTCUSDT".to_string(),
            spread_pct: 33.333333,
            prices: BTreeMap::from([
                (ExchangeId::Bybit, 110.5),
                (ExchangeId::Binance, 100.0),
                (ExchangeId::Okx, 133.25),
            ]),
        };

        let text = render(&report(vec![result]));

        assert_eq!(
            text,
            "Common symbols (2): [BTCUSDT, ETHUSDT]\n\
             Symbol: BTCUSDT, Spread: 33.33%\n\
             Prices: {Binance: 100, OKX: 133.25, Bybit: 110.5}\n"
        );
    }

    #[test]
    fn test_render_without_results() {
        let text = render(&report(vec![]));
        assert!(text.ends_with("No spreads at or above 30.00%\n"));
    }

    #[test]
    fn test_json_report_uses_exchange_names() {
        let result = SpreadResult {
            symbol: "BTCUSDT".to_string(),
            spread_pct: 30.0,
            prices: BTreeMap::from([(ExchangeId::Okx, 130.0)]),
        };

        let value = serde_json::to_value(report(vec![result])).unwrap();
        assert_eq!(value["results"][0]["prices"]["OKX"], 130.0);
        assert_eq!(value["common_symbols"][0], "BTCUSDT");
    }
}
