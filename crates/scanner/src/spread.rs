use std::collections::BTreeMap;

use tracing::{debug, warn};

use interface::{CommonSymbolSet, ExchangeId, ExchangeSnapshot, SpreadResult};

/// 최저가 대비 (최고가 - 최저가) 비율 (%)
pub fn spread_pct(min_price: f64, max_price: f64) -> f64 {
    (max_price - min_price) / min_price * 100.0
}

/// 공통 심볼마다 세 거래소 가격을 모아 스프레드를 계산하고,
/// `threshold_pct` 이상(경계 포함)인 것만 심볼 오름차순으로 반환한다.
///
/// 같은 심볼이 여러 번 있으면 첫 레코드 가격을 쓴다.
pub fn compute_spreads(
    snapshots: [(ExchangeId, &ExchangeSnapshot); 3],
    symbols: &CommonSymbolSet,
    threshold_pct: f64,
) -> Vec<SpreadResult> {
    let indexes = snapshots.map(|(id, snapshot)| (id, snapshot.price_index()));
    let mut out = Vec::new();

    'symbols: for symbol in symbols {
        let mut prices = BTreeMap::new();
        for (id, index) in &indexes {
            match index.get(symbol.as_str()) {
                Some(price) => {
                    prices.insert(*id, *price);
                }
                None => {
                    debug!("{} 가격 없음 ({}), 건너뜀", symbol, id);
                    continue 'symbols;
                }
            }
        }

        let min_price = prices.values().copied().fold(f64::INFINITY, f64::min);
        let max_price = prices.values().copied().fold(f64::NEG_INFINITY, f64::max);

        // 0 이하 가격은 정규화 단계에서 걸러지지만, 파일에서 읽은 값은 다시 확인
        if min_price <= 0.0 || !max_price.is_finite() {
            warn!("{} 가격이 유효하지 않음: {:?}, 건너뜀", symbol, prices);
            continue;
        }

        let spread = spread_pct(min_price, max_price);
        if spread >= threshold_pct {
            out.push(SpreadResult {
                symbol: symbol.clone(),
                spread_pct: spread,
                prices,
            });
        }
    }

    out
}
