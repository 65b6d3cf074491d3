use std::collections::HashSet;

use interface::{CommonSymbolSet, ExchangeSnapshot};

/// 세 스냅샷 모두에 존재하는 심볼 집합. 비어 있어도 정상 결과다.
pub fn intersect(
    a: &ExchangeSnapshot,
    b: &ExchangeSnapshot,
    c: &ExchangeSnapshot,
) -> CommonSymbolSet {
    let in_b: HashSet<&str> = b.symbols().collect();
    let in_c: HashSet<&str> = c.symbols().collect();

    a.symbols()
        .filter(|s| in_b.contains(s) && in_c.contains(s))
        .map(str::to_string)
        .collect()
}
