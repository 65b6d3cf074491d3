use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::intersect::intersect;
use crate::spread::compute_spreads;
use crate::store::SnapshotStore;
use exchanges::{BinanceClient, BybitClient, OkxClient, SpotExchange};
use interface::{CommonSymbolSet, ExchangeError, ExchangeId, ExchangeSnapshot, SpreadResult};

/// 거래소 하나와 그 스냅샷 파일 이름
#[derive(Clone)]
pub struct Venue {
    pub client: Arc<dyn SpotExchange>,
    pub file_name: String,
}

impl Venue {
    pub fn new(client: Arc<dyn SpotExchange>, file_name: impl Into<String>) -> Self {
        Self {
            client,
            file_name: file_name.into(),
        }
    }

    pub fn id(&self) -> ExchangeId {
        self.client.id()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub threshold_pct: f64,
    pub snapshot_sizes: BTreeMap<ExchangeId, usize>,
    pub common_symbols: CommonSymbolSet,
    pub results: Vec<SpreadResult>,
}

/// 수집 -> 저장/재로드 -> 교집합 -> 스프레드 계산 한 사이클
pub struct Pipeline {
    venues: [Venue; 3],
    store: SnapshotStore,
    threshold_pct: f64,
}

impl Pipeline {
    pub fn new(venues: [Venue; 3], store: SnapshotStore, threshold_pct: f64) -> Self {
        Self {
            venues,
            store,
            threshold_pct,
        }
    }

    /// 설정의 base URL, 타임아웃, 파일 이름으로 실제 거래소 클라이언트를 구성
    pub fn from_config(config: &ScanConfig) -> Result<Self, ScanError> {
        config.validate()?;

        let timeout = config.timeout();

        let binance: Arc<dyn SpotExchange> = Arc::new(
            BinanceClient::with_base_url(config.base_url(ExchangeId::Binance), timeout)
                .map_err(client_error(ExchangeId::Binance))?,
        );
        let okx: Arc<dyn SpotExchange> = Arc::new(
            OkxClient::with_base_url(config.base_url(ExchangeId::Okx), timeout)
                .map_err(client_error(ExchangeId::Okx))?,
        );
        let bybit: Arc<dyn SpotExchange> = Arc::new(
            BybitClient::with_base_url(config.base_url(ExchangeId::Bybit), timeout)
                .map_err(client_error(ExchangeId::Bybit))?,
        );

        let venues = [
            Venue::new(binance, config.snapshot_file(ExchangeId::Binance)),
            Venue::new(okx, config.snapshot_file(ExchangeId::Okx)),
            Venue::new(bybit, config.snapshot_file(ExchangeId::Bybit)),
        ];

        Ok(Self::new(
            venues,
            SnapshotStore::new(&config.data_dir),
            config.threshold,
        ))
    }

    /// 하나라도 수집/저장에 실패하면 전체 실행을 중단한다.
    /// 거래소가 빈 스냅샷을 주는 것은 실패가 아니다 (교집합이 비게 될 뿐).
    pub async fn run(&self) -> Result<ScanReport, ScanError> {
        let started_at = Utc::now();
        let timer = Instant::now();
        let [a, b, c] = &self.venues;

        info!(
            "스캔 시작: {}, {}, {} (임계값 {}%)",
            a.id(),
            b.id(),
            c.id(),
            self.threshold_pct
        );

        // 세 거래소는 서로 의존성이 없으므로 동시에 가져온다
        let (snap_a, snap_b, snap_c) = tokio::try_join!(fetch(a), fetch(b), fetch(c))?;

        // 저장 후 즉시 다시 읽어 디스크의 내용을 기준으로 계산한다
        let (snap_a, snap_b, snap_c) = tokio::try_join!(
            self.checkpoint(a, snap_a),
            self.checkpoint(b, snap_b),
            self.checkpoint(c, snap_c)
        )?;

        let common_symbols = intersect(&snap_a, &snap_b, &snap_c);
        info!("공통 심볼 {}개", common_symbols.len());

        let results = compute_spreads(
            [(a.id(), &snap_a), (b.id(), &snap_b), (c.id(), &snap_c)],
            &common_symbols,
            self.threshold_pct,
        );

        let snapshot_sizes = BTreeMap::from([
            (a.id(), snap_a.len()),
            (b.id(), snap_b.len()),
            (c.id(), snap_c.len()),
        ]);

        info!(
            "스캔 완료: 임계값 이상 {}개, {}ms",
            results.len(),
            timer.elapsed().as_millis()
        );

        Ok(ScanReport {
            started_at,
            finished_at: Utc::now(),
            threshold_pct: self.threshold_pct,
            snapshot_sizes,
            common_symbols,
            results,
        })
    }

    async fn checkpoint(
        &self,
        venue: &Venue,
        snapshot: ExchangeSnapshot,
    ) -> Result<ExchangeSnapshot, ScanError> {
        let storage_err = |source| ScanError::Storage {
            exchange: venue.id(),
            source,
        };

        self.store
            .save(&venue.file_name, &snapshot)
            .await
            .map_err(storage_err)?;
        self.store.load(&venue.file_name).await.map_err(storage_err)
    }
}

fn client_error(exchange: ExchangeId) -> impl FnOnce(ExchangeError) -> ScanError {
    move |source| ScanError::Exchange { exchange, source }
}

async fn fetch(venue: &Venue) -> Result<ExchangeSnapshot, ScanError> {
    let exchange = venue.id();
    let snapshot = venue
        .client
        .fetch_all()
        .await
        .map_err(|source| ScanError::Exchange { exchange, source })?;

    info!("{} 현물 티커 {}개 수집", exchange, snapshot.len());
    Ok(snapshot)
}
