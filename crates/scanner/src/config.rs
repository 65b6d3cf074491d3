use std::path::{Component, PathBuf};
use std::time::Duration;

use structopt::StructOpt;

use crate::error::ConfigError;
use interface::ExchangeId;

/// 스캐너 실행 설정. CLI 플래그 > 환경 변수(.env 포함) > 기본값 순으로 적용
#[derive(Debug, Clone, StructOpt)]
#[structopt(name = "scanner", about = "Binance/OKX/Bybit 현물 가격 스프레드 스캐너")]
pub struct ScanConfig {
    /// 보고할 최소 스프레드 (%), 경계값 포함
    #[structopt(long, env = "SCAN_THRESHOLD_PCT", default_value = "30")]
    pub threshold: f64,

    /// 스냅샷 JSON 파일을 저장할 디렉터리
    #[structopt(
        long,
        env = "SCAN_DATA_DIR",
        default_value = ".",
        parse(from_os_str)
    )]
    pub data_dir: PathBuf,

    #[structopt(long, env = "SCAN_BINANCE_FILE", default_value = "binance.json")]
    pub binance_file: String,

    #[structopt(long, env = "SCAN_OKX_FILE", default_value = "okx.json")]
    pub okx_file: String,

    #[structopt(long, env = "SCAN_BYBIT_FILE", default_value = "bybit.json")]
    pub bybit_file: String,

    #[structopt(long, env = "SCAN_BINANCE_URL", default_value = "https://api.binance.com")]
    pub binance_url: String,

    #[structopt(long, env = "SCAN_OKX_URL", default_value = "https://www.okx.com")]
    pub okx_url: String,

    #[structopt(long, env = "SCAN_BYBIT_URL", default_value = "https://api.bybit.com")]
    pub bybit_url: String,

    /// 거래소 요청당 타임아웃 (초)
    #[structopt(long, env = "SCAN_TIMEOUT_SECS", default_value = "10")]
    pub timeout_secs: u64,

    /// 지정하면 날짜별 로그 파일도 남긴다
    #[structopt(long, env = "SCAN_LOG_DIR", parse(from_os_str))]
    pub log_dir: Option<PathBuf>,

    /// 결과를 JSON으로 출력
    #[structopt(long)]
    pub json: bool,
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        for id in ExchangeId::ALL {
            if self.snapshot_file(id).trim().is_empty() {
                return Err(ConfigError::EmptyFileName(id));
            }
        }

        // 체크포인트는 동시에 저장/재로드하므로 거래소마다 파일이 달라야 한다
        let paths = ExchangeId::ALL.map(|id| (id, self.snapshot_path(id)));
        for (i, (first, path)) in paths.iter().enumerate() {
            if let Some((second, _)) = paths[i + 1..].iter().find(|(_, other)| other == path) {
                return Err(ConfigError::DuplicateFileName {
                    first: *first,
                    second: *second,
                    path: path.clone(),
                });
            }
        }

        Ok(())
    }

    /// data_dir 기준 스냅샷 경로. `./` 같은 현재 디렉터리 성분은 제거
    pub fn snapshot_path(&self, exchange: ExchangeId) -> PathBuf {
        self.data_dir
            .join(self.snapshot_file(exchange))
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn snapshot_file(&self, exchange: ExchangeId) -> &str {
        match exchange {
            ExchangeId::Binance => &self.binance_file,
            ExchangeId::Okx => &self.okx_file,
            ExchangeId::Bybit => &self.bybit_file,
        }
    }

    pub fn base_url(&self, exchange: ExchangeId) -> &str {
        match exchange {
            ExchangeId::Binance => &self.binance_url,
            ExchangeId::Okx => &self.okx_url,
            ExchangeId::Bybit => &self.bybit_url,
        }
    }
}
