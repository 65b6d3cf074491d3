use std::path::PathBuf;

use thiserror::Error;

use interface::{ExchangeError, ExchangeId};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("snapshot file not found: {}", path.display())]
    Missing { path: PathBuf },
    #[error("snapshot file {} is not a valid snapshot: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode snapshot {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("snapshot io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("threshold must be a finite non-negative percentage, got {0}")]
    InvalidThreshold(f64),
    #[error("request timeout must be at least 1 second")]
    ZeroTimeout,
    #[error("snapshot file name for {0} is empty")]
    EmptyFileName(ExchangeId),
    #[error("{first} and {second} share the snapshot file {}", path.display())]
    DuplicateFileName {
        first: ExchangeId,
        second: ExchangeId,
        path: PathBuf,
    },
}

/// 스캔 한 번을 중단시키는 오류. 부분 결과는 만들지 않는다.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("{exchange} fetch failed: {source}")]
    Exchange {
        exchange: ExchangeId,
        #[source]
        source: ExchangeError,
    },
    #[error("{exchange} snapshot checkpoint failed: {source}")]
    Storage {
        exchange: ExchangeId,
        #[source]
        source: StorageError,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
