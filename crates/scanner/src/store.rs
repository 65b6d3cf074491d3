use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use crate::error::StorageError;
use interface::ExchangeSnapshot;

/// 정규화된 스냅샷을 `{dir}/{name}` JSON 파일로 저장/로드
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// 이전 파일은 통째로 덮어쓴다 (4칸 들여쓰기)
    pub async fn save(&self, name: &str, snapshot: &ExchangeSnapshot) -> Result<(), StorageError> {
        let path = self.path_for(name);

        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        snapshot
            .serialize(&mut ser)
            .map_err(|source| StorageError::Encode {
                path: path.clone(),
                source,
            })?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StorageError::Io {
                path: self.dir.clone(),
                source,
            })?;

        tokio::fs::write(&path, buf)
            .await
            .map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;

        debug!("스냅샷 저장: {} ({}개)", path.display(), snapshot.len());
        Ok(())
    }

    pub async fn load(&self, name: &str) -> Result<ExchangeSnapshot, StorageError> {
        let path = self.path_for(name);

        let bytes = match tokio::fs::read(&path).await {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::Missing { path });
            }
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt { path, source })
    }
}
