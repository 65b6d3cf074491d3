use std::{
    fs::{self, OpenOptions},
    path::Path,
};

use chrono::Local;
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Tracing guards를 보관하는 구조체
/// 이 구조체가 drop되기 전까지 로깅이 계속 작동합니다
pub struct TracingGuards {
    _file: Option<WorkerGuard>,
    _stderr: WorkerGuard,
}

/// Tracing 초기화
/// stderr 로깅은 항상, log_dir이 있으면 파일 로깅도 설정합니다 (리포트는 stdout)
pub fn init_tracing(log_dir: Option<&Path>) -> eyre::Result<TracingGuards> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (stderr_writer, stderr_guard) = non_blocking(std::io::stderr());

    let (file_layer, file_guard) = match log_dir {
        Some(dir) => {
            let (writer, guard) = daily_file_writer(dir, "scanner")?;
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(fmt::layer().with_writer(stderr_writer))
        .try_init()?;

    Ok(TracingGuards {
        _file: file_guard,
        _stderr: stderr_guard,
    })
}

/// 날짜별 로그 파일 생성
/// `{dir}/scanner.2025-11-29.log` 형식
fn daily_file_writer(dir: &Path, prefix: &str) -> std::io::Result<(NonBlocking, WorkerGuard)> {
    fs::create_dir_all(dir)?;

    let date = Local::now().format("%Y-%m-%d").to_string();
    let path = dir.join(format!("{prefix}.{date}.log"));

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(non_blocking(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_file_writer_creates_dated_file() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");

        let (_writer, _guard) = daily_file_writer(&logs, "scanner").unwrap();

        let names: Vec<String> = fs::read_dir(&logs)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].starts_with("scanner.") && names[0].ends_with(".log"));
    }
}
