use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    /// 네트워크/전송 오류 (타임아웃 포함)
    #[error("http error: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("unexpected http status {status} from {url}")]
    Status { status: StatusCode, url: String },
    /// 응답 본문이 JSON이 아니거나 최상위 구조가 예상과 다름
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ExchangeError {
    fn from(e: serde_json::Error) -> Self {
        ExchangeError::Parse(e.to_string())
    }
}

impl ExchangeError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ExchangeError::Fetch(e) if e.is_timeout())
    }
}
