use std::time::Duration;

use tracing::debug;

use interface::{ExchangeError, ExchangeSnapshot};

/// 요청 타임아웃이 적용된 공개 API용 HTTP 클라이언트
pub fn build_http(timeout: Duration) -> Result<reqwest::Client, ExchangeError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

pub(crate) fn trim_base_url(base_url: impl Into<String>) -> String {
    base_url.into().trim_end_matches('/').to_string()
}

/// GET 한 번으로 응답 본문을 받아 거래소별 파서에 넘긴다.
///
/// 2xx가 아닌 응답은 파서를 거치지 않고 `ExchangeError::Status`로 끝난다.
pub async fn fetch_normalized<F>(
    http: &reqwest::Client,
    url: &str,
    parse: F,
) -> Result<ExchangeSnapshot, ExchangeError>
where
    F: FnOnce(&str) -> Result<ExchangeSnapshot, ExchangeError>,
{
    debug!("GET {}", url);
    let response = http.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ExchangeError::Status {
            status,
            url: url.to_string(),
        });
    }

    let body = response.text().await?;
    parse(&body)
}
