use std::time::Duration;

use interface::ExchangeError;

use crate::http::{build_http, trim_base_url};

pub mod spot;

#[derive(Clone)]
pub struct BybitClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
}

impl BybitClient {
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ExchangeError> {
        Ok(Self {
            http: build_http(timeout)?,
            base_url: trim_base_url(base_url),
        })
    }
}
