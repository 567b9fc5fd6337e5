//! Chart page retrieval.

use std::time::Duration;

use crate::config::PipelineConfig;
use crate::error::{Result, ScrapeError};

/// Anything that can hand back the chart page markup.
pub trait ChartSource {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Single blocking GET with browser-like headers. No retries.
pub struct HttpFetcher {
    agent: ureq::Agent,
    accept_language: String,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, accept_language: &str, timeout: Duration) -> Self {
        let agent = ureq::Agent::new_with_config(
            ureq::Agent::config_builder()
                .timeout_global(Some(timeout))
                .user_agent(user_agent)
                .build(),
        );

        Self {
            agent,
            accept_language: accept_language.to_string(),
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(&config.user_agent, &config.accept_language, config.timeout)
    }
}

impl ChartSource for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let url = url::Url::parse(url)?;
        tracing::debug!("fetching {}", url);

        let response = match self
            .agent
            .get(url.as_str())
            .header("Accept-Language", self.accept_language.as_str())
            .call()
        {
            Ok(resp) => resp,
            Err(ureq::Error::StatusCode(code)) => return Err(ScrapeError::HttpStatus(code)),
            Err(e) => return Err(e.into()),
        };

        let status = response.status().as_u16();
        if status != 200 {
            return Err(ScrapeError::HttpStatus(status));
        }

        let body = response.into_body().read_to_string()?;
        tracing::debug!("fetched {} bytes", body.len());
        Ok(body)
    }
}

/// Fetch the chart, folding every failure into `None`.
pub fn fetch_or_none(source: &dyn ChartSource, url: &str) -> Option<String> {
    match source.fetch(url) {
        Ok(body) => Some(body),
        Err(e) => {
            tracing::warn!("could not fetch chart: {}", e);
            None
        }
    }
}
