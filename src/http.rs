use tracing::{debug, info_span};

use crate::config::{HttpConfig, RetryPolicy};
use crate::error::FetchError;
use crate::retry::with_retry;

/// Blocking ureq agent driven from async code through `spawn_blocking`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    agent: ureq::Agent,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .build()
            .into();
        Self { agent, retry: config.retry.clone() }
    }

    /// GET `url` and return the body, retrying per the client's policy.
    pub async fn get_text(&self, url: &str, headers: &[(&str, &str)]) -> Result<String, FetchError> {
        let owned_headers: Vec<(String, String)> = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let body = with_retry(&self.retry, url, move || self.get_once(url.to_string(), owned_headers.clone())).await?;
        debug!(url = %url, bytes = body.len(), "Received provider response");
        Ok(body)
    }

    async fn get_once(&self, url: String, headers: Vec<(String, String)>) -> Result<String, FetchError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || {
            let _span = info_span!("provider_fetch", url = %url).entered();
            let mut request = agent.get(&url);
            for (key, value) in &headers {
                request = request.header(key.as_str(), value.as_str());
            }
            match request.call() {
                Ok(response) => {
                    let mut body_reader = response.into_body();
                    body_reader.read_to_string().map_err(|e| FetchError::Unreachable {
                        url: url.clone(),
                        reason: format!("failed to read response body: {}", e),
                    })
                }
                Err(ureq::Error::StatusCode(status)) => Err(FetchError::Status { url: url.clone(), status }),
                Err(e) => Err(FetchError::Unreachable { url: url.clone(), reason: e.to_string() }),
            }
        })
        .await?
    }
}
