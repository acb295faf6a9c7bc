use reqwest::{redirect::Policy, Client, StatusCode};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::FetchConfig;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("{status} for url ({url})")]
    Status { status: StatusCode, url: Url },
    #[error("{0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects.
    pub url: Url,
    pub body: String,
}

pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch(&self, raw_url: &str) -> Result<FetchedPage, FetchError> {
        let url = parse_http_url(raw_url)?;
        self.fetch_url(url).await
    }

    pub async fn fetch_url(&self, url: Url) -> Result<FetchedPage, FetchError> {
        debug!(target: "fetch", url = %url, "GET");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        let final_url = response.url().clone();
        if !status.is_success() {
            debug!(target: "fetch", url = %url, %status, "non-success status");
            return Err(FetchError::Status {
                status,
                url: final_url,
            });
        }

        let body = response.text().await?;
        debug!(target: "fetch", url = %final_url, bytes = body.len(), "fetched");
        Ok(FetchedPage {
            url: final_url,
            body,
        })
    }
}

fn parse_http_url(raw_url: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: raw_url.to_string(),
        reason,
    };
    let url = Url::parse(raw_url.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    Ok(url)
}
