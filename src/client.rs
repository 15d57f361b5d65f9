use anyhow::Context;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use crate::error::ClientError;

const LOG_BODY_LIMIT: usize = 200;

/// Client for the Shyft DeFi pools API. Every request carries the accept
/// header and the account's API key.
#[derive(Clone)]
pub struct ShyftClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ShyftClient {
    pub fn new(base_url: &str, api_key: &str) -> anyhow::Result<Self> {
        Url::parse(base_url).with_context(|| format!("invalid Shyft base URL: {base_url}"))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .header("x-api-key", &self.api_key)
            .query(query)
            .send()
            .await?;

        read_json(response).await
    }
}

/// Client for the Solflare Unified Token List API. No credential needed.
#[derive(Clone)]
pub struct SolflareClient {
    http: reqwest::Client,
    base_url: String,
}

impl SolflareClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Url::parse(base_url).with_context(|| format!("invalid Solflare base URL: {base_url}"))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;

        read_json(response).await
    }

    pub async fn post(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &Value,
    ) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {url}");

        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .query(query)
            .json(body)
            .send()
            .await?;

        read_json(response).await
    }
}

/// Checks the status and decodes the body. A non-2xx status is a transport
/// failure; the body is logged truncated so a provider error page cannot
/// flood the log.
async fn read_json(response: reqwest::Response) -> Result<Value, ClientError> {
    let status = response.status();
    let url = response.url().clone();
    let body = response.text().await?;

    if !status.is_success() {
        error!(
            "HTTP error: status {}, response: {}",
            status,
            truncate(&body, LOG_BODY_LIMIT)
        );
        return Err(ClientError::Transport(format!(
            "HTTP status {status} for {url}"
        )));
    }

    Ok(serde_json::from_str(&body)?)
}

fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("abcdef", 4), "abcd");
        assert_eq!(truncate("ab", 4), "ab");
        assert_eq!(truncate("ééééé", 3), "ééé");
    }
}
