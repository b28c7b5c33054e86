use std::time::Duration;

use anyhow::{Context, Result};
use chek_core::{ChekError, DateResolver, parse_lenient};
use chek_ingest::date_from_store_page;
use log::debug;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Thin wrapper over `reqwest::Client` for receipt pages.
#[derive(Debug, Clone)]
pub struct ReceiptClient {
    http: reqwest::Client,
}

impl ReceiptClient {
    pub fn new(opts: &ClientOptions) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(opts.user_agent.clone())
            .timeout(opts.timeout)
            .build()
            .context("build http client")?;
        Ok(Self { http })
    }

    /// GET a page as text. Transport errors and non-2xx statuses are network failures.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ChekError> {
        let target = parse_lenient(url)?;
        debug!("GET {target}");
        let resp = self
            .http
            .get(target)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ChekError::Network(format!("{url}: {e}")))?;

        resp.text()
            .await
            .map_err(|e| ChekError::Network(format!("{url}: {e}")))
    }
}

impl DateResolver for ReceiptClient {
    async fn date_from_page(&self, url: &str) -> Result<String, ChekError> {
        let html = self.fetch_html(url).await?;
        date_from_store_page(&html).ok_or_else(|| ChekError::DateNotFound(url.to_string()))
    }
}
