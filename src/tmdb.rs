use crate::config::Settings;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const API_KEY_PARAM: &str = "api_key";

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Raw TMDB endpoints. Errors returned here are transport failures; field
/// level parsing is left to the caller.
#[async_trait]
pub trait TmdbApi: Send + Sync {
    async fn fetch_configuration(&self) -> Result<Value>;
    async fn fetch_now_playing(&self) -> Result<Value>;
}

impl TmdbClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let user_agent = format!("flicks/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5).min(settings.timeout))
            .timeout(settings.timeout)
            .user_agent(user_agent)
            .build()
            .context("Failed to build TMDB HTTP client")?;
        Ok(Self::with_client(client, settings))
    }

    pub fn with_client(client: Client, settings: &Settings) -> Self {
        Self {
            client,
            api_key: settings.api_key.clone(),
            base_url: settings.api_base.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        let url = self.url(path);
        debug!("GET {}", url);
        let res = self
            .client
            .get(&url)
            .query(&[(API_KEY_PARAM, self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| e.without_url())
            .context("request failed")?;
        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| e.without_url())
            .context("reading body failed")?;
        if !status.is_success() {
            return Err(anyhow!("{} -> {} {}", url, status, text));
        }
        serde_json::from_str(&text).context("response body is not JSON")
    }
}

#[async_trait]
impl TmdbApi for TmdbClient {
    async fn fetch_configuration(&self) -> Result<Value> {
        self.get_json("/configuration").await
    }

    async fn fetch_now_playing(&self) -> Result<Value> {
        self.get_json("/movie/now_playing").await
    }
}
