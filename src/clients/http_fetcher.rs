//! 内容服务 HTTP 客户端
//!
//! 基于 reqwest 实现 `ResourceFetcher`

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::debug;

use crate::clients::resource_fetcher::{classify_status, ResourceFetcher};
use crate::config::Config;
use crate::error::FetchError;

/// 内容服务客户端
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    /// 创建新的客户端
    ///
    /// 不设置超时：服务在本地运行。
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.service_base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// 分类状态码并解析 JSON
    async fn read_json(response: Response, path: &str) -> Result<Value, FetchError> {
        classify_status(response.status().as_u16(), path)?;
        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Transport(format!("invalid response payload: {}", e)))
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<Value, FetchError> {
        debug!("GET {}", path);

        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Self::read_json(response, path).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, FetchError> {
        debug!("POST {} Payload: {}", path, body);

        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Self::read_json(response, path).await
    }
}
