//! Solr 搜索客户端

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::search::{HitList, SearchClient, SearchHit, SearchQuery, SearchResponse};

/// 通过 HTTP `select` 接口访问 Solr core
pub struct SolrSearchClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct SolrSelectResponse {
    response: Option<SolrDocList>,
}

#[derive(Deserialize)]
struct SolrDocList {
    #[serde(rename = "numFound")]
    num_found: u64,
    #[serde(default)]
    docs: Vec<SearchHit>,
}

impl SolrSearchClient {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(SearchError::from)?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    fn parse_body(body: &str) -> std::result::Result<Option<SearchResponse>, SearchError> {
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(None);
        }

        let parsed: SolrSelectResponse = serde_json::from_str(trimmed)?;
        Ok(Some(SearchResponse {
            results: parsed.response.map(|list| HitList {
                num_found: list.num_found,
                docs: list.docs,
            }),
        }))
    }
}

#[async_trait]
impl SearchClient for SolrSearchClient {
    async fn execute(
        &self,
        query: &SearchQuery,
    ) -> std::result::Result<Option<SearchResponse>, SearchError> {
        let response = self
            .client
            .get(format!("{}/select", self.base_url))
            .query(&query.to_params())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(bytes = body.len(), "Received Solr select response");
        Self::parse_body(&body)
    }

    async fn ping(&self) -> std::result::Result<(), SearchError> {
        let response = self
            .client
            .get(format!("{}/admin/ping", self.base_url))
            .query(&[("wt", "json")])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SearchError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            })
        }
    }

    fn client_type(&self) -> &'static str {
        "solr"
    }
}
