//! 自动补全服务
//!
//! 线性流程：构建查询 → 调用搜索服务 → 检查结果 → 映射命中记录。
//! 任一步失败都返回带标签的 [`AutocompleteError`]，不做重试。

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::config::config::SearchConfig;
use crate::error::{AutocompleteError, EmptyResponse};
use crate::search::{
    AutocompleteRequest, QueryBuilder, ResultMapper, SearchClient, SearchResult,
};

pub type AutocompleteResult = std::result::Result<Vec<SearchResult>, AutocompleteError>;

#[async_trait]
pub trait AutocompleteService: Send + Sync {
    async fn complete(&self, request: &AutocompleteRequest) -> AutocompleteResult;
}

pub struct AutocompleteServiceImpl {
    search_client: Arc<dyn SearchClient>,
    query_builder: QueryBuilder,
    result_mapper: ResultMapper,
}

impl AutocompleteServiceImpl {
    pub fn new(search_client: Arc<dyn SearchClient>, config: &SearchConfig) -> Self {
        Self {
            search_client,
            query_builder: QueryBuilder::new(config),
            result_mapper: ResultMapper::new(&config.fields),
        }
    }
}

#[async_trait]
impl AutocompleteService for AutocompleteServiceImpl {
    async fn complete(&self, request: &AutocompleteRequest) -> AutocompleteResult {
        let query = self.query_builder.build(request)?;
        debug!(term = ?request.term, query = %query, "Built autocomplete query");

        let response = self
            .search_client
            .execute(&query)
            .await?
            .ok_or(AutocompleteError::EmptyResponse(EmptyResponse::NullResponse))?;

        let hits = response
            .results
            .ok_or(AutocompleteError::EmptyResponse(EmptyResponse::NullResultList))?;

        debug!(num_found = hits.num_found, "Autocomplete hits");
        if hits.num_found < 1 {
            return Err(AutocompleteError::NoMatches);
        }

        Ok(self.result_mapper.map_hits(&hits.docs))
    }
}

pub fn create_autocomplete_service(
    search_client: Arc<dyn SearchClient>,
    config: &SearchConfig,
) -> Box<dyn AutocompleteService> {
    Box::new(AutocompleteServiceImpl::new(search_client, config))
}
