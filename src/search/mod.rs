//! 搜索模块
//!
//! 查询构建、远程搜索服务客户端以及命中结果映射。文本分析、排序与索引
//! 存储都由远程搜索服务负责，这里只定义与它交互的契约。

pub mod mapper;
pub mod query;
pub mod solr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::SearchError;

pub use mapper::ResultMapper;
pub use query::QueryBuilder;
pub use solr::SolrSearchClient;

/// 一次自动补全请求
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutocompleteRequest {
    /// 用户输入的查询词
    pub term: Option<String>,
    /// 实体类型过滤
    pub type_filter: Option<String>,
    /// 是否交给搜索服务分词
    pub tokenize: bool,
    /// 分词模式下是否使用词干化字段
    pub stem: bool,
}

impl AutocompleteRequest {
    /// 以查询词创建请求
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
            ..Self::default()
        }
    }

    /// 添加类型过滤
    pub fn with_type(mut self, type_filter: impl Into<String>) -> Self {
        self.type_filter = Some(type_filter.into());
        self
    }

    /// 切换到分词模式
    pub fn tokenized(mut self, stem: bool) -> Self {
        self.tokenize = true;
        self.stem = stem;
        self
    }
}

/// 构建完成的搜索查询，构建后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    query: Option<String>,
    filter_queries: Vec<String>,
    start: u32,
    rows: u32,
}

impl SearchQuery {
    pub(crate) fn new(
        query: Option<String>,
        filter_queries: Vec<String>,
        start: u32,
        rows: u32,
    ) -> Self {
        Self {
            query,
            filter_queries,
            start,
            rows,
        }
    }

    /// 主查询；分词模式下为空
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// 过滤查询
    pub fn filter_queries(&self) -> &[String] {
        &self.filter_queries
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// 转换为 Solr `select` 请求参数
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(4 + self.filter_queries.len());
        if let Some(q) = &self.query {
            params.push(("q", q.clone()));
        }
        for fq in &self.filter_queries {
            params.push(("fq", fq.clone()));
        }
        params.push(("start", self.start.to_string()));
        params.push(("rows", self.rows.to_string()));
        params.push(("wt", "json".to_string()));
        params
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .to_params()
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        write!(f, "{}", rendered.join("&"))
    }
}

/// 搜索服务返回的一条原始命中记录
///
/// 保留原始 JSON 值，非对象记录在映射阶段单独被拒绝，不影响整批解析。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHit {
    raw: Value,
}

impl SearchHit {
    /// 记录是否为字段对象
    pub fn is_document(&self) -> bool {
        self.raw.is_object()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.raw.as_object().and_then(|fields| fields.get(field))
    }
}

impl From<Value> for SearchHit {
    fn from(raw: Value) -> Self {
        Self { raw }
    }
}

/// 命中列表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitList {
    /// 匹配总数（可能大于本页返回的记录数）
    pub num_found: u64,
    /// 本页记录
    pub docs: Vec<SearchHit>,
}

/// 搜索响应
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResponse {
    /// 结果列表；搜索服务未返回时为 `None`
    pub results: Option<HitList>,
}

impl SearchResponse {
    pub fn with_hits(num_found: u64, docs: Vec<SearchHit>) -> Self {
        Self {
            results: Some(HitList { num_found, docs }),
        }
    }
}

/// 自动补全结果项，字段顺序即序列化顺序
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub label: String,
    pub uri: String,
}

impl SearchResult {
    pub fn new(label: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            uri: uri.into(),
        }
    }
}

/// 远程搜索服务客户端
///
/// 实现必须可以被多个请求并发使用。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// 执行查询；`Ok(None)` 表示服务返回了空响应
    async fn execute(
        &self,
        query: &SearchQuery,
    ) -> std::result::Result<Option<SearchResponse>, SearchError>;

    /// 检查服务是否可用
    async fn ping(&self) -> std::result::Result<(), SearchError>;

    /// 客户端类型名
    fn client_type(&self) -> &'static str;
}
