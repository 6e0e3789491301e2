//! Autocomplete Gateway
//!
//! 为前端下拉框提供 `{label, uri}` 自动补全建议。查询词被转换为 Solr
//! 查询发送到远程搜索服务，命中记录映射为 JSON 数组返回。

pub mod api;
pub mod config;
pub mod error;
pub mod observability;
pub mod search;
pub mod security;
pub mod services;
