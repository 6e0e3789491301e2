//! 查询构建
//!
//! 把用户输入的查询词和请求参数转换为 [`SearchQuery`]。

use tracing::{debug, warn};

use crate::config::config::{SearchConfig, SearchFieldsConfig};
use crate::error::InvalidQuery;
use crate::search::{AutocompleteRequest, SearchQuery};

/// 查询构建器
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    max_query_length: usize,
    max_hit_count: u32,
    fields: SearchFieldsConfig,
}

impl QueryBuilder {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            max_query_length: config.max_query_length,
            max_hit_count: config.max_hit_count,
            fields: config.fields.clone(),
        }
    }

    /// 构建查询；查询词缺失或过长时拒绝
    pub fn build(&self, request: &AutocompleteRequest) -> Result<SearchQuery, InvalidQuery> {
        let term = request.term.as_deref().ok_or(InvalidQuery::MissingTerm)?;

        // 长度按 UTF-16 码元计，与前端 JavaScript 的 `length` 一致
        let len = term.encode_utf16().count();
        if len > self.max_query_length {
            return Err(InvalidQuery::TermTooLong {
                len,
                max: self.max_query_length,
            });
        }

        if term.trim().is_empty() {
            warn!("Autocomplete term is blank");
        }

        let query = if request.tokenize {
            self.tokenized_query(term, request.stem)
        } else {
            Some(self.untokenized_query(term))
        };

        let filter_queries = request
            .type_filter
            .iter()
            .map(|rdf_type| format!("{}:\"{}\"", self.fields.rdf_type, rdf_type))
            .collect();

        Ok(SearchQuery::new(query, filter_queries, 0, self.max_hit_count))
    }

    /// 前缀匹配小写名称字段：小写化、转义空白、追加通配符
    fn untokenized_query(&self, term: &str) -> String {
        let mut escaped = String::with_capacity(term.len() + 8);
        for c in term.to_lowercase().chars() {
            if c.is_whitespace() {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        format!("{}:{}*", self.fields.name_lowercase, escaped)
    }

    // TODO: build the analyzed `(field:term field:term*)` name clause for
    // tokenized requests; until then only the filters are sent.
    fn tokenized_query(&self, term: &str, stem: bool) -> Option<String> {
        let field = if stem {
            &self.fields.ac_name_stemmed
        } else {
            &self.fields.ac_name_unstemmed
        };
        debug!(
            field = %field,
            term = %term,
            "Tokenized autocomplete requested; no name clause is emitted"
        );
        None
    }
}
