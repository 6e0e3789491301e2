//! 命中结果映射
//!
//! 把搜索服务的原始命中记录转换为 `{label, uri}`。单条记录格式错误时
//! 跳过该记录并记录日志，不影响其它记录。

use serde_json::Value;
use tracing::warn;

use crate::config::config::SearchFieldsConfig;
use crate::error::HitError;
use crate::search::{SearchHit, SearchResult};

/// 结果映射器
#[derive(Debug, Clone)]
pub struct ResultMapper {
    uri_field: String,
    name_field: String,
}

impl ResultMapper {
    pub fn new(fields: &SearchFieldsConfig) -> Self {
        Self {
            uri_field: fields.uri.clone(),
            name_field: fields.name_raw.clone(),
        }
    }

    /// 映射单条命中记录
    pub fn map_hit(&self, hit: &SearchHit) -> Result<SearchResult, HitError> {
        if !hit.is_document() {
            return Err(HitError::NotADocument);
        }

        let uri = match hit.get(&self.uri_field) {
            None | Some(Value::Null) => return Err(HitError::MissingField(self.uri_field.clone())),
            Some(Value::String(uri)) if uri.is_empty() => {
                return Err(HitError::EmptyValue(self.uri_field.clone()));
            }
            Some(Value::String(uri)) => uri.clone(),
            Some(_) => {
                return Err(HitError::WrongShape {
                    field: self.uri_field.clone(),
                    expected: "a string",
                });
            }
        };

        // 名称是多值字段，取第一个值
        let label = match hit.get(&self.name_field) {
            None | Some(Value::Null) => return Err(HitError::MissingField(self.name_field.clone())),
            Some(Value::Array(values)) => match values.first() {
                Some(Value::String(label)) => label.clone(),
                Some(_) => {
                    return Err(HitError::WrongShape {
                        field: self.name_field.clone(),
                        expected: "a list of strings",
                    });
                }
                None => return Err(HitError::EmptyValue(self.name_field.clone())),
            },
            Some(_) => {
                return Err(HitError::WrongShape {
                    field: self.name_field.clone(),
                    expected: "a list",
                });
            }
        };

        Ok(SearchResult { label, uri })
    }

    /// 映射全部命中记录，保持原有顺序
    pub fn map_hits(&self, hits: &[SearchHit]) -> Vec<SearchResult> {
        hits.iter()
            .enumerate()
            .filter_map(|(index, hit)| match self.map_hit(hit) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!(index, error = %e, "Skipping unusable search hit");
                    None
                }
            })
            .collect()
    }
}
