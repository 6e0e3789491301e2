//! 自动补全 DTO
//!
//! 定义自动补全请求参数。响应直接使用 [`crate::search::SearchResult`] 数组。

use crate::search::AutocompleteRequest;

/// 自动补全查询参数
///
/// 参数可能重复出现，每个参数只取第一次出现的值。
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AutocompleteParams {
    /// 查询词
    pub term: Option<String>,
    /// 实体类型过滤，对应 `type` 参数
    pub type_filter: Option<String>,
    /// 只有 "true" 才启用分词
    pub tokenize: Option<String>,
    /// 只有 "true" 才启用词干化
    pub stem: Option<String>,
}

impl AutocompleteParams {
    /// 从解码后的查询参数对构建
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "term" => &mut params.term,
                "type" => &mut params.type_filter,
                "tokenize" => &mut params.tokenize,
                "stem" => &mut params.stem,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

impl From<AutocompleteParams> for AutocompleteRequest {
    fn from(params: AutocompleteParams) -> Self {
        Self {
            term: params.term,
            type_filter: params.type_filter,
            tokenize: params.tokenize.as_deref() == Some("true"),
            stem: params.stem.as_deref() == Some("true"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_flags_require_exact_true() {
        let request = AutocompleteRequest::from(AutocompleteParams {
            term: Some("x".into()),
            type_filter: None,
            tokenize: Some("TRUE".into()),
            stem: Some("true".into()),
        });

        assert!(!request.tokenize);
        assert!(request.stem);
    }

    #[test]
    fn test_type_is_renamed() {
        let params = AutocompleteParams::from_pairs(pairs(&[("term", "jane"), ("type", "Person")]));
        assert_eq!(params.type_filter.as_deref(), Some("Person"));
        assert_eq!(params.tokenize, None);
    }

    #[test]
    fn test_repeated_parameters_keep_first_value() {
        let params = AutocompleteParams::from_pairs(pairs(&[
            ("term", "jane"),
            ("type", "Person"),
            ("term", "doe"),
            ("type", "Book"),
            ("stem", "true"),
            ("stem", "false"),
            ("unrelated", "x"),
        ]));

        assert_eq!(
            params,
            AutocompleteParams {
                term: Some("jane".into()),
                type_filter: Some("Person".into()),
                tokenize: None,
                stem: Some("true".into()),
            }
        );
    }

    #[test]
    fn test_empty_value_is_present() {
        let params = AutocompleteParams::from_pairs(pairs(&[("term", "jane"), ("type", "")]));
        assert_eq!(params.type_filter.as_deref(), Some(""));
    }
}
