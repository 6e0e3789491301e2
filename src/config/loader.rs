use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// 环境变量前缀，嵌套字段以 `__` 分隔，例如 `AUTOCOMPLETE__SEARCH__URL`
const ENV_PREFIX: &str = "AUTOCOMPLETE__";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 合并顺序：
    /// 1. 开发环境默认值
    /// 2. ./config.toml
    /// 3. 环境变量
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载配置
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig, figment::Error> {
        Self::figment(path.as_ref()).extract()
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::development()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.search.url.trim().is_empty() {
            return Err(ConfigValidationError::MissingSearchUrl);
        }

        if config.search.max_hit_count == 0 {
            return Err(ConfigValidationError::InvalidHitCount);
        }

        if config.search.max_query_length == 0 {
            return Err(ConfigValidationError::InvalidQueryLength);
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("搜索服务地址未配置")]
    MissingSearchUrl,

    #[error("最大命中数无效，必须大于 0")]
    InvalidHitCount,

    #[error("查询词最大长度无效，必须大于 0")]
    InvalidQueryLength,
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_config_is_valid() {
        assert!(ConfigLoader::validate(&AppConfig::development()).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = AppConfig::development();
        config.server.port = 0;
        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidPort)
        );
    }

    #[test]
    fn test_validate_rejects_empty_search_url() {
        let mut config = AppConfig::development();
        config.search.url = "  ".into();
        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::MissingSearchUrl)
        );
    }

    #[test]
    fn test_load_merges_file_and_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "gateway.toml",
                r#"
                [server]
                port = 9090

                [search]
                url = "http://solr:8983/solr/core"
                max_hit_count = 50
                "#,
            )?;
            jail.set_env("AUTOCOMPLETE__SEARCH__MAX_QUERY_LENGTH", "120");

            let config = ConfigLoader::load_from("gateway.toml")?;
            assert_eq!(config.server.port, 9090);
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.search.url, "http://solr:8983/solr/core");
            assert_eq!(config.search.max_hit_count, 50);
            assert_eq!(config.search.max_query_length, 120);
            assert_eq!(config.search.fields.uri, "URI");
            Ok(())
        });
    }
}
