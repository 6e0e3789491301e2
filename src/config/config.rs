use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
}

/// 搜索服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Solr core 地址，例如 `http://localhost:8983/solr/vitrocore`
    pub url: String,
    /// 请求超时（秒）
    pub timeout_secs: u64,
    /// 单次查询返回的最大命中数
    pub max_hit_count: u32,
    /// 查询词最大长度（字符）
    pub max_query_length: usize,
    /// 索引字段名
    pub fields: SearchFieldsConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8983/solr/vitrocore".into(),
            timeout_secs: 10,
            max_hit_count: 1000,
            max_query_length: 500,
            fields: SearchFieldsConfig::default(),
        }
    }
}

/// 索引字段名配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFieldsConfig {
    /// 实体 URI
    pub uri: String,
    /// 原始名称（多值字段）
    pub name_raw: String,
    /// 小写名称，用于非分词前缀匹配
    pub name_lowercase: String,
    /// 实体类型
    pub rdf_type: String,
    /// 分词 + 词干化的自动补全名称
    pub ac_name_stemmed: String,
    /// 分词但不词干化的自动补全名称
    pub ac_name_unstemmed: String,
}

impl Default for SearchFieldsConfig {
    fn default() -> Self {
        Self {
            uri: "URI".into(),
            name_raw: "nameRaw".into(),
            name_lowercase: "nameLowercase".into(),
            rdf_type: "type".into(),
            ac_name_stemmed: "acNameStemmed".into(),
            ac_name_unstemmed: "acNameUnstemmed".into(),
        }
    }
}

/// 安全配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SecurityConfig {
    /// API 密钥到角色名的映射
    pub api_keys: HashMap<String, String>,
    /// 匿名调用者是否可以使用自动补全
    pub public_autocomplete: bool,
    /// 是否添加安全响应头
    pub security_headers_enabled: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录
    pub log_dir: Option<PathBuf>,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 搜索服务配置
    pub search: SearchConfig,
    /// 安全配置
    pub security: SecurityConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        let mut api_keys = HashMap::new();
        api_keys.insert("dev-api-key".to_string(), "admin".to_string());

        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
            },
            search: SearchConfig::default(),
            security: SecurityConfig {
                api_keys,
                public_autocomplete: true,
                security_headers_enabled: true,
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            app_name: "autocomplete-gateway".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config.security.api_keys.clear();
        config
    }
}
