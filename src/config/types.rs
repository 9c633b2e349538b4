//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::infrastructure::json::JsonFormat;

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 应用名称
    #[serde(default = "default_name")]
    pub name: String,

    /// 应用版本
    #[serde(default = "default_version")]
    pub version: String,

    /// 调试模式：开启后未处理错误会返回原始错误信息
    #[serde(default)]
    pub debug: bool,

    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,

    /// JSON 序列化格式配置
    #[serde(default)]
    pub serialization: SerializationConfig,
}

fn default_name() -> String {
    "Scaffold".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
            debug: false,
            server: ServerConfig::default(),
            log: LogConfig::default(),
            serialization: SerializationConfig::default(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 请求体大小上限（字节）
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_body_limit() -> usize {
    50 * 1024 * 1024 // 50 MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit: default_body_limit(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// JSON 序列化格式配置（chrono strftime 语法）
#[derive(Debug, Clone, Deserialize)]
pub struct SerializationConfig {
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default = "default_time_format")]
    pub time_format: String,

    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,
}

fn default_date_format() -> String {
    JsonFormat::DEFAULT_DATE.to_string()
}

fn default_time_format() -> String {
    JsonFormat::DEFAULT_TIME.to_string()
}

fn default_datetime_format() -> String {
    JsonFormat::DEFAULT_DATETIME.to_string()
}

impl Default for SerializationConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            time_format: default_time_format(),
            datetime_format: default_datetime_format(),
        }
    }
}

impl SerializationConfig {
    /// 转换为序列化层使用的格式规则
    pub fn to_format(&self) -> JsonFormat {
        JsonFormat::new(
            self.date_format.clone(),
            self.time_format.clone(),
            self.datetime_format.clone(),
        )
    }
}
