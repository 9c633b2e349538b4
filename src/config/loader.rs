//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量（`.env` 文件会先被载入环境）
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::infrastructure::json::JsonFormat;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "APP";

/// 无前缀的调试开关，`APP_DEBUG` 存在时被忽略
const LEGACY_DEBUG_VAR: &str = "DEBUG";

/// 加载应用配置
///
/// # 环境变量示例
/// - `APP_NAME=my-service`
/// - `APP_VERSION=2.0.0`
/// - `APP_DEBUG=true`（也接受无前缀的 `DEBUG=true`）
/// - `APP_SERVER__PORT=8080`
/// - `APP_SERIALIZATION__DATETIME_FORMAT=%Y/%m/%d %H:%M`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::default();
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("name", defaults.name.as_str())?
        .set_default("version", defaults.version.as_str())?
        .set_default("debug", defaults.debug)?
        .set_default("server.host", defaults.server.host.as_str())?
        .set_default("server.port", i64::from(defaults.server.port))?
        .set_default("server.body_limit", defaults.server.body_limit as i64)?
        .set_default("log.level", defaults.log.level.as_str())?
        .set_default("log.json", defaults.log.json)?
        .set_default(
            "serialization.date_format",
            defaults.serialization.date_format.as_str(),
        )?
        .set_default(
            "serialization.time_format",
            defaults.serialization.time_format.as_str(),
        )?
        .set_default(
            "serialization.datetime_format",
            defaults.serialization.datetime_format.as_str(),
        )?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: APP_SERVER__PORT=8080 -> server.port
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    if let Some(debug) = legacy_debug(|key| std::env::var(key).ok()) {
        builder = builder.set_override("debug", debug)?;
    }

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 读取无前缀的 `DEBUG`，仅在未设置 `APP_DEBUG` 时生效
fn legacy_debug(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    let prefixed = format!("{}_{}", ENV_PREFIX, LEGACY_DEBUG_VAR);
    if lookup(&prefixed).is_some() {
        return None;
    }
    lookup(LEGACY_DEBUG_VAR)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.name.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "App name cannot be empty".to_string(),
        ));
    }

    if config.version.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "App version cannot be empty".to_string(),
        ));
    }

    let serialization = &config.serialization;
    let checks: [(&str, &str, fn(&str) -> bool); 3] = [
        ("date_format", serialization.date_format.as_str(), JsonFormat::is_valid_date_pattern),
        ("time_format", serialization.time_format.as_str(), JsonFormat::is_valid_time_pattern),
        (
            "datetime_format",
            serialization.datetime_format.as_str(),
            JsonFormat::is_valid_datetime_pattern,
        ),
    ];
    for (key, pattern, is_valid) in checks {
        if !is_valid(pattern) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid serialization.{}: {:?}",
                key, pattern
            )));
        }
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("App: {} v{}", config.name, config.version);
    tracing::info!("Debug: {}", config.debug);
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Body Limit: {} bytes", config.server.body_limit);
    tracing::info!("Date Format: {}", config.serialization.date_format);
    tracing::info!("Time Format: {}", config.serialization.time_format);
    tracing::info!("DateTime Format: {}", config.serialization.datetime_format);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_name() {
        let mut config = AppConfig::default();
        config.name = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_bad_datetime_format() {
        let mut config = AppConfig::default();
        config.serialization.datetime_format = "%Y-%Q".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("datetime_format"));
    }

    #[test]
    fn test_validation_error_for_time_only_date_format() {
        let mut config = AppConfig::default();
        config.serialization.date_format = "%H".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("date_format"));
    }

    #[test]
    fn test_load_rejects_date_format_without_date_fields() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "[serialization]\ndate_format = \"%H:%M\"").unwrap();

        let result = load_config_from_path(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_legacy_debug_variable() {
        assert_eq!(legacy_debug(env(&[("DEBUG", "true")])), Some("true".to_string()));
        assert_eq!(legacy_debug(env(&[("DEBUG", "true"), ("APP_DEBUG", "false")])), None);
        assert_eq!(legacy_debug(env(&[])), None);
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "name = \"Demo\"\ndebug = true\n[server]\nport = 9100\n[serialization]\ndate_format = \"%d/%m/%Y\""
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.name, "Demo");
        assert!(config.debug);
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.serialization.date_format, "%d/%m/%Y");
        assert_eq!(config.serialization.time_format, "%H:%M:%S");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let result = load_config_from_path(Some(Path::new("/nonexistent/scaffold.toml")));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
