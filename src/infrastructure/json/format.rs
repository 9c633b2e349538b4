//! JSON 格式规则
//!
//! 进程级只写一次的日期/时间格式规则。启动时由 [`install`] 安装，
//! 之后所有时间类型的 `Serialize` 实现都读取同一份规则。

use std::fmt::{self, Write};
use std::sync::OnceLock;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

static INSTALLED: OnceLock<JsonFormat> = OnceLock::new();
static DEFAULT: OnceLock<JsonFormat> = OnceLock::new();

/// 日期 / 时间 / 日期时间的 strftime 格式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFormat {
    date: String,
    time: String,
    datetime: String,
}

impl JsonFormat {
    pub const DEFAULT_DATE: &'static str = "%Y-%m-%d";
    pub const DEFAULT_TIME: &'static str = "%H:%M:%S";
    pub const DEFAULT_DATETIME: &'static str = "%Y-%m-%d %H:%M:%S";

    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        datetime: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            datetime: datetime.into(),
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn datetime(&self) -> &str {
        &self.datetime
    }

    /// 检查 strftime 格式串是否可被 chrono 解析
    pub fn is_valid_pattern(pattern: &str) -> bool {
        !pattern.is_empty() && StrftimeItems::new(pattern).all(|item| !matches!(item, Item::Error))
    }

    /// 格式串可用于格式化日期（不含时间字段）
    pub fn is_valid_date_pattern(pattern: &str) -> bool {
        Self::is_valid_pattern(pattern) && renders(NaiveDate::default().format(pattern))
    }

    /// 格式串可用于格式化时间（不含日期字段）
    pub fn is_valid_time_pattern(pattern: &str) -> bool {
        Self::is_valid_pattern(pattern) && renders(NaiveTime::default().format(pattern))
    }

    /// 格式串可用于格式化本地日期时间（不含时区字段）
    pub fn is_valid_datetime_pattern(pattern: &str) -> bool {
        Self::is_valid_pattern(pattern) && renders(NaiveDateTime::default().format(pattern))
    }
}

/// chrono 在字段缺失时由 `Display` 返回 `fmt::Error`
fn renders(formatted: impl fmt::Display) -> bool {
    let mut out = String::new();
    write!(out, "{}", formatted).is_ok()
}

impl Default for JsonFormat {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_DATE,
            Self::DEFAULT_TIME,
            Self::DEFAULT_DATETIME,
        )
    }
}

/// 安装全局格式规则
///
/// 只有第一次调用生效，返回 `true`；之后的调用不做任何修改并返回 `false`。
pub fn install(format: JsonFormat) -> bool {
    INSTALLED.set(format).is_ok()
}

/// 当前生效的格式规则，未安装时使用默认规则
pub fn current() -> &'static JsonFormat {
    INSTALLED
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(JsonFormat::default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patterns_are_valid() {
        let format = JsonFormat::default();
        assert!(JsonFormat::is_valid_pattern(format.date()));
        assert!(JsonFormat::is_valid_pattern(format.time()));
        assert!(JsonFormat::is_valid_pattern(format.datetime()));
    }

    #[test]
    fn test_invalid_patterns_rejected() {
        assert!(!JsonFormat::is_valid_pattern(""));
        assert!(!JsonFormat::is_valid_pattern("%Y-%Q"));
    }

    #[test]
    fn test_patterns_must_fit_their_value() {
        assert!(JsonFormat::is_valid_date_pattern("%d/%m/%Y"));
        assert!(!JsonFormat::is_valid_date_pattern("%H:%M"));
        assert!(JsonFormat::is_valid_time_pattern("%H:%M"));
        assert!(!JsonFormat::is_valid_time_pattern("%Y-%m-%d"));
        assert!(JsonFormat::is_valid_datetime_pattern("%Y/%m/%d %H:%M"));
        assert!(!JsonFormat::is_valid_datetime_pattern("%Y-%m-%d %z"));
    }

    #[test]
    fn test_second_install_is_noop() {
        // 安装默认规则，避免影响其他测试
        install(JsonFormat::default());
        assert!(!install(JsonFormat::new("%d/%m/%Y", "%H", "%Y")));
        assert_eq!(current(), &JsonFormat::default());
    }
}
