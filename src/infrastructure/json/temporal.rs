//! 时间类型
//!
//! 包装 chrono 的本地时间类型，序列化 / 反序列化时使用 [`super::current`] 中的格式。
//! 嵌套在任何结构体、`Vec`、`HashMap` 或 `json!` 中都遵循同一规则。

use std::fmt;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use super::format::{current, JsonFormat};

macro_rules! temporal_type {
    ($(#[$meta:meta])* $name:ident, $inner:ty, $pattern:ident, $expecting:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub $inner);

        impl $name {
            pub fn into_inner(self) -> $inner {
                self.0
            }

            fn pattern(format: &JsonFormat) -> &str {
                format.$pattern()
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $inner {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.format(Self::pattern(current())))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct TemporalVisitor;

                impl<'de> Visitor<'de> for TemporalVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        write!(f, "{} formatted as {:?}", $expecting, $name::pattern(current()))
                    }

                    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                        <$inner>::parse_from_str(value, $name::pattern(current()))
                            .map($name)
                            .map_err(E::custom)
                    }
                }

                deserializer.deserialize_str(TemporalVisitor)
            }
        }
    };
}

temporal_type!(
    /// 日期，默认格式 `YYYY-MM-DD`
    Date,
    NaiveDate,
    date,
    "a date"
);

temporal_type!(
    /// 时间，默认格式 `HH:MM:SS`
    Time,
    NaiveTime,
    time,
    "a time"
);

temporal_type!(
    /// 日期时间，默认格式 `YYYY-MM-DD HH:MM:SS`
    DateTime,
    NaiveDateTime,
    datetime,
    "a date-time"
);

impl Date {
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }
}

impl Time {
    pub fn now() -> Self {
        Self(Local::now().time())
    }
}

impl DateTime {
    pub fn now() -> Self {
        Self(Local::now().naive_local())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_datetime() -> DateTime {
        DateTime(
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(12, 30, 45)
                .unwrap(),
        )
    }

    #[test]
    fn test_serialize_date() {
        let date = Date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(serde_json::to_value(date).unwrap(), json!("2024-02-01"));
    }

    #[test]
    fn test_serialize_time() {
        let time = Time(NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(serde_json::to_value(time).unwrap(), json!("09:00:00"));
    }

    #[test]
    fn test_serialize_datetime() {
        assert_eq!(
            serde_json::to_value(sample_datetime()).unwrap(),
            json!("2024-01-01 12:30:45")
        );
    }

    #[test]
    fn test_time_drops_subseconds() {
        let time = Time(NaiveTime::from_hms_milli_opt(14, 30, 0, 250).unwrap());
        assert_eq!(time.to_string(), "14:30:00");
    }

    #[test]
    fn test_nested_values_use_same_format() {
        let payload = json!({
            "metadata": { "created": sample_datetime() },
            "items": [{ "timestamp": sample_datetime() }],
        });
        assert_eq!(payload["metadata"]["created"], "2024-01-01 12:30:45");
        assert_eq!(payload["items"][0]["timestamp"], "2024-01-01 12:30:45");
    }

    #[test]
    fn test_deserialize_datetime() {
        let value: DateTime = serde_json::from_value(json!("2024-01-01 12:30:45")).unwrap();
        assert_eq!(value, sample_datetime());
    }

    #[test]
    fn test_deserialize_rejects_iso_separator() {
        let result: Result<DateTime, _> = serde_json::from_value(json!("2024-01-01T12:30:45"));
        assert!(result.is_err());
    }
}
