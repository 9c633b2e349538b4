//! JSON Serialization
//!
//! 统一的 JSON 输出格式：
//! - `Date` / `Time` / `DateTime` 按安装的格式规则输出字符串
//! - `Decimal` 输出精确的十进制字符串（不经过二进制浮点）

mod format;
mod temporal;

pub use format::{current, install, JsonFormat};
pub use rust_decimal::Decimal;
pub use temporal::{Date, DateTime, Time};

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;
    use std::str::FromStr;

    #[derive(Serialize)]
    struct Order {
        id: u32,
        amount: Decimal,
        lines: Vec<Decimal>,
    }

    #[test]
    fn test_decimal_serializes_exact_string() {
        let price = Decimal::from_str("99.99").unwrap();
        assert_eq!(serde_json::to_value(price).unwrap(), json!("99.99"));
    }

    #[test]
    fn test_decimal_keeps_trailing_scale() {
        let amount = Decimal::from_str("100.50").unwrap();
        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"100.50\"");
    }

    #[test]
    fn test_decimal_inside_struct_and_sequence() {
        let order = Order {
            id: 1,
            amount: Decimal::from_str("299.99").unwrap(),
            lines: vec![Decimal::from_str("0.1").unwrap(), Decimal::from_str("0.2").unwrap()],
        };
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["amount"], "299.99");
        assert_eq!(value["lines"], json!(["0.1", "0.2"]));
    }
}
