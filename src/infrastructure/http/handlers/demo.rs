//! Demo Handlers
//!
//! 演示统一响应、时间 / 小数格式化以及三类异常的映射

use anyhow::Context;
use axum::extract::State;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;

use crate::application::{BusinessError, CreateUser, ListUsers, UserPage, UserRecord};
use crate::infrastructure::http::dto::{CreateUserRequest, Envelope, ListUsersQuery};
use crate::infrastructure::http::error::{ApiError, FieldViolation};
use crate::infrastructure::http::extract::{ValidatedJson, ValidatedQuery};
use crate::infrastructure::http::state::AppState;
use crate::infrastructure::json::{Date, DateTime, Decimal, Time};

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: u64,
    pub order_date: DateTime,
    pub delivery_date: Date,
    pub created_time: Time,
    pub amount: Decimal,
}

fn decimal(literal: &str) -> anyhow::Result<Decimal> {
    Decimal::from_str(literal).with_context(|| format!("invalid decimal literal {:?}", literal))
}

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("invalid date {}-{}-{}", year, month, day))
}

fn time(hour: u32, min: u32, sec: u32) -> anyhow::Result<NaiveTime> {
    NaiveTime::from_hms_opt(hour, min, sec)
        .with_context(|| format!("invalid time {}:{}:{}", hour, min, sec))
}

// ============================================================================
// Handlers
// ============================================================================

/// 时间 / 小数格式化演示：不同嵌套层级的值都使用同一格式
pub async fn test_datetime() -> Result<Envelope<Value>, ApiError> {
    let order = OrderResponse {
        id: 1,
        order_date: DateTime(date(2024, 1, 1)?.and_time(time(12, 30, 45)?)),
        delivery_date: Date(date(2024, 2, 1)?),
        created_time: Time(time(9, 0, 0)?),
        amount: decimal("299.99")?,
    };

    Ok(Envelope::new(json!({
        "plain_values": {
            "current_datetime": DateTime::now(),
            "current_date": Date::today(),
            "current_time": Time::now(),
            "price": decimal("99.99")?,
        },
        "typed_model": order,
        "record": {
            "id": 2,
            "created_at": DateTime::now(),
            "updated_date": Date::today(),
            "process_time": Time(time(14, 30, 0)?),
            "price": decimal("199.99")?,
        },
        "nested_data": {
            "metadata": {
                "created": DateTime::now(),
                "cost": decimal("19.99")?,
            },
            "items": [
                {
                    "timestamp": DateTime(date(2024, 1, 1)?.and_time(time(10, 0, 0)?)),
                    "amount": decimal("100.50")?,
                }
            ]
        }
    })))
}

/// 创建用户：校验请求体并回显
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<Envelope<UserRecord>, ApiError> {
    let command = CreateUser {
        name: request.name,
        email: request.email,
        age: request.age,
    };

    let record = state.create_user_handler.handle(command)?;
    Ok(Envelope::new(record))
}

/// 分页查询用户：校验查询参数
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<ListUsersQuery>,
) -> Envelope<UserPage> {
    Envelope::new(state.list_users_handler.handle(ListUsers {
        page: query.page,
        size: query.size,
    }))
}

/// 手动触发参数校验异常
pub async fn test_validation_error() -> Result<Envelope<()>, ApiError> {
    Err(ApiError::validation([FieldViolation::missing("test_field")]))
}

/// 触发未处理异常
pub async fn test_general_error() -> Result<Envelope<()>, ApiError> {
    Err(anyhow::anyhow!("this is a test error").into())
}

/// 触发业务异常（FAILED）
pub async fn test_business_exception() -> Result<Envelope<()>, ApiError> {
    Err(BusinessError::failed("username exists")
        .with_data(json!({"suggested_names": ["user1", "user2"]}))
        .into())
}

/// 触发业务异常（BAD_REQUEST）
pub async fn test_bad_request_exception() -> Result<Envelope<()>, ApiError> {
    Err(BusinessError::bad_request("invalid age parameter")
        .with_data(json!({"field": "age", "value": -1, "min": 0, "max": 120}))
        .into())
}
