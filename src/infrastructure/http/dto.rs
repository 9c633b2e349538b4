//! Data Transfer Objects
//!
//! 统一响应结构 `{code, msg, data}` 及其包装逻辑

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use validator::Validate;

use crate::application::BusinessCode;

use super::error::ApiError;
use super::extract::{FieldSpec, FieldType, RequestSchema};

// ============================================================================
// 统一响应结构
// ============================================================================

const ENVELOPE_KEYS: [&str; 3] = ["code", "msg", "data"];

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: i32,
    pub msg: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self::with_message(BusinessCode::Success, "success", data)
    }

    /// 自定义业务码与消息
    pub fn with_message(code: BusinessCode, msg: impl Into<String>, data: T) -> Self {
        Self {
            code: code.value(),
            msg: msg.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// 错误响应（data 为 null）
    pub fn error(code: i32, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// 判断 payload 是否已经是统一响应格式
pub fn is_envelope(payload: &Value) -> bool {
    payload
        .as_object()
        .is_some_and(|map| ENVELOPE_KEYS.iter().all(|key| map.contains_key(*key)))
}

/// 将任意 payload 包装为统一响应格式
///
/// 已包含 `code`、`msg`、`data` 三个键的对象原样返回。
pub fn wrap(payload: Value, status: StatusCode) -> Value {
    if is_envelope(&payload) {
        return payload;
    }

    let (code, msg) = if status == StatusCode::OK {
        (BusinessCode::Success.value(), "success")
    } else {
        (i32::from(status.as_u16()), "error")
    };

    let mut envelope = Map::with_capacity(3);
    envelope.insert("code".to_string(), json!(code));
    envelope.insert("msg".to_string(), json!(msg));
    envelope.insert("data".to_string(), payload);
    Value::Object(envelope)
}

/// 统一响应 Responder
///
/// 所有 handler 的返回值都经过此类型序列化并按 [`wrap`] 包装。
#[derive(Debug)]
pub struct Envelope<T> {
    pub status: StatusCode,
    pub payload: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(payload: T) -> Self {
        Self::with_status(StatusCode::OK, payload)
    }

    pub fn with_status(status: StatusCode, payload: T) -> Self {
        Self { status, payload }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        match serde_json::to_value(&self.payload) {
            Ok(value) => (self.status, Json(wrap(value, self.status))).into_response(),
            Err(e) => ApiError::Internal(anyhow::Error::new(e).context("Failed to serialize response"))
                .into_response(),
        }
    }
}

// ============================================================================
// User DTOs
// ============================================================================

/// 创建用户请求
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "value is not a valid email address"))]
    pub email: String,
    #[validate(range(min = 0, max = 120, message = "age must be between 0 and 120"))]
    pub age: i64,
}

impl RequestSchema for CreateUserRequest {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", FieldType::String),
        FieldSpec::required("email", FieldType::String),
        FieldSpec::required("age", FieldType::Integer),
    ];
}

/// 分页查询参数
#[derive(Debug, Deserialize, Validate)]
pub struct ListUsersQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: u32,
    #[serde(default = "default_size")]
    #[validate(range(min = 1, max = 100, message = "size must be between 1 and 100"))]
    pub size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_size() -> u32 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_passes_envelope_through() {
        let payload = json!({"code": -1, "msg": "custom", "data": {"a": 1}});
        assert_eq!(wrap(payload.clone(), StatusCode::OK), payload);
        assert_eq!(wrap(payload.clone(), StatusCode::BAD_REQUEST), payload);
    }

    #[test]
    fn test_wrap_is_idempotent() {
        let once = wrap(json!([1, 2, 3]), StatusCode::OK);
        assert_eq!(wrap(once.clone(), StatusCode::OK), once);
    }

    #[test]
    fn test_wrap_success() {
        assert_eq!(
            wrap(json!({"message": "hi"}), StatusCode::OK),
            json!({"code": 200, "msg": "success", "data": {"message": "hi"}})
        );
        assert_eq!(
            wrap(Value::Null, StatusCode::OK),
            json!({"code": 200, "msg": "success", "data": null})
        );
    }

    #[test]
    fn test_wrap_non_ok_status() {
        assert_eq!(
            wrap(json!("boom"), StatusCode::NOT_FOUND),
            json!({"code": 404, "msg": "error", "data": "boom"})
        );
        assert_eq!(
            wrap(json!({"x": 1}), StatusCode::CREATED),
            json!({"code": 201, "msg": "error", "data": {"x": 1}})
        );
    }

    #[test]
    fn test_partial_envelope_is_wrapped() {
        let payload = json!({"code": 1, "msg": "only two keys"});
        assert_eq!(wrap(payload.clone(), StatusCode::OK)["data"], payload);
    }

    #[test]
    fn test_api_response_serializes_as_envelope() {
        let value = serde_json::to_value(ApiResponse::success(json!({"id": 1}))).unwrap();
        assert!(is_envelope(&value));
        assert_eq!(value["code"], 200);

        let value = serde_json::to_value(ApiResponse::error(500, "internal server error")).unwrap();
        assert_eq!(value, json!({"code": 500, "msg": "internal server error", "data": null}));
    }

    #[test]
    fn test_envelope_response_status() {
        let response = Envelope::with_status(StatusCode::ACCEPTED, json!({"queued": true})).into_response();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[test]
    fn test_create_user_request_constraints() {
        let request = CreateUserRequest {
            name: String::new(),
            email: "not-an-email".to_string(),
            age: 130,
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("age"));
    }
}
