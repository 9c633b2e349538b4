//! HTTP Error Handling
//!
//! 三类异常到统一响应的映射：
//! - 业务异常：业务码 / 消息 / 额外数据，HTTP 状态由异常声明（默认 200）
//! - 参数校验异常：业务码 400，逐字段列出错误，HTTP 200
//! - 未处理异常：业务码 500，通用消息，HTTP 500

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::application::{BusinessCode, BusinessError};

use super::dto::ApiResponse;

pub const VALIDATION_FAILED_MSG: &str = "parameter validation failed";
pub const INTERNAL_ERROR_MSG: &str = "internal server error";

/// 单个字段的校验错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// 出错字段的点分路径，如 `body.email`
    pub field: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind: kind.into(),
        }
    }

    /// 必填字段缺失
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, "Field required", "missing")
    }
}

/// 未处理异常的原始信息
///
/// 挂在响应的 extensions 上，调试模式下由中间件替换通用消息。
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    Business(BusinessError),
    Validation(Vec<FieldViolation>),
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn validation(violations: impl IntoIterator<Item = FieldViolation>) -> Self {
        ApiError::Validation(violations.into_iter().collect())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Business(err) => {
                tracing::warn!(
                    code = err.code.value(),
                    http_status = err.http_status,
                    error = %err.message,
                    "Business error"
                );
                let status =
                    StatusCode::from_u16(err.http_status).unwrap_or(StatusCode::OK);
                let body = ApiResponse {
                    code: err.code.value(),
                    msg: err.message,
                    data: err.data,
                };
                (status, Json(body)).into_response()
            }
            ApiError::Validation(errors) => {
                tracing::warn!(
                    code = BusinessCode::BadRequest.value(),
                    errors = ?errors,
                    "Parameter validation failed"
                );
                let body = ApiResponse::with_message(
                    BusinessCode::BadRequest,
                    VALIDATION_FAILED_MSG,
                    json!({ "errors": errors }),
                );
                (StatusCode::OK, Json(body)).into_response()
            }
            ApiError::Internal(err) => {
                tracing::error!(
                    code = BusinessCode::ServerError.value(),
                    error = ?err,
                    "Internal server error"
                );
                internal_error_response(INTERNAL_ERROR_MSG, Some(format!("{:#}", err)))
            }
        }
    }
}

/// 构造未处理异常的统一响应
pub fn internal_error_response(msg: &str, detail: Option<String>) -> Response {
    let body = ApiResponse::error(BusinessCode::ServerError.value(), msg);
    let mut response = (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
    if let Some(detail) = detail {
        response.extensions_mut().insert(ErrorDetail(detail));
    }
    response
}

impl From<BusinessError> for ApiError {
    fn from(e: BusinessError) -> Self {
        ApiError::Business(e)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Internal(e.into())
    }
}
