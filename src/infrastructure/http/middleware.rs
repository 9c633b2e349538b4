//! HTTP Middleware
//!
//! - 状态码错误日志
//! - 非 JSON 响应（404 / 405 / 框架拒绝）包装为统一响应
//! - 调试模式下暴露未处理异常的原始信息
//! - panic 转换为未处理异常响应

use std::any::Any;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE},
        HeaderValue,
    },
    middleware::Next,
    response::Response,
};
use serde_json::Value;

use super::dto::wrap;
use super::error::{internal_error_response, ErrorDetail, INTERNAL_ERROR_MSG};
use super::state::AppState;

/// 重新包装时读取的响应体上限
const MAX_REWRAP_BODY: usize = 64 * 1024;

/// HTTP 状态码错误日志中间件
///
/// 拦截 HTTP 响应，当状态码为 4xx 或 5xx 时记录日志
/// 注意：业务错误（code != 200）在 ApiError::into_response() 中记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP client error"
        );
    }

    response
}

fn is_json_response(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

/// 统一响应兜底中间件
///
/// 路由未命中、方法不允许、提取器拒绝等框架生成的非 JSON 错误响应，
/// 按状态码包装为 `{code, msg, data}`，原始文本放入 `data`。
pub async fn envelope_fallback_middleware(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) || is_json_response(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let data = match to_bytes(body, MAX_REWRAP_BODY).await {
        Ok(bytes) if !bytes.is_empty() => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
        _ => Value::Null,
    };

    parts.headers.remove(CONTENT_LENGTH);
    parts
        .headers
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Response::from_parts(parts, Body::from(wrap(data, status).to_string()))
}

/// 调试信息中间件
///
/// 开启 debug 时，将未处理异常的通用消息替换为原始错误信息。
pub async fn debug_detail_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if !state.config.debug {
        return response;
    }

    let detail = response
        .extensions()
        .get::<ErrorDetail>()
        .map(|ErrorDetail(detail)| detail.clone());

    match detail {
        Some(detail) => internal_error_response(&detail, None),
        None => response,
    }
}

/// panic 处理：转换为未处理异常响应
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");
    internal_error_response(INTERNAL_ERROR_MSG, Some(detail))
}
