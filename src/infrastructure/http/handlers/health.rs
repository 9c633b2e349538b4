//! Health Handlers
//!
//! 根路径与健康检查

use axum::extract::State;
use serde::Serialize;
use std::sync::Arc;

use crate::application::BusinessCode;
use crate::infrastructure::http::dto::{ApiResponse, Envelope};
use crate::infrastructure::http::state::AppState;
use crate::infrastructure::json::DateTime;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: String,
    pub timestamp: DateTime,
}

/// 根路径
pub async fn root(State(state): State<Arc<AppState>>) -> Envelope<RootResponse> {
    Envelope::new(RootResponse {
        message: format!("{} is running!", state.config.name),
        version: state.config.version.clone(),
    })
}

/// 健康检查
///
/// 直接返回完整的统一响应结构，包装时原样透传
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Envelope<ApiResponse<HealthResponse>> {
    Envelope::new(ApiResponse::with_message(
        BusinessCode::Success,
        "service is healthy",
        HealthResponse {
            status: "healthy",
            version: state.config.version.clone(),
            timestamp: DateTime::now(),
        },
    ))
}
