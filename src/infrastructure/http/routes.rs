//! HTTP Routes
//!
//! API Endpoints:
//! - /api/v1/health/                            GET   根路径
//! - /api/v1/health/health                      GET   健康检查
//! - /api/test/test/test-datetime               GET   时间 / 小数格式化演示
//! - /api/test/test/users                       POST  创建用户（请求体校验）
//! - /api/test/test/users                       GET   分页查询用户（查询参数校验）
//! - /api/test/test/test-validation-error       GET   参数校验异常
//! - /api/test/test/test-general-error          GET   未处理异常
//! - /api/test/test/test-business-exception     GET   业务异常（FAILED）
//! - /api/test/test/test-bad-request-exception  GET   业务异常（BAD_REQUEST）

use axum::{routing::get, Router};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/v1", v1_routes())
        .nest("/test", test_routes())
}

/// V1 路由
fn v1_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health/", get(handlers::root))
        .route("/health/health", get(handlers::health_check))
}

/// 演示路由
fn test_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/test", demo_routes())
}

fn demo_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/test-datetime", get(handlers::test_datetime))
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route("/test-validation-error", get(handlers::test_validation_error))
        .route("/test-general-error", get(handlers::test_general_error))
        .route("/test-business-exception", get(handlers::test_business_exception))
        .route(
            "/test-bad-request-exception",
            get(handlers::test_bad_request_exception),
        )
}
