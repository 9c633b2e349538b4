//! HTTP Layer - RESTful API
//!
//! 统一响应、异常映射、参数校验与路由

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use dto::{wrap, ApiResponse, Envelope};
pub use error::{ApiError, FieldViolation};
pub use extract::{ValidatedJson, ValidatedQuery};
pub use routes::create_routes;
pub use server::{build_router, HttpServer, ServerConfig};
pub use state::AppState;
