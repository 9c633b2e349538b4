//! Infrastructure Layer - 基础设施层
//!
//! - http: axum 路由、统一响应与异常映射
//! - json: JSON 序列化格式规则

pub mod http;
pub mod json;
