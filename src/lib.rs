//! Scaffold - 统一响应格式的 Web 服务脚手架
//!
//! 应用层 (application/):
//! - BusinessCode / BusinessError: 业务码与业务异常
//! - users: 演示用例
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 路由、统一响应 `{code, msg, data}`、异常映射、参数校验
//! - JSON: 日期 / 时间 / 小数的统一序列化格式

pub mod application;
pub mod config;
pub mod infrastructure;

pub use self::config::{load_config, AppConfig};
