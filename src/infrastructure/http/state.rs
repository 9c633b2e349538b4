//! Application State
//!
//! 启动时构建一次，之后只读，通过 axum `State` 注入到各个 handler

use crate::application::{CreateUserHandler, ListUsersHandler};
use crate::config::AppConfig;

/// 应用状态
pub struct AppState {
    pub config: AppConfig,

    // ========== Handlers ==========
    pub create_user_handler: CreateUserHandler,
    pub list_users_handler: ListUsersHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            create_user_handler: CreateUserHandler::new(),
            list_users_handler: ListUsersHandler::new(),
        }
    }
}
