//! 应用层 - 用例编排
//!
//! 包含：
//! - error: 业务码与业务异常
//! - users: 演示用的用户命令 / 查询

pub mod error;
pub mod users;

pub use error::{BusinessCode, BusinessError};
pub use users::{
    CreateUser, CreateUserHandler, ListUsers, ListUsersHandler, UserPage, UserRecord,
};
