//! User Commands / Queries
//!
//! 演示用的用户用例：无持久化，只回显输入，用于验证参数校验与统一响应。

use serde::Serialize;
use serde_json::json;

use crate::application::error::BusinessError;

/// 保留用户名
const RESERVED_NAMES: &[&str] = &["admin", "root"];

// ============================================================================
// CreateUser
// ============================================================================

/// 创建用户命令
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// 用户记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// CreateUser Handler
#[derive(Debug, Clone, Default)]
pub struct CreateUserHandler;

impl CreateUserHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, command: CreateUser) -> Result<UserRecord, BusinessError> {
        if RESERVED_NAMES
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(&command.name))
        {
            return Err(BusinessError::failed("username exists").with_data(json!({
                "suggested_names": [
                    format!("{}1", command.name),
                    format!("{}2", command.name),
                ]
            })));
        }

        tracing::info!(name = %command.name, email = %command.email, "User created");

        Ok(UserRecord {
            id: 1,
            name: command.name,
            email: command.email,
            age: command.age,
        })
    }
}

// ============================================================================
// ListUsers
// ============================================================================

/// 分页查询用户
#[derive(Debug, Clone, Copy)]
pub struct ListUsers {
    pub page: u32,
    pub size: u32,
}

/// 分页结果
#[derive(Debug, Clone, Serialize)]
pub struct UserPage {
    pub page: u32,
    pub size: u32,
    pub total: u64,
    pub items: Vec<UserRecord>,
}

/// ListUsers Handler
#[derive(Debug, Clone, Default)]
pub struct ListUsersHandler;

impl ListUsersHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, query: ListUsers) -> UserPage {
        UserPage {
            page: query.page,
            size: query.size,
            total: 0,
            items: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::BusinessCode;

    fn command(name: &str) -> CreateUser {
        CreateUser {
            name: name.to_string(),
            email: "alice@example.com".to_string(),
            age: 30,
        }
    }

    #[test]
    fn test_create_user_echoes_input() {
        let record = CreateUserHandler::new().handle(command("alice")).unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.name, "alice");
        assert_eq!(record.email, "alice@example.com");
        assert_eq!(record.age, 30);
    }

    #[test]
    fn test_reserved_name_is_rejected() {
        let err = CreateUserHandler::new().handle(command("Admin")).unwrap_err();
        assert_eq!(err.code, BusinessCode::Failed);
        assert_eq!(err.message, "username exists");
        assert_eq!(
            err.data.unwrap()["suggested_names"],
            json!(["Admin1", "Admin2"])
        );
    }

    #[test]
    fn test_list_users_is_empty_page() {
        let page = ListUsersHandler::new().handle(ListUsers { page: 2, size: 10 });
        assert_eq!(page.page, 2);
        assert_eq!(page.size, 10);
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
    }
}
