//! 应用层错误定义
//!
//! 业务码与业务异常

use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// 业务响应码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessCode {
    /// 成功
    Success,
    /// 失败（信息需要展示给用户）
    Failed,
    /// 服务器未知错误
    ServerError,
    /// 请求参数错误
    BadRequest,
    /// 身份认证失败
    Unauthorized,
}

impl BusinessCode {
    pub const fn value(self) -> i32 {
        match self {
            BusinessCode::Success => 200,
            BusinessCode::Failed => -1,
            BusinessCode::ServerError => 500,
            BusinessCode::BadRequest => 400,
            BusinessCode::Unauthorized => 401,
        }
    }
}

impl From<BusinessCode> for i32 {
    fn from(code: BusinessCode) -> Self {
        code.value()
    }
}

impl Serialize for BusinessCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.value())
    }
}

/// 业务异常
///
/// 在业务规则不满足时由处理逻辑构造，由 HTTP 层转换为统一响应。
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct BusinessError {
    pub message: String,
    pub code: BusinessCode,
    pub data: Option<Value>,
    pub http_status: u16,
}

impl BusinessError {
    pub fn new(code: BusinessCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            data: None,
            http_status: 200,
        }
    }

    /// 创建 FAILED 业务异常
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(BusinessCode::Failed, message)
    }

    /// 创建 BAD_REQUEST 业务异常
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(BusinessCode::BadRequest, message)
    }

    /// 创建 UNAUTHORIZED 业务异常
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(BusinessCode::Unauthorized, message)
    }

    /// 附带额外数据
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// 指定 HTTP 状态码（默认 200）
    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = status;
        self
    }
}
