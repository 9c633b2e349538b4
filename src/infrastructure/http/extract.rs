//! Request Extractors
//!
//! 带校验的请求体 / 查询参数提取器。所有失败都转换为 [`ApiError::Validation`]，
//! 一次性列出全部字段错误。

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header::CONTENT_TYPE, request::Parts, HeaderMap},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use super::error::{ApiError, FieldViolation};

const BODY: &str = "body";
const QUERY: &str = "query";

/// JSON 字段类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
}

impl FieldType {
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Integer => value.is_i64() || value.is_u64(),
        }
    }

    fn violation(self) -> (&'static str, &'static str) {
        match self {
            FieldType::String => ("string_type", "Input should be a valid string"),
            FieldType::Integer => ("int_type", "Input should be a valid integer"),
        }
    }
}

/// 请求体必填字段声明
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
}

impl FieldSpec {
    pub const fn required(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty }
    }
}

/// 请求体结构声明，用于在反序列化前收集所有缺失 / 类型错误
pub trait RequestSchema {
    const FIELDS: &'static [FieldSpec];
}

/// 按声明检查 JSON 对象，返回全部违规项
pub fn check_schema(fields: &[FieldSpec], value: &Value, prefix: &str) -> Vec<FieldViolation> {
    let Some(object) = value.as_object() else {
        return vec![FieldViolation::new(
            prefix,
            "Input should be a valid dictionary",
            "dict_type",
        )];
    };

    fields
        .iter()
        .filter_map(|spec| {
            let path = format!("{}.{}", prefix, spec.name);
            match object.get(spec.name) {
                None => Some(FieldViolation::missing(path)),
                Some(field) if spec.ty.matches(field) => None,
                Some(_) => {
                    let (kind, message) = spec.ty.violation();
                    Some(FieldViolation::new(path, message, kind))
                }
            }
        })
        .collect()
}

/// 将 validator 的错误展开为字段违规项（按字段名排序）
pub fn violations_from(errors: &ValidationErrors, prefix: &str) -> Vec<FieldViolation> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            let path = format!("{}.{}", prefix, field);
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                FieldViolation::new(path.clone(), message, error.code.to_string())
            })
        })
        .collect()
}

/// 按 serde 路径拼接字段名，根路径即为 `prefix` 本身
fn field_path(prefix: &str, path: &serde_path_to_error::Path) -> String {
    let path = path.to_string();
    if path == "." {
        prefix.to_string()
    } else {
        format!("{}.{}", prefix, path)
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}

/// 校验后的 JSON 请求体
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + RequestSchema + 'static,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(req.headers()) {
            return Err(ApiError::validation([FieldViolation::new(
                BODY,
                "Expected request with `Content-Type: application/json`",
                "content_type",
            )]));
        }

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            ApiError::validation([FieldViolation::new(BODY, rejection.body_text(), "body_read")])
        })?;

        let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
            ApiError::validation([FieldViolation::new(
                BODY,
                format!("JSON decode error: {}", e),
                "json_invalid",
            )])
        })?;

        let violations = check_schema(T::FIELDS, &value, BODY);
        if !violations.is_empty() {
            return Err(ApiError::Validation(violations));
        }

        let payload: T = serde_path_to_error::deserialize(value).map_err(|e| {
            ApiError::validation([FieldViolation::new(
                field_path(BODY, e.path()),
                e.inner().to_string(),
                "value_error",
            )])
        })?;

        payload
            .validate()
            .map_err(|e| ApiError::Validation(violations_from(&e, BODY)))?;

        Ok(ValidatedJson(payload))
    }
}

/// 校验后的查询参数
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();
        let deserializer = serde_urlencoded::Deserializer::new(form_urlencoded::parse(query.as_bytes()));
        let payload: T = serde_path_to_error::deserialize(deserializer).map_err(|e| {
            ApiError::validation([FieldViolation::new(
                field_path(QUERY, e.path()),
                e.inner().to_string(),
                "query_invalid",
            )])
        })?;

        payload
            .validate()
            .map_err(|e| ApiError::Validation(violations_from(&e, QUERY)))?;

        Ok(ValidatedQuery(payload))
    }
}
