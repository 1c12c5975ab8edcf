//! 学籍成绩服务错误类型定义
//!
//! 错误分三类：参数校验（400）、资源不存在（404）、存储访问失败（500）。
//! 跨库姓名解析中的"学生不存在"不属于错误，见 `StudentRef::Orphaned`。

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// 学籍成绩服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum RecordsError {
    // 验证错误
    #[error("参数验证失败: {0}")]
    Validation(String),
    #[error("学生不存在: {0}")]
    UnknownStudent(String),

    // 资源不存在
    #[error("学生不存在: {0}")]
    StudentNotFound(String),
    #[error("成绩记录不存在: {0}")]
    GradeRecordNotFound(i32),

    // 系统错误
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("内部错误: {0}")]
    Internal(String),
}

impl RecordsError {
    /// 必填参数缺失
    pub fn missing_param(name: &str) -> Self {
        Self::Validation(format!("{} parameter is required", name))
    }

    /// 参数不是合法整数
    pub fn invalid_integer(name: &str, raw: &str) -> Self {
        Self::Validation(format!("Invalid {}: {:?}", name, raw))
    }

    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::UnknownStudent(_) => StatusCode::BAD_REQUEST,
            Self::StudentNotFound(_) | Self::GradeRecordNotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UnknownStudent(_) => "UNKNOWN_STUDENT",
            Self::StudentNotFound(_) => "STUDENT_NOT_FOUND",
            Self::GradeRecordNotFound(_) => "GRADE_RECORD_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 是否为调用方输入导致的错误（不应重试）
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl IntoResponse for RecordsError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志，防止信息泄露
        let message = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for RecordsError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 请求体无法解析为 JSON 或字段类型不符
impl From<JsonRejection> for RecordsError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// 查询字符串无法解析
impl From<QueryRejection> for RecordsError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, RecordsError>;
