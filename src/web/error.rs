//! 错误到 HTTP 响应的映射

use axum::{http::StatusCode, response::Json};
use serde_json::json;

use crate::translation::error::{helpers::log_error, ProviderErrorKind, TranslationError};

/// 处理器统一使用的错误响应
pub type ApiError = (StatusCode, Json<serde_json::Value>);

/// 翻译错误对应的 HTTP 状态码
pub fn status_for(error: &TranslationError) -> StatusCode {
    match error {
        TranslationError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        TranslationError::Provider(e) => match e.kind {
            ProviderErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
            ProviderErrorKind::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            ProviderErrorKind::AuthFailure
            | ProviderErrorKind::MalformedResponse
            | ProviderErrorKind::NetworkFailure => StatusCode::BAD_GATEWAY,
        },
        TranslationError::StructureMismatch { .. }
        | TranslationError::Pipeline(_)
        | TranslationError::SerializationError(_)
        | TranslationError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// 记录错误并生成结构化响应
pub fn error_response(error: &TranslationError) -> ApiError {
    log_error(error);
    api_error(status_for(error), error.code(), error.to_string())
}

/// 请求本身有误（字段缺失、格式错误等）
pub fn bad_request<M: Into<String>>(code: &str, message: M) -> ApiError {
    let message = message.into();
    tracing::info!("请求被拒绝 ({}): {}", code, message);
    api_error(StatusCode::BAD_REQUEST, code, message)
}

fn api_error(status: StatusCode, code: &str, message: String) -> ApiError {
    (
        status,
        Json(json!({
            "status": "error",
            "error": code,
            "message": message,
        })),
    )
}
