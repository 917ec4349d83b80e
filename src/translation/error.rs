//! 翻译模块统一错误处理
//!
//! 提供结构化错误类型和错误处理机制

use std::fmt;

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslationError {
    /// 配置错误（启动阶段致命）
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 译文数量与模板占位符数量不一致
    #[error("结构不匹配: 模板包含 {expected} 个占位符, 实际提供 {actual} 条译文")]
    StructureMismatch { expected: usize, actual: usize },

    /// 翻译服务错误
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// 管道不变量被破坏
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// 输入验证错误
    #[error("输入无效: {0}")]
    InvalidInput(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    SerializationError(String),
}

/// 翻译服务返回的错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{provider} 翻译服务错误 ({kind}): {message}")]
pub struct ProviderError {
    pub provider: String,
    pub kind: ProviderErrorKind,
    pub message: String,
}

/// 翻译服务错误子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorKind {
    AuthFailure,
    QuotaExceeded,
    MalformedResponse,
    NetworkFailure,
    /// 服务端拒绝了请求本身，例如语言代码无效
    InvalidRequest,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderErrorKind::AuthFailure => "auth_failure",
            ProviderErrorKind::QuotaExceeded => "quota_exceeded",
            ProviderErrorKind::MalformedResponse => "malformed_response",
            ProviderErrorKind::NetworkFailure => "network_failure",
            ProviderErrorKind::InvalidRequest => "invalid_request",
        };
        f.write_str(name)
    }
}

impl ProviderError {
    pub fn new<P: Into<String>, M: Into<String>>(
        provider: P,
        kind: ProviderErrorKind,
        message: M,
    ) -> Self {
        Self {
            provider: provider.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn auth<P: Into<String>, M: Into<String>>(provider: P, message: M) -> Self {
        Self::new(provider, ProviderErrorKind::AuthFailure, message)
    }

    pub fn quota<P: Into<String>, M: Into<String>>(provider: P, message: M) -> Self {
        Self::new(provider, ProviderErrorKind::QuotaExceeded, message)
    }

    pub fn malformed<P: Into<String>, M: Into<String>>(provider: P, message: M) -> Self {
        Self::new(provider, ProviderErrorKind::MalformedResponse, message)
    }

    pub fn network<P: Into<String>, M: Into<String>>(provider: P, message: M) -> Self {
        Self::new(provider, ProviderErrorKind::NetworkFailure, message)
    }

    pub fn invalid_request<P: Into<String>, M: Into<String>>(provider: P, message: M) -> Self {
        Self::new(provider, ProviderErrorKind::InvalidRequest, message)
    }
}

/// 编排器级别的不变量错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("管道错误: 请求翻译 {expected} 条文本, 服务返回 {actual} 条")]
    LengthMismatch { expected: usize, actual: usize },
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl TranslationError {
    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TranslationError::ConfigError(_) => ErrorSeverity::Critical,
            TranslationError::StructureMismatch { .. } => ErrorSeverity::Critical,
            TranslationError::Pipeline(_) => ErrorSeverity::Critical,
            TranslationError::InvalidInput(_) => ErrorSeverity::Info,
            TranslationError::SerializationError(_) => ErrorSeverity::Error,
            TranslationError::Provider(e) => match e.kind {
                ProviderErrorKind::QuotaExceeded => ErrorSeverity::Warning,
                ProviderErrorKind::NetworkFailure => ErrorSeverity::Warning,
                ProviderErrorKind::InvalidRequest => ErrorSeverity::Info,
                ProviderErrorKind::AuthFailure => ErrorSeverity::Error,
                ProviderErrorKind::MalformedResponse => ErrorSeverity::Error,
            },
        }
    }

    /// 稳定的机器可读错误码，用于 HTTP 错误响应
    pub fn code(&self) -> &'static str {
        match self {
            TranslationError::ConfigError(_) => "configuration_error",
            TranslationError::StructureMismatch { .. } => "structure_mismatch",
            TranslationError::Pipeline(PipelineError::LengthMismatch { .. }) => "length_mismatch",
            TranslationError::InvalidInput(_) => "invalid_input",
            TranslationError::SerializationError(_) => "serialization_error",
            TranslationError::Provider(e) => match e.kind {
                ProviderErrorKind::AuthFailure => "provider_auth_failure",
                ProviderErrorKind::QuotaExceeded => "provider_quota_exceeded",
                ProviderErrorKind::MalformedResponse => "provider_malformed_response",
                ProviderErrorKind::NetworkFailure => "provider_network_failure",
                ProviderErrorKind::InvalidRequest => "provider_invalid_request",
            },
        }
    }

    /// 返回服务错误子类型（如果是服务错误）
    pub fn provider_kind(&self) -> Option<ProviderErrorKind> {
        match self {
            TranslationError::Provider(e) => Some(e.kind),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TranslationError {
    fn from(error: std::io::Error) -> Self {
        TranslationError::SerializationError(format!("IO错误: {}", error))
    }
}

impl From<std::string::FromUtf8Error> for TranslationError {
    fn from(error: std::string::FromUtf8Error) -> Self {
        TranslationError::SerializationError(format!("UTF-8 编码错误: {}", error))
    }
}

impl From<config::ConfigError> for TranslationError {
    fn from(error: config::ConfigError) -> Self {
        TranslationError::ConfigError(error.to_string())
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 按严重程度记录错误
    pub fn log_error(error: &TranslationError) {
        match error.severity() {
            ErrorSeverity::Info => tracing::info!("翻译请求被拒绝: {}", error),
            ErrorSeverity::Warning => tracing::warn!("翻译警告: {}", error),
            ErrorSeverity::Error => tracing::error!("翻译错误: {}", error),
            ErrorSeverity::Critical => tracing::error!("翻译严重错误: {}", error),
        }
    }
}
