//! 翻译服务提供方
//!
//! 所有后端实现同一个 [`TranslationProvider`] 特性，由 [`create_provider`]
//! 根据配置在启动时选择：
//! - `cloud-api`: Google Cloud Translation v3
//! - `llm-api`: OpenAI 兼容的 chat completions 接口
//! - `dummy`: 不联网的测试替身

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::translation::config::{ProviderConfig, ProviderKind};
use crate::translation::error::{ProviderError, TranslationError, TranslationResult};

pub mod cloud;
pub mod dummy;
pub mod llm;

pub use cloud::CloudApiProvider;
pub use dummy::DummyProvider;
pub use llm::LlmApiProvider;

/// 翻译后端的统一接口
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// 服务名称，用于日志和错误信息
    fn name(&self) -> &str;

    /// 批量翻译文本
    ///
    /// 返回结果与输入等长且顺序一致。实现不持有可变共享状态，
    /// 同一个实例可以被多个请求并发调用。
    async fn translate_batch(
        &self,
        texts: &[String],
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> TranslationResult<Vec<String>>;
}

/// 工厂接受的服务名称
pub fn available_providers() -> Vec<&'static str> {
    ProviderKind::ALL.iter().map(|kind| kind.as_str()).collect()
}

/// 根据配置创建翻译服务
///
/// 配置不完整时返回 `ConfigError`，进程应在启动阶段退出。
pub fn create_provider(config: &ProviderConfig) -> TranslationResult<Arc<dyn TranslationProvider>> {
    config.validate()?;

    let provider: Arc<dyn TranslationProvider> = match config.provider {
        ProviderKind::CloudApi => Arc::new(CloudApiProvider::new(
            &config.cloud,
            config.request_timeout(),
        )?),
        ProviderKind::LlmApi => Arc::new(LlmApiProvider::new(
            &config.llm,
            config.request_timeout(),
        )?),
        ProviderKind::Dummy => Arc::new(DummyProvider::new(config.dummy.prefix.clone())),
    };

    tracing::info!("翻译服务已创建: {}", provider.name());
    Ok(provider)
}

/// 去掉首尾空白后再发送的一批文本
///
/// 译文返回后重新接上原文的首尾空白，纯空白文本不发送。
pub(crate) struct PaddedBatch<'a> {
    texts: &'a [String],
    /// 需要发送的文本在原批次中的下标
    sent: Vec<usize>,
}

impl<'a> PaddedBatch<'a> {
    pub(crate) fn new(texts: &'a [String]) -> Self {
        let sent = texts
            .iter()
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(i, _)| i)
            .collect();
        Self { texts, sent }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.sent.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.sent.len()
    }

    /// 实际发送给后端的文本
    pub(crate) fn trimmed(&self) -> Vec<&'a str> {
        self.sent.iter().map(|&i| self.texts[i].trim()).collect()
    }

    /// 把译文放回原位置并恢复首尾空白
    pub(crate) fn restore(&self, provider: &str, translated: Vec<String>) -> TranslationResult<Vec<String>> {
        if translated.len() != self.sent.len() {
            return Err(ProviderError::malformed(
                provider,
                format!("请求 {} 条译文, 收到 {} 条", self.sent.len(), translated.len()),
            )
            .into());
        }

        let mut result = self.texts.to_vec();
        for (&i, text) in self.sent.iter().zip(translated) {
            result[i] = with_padding(&self.texts[i], text.trim());
        }
        Ok(result)
    }
}

fn with_padding(original: &str, translated: &str) -> String {
    let leading = &original[..original.len() - original.trim_start().len()];
    let trailing = &original[original.trim_end().len()..];
    format!("{}{}{}", leading, translated, trailing)
}

/// 构建带超时的 HTTP 客户端
pub(crate) fn build_http_client(timeout: Duration) -> TranslationResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| TranslationError::ConfigError(format!("创建 HTTP 客户端失败: {}", e)))
}

/// 把非成功的 HTTP 响应映射为服务错误
pub(crate) fn error_for_status(provider: &str, status: StatusCode, body: &str) -> ProviderError {
    let detail = format!("HTTP {}: {}", status, truncate(body, 500));

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        ProviderError::auth(provider, detail)
    } else if status == StatusCode::TOO_MANY_REQUESTS
        || body.contains("RESOURCE_EXHAUSTED")
        || body.contains("insufficient_quota")
    {
        ProviderError::quota(provider, detail)
    } else if status == StatusCode::BAD_REQUEST {
        ProviderError::invalid_request(provider, detail)
    } else {
        ProviderError::network(provider, detail)
    }
}

/// 把传输层错误映射为服务错误
pub(crate) fn transport_error(provider: &str, error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::network(provider, format!("请求超时: {}", error))
    } else {
        ProviderError::network(provider, error.to_string())
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
