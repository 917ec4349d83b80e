//! 翻译编排器
//!
//! 单次请求的完整流程：分段 → 调用翻译服务 → 校验数量 → 回填。
//! 不重试，服务错误原样返回给调用方。

use std::sync::Arc;
use std::time::Instant;

use crate::translation::error::{PipelineError, TranslationError, TranslationResult};
use crate::translation::pipeline::HtmlSegmenter;
use crate::translation::providers::TranslationProvider;

/// 单次翻译的可选参数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    /// 每次调用翻译服务的最大文本条数，未设置时整批一次发送
    pub batch_size: Option<usize>,
}

#[derive(Clone)]
pub struct TranslationOrchestrator {
    provider: Arc<dyn TranslationProvider>,
    segmenter: HtmlSegmenter,
}

impl TranslationOrchestrator {
    pub fn new(provider: Arc<dyn TranslationProvider>) -> Self {
        Self::with_segmenter(provider, HtmlSegmenter::default())
    }

    /// 使用自定义分段策略
    pub fn with_segmenter(provider: Arc<dyn TranslationProvider>, segmenter: HtmlSegmenter) -> Self {
        Self {
            provider,
            segmenter,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// 翻译 HTML，保持标签和属性不变
    pub async fn translate_html(
        &self,
        html: &str,
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> TranslationResult<String> {
        self.translate_html_with_options(html, target_lang, source_lang, TranslateOptions::default())
            .await
    }

    pub async fn translate_html_with_options(
        &self,
        html: &str,
        target_lang: &str,
        source_lang: Option<&str>,
        options: TranslateOptions,
    ) -> TranslationResult<String> {
        validate_language_tag("target_lang", target_lang)?;
        if let Some(source) = source_lang {
            validate_language_tag("source_lang", source)?;
        }
        if options.batch_size == Some(0) {
            return Err(TranslationError::InvalidInput("batch_size 必须大于0".to_string()));
        }

        let start = Instant::now();
        let (segments, template) = self.segmenter.extract(html)?;
        if segments.is_empty() {
            tracing::debug!("没有可翻译的文本，原样返回");
            return Ok(html.to_string());
        }

        let texts: Vec<String> = segments.into_iter().map(|s| s.original_text).collect();
        let translated = self
            .translate_texts(&texts, target_lang, source_lang, options.batch_size)
            .await?;

        let result = self.segmenter.reinsert(&template, &translated)?;

        tracing::info!(
            "翻译完成: {} 个文本段, 服务 {}, 目标语言 {}, 耗时 {:?}",
            texts.len(),
            self.provider.name(),
            target_lang,
            start.elapsed()
        );

        Ok(result)
    }

    async fn translate_texts(
        &self,
        texts: &[String],
        target_lang: &str,
        source_lang: Option<&str>,
        batch_size: Option<usize>,
    ) -> TranslationResult<Vec<String>> {
        let chunk_size = batch_size.unwrap_or(texts.len()).max(1);
        let mut translated = Vec::with_capacity(texts.len());

        for (i, chunk) in texts.chunks(chunk_size).enumerate() {
            tracing::debug!("发送第 {} 批, {} 条文本", i + 1, chunk.len());
            let result = self
                .provider
                .translate_batch(chunk, target_lang, source_lang)
                .await?;

            if result.len() != chunk.len() {
                tracing::error!(
                    "翻译服务 {} 返回数量不一致: 请求 {}, 返回 {}",
                    self.provider.name(),
                    chunk.len(),
                    result.len()
                );
                return Err(PipelineError::LengthMismatch {
                    expected: chunk.len(),
                    actual: result.len(),
                }
                .into());
            }

            translated.extend(result);
        }

        Ok(translated)
    }
}

/// 检查语言代码形如 `fr`、`zh-CN`、`sr-Latn-RS`
fn validate_language_tag(field: &str, tag: &str) -> TranslationResult<()> {
    let mut parts = tag.split('-');
    let primary_ok = parts
        .next()
        .map(|p| (2..=3).contains(&p.len()) && p.chars().all(|c| c.is_ascii_alphabetic()))
        .unwrap_or(false);
    let subtags_ok =
        parts.all(|p| (2..=8).contains(&p.len()) && p.chars().all(|c| c.is_ascii_alphanumeric()));

    if primary_ok && subtags_ok {
        Ok(())
    } else {
        Err(TranslationError::InvalidInput(format!(
            "{} 不是有效的语言代码: '{}'",
            field, tag
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::providers::DummyProvider;

    #[test]
    fn test_language_tags() {
        for tag in ["fr", "zh-CN", "sr-Latn-RS", "haw", "es-419"] {
            assert!(validate_language_tag("target_lang", tag).is_ok(), "{}", tag);
        }
        for tag in ["", "f", "french", "fr_FR", "fr-", "zh-CN-toolongsubtag", "12"] {
            assert!(validate_language_tag("target_lang", tag).is_err(), "{}", tag);
        }
    }

    #[tokio::test]
    async fn test_dummy_round_trip() {
        let orchestrator = TranslationOrchestrator::new(Arc::new(DummyProvider::default()));
        let html = "<p>Hello <b>world</b></p>";
        assert_eq!(orchestrator.translate_html(html, "fr", None).await.unwrap(), html);
        assert_eq!(orchestrator.provider_name(), "dummy");
    }

    #[tokio::test]
    async fn test_batch_size_zero_is_invalid() {
        let orchestrator = TranslationOrchestrator::new(Arc::new(DummyProvider::default()));
        let err = orchestrator
            .translate_html_with_options(
                "<p>x</p>",
                "fr",
                None,
                TranslateOptions {
                    batch_size: Some(0),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TranslationError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_invalid_language_checked_first() {
        let orchestrator = TranslationOrchestrator::new(Arc::new(DummyProvider::new("X")));
        let err = orchestrator
            .translate_html("<p>x</p>", "not a language", None)
            .await
            .unwrap_err();
        assert!(matches!(err, TranslationError::InvalidInput(_)));

        let err = orchestrator
            .translate_html("<p>x</p>", "fr", Some("??"))
            .await
            .unwrap_err();
        assert!(matches!(err, TranslationError::InvalidInput(_)));
    }
}
