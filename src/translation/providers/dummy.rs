use async_trait::async_trait;

use super::TranslationProvider;
use crate::translation::error::TranslationResult;

/// 不联网的翻译替身，返回 `prefix + 原文`
///
/// 默认前缀为空，此时等价于恒等翻译。
#[derive(Debug, Clone, Default)]
pub struct DummyProvider {
    prefix: String,
}

impl DummyProvider {
    pub fn new<S: Into<String>>(prefix: S) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl TranslationProvider for DummyProvider {
    fn name(&self) -> &str {
        "dummy"
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        target_lang: &str,
        _source_lang: Option<&str>,
    ) -> TranslationResult<Vec<String>> {
        tracing::debug!("dummy 翻译 {} 条文本 -> {}", texts.len(), target_lang);
        Ok(texts
            .iter()
            .map(|text| format!("{}{}", self.prefix, text))
            .collect())
    }
}
