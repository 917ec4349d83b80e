//! Google Cloud Translation v3 REST 客户端

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{build_http_client, error_for_status, transport_error, PaddedBatch, TranslationProvider};
use crate::translation::config::CloudApiConfig;
use crate::translation::error::{ProviderError, TranslationError, TranslationResult};

const PROVIDER_NAME: &str = "cloud-api";

pub struct CloudApiProvider {
    client: reqwest::Client,
    url: String,
    access_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateTextRequest<'a> {
    contents: Vec<&'a str>,
    mime_type: &'static str,
    target_language_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_language_code: Option<&'a str>,
}

#[derive(Deserialize)]
struct TranslateTextResponse {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

impl CloudApiProvider {
    pub fn new(config: &CloudApiConfig, timeout: Duration) -> TranslationResult<Self> {
        let project_id = config
            .project_id
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| TranslationError::ConfigError("cloud-api 需要 GCP_PROJECT_ID".to_string()))?;
        let access_token = config
            .access_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                TranslationError::ConfigError("cloud-api 需要 GCP_ACCESS_TOKEN".to_string())
            })?;

        let url = format!(
            "{}/v3/projects/{}/locations/{}:translateText",
            config.endpoint.trim_end_matches('/'),
            project_id.trim(),
            config.location.trim(),
        );

        Ok(Self {
            client: build_http_client(timeout)?,
            url,
            access_token,
        })
    }

    /// 请求地址
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request(
        &self,
        contents: Vec<&str>,
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Result<Vec<String>, ProviderError> {
        let body = TranslateTextRequest {
            contents,
            mime_type: "text/plain",
            target_language_code: target_lang,
            source_language_code: source_lang,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER_NAME, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(error_for_status(PROVIDER_NAME, status, &error_text));
        }

        let parsed: TranslateTextResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::malformed(PROVIDER_NAME, format!("无法解析响应: {}", e)))?;

        Ok(parsed
            .translations
            .into_iter()
            .map(|t| t.translated_text)
            .collect())
    }
}

#[async_trait]
impl TranslationProvider for CloudApiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> TranslationResult<Vec<String>> {
        let batch = PaddedBatch::new(texts);
        if batch.is_empty() {
            return Ok(texts.to_vec());
        }

        tracing::debug!(
            "cloud-api 翻译 {} 条文本: {} -> {}",
            batch.len(),
            source_lang.unwrap_or("auto"),
            target_lang
        );

        let translated = self
            .request(batch.trimmed(), target_lang, source_lang)
            .await
            .map_err(|e| {
                tracing::warn!("cloud-api 请求失败: {}", e);
                e
            })?;

        batch.restore(PROVIDER_NAME, translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CloudApiConfig {
        CloudApiConfig {
            project_id: Some("demo-project".to_string()),
            access_token: Some("ya29.token".to_string()),
            ..CloudApiConfig::default()
        }
    }

    #[test]
    fn test_request_url() {
        let provider = CloudApiProvider::new(&config(), Duration::from_secs(5)).unwrap();
        assert_eq!(
            provider.url(),
            "https://translation.googleapis.com/v3/projects/demo-project/locations/global:translateText"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = TranslateTextRequest {
            contents: vec!["Hello", "world"],
            mime_type: "text/plain",
            target_language_code: "fr",
            source_language_code: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": ["Hello", "world"],
                "mimeType": "text/plain",
                "targetLanguageCode": "fr"
            })
        );
    }

    #[test]
    fn test_missing_credentials() {
        let mut cfg = config();
        cfg.access_token = None;
        assert!(CloudApiProvider::new(&cfg, Duration::from_secs(5)).is_err());
    }

    #[tokio::test]
    async fn test_empty_batch_makes_no_request() {
        let mut cfg = config();
        // 不可路由的地址，如果真的发请求会失败
        cfg.endpoint = "http://127.0.0.1:9".to_string();
        let provider = CloudApiProvider::new(&cfg, Duration::from_secs(1)).unwrap();

        assert!(provider.translate_batch(&[], "fr", None).await.unwrap().is_empty());
        let blank = vec!["  ".to_string()];
        assert_eq!(provider.translate_batch(&blank, "fr", None).await.unwrap(), blank);
    }
}
