//! OpenAI 兼容的大模型翻译客户端
//!
//! 每批文本只发一次请求：输入按 `1. 文本` 编号，要求模型按同样的编号逐行返回，
//! 返回的行数和编号必须与输入一致。

use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{build_http_client, error_for_status, transport_error, PaddedBatch, TranslationProvider};
use crate::translation::config::LlmApiConfig;
use crate::translation::error::{ProviderError, TranslationError, TranslationResult};

const PROVIDER_NAME: &str = "llm-api";

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a professional translator. \
Translate every numbered line from {source_lang} to {target_lang}. \
Reply with exactly {count} lines in the same order, each formatted as `N. translation` \
with the original number N. Do not merge, split, skip or comment on lines.";

pub const DEFAULT_PROMPT_TEMPLATE: &str =
    "Translate the following {count} lines from {source_lang} to {target_lang}:\n\n{lines}";

const NUMBERED_LINE: &str = r"^\s*(\d+)[.):]\s?(.*)$";

pub struct LlmApiProvider {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    temperature: f32,
    prompt_template: String,
    numbered_line: Regex,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl LlmApiProvider {
    pub fn new(config: &LlmApiConfig, timeout: Duration) -> TranslationResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| TranslationError::ConfigError("llm-api 需要 OPENAI_API_KEY".to_string()))?;

        let numbered_line = Regex::new(NUMBERED_LINE)
            .map_err(|e| TranslationError::ConfigError(format!("编号行模式无效: {}", e)))?;

        Ok(Self {
            client: build_http_client(timeout)?,
            url: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            prompt_template: config
                .prompt_template
                .clone()
                .unwrap_or_else(|| DEFAULT_PROMPT_TEMPLATE.to_string()),
            numbered_line,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// 生成系统提示词和用户提示词
    pub fn build_prompt(
        &self,
        texts: &[&str],
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> (String, String) {
        let lines = texts
            .iter()
            .enumerate()
            .map(|(i, text)| format!("{}. {}", i + 1, collapse_newlines(text)))
            .collect::<Vec<_>>()
            .join("\n");

        let count = texts.len().to_string();
        let source = source_lang.unwrap_or("the detected source language");
        let render = |template: &str| {
            template
                .replace("{source_lang}", source)
                .replace("{target_lang}", target_lang)
                .replace("{count}", &count)
                .replace("{lines}", &lines)
        };

        (render(DEFAULT_SYSTEM_PROMPT), render(&self.prompt_template))
    }

    /// 解析模型返回的编号行
    ///
    /// 编号前的说明文字会被忽略；编号必须从 1 开始连续递增，总数等于 `expected`。
    pub fn parse_numbered_response(&self, content: &str, expected: usize) -> Result<Vec<String>, String> {
        let mut lines = Vec::with_capacity(expected);

        for line in content.lines() {
            let Some(caps) = self.numbered_line.captures(line) else {
                continue;
            };
            let number: usize = caps[1]
                .parse()
                .map_err(|_| format!("无法识别的编号: {}", &caps[1]))?;

            if number != lines.len() + 1 {
                return Err(format!("第 {} 行的编号为 {}", lines.len() + 1, number));
            }
            lines.push(caps[2].trim().to_string());
        }

        if lines.len() != expected {
            return Err(format!("期望 {} 行译文, 收到 {} 行", expected, lines.len()));
        }

        Ok(lines)
    }

    async fn complete(&self, system: String, user: String) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system,
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user,
                },
            ],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER_NAME, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(error_for_status(PROVIDER_NAME, status, &error_text));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::malformed(PROVIDER_NAME, format!("无法解析响应: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::malformed(PROVIDER_NAME, "响应中没有 choices"))
    }
}

fn collapse_newlines(text: &str) -> String {
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl TranslationProvider for LlmApiProvider {
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
            "llm-api ({}) 翻译 {} 条文本: {} -> {}",
            self.model,
            batch.len(),
            source_lang.unwrap_or("auto"),
            target_lang
        );

        let (system, user) = self.build_prompt(&batch.trimmed(), target_lang, source_lang);
        let content = self.complete(system, user).await.map_err(|e| {
            tracing::warn!("llm-api 请求失败: {}", e);
            e
        })?;

        let translated = self
            .parse_numbered_response(&content, batch.len())
            .map_err(|message| {
                tracing::warn!("llm-api 返回格式错误: {}", message);
                ProviderError::malformed(PROVIDER_NAME, message)
            })?;

        batch.restore(PROVIDER_NAME, translated)
    }
}
