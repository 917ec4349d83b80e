//! Web 模块的数据类型定义

use serde::{Deserialize, Serialize};

use crate::translation::TranslationOrchestrator;

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: TranslationOrchestrator,
    pub provider_name: String,
}

impl AppState {
    pub fn new(orchestrator: TranslationOrchestrator) -> Self {
        let provider_name = orchestrator.provider_name().to_string();
        Self {
            orchestrator,
            provider_name,
        }
    }
}

/// 翻译请求
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub html: String,
    pub target_lang: String,
    #[serde(default)]
    pub source_lang: Option<String>,
    #[serde(default)]
    pub batch_size: Option<usize>,
}

/// 翻译响应
#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_html: String,
}

/// 服务元信息
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub provider: String,
    pub docs_url: Option<String>,
}

/// 健康检查响应
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// 空字符串和 `auto` 都表示自动检测源语言
pub fn normalize_source_lang(source_lang: Option<&str>) -> Option<&str> {
    source_lang
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("auto"))
}
