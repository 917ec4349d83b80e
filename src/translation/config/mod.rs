//! 翻译服务配置模块
//!
//! 支持默认值、配置文件和环境变量三层覆盖

pub mod manager;

pub use manager::{
    CloudApiConfig, ConfigManager, DummyConfig, LlmApiConfig, ProviderConfig, ProviderKind,
};

/// 配置常量
pub mod constants {
    use std::time::Duration;

    // 跳过的元素（任一祖先命中即跳过整个子树）
    pub const SKIP_ELEMENTS: &[&str] = &[
        "script", "style", "code", "pre", "noscript", "textarea", "svg", "math", "template",
        "iframe", "xmp", "noembed", "noframes", "plaintext",
    ];

    // 原始文本元素，内容按字面序列化，任何过滤策略下都不能变成占位符
    pub const RAW_TEXT_ELEMENTS: &[&str] = &[
        "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
    ];

    /// 标记不翻译内容的 class
    pub const NO_TRANSLATE_CLASS: &str = "notranslate";

    // Google Cloud Translation
    pub const DEFAULT_GCP_LOCATION: &str = "global";
    pub const DEFAULT_GCP_ENDPOINT: &str = "https://translation.googleapis.com";

    // OpenAI 兼容接口
    pub const DEFAULT_LLM_MODEL: &str = "gpt-3.5-turbo";
    pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
    pub const DEFAULT_LLM_TEMPERATURE: f32 = 0.3;

    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "html-translator.toml",
        "config/html-translator.toml",
        "~/.config/html-translator/config.toml",
    ];

    pub const ENV_FILES: &[&str] = &[".env.local", ".env.development", ".env.production", ".env"];
}

