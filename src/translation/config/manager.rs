//! 翻译服务配置管理器
//!
//! 加载顺序：`.env` 文件 → 内置默认值 → 配置文件 → 类型化环境变量

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use super::constants;
use crate::env::EnvError;
use crate::translation::error::{TranslationError, TranslationResult};

/// 翻译服务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum ProviderKind {
    /// Google Cloud Translation
    CloudApi,
    /// OpenAI 兼容的大模型接口
    LlmApi,
    /// 不联网的测试替身
    Dummy,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::CloudApi,
        ProviderKind::LlmApi,
        ProviderKind::Dummy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::CloudApi => "cloud-api",
            ProviderKind::LlmApi => "llm-api",
            ProviderKind::Dummy => "dummy",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cloud-api" | "google" => Ok(ProviderKind::CloudApi),
            "llm-api" | "openai" => Ok(ProviderKind::LlmApi),
            "dummy" => Ok(ProviderKind::Dummy),
            other => Err(TranslationError::ConfigError(format!(
                "未知的翻译服务 '{}'，可选: cloud-api, llm-api, dummy",
                other
            ))),
        }
    }
}

impl TryFrom<String> for ProviderKind {
    type Error = TranslationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Google Cloud Translation v3 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudApiConfig {
    pub project_id: Option<String>,
    pub location: String,
    pub access_token: Option<String>,
    pub endpoint: String,
}

impl Default for CloudApiConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            location: constants::DEFAULT_GCP_LOCATION.to_string(),
            access_token: None,
            endpoint: constants::DEFAULT_GCP_ENDPOINT.to_string(),
        }
    }
}

/// OpenAI 兼容接口配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmApiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    /// 自定义用户提示词模板，支持 `{source_lang}` `{target_lang}` `{count}` `{lines}`
    pub prompt_template: Option<String>,
}

impl Default for LlmApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: constants::DEFAULT_LLM_MODEL.to_string(),
            base_url: constants::DEFAULT_LLM_BASE_URL.to_string(),
            temperature: constants::DEFAULT_LLM_TEMPERATURE,
            prompt_template: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DummyConfig {
    pub prefix: String,
}

/// 翻译服务配置，启动时加载一次，之后只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub provider: ProviderKind,
    pub request_timeout_secs: u64,
    pub cloud: CloudApiConfig,
    pub llm: LlmApiConfig,
    pub dummy: DummyConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::CloudApi,
            request_timeout_secs: constants::DEFAULT_REQUEST_TIMEOUT.as_secs(),
            cloud: CloudApiConfig::default(),
            llm: LlmApiConfig::default(),
            dummy: DummyConfig::default(),
        }
    }
}

impl ProviderConfig {
    /// 使用指定服务类型的默认配置
    pub fn for_provider(provider: ProviderKind) -> Self {
        Self {
            provider,
            ..Self::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// 验证所选服务需要的配置项是否齐全
    pub fn validate(&self) -> TranslationResult<()> {
        if self.request_timeout_secs == 0 {
            return Err(TranslationError::ConfigError("请求超时不能为0".to_string()));
        }

        match self.provider {
            ProviderKind::CloudApi => {
                require(&self.cloud.project_id, "cloud-api 需要 GCP_PROJECT_ID")?;
                require(&self.cloud.access_token, "cloud-api 需要 GCP_ACCESS_TOKEN")?;
                if self.cloud.location.trim().is_empty() {
                    return Err(TranslationError::ConfigError(
                        "cloud-api 的 location 不能为空".to_string(),
                    ));
                }
                require_url(&self.cloud.endpoint, "cloud.endpoint")?;
            }
            ProviderKind::LlmApi => {
                require(&self.llm.api_key, "llm-api 需要 OPENAI_API_KEY")?;
                if self.llm.model.trim().is_empty() {
                    return Err(TranslationError::ConfigError(
                        "llm-api 的模型名称不能为空".to_string(),
                    ));
                }
                if !(0.0..=2.0).contains(&self.llm.temperature) {
                    return Err(TranslationError::ConfigError(format!(
                        "temperature 必须在 0 到 2 之间，当前为 {}",
                        self.llm.temperature
                    )));
                }
                require_url(&self.llm.base_url, "llm.base_url")?;
            }
            ProviderKind::Dummy => {}
        }

        Ok(())
    }

    /// 应用环境变量覆盖；设置了但无法解析的变量视为配置错误
    pub fn apply_env_overrides(&mut self) -> TranslationResult<()> {
        use crate::env::{provider, EnvVar};

        if let Some(name) = provider::Provider::get_opt().map_err(env_error)? {
            self.provider = name.parse()?;
            tracing::info!("环境变量覆盖翻译服务: {}", self.provider);
        }

        if let Some(timeout) = provider::RequestTimeout::get_opt().map_err(env_error)? {
            self.request_timeout_secs = timeout.as_secs();
        }

        if let Some(project_id) = provider::GcpProjectId::get_opt().map_err(env_error)? {
            self.cloud.project_id = Some(project_id);
        }

        if let Some(location) = provider::GcpLocation::get_opt().map_err(env_error)? {
            self.cloud.location = location;
        }

        if let Some(token) = provider::GcpAccessToken::get_opt().map_err(env_error)? {
            self.cloud.access_token = Some(token);
        }

        if let Some(endpoint) = provider::GcpTranslateEndpoint::get_opt().map_err(env_error)? {
            self.cloud.endpoint = endpoint;
        }

        if let Some(api_key) = provider::OpenAiApiKey::get_opt().map_err(env_error)? {
            self.llm.api_key = Some(api_key);
        }

        if let Some(model) = provider::OpenAiModel::get_opt().map_err(env_error)? {
            self.llm.model = model;
        }

        if let Some(base_url) = provider::OpenAiBaseUrl::get_opt().map_err(env_error)? {
            self.llm.base_url = base_url;
        }

        if let Some(prefix) = provider::DummyPrefix::get_opt().map_err(env_error)? {
            self.dummy.prefix = prefix;
        }

        Ok(())
    }
}

fn require(value: &Option<String>, message: &str) -> TranslationResult<()> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(TranslationError::ConfigError(message.to_string())),
    }
}

fn require_url(value: &str, field: &str) -> TranslationResult<()> {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(TranslationError::ConfigError(format!(
            "{} 不是有效的 http(s) URL: {}",
            field, value
        ))),
    }
}

fn env_error(e: EnvError) -> TranslationError {
    TranslationError::ConfigError(e.to_string())
}

/// 配置管理器
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: ProviderConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 按完整顺序加载配置
    ///
    /// 这里不检查凭据，凭据由工厂在创建翻译服务时验证。
    pub fn load() -> TranslationResult<Self> {
        Self::load_dotenv();
        Self::load_without_dotenv()
    }

    /// 与 [`ConfigManager::load`] 相同，但假定 `.env` 已经加载
    pub fn load_without_dotenv() -> TranslationResult<Self> {
        let source = Self::find_config_file();
        let mut config = Self::build(source.as_deref())?;
        config.apply_env_overrides()?;

        tracing::info!("加载的配置 - 翻译服务: {}", config.provider);

        Ok(Self { config, source })
    }

    /// 只从默认值和指定文件加载，不读取环境变量
    pub fn from_file<P: AsRef<Path>>(path: P) -> TranslationResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TranslationError::ConfigError(format!(
                "配置文件不存在: {}",
                path.display()
            )));
        }

        let config = Self::build(Some(path))?;
        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn into_config(self) -> ProviderConfig {
        self.config
    }

    /// 实际使用的配置文件
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn build(path: Option<&Path>) -> TranslationResult<ProviderConfig> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&ProviderConfig::default())
                .map_err(|e| TranslationError::ConfigError(format!("默认配置错误: {}", e)))?,
        );

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder
            .build()
            .map_err(|e| TranslationError::ConfigError(format!("构建配置失败: {}", e)))?
            .try_deserialize()
            .map_err(|e| TranslationError::ConfigError(format!("反序列化配置失败: {}", e)))
    }

    fn find_config_file() -> Option<PathBuf> {
        for path in constants::CONFIG_PATHS {
            let expanded_path = shellexpand::tilde(path);
            if Path::new(expanded_path.as_ref()).exists() {
                tracing::info!("加载配置文件: {}", expanded_path);
                return Some(PathBuf::from(expanded_path.as_ref()));
            }
        }

        tracing::debug!("未找到配置文件，使用默认配置");
        None
    }

    /// 加载第一个存在的 `.env` 文件，返回其文件名
    ///
    /// 已存在的环境变量不会被覆盖。
    pub fn load_dotenv() -> Option<&'static str> {
        for env_file in constants::ENV_FILES {
            if Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok() {
                tracing::info!("已加载环境变量文件: {}", env_file);
                return Some(env_file);
            }
        }
        None
    }
}
