//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问。每个变量声明名称、默认值、说明和解析规则。

use std::env;
use std::fmt;
use std::time::Duration;

/// 环境变量解析错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match Self::get_opt()? {
            Some(value) => Ok(value),
            None => Self::DEFAULT.ok_or_else(|| EnvError {
                variable: Self::NAME.to_string(),
                message: "Required environment variable not set".to_string(),
            }),
        }
    }

    /// 读取变量；未设置或为空时返回 `Ok(None)`，设置了但无效时返回错误
    fn get_opt() -> EnvResult<Option<T>> {
        match env::var(Self::NAME) {
            Ok(value) if !value.trim().is_empty() => Self::parse(&value).map(Some),
            _ => Ok(None),
        }
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "HTML_TRANSLATOR_LOG_LEVEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn get() -> EnvResult<String> {
            Ok(Self::get_opt()?.unwrap_or_else(|| "info".to_string()))
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.trim().to_lowercase().as_str() {
                level @ ("trace" | "debug" | "info" | "warn" | "error") => Ok(level.to_string()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }
}

/// 翻译服务相关环境变量
pub mod provider {
    use super::*;

    /// 选用的翻译服务
    pub struct Provider;
    impl EnvVar<String> for Provider {
        const NAME: &'static str = "TRANSLATION_PROVIDER";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Translation provider: cloud-api (google), llm-api (openai), dummy";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_lowercase())
        }
    }

    /// Google Cloud 项目 ID
    pub struct GcpProjectId;
    impl EnvVar<String> for GcpProjectId {
        const NAME: &'static str = "GCP_PROJECT_ID";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Google Cloud project ID (required for cloud-api)";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }

    /// Google Cloud Translation 区域
    pub struct GcpLocation;
    impl EnvVar<String> for GcpLocation {
        const NAME: &'static str = "GCP_LOCATION";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Translation API location (default: global)";

        fn get() -> EnvResult<String> {
            Ok(Self::get_opt()?.unwrap_or_else(|| "global".to_string()))
        }

        fn parse(value: &str) -> EnvResult<String> {
            let location = value.trim();
            if location
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
            {
                Ok(location.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Invalid location '{}'", value),
                })
            }
        }
    }

    /// Google Cloud OAuth 访问令牌
    pub struct GcpAccessToken;
    impl EnvVar<String> for GcpAccessToken {
        const NAME: &'static str = "GCP_ACCESS_TOKEN";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "OAuth access token for the Cloud Translation API (required for cloud-api)";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }

    /// Cloud Translation API 端点
    pub struct GcpTranslateEndpoint;
    impl EnvVar<String> for GcpTranslateEndpoint {
        const NAME: &'static str = "GCP_TRANSLATE_ENDPOINT";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Cloud Translation API base URL";

        fn parse(value: &str) -> EnvResult<String> {
            parse_http_url(value, Self::NAME)
        }
    }

    /// OpenAI API 密钥
    pub struct OpenAiApiKey;
    impl EnvVar<String> for OpenAiApiKey {
        const NAME: &'static str = "OPENAI_API_KEY";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "API key for the LLM provider (required for llm-api)";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }

    /// LLM 模型名称
    pub struct OpenAiModel;
    impl EnvVar<String> for OpenAiModel {
        const NAME: &'static str = "OPENAI_MODEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Chat model used by llm-api (default: gpt-3.5-turbo)";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }

    /// OpenAI 兼容 API 端点
    pub struct OpenAiBaseUrl;
    impl EnvVar<String> for OpenAiBaseUrl {
        const NAME: &'static str = "OPENAI_BASE_URL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Base URL of an OpenAI-compatible API";

        fn parse(value: &str) -> EnvResult<String> {
            parse_http_url(value, Self::NAME)
        }
    }

    /// dummy 服务的译文前缀
    pub struct DummyPrefix;
    impl EnvVar<String> for DummyPrefix {
        const NAME: &'static str = "DUMMY_TRANSLATION_PREFIX";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Marker prepended by the dummy provider (default: empty)";

        // 前缀可以包含有意义的空白，不做 trim
        fn get_opt() -> EnvResult<Option<String>> {
            match env::var(Self::NAME) {
                Ok(value) if !value.is_empty() => Self::parse(&value).map(Some),
                _ => Ok(None),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.to_string())
        }
    }

    /// 单次翻译服务请求超时
    pub struct RequestTimeout;
    impl EnvVar<Duration> for RequestTimeout {
        const NAME: &'static str = "TRANSLATION_REQUEST_TIMEOUT";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(30));
        const DESCRIPTION: &'static str = "Provider request timeout in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            parse_positive_u64(value, Self::NAME, 1, 600).map(Duration::from_secs)
        }
    }
}

/// Web服务器相关环境变量
pub mod web {
    use super::*;

    /// 绑定地址
    pub struct BindAddress;
    impl EnvVar<String> for BindAddress {
        const NAME: &'static str = "HTML_TRANSLATOR_BIND_ADDRESS";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Web server bind address";

        fn get() -> EnvResult<String> {
            Ok(Self::get_opt()?.unwrap_or_else(|| "127.0.0.1".to_string()))
        }

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }

    /// 端口
    pub struct Port;
    impl EnvVar<u16> for Port {
        const NAME: &'static str = "HTML_TRANSLATOR_PORT";
        const DEFAULT: Option<u16> = Some(8000);
        const DESCRIPTION: &'static str = "Web server port";

        fn parse(value: &str) -> EnvResult<u16> {
            let port: u16 = value.trim().parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid port number (1-65535)".to_string(),
            })?;

            if port == 0 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Port cannot be 0".to_string(),
                });
            }

            Ok(port)
        }
    }

    /// 整个 HTTP 请求的超时
    pub struct RequestTimeout;
    impl EnvVar<Duration> for RequestTimeout {
        const NAME: &'static str = "HTML_TRANSLATOR_HTTP_TIMEOUT";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(120));
        const DESCRIPTION: &'static str = "Overall HTTP request timeout in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            parse_positive_u64(value, Self::NAME, 1, 3600).map(Duration::from_secs)
        }
    }
}

fn parse_http_url(value: &str, var_name: &str) -> EnvResult<String> {
    let url = value.trim();
    match url::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
            Ok(url.trim_end_matches('/').to_string())
        }
        _ => Err(EnvError {
            variable: var_name.to_string(),
            message: "URL must start with http:// or https://".to_string(),
        }),
    }
}

fn parse_positive_u64(value: &str, var_name: &str, min: u64, max: u64) -> EnvResult<u64> {
    let num: u64 = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid positive number".to_string(),
    })?;

    if num < min {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is below minimum {}", num, min),
        });
    }

    if num > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} exceeds maximum {}", num, max),
        });
    }

    Ok(num)
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    fn line(docs: &mut String, name: &str, description: &str) {
        docs.push_str(&format!("- `{}`: {}\n", name, description));
    }

    let mut docs = String::new();
    docs.push_str("# Environment Variables\n\n");

    docs.push_str("## Core\n\n");
    line(&mut docs, core::LogLevel::NAME, core::LogLevel::DESCRIPTION);

    docs.push_str("\n## Translation Provider\n\n");
    line(&mut docs, provider::Provider::NAME, provider::Provider::DESCRIPTION);
    line(&mut docs, provider::GcpProjectId::NAME, provider::GcpProjectId::DESCRIPTION);
    line(&mut docs, provider::GcpLocation::NAME, provider::GcpLocation::DESCRIPTION);
    line(&mut docs, provider::GcpAccessToken::NAME, provider::GcpAccessToken::DESCRIPTION);
    line(
        &mut docs,
        provider::GcpTranslateEndpoint::NAME,
        provider::GcpTranslateEndpoint::DESCRIPTION,
    );
    line(&mut docs, provider::OpenAiApiKey::NAME, provider::OpenAiApiKey::DESCRIPTION);
    line(&mut docs, provider::OpenAiModel::NAME, provider::OpenAiModel::DESCRIPTION);
    line(&mut docs, provider::OpenAiBaseUrl::NAME, provider::OpenAiBaseUrl::DESCRIPTION);
    line(&mut docs, provider::DummyPrefix::NAME, provider::DummyPrefix::DESCRIPTION);
    line(&mut docs, provider::RequestTimeout::NAME, provider::RequestTimeout::DESCRIPTION);

    docs.push_str("\n## Web Server\n\n");
    line(&mut docs, web::BindAddress::NAME, web::BindAddress::DESCRIPTION);
    line(&mut docs, web::Port::NAME, web::Port::DESCRIPTION);
    line(&mut docs, web::RequestTimeout::NAME, web::RequestTimeout::DESCRIPTION);

    docs
}
