//! 翻译模块
//!
//! 保持 HTML 结构的文本翻译：
//! - **pipeline**: 可翻译文本的过滤、提取和回填
//! - **providers**: 翻译服务接口和各个后端实现
//! - **core**: 串起整个流程的编排器
//! - **config**: 配置管理
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use html_translator::translation::{create_provider, ProviderConfig, ProviderKind, TranslationOrchestrator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ProviderConfig::for_provider(ProviderKind::Dummy);
//! let orchestrator = TranslationOrchestrator::new(create_provider(&config)?);
//!
//! let html = orchestrator
//!     .translate_html("<p>Hello <b>world</b></p>", "fr", None)
//!     .await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// 子模块声明
// ============================================================================

/// 配置管理模块 - 翻译服务的选择、凭据和超时
pub mod config;

/// 核心模块 - 翻译编排器
pub mod core;

/// 错误处理模块 - 统一的错误类型和处理机制
pub mod error;

/// 文本处理管道模块 - 从 HTML 中提取可翻译文本并回填译文
pub mod pipeline;

/// 翻译服务模块 - 服务接口、工厂和各后端实现
pub mod providers;

// ============================================================================
// 核心API导出
// ============================================================================

pub use self::core::{TranslateOptions, TranslationOrchestrator};

pub use config::{constants, ConfigManager, ProviderConfig, ProviderKind};

pub use error::{
    ErrorSeverity, PipelineError, ProviderError, ProviderErrorKind, TranslationError,
    TranslationResult,
};

pub use pipeline::{HtmlSegmenter, Segment, Template, TextFilter};

pub use providers::{available_providers, create_provider, TranslationProvider};
