//! # HTML Translator
//!
//! 保持 HTML 结构的翻译服务：提取可翻译文本，交给可插拔的翻译后端，再把译文填回原位置。
//!
//! ## 模块组织
//!
//! - `parsers` - HTML 解析和序列化
//! - `translation` - 分段、翻译服务、编排器和配置
//! - `env` - 类型化环境变量
//! - `logging` - 日志初始化（需要 `web` 特性）
//! - `web` - HTTP 服务（需要 `web` 特性）

pub mod env;
#[cfg(feature = "web")]
pub mod logging;
pub mod parsers;
pub mod translation;
#[cfg(feature = "web")]
pub mod web;

pub use translation::{
    create_provider, ProviderConfig, TranslationError, TranslationOrchestrator, TranslationProvider,
    TranslationResult,
};
