//! 翻译系统核心模块
//!
//! [`TranslationOrchestrator`] 把分段器和翻译服务串成一次完整的 HTML 翻译。
//! 编排器本身不持有可变状态，可以用 `Arc` 或 `Clone` 在请求之间共享。

pub mod orchestrator;

pub use orchestrator::{TranslateOptions, TranslationOrchestrator};
