//! API 处理器

pub mod health;
pub mod providers;
pub mod translation;

pub use health::*;
pub use providers::*;
pub use translation::*;
