//! 日志初始化

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 安装全局 tracing subscriber
///
/// 设置了 `RUST_LOG` 时以它为准，否则使用传入的级别。重复调用只会记录一条警告。
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("html_translator={0},tower_http={0}", level)));

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
    {
        tracing::warn!("日志系统已初始化: {}", e);
    }
}
