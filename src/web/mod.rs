//! Web 服务器模块
//!
//! 以 HTTP 接口提供 HTML 翻译服务

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod types;

pub use config::*;
pub use routes::*;
pub use types::*;

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Router};
use tokio::signal;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::translation::TranslationOrchestrator;

/// Web 服务器
pub struct WebServer {
    config: WebConfig,
    state: Arc<AppState>,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(config: WebConfig, orchestrator: TranslationOrchestrator) -> Self {
        Self {
            config,
            state: Arc::new(AppState::new(orchestrator)),
        }
    }

    /// 启动 Web 服务器，收到 Ctrl-C 或 SIGTERM 后优雅退出
    pub async fn start(&self) -> std::io::Result<()> {
        let app = create_router(self.state.clone(), &self.config);

        let listener = tokio::net::TcpListener::bind(self.config.listen_address()).await?;

        tracing::info!(
            "Web 服务器启动于 http://{} (翻译服务: {})",
            self.config.listen_address(),
            self.state.provider_name
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Web 服务器已停止");
        Ok(())
    }
}

/// 创建路由器
pub fn create_router(app_state: Arc<AppState>, config: &WebConfig) -> Router {
    create_routes()
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(config.body_limit))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("无法监听 Ctrl+C 信号: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("无法监听 SIGTERM 信号: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("收到 Ctrl+C 信号"),
        _ = terminate => tracing::info!("收到 SIGTERM 信号"),
    }
}
