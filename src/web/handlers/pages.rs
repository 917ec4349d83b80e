//! 页面处理器

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::web::types::{AppState, ServiceInfo};

/// 根路径：服务元信息
pub async fn index(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "html-translator".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider: state.provider_name.clone(),
        docs_url: None,
    })
}
