//! Web 路由定义

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::web::{handlers::*, types::AppState};

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/api/v1/health", get(health_check))
        .route("/api/v1/providers", get(list_providers))
        .route("/api/v1/translate", post(translate_html))
        .route("/api/v1/translate/file", post(translate_file))
}
