use axum::response::Json;

use crate::translation::available_providers;

/// 列出可配置的翻译服务名称
pub async fn list_providers() -> Json<Vec<&'static str>> {
    Json(available_providers())
}
