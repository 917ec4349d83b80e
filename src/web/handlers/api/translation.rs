//! 翻译相关API处理器

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    http::header,
    response::{IntoResponse, Json, Response},
};

use crate::parsers::html::decode_html_bytes;
use crate::translation::TranslateOptions;
use crate::web::error::{bad_request, error_response, ApiError};
use crate::web::types::{normalize_source_lang, AppState, TranslateRequest, TranslateResponse};

/// 翻译 JSON 中的 HTML 片段或文档
pub async fn translate_html(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| bad_request("invalid_request_body", rejection.body_text()))?;

    tracing::info!(
        "开始处理翻译请求: {} 字节, 目标语言 {}",
        request.html.len(),
        request.target_lang
    );

    let translated_html = state
        .orchestrator
        .translate_html_with_options(
            &request.html,
            request.target_lang.trim(),
            normalize_source_lang(request.source_lang.as_deref()),
            TranslateOptions {
                batch_size: request.batch_size,
            },
        )
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(TranslateResponse { translated_html }))
}

/// 上传的文件及表单字段
#[derive(Debug, Default)]
struct FileUpload {
    file_name: Option<String>,
    content: Option<Vec<u8>>,
    target_lang: Option<String>,
    source_lang: Option<String>,
    batch_size: Option<usize>,
}

/// 翻译上传的 HTML 文件，以附件形式返回
pub async fn translate_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = read_upload(multipart).await?;

    let content = upload
        .content
        .ok_or_else(|| bad_request("missing_field", "缺少 html_file 字段"))?;
    let target_lang = upload
        .target_lang
        .ok_or_else(|| bad_request("missing_field", "缺少 target_lang 字段"))?;

    let html = decode_html_bytes(&content);
    if html.trim().is_empty() {
        return Err(bad_request("empty_file", "上传的文件为空"));
    }

    let file_name = attachment_name(upload.file_name.as_deref());
    tracing::info!("开始翻译上传文件: {} ({} 字节)", file_name, content.len());

    let translated_html = state
        .orchestrator
        .translate_html_with_options(
            &html,
            target_lang.trim(),
            normalize_source_lang(upload.source_lang.as_deref()),
            TranslateOptions {
                batch_size: upload.batch_size,
            },
        )
        .await
        .map_err(|e| error_response(&e))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"translated_{}\"", file_name),
            ),
        ],
        translated_html,
    )
        .into_response())
}

async fn read_upload(mut multipart: Multipart) -> Result<FileUpload, ApiError> {
    let mut upload = FileUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request("invalid_multipart", e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "html_file" => {
                upload.file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request("invalid_multipart", e.body_text()))?;
                upload.content = Some(bytes.to_vec());
            }
            "target_lang" | "source_lang" | "batch_size" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| bad_request("invalid_multipart", e.body_text()))?;
                let value = value.trim().to_string();
                match name.as_str() {
                    "target_lang" => upload.target_lang = Some(value),
                    "source_lang" => upload.source_lang = Some(value),
                    _ if value.is_empty() => {}
                    _ => {
                        let size = value.parse().map_err(|_| {
                            bad_request("invalid_field", format!("batch_size 不是有效的整数: {}", value))
                        })?;
                        upload.batch_size = Some(size);
                    }
                }
            }
            other => tracing::debug!("忽略未知表单字段: {}", other),
        }
    }

    Ok(upload)
}

/// 取上传文件名的最后一段，并去掉不能放进响应头的字符
fn attachment_name(file_name: Option<&str>) -> String {
    let name = file_name
        .and_then(|n| n.rsplit(['/', '\\']).next())
        .map(|n| {
            n.chars()
                .filter(|c| !c.is_control() && *c != '"')
                .collect::<String>()
        })
        .unwrap_or_default();

    if name.trim().is_empty() {
        "document.html".to_string()
    } else {
        name
    }
}
