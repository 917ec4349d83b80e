//! 翻译服务 HTTP 客户端集成测试
//!
//! 在进程内启动一个 axum 模拟后端，验证请求格式和错误映射

#![cfg(feature = "web")]

use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    Router,
};
use serde_json::{json, Value};

use html_translator::translation::{
    create_provider, ProviderConfig, ProviderErrorKind, ProviderKind, TranslationOrchestrator,
    TranslationProvider,
};

/// 模拟后端收到的一次请求
#[derive(Debug, Clone)]
struct Recorded {
    path: String,
    authorization: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct MockBackend {
    status: StatusCode,
    response: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

async fn respond(
    State(mock): State<MockBackend>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    mock.requests.lock().unwrap().push(Recorded {
        path: uri.path().to_string(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });
    (
        mock.status,
        [(header::CONTENT_TYPE, "application/json")],
        mock.response.clone(),
    )
}

/// 启动模拟后端，返回基础 URL 和请求记录
async fn spawn_backend(status: StatusCode, response: String) -> (String, Arc<Mutex<Vec<Recorded>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().fallback(respond).with_state(MockBackend {
        status,
        response,
        requests: requests.clone(),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), requests)
}

fn cloud_provider(endpoint: &str) -> Arc<dyn TranslationProvider> {
    let mut config = ProviderConfig::for_provider(ProviderKind::CloudApi);
    config.request_timeout_secs = 5;
    config.cloud.project_id = Some("demo".to_string());
    config.cloud.access_token = Some("test-token".to_string());
    config.cloud.endpoint = endpoint.to_string();
    create_provider(&config).unwrap()
}

fn llm_provider(base_url: &str) -> Arc<dyn TranslationProvider> {
    let mut config = ProviderConfig::for_provider(ProviderKind::LlmApi);
    config.request_timeout_secs = 5;
    config.llm.api_key = Some("sk-test".to_string());
    config.llm.model = "test-model".to_string();
    config.llm.base_url = format!("{}/v1", base_url);
    create_provider(&config).unwrap()
}

fn chat_reply(content: &str) -> String {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_cloud_api_request_and_padding() {
    let response = json!({
        "translations": [
            { "translatedText": "Bonjour" },
            { "translatedText": "monde" }
        ]
    });
    let (base, requests) = spawn_backend(StatusCode::OK, response.to_string()).await;
    let provider = cloud_provider(&base);

    let result = provider
        .translate_batch(&texts(&["Hello ", "world"]), "fr", Some("en"))
        .await
        .unwrap();
    assert_eq!(result, texts(&["Bonjour ", "monde"]));

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].path,
        "/v3/projects/demo/locations/global:translateText"
    );
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer test-token"));
    assert_eq!(
        requests[0].body,
        json!({
            "contents": ["Hello", "world"],
            "mimeType": "text/plain",
            "targetLanguageCode": "fr",
            "sourceLanguageCode": "en"
        })
    );
}

#[tokio::test]
async fn test_cloud_api_error_mapping() {
    let cases = [
        (StatusCode::UNAUTHORIZED, "{}", ProviderErrorKind::AuthFailure),
        (StatusCode::FORBIDDEN, "{}", ProviderErrorKind::AuthFailure),
        (
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error":{"code":429,"status":"RESOURCE_EXHAUSTED"}}"#,
            ProviderErrorKind::QuotaExceeded,
        ),
        (
            StatusCode::BAD_REQUEST,
            r#"{"error":{"code":400,"message":"Target language is invalid."}}"#,
            ProviderErrorKind::InvalidRequest,
        ),
        (StatusCode::INTERNAL_SERVER_ERROR, "{}", ProviderErrorKind::NetworkFailure),
        (StatusCode::OK, "not json", ProviderErrorKind::MalformedResponse),
        (
            StatusCode::OK,
            r#"{"translations":[{"translatedText":"un"}]}"#,
            ProviderErrorKind::MalformedResponse,
        ),
    ];

    for (status, body, expected) in cases {
        let (base, _) = spawn_backend(status, body.to_string()).await;
        let err = cloud_provider(&base)
            .translate_batch(&texts(&["one", "two"]), "fr", None)
            .await
            .unwrap_err();
        assert_eq!(err.provider_kind(), Some(expected), "{} {}", status, body);
    }
}

#[tokio::test]
async fn test_unreachable_backend_is_network_failure() {
    // 绑定后立即释放，得到一个没有服务监听的端口
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = cloud_provider(&format!("http://{}", addr))
        .translate_batch(&texts(&["Hello"]), "fr", None)
        .await
        .unwrap_err();
    assert_eq!(err.provider_kind(), Some(ProviderErrorKind::NetworkFailure));
}

#[tokio::test]
async fn test_llm_api_single_request_per_batch() {
    let reply = chat_reply("Here you go:\n1. Bonjour\n2. monde");
    let (base, requests) = spawn_backend(StatusCode::OK, reply).await;
    let provider = llm_provider(&base);

    let result = provider
        .translate_batch(&texts(&["Hello ", "world"]), "fr", None)
        .await
        .unwrap();
    assert_eq!(result, texts(&["Bonjour ", "monde"]));

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/v1/chat/completions");
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer sk-test"));

    let body = &requests[0].body;
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["messages"][0]["role"], "system");
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(user.ends_with("1. Hello\n2. world"), "{}", user);
}

#[tokio::test]
async fn test_llm_api_wrong_line_count_is_malformed() {
    let (base, _) = spawn_backend(StatusCode::OK, chat_reply("1. Bonjour monde")).await;
    let err = llm_provider(&base)
        .translate_batch(&texts(&["Hello", "world"]), "fr", None)
        .await
        .unwrap_err();
    assert_eq!(err.provider_kind(), Some(ProviderErrorKind::MalformedResponse));

    let (base, _) = spawn_backend(StatusCode::OK, json!({ "choices": [] }).to_string()).await;
    let err = llm_provider(&base)
        .translate_batch(&texts(&["Hello"]), "fr", None)
        .await
        .unwrap_err();
    assert_eq!(err.provider_kind(), Some(ProviderErrorKind::MalformedResponse));
}

#[tokio::test]
async fn test_llm_api_error_mapping() {
    let cases = [
        (StatusCode::UNAUTHORIZED, ProviderErrorKind::AuthFailure),
        (StatusCode::TOO_MANY_REQUESTS, ProviderErrorKind::QuotaExceeded),
        (StatusCode::BAD_GATEWAY, ProviderErrorKind::NetworkFailure),
    ];

    for (status, expected) in cases {
        let (base, _) = spawn_backend(status, r#"{"error":{"message":"nope"}}"#.to_string()).await;
        let err = llm_provider(&base)
            .translate_batch(&texts(&["Hello"]), "fr", None)
            .await
            .unwrap_err();
        assert_eq!(err.provider_kind(), Some(expected), "{}", status);
    }
}

#[tokio::test]
async fn test_orchestrator_with_llm_backend() {
    let (base, requests) = spawn_backend(StatusCode::OK, chat_reply("1. Bonjour\n2. monde")).await;
    let orchestrator = TranslationOrchestrator::new(llm_provider(&base));

    let html = orchestrator
        .translate_html("<p>Hello <b>world</b></p>", "fr", Some("en"))
        .await
        .unwrap();
    assert_eq!(html, "<p>Bonjour <b>monde</b></p>");
    assert_eq!(requests.lock().unwrap().len(), 1);
}
