use axum::{
    extract::{ Path, Query, State },
    http::StatusCode,
    response::IntoResponse,
    routing::{ get, post },
    Json,
    Router,
};
use multi_assistant::api::{ ApiClient, ApiError, HttpTransport };
use multi_assistant::app::AssistantApp;
use multi_assistant::app::display::CONNECTION_FAILED;
use multi_assistant::config::{ ClientConfig, Endpoints };
use multi_assistant::events::UiEvent;
use multi_assistant::models::chat::{ Provider, Query as ChatQuery };
use multi_assistant::ui::{ AutoConfirm, ElementId, ElementRegistry };
use serde_json::{ json, Value };
use std::collections::HashMap;
use std::sync::{ Arc, Mutex };
use std::time::Duration;

#[derive(Clone, Default)]
struct Backend {
    conversations: Arc<Mutex<Vec<Value>>>,
}

async fn groq(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "success": true,
        "text": format!("*{}* via {}", body["prompt"].as_str().unwrap_or(""), body["model"].as_str().unwrap_or("none"))
    }))
}

async fn claude(Json(body): Json<Value>) -> Json<Value> {
    let has_model = body.get("model").is_some();
    Json(json!({ "success": false, "error": format!("model field present: {}", has_model) }))
}

async fn chat() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}

async fn compare() -> impl IntoResponse {
    (StatusCode::OK, "<html>maintenance</html>")
}

async fn history(State(backend): State<Backend>) -> Json<Value> {
    let items = backend.conversations.lock().unwrap().clone();
    Json(json!({ "success": true, "history": items }))
}

async fn search(
    State(backend): State<Backend>,
    Query(params): Query<HashMap<String, String>>
) -> Json<Value> {
    let term = params.get("q").cloned().unwrap_or_default();
    let items: Vec<Value> = backend.conversations
        .lock()
        .unwrap()
        .iter()
        .filter(|c| c["prompt"].as_str().unwrap_or("").contains(&term))
        .cloned()
        .collect();
    Json(json!({ "success": true, "results": items }))
}

async fn conversation(State(backend): State<Backend>, Path(id): Path<i64>) -> impl IntoResponse {
    let found = backend.conversations
        .lock()
        .unwrap()
        .iter()
        .find(|c| c["id"] == json!(id))
        .cloned();
    match found {
        Some(mut c) => {
            c["responses"] = json!([{ "provider": "groq", "success": true, "response_text": "Stored **answer**", "tokens_used": 12 }]);
            (StatusCode::OK, Json(json!({ "success": true, "conversation": c })))
        }
        None => (StatusCode::OK, Json(json!({ "success": false, "error": "Conversation non trouvée" }))),
    }
}

async fn remove(State(backend): State<Backend>, Path(id): Path<i64>) -> Json<Value> {
    let mut items = backend.conversations.lock().unwrap();
    let before = items.len();
    items.retain(|c| c["id"] != json!(id));
    if items.len() < before {
        Json(json!({ "success": true }))
    } else {
        Json(json!({ "success": false, "error": "Conversation non trouvée" }))
    }
}

async fn stats() -> Json<Value> {
    Json(json!({
        "success": true,
        "statistics": {
            "total_conversations": 2,
            "successful_conversations": 1,
            "success_rate": 50.0,
            "daily_stats": {}
        }
    }))
}

async fn spawn_backend() -> (String, Backend) {
    let backend = Backend::default();
    backend.conversations.lock().unwrap().extend([
        json!({ "id": 1, "prompt": "Explain tokio", "timestamp": "2024-05-01 10:00:00", "providers": ["groq"] }),
        json!({ "id": 2, "prompt": "Bonjour", "timestamp": "2024-05-02 10:00:00", "model_used": "openai" }),
    ]);

    let router = Router::new()
        .route("/api/groq", post(groq))
        .route("/api/claude", post(claude))
        .route("/api/chat", post(chat))
        .route("/api/compare", post(compare))
        .route("/api/history", get(history))
        .route("/api/history/search", get(search))
        .route("/api/history/{id}", get(conversation).delete(remove))
        .route("/api/stats", get(stats))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{}", addr), backend)
}

fn app_for(base_url: &str, confirm: bool) -> AssistantApp {
    let config = ClientConfig {
        base_url: base_url.to_string(),
        timeout: Some(Duration::from_secs(5)),
        history_refresh_delay: Duration::from_millis(10),
        ..Default::default()
    };
    let transport = Arc::new(HttpTransport::new(&config.base_url, config.timeout).unwrap());
    AssistantApp::new(config, transport, ElementRegistry::standard(), Arc::new(AutoConfirm(confirm)))
}

#[tokio::test]
async fn groq_round_trip_renders_markdown() {
    let (base_url, _) = spawn_backend().await;
    let app = app_for(&base_url, true);
    app.with_registry(|registry| {
        registry.set_value(ElementId::QueryInput, "Hello");
        registry.set_value(ElementId::GroqModel, "llama3-8b-8192");
    });

    app.dispatch(UiEvent::ProviderChanged("groq".into())).await;
    app.dispatch(UiEvent::Submit).await;
    app.settle().await;

    let page = app.snapshot();
    assert!(page.is_visible(ElementId::ResponseArea));
    assert_eq!(
        page.html(ElementId::ResponseText).unwrap().trim(),
        "<p><em>Hello</em> via llama3-8b-8192</p>"
    );
    assert!(page.html(ElementId::HistoryList).unwrap().contains("Explain tokio"));
}

#[tokio::test]
async fn non_groq_body_has_no_model() {
    let (base_url, _) = spawn_backend().await;
    let client = ApiClient::new(
        Arc::new(HttpTransport::new(&base_url, None).unwrap()),
        Endpoints::default()
    );
    let query = ChatQuery {
        prompt: "Hi".into(),
        provider: Provider::Claude,
        groq_model: "llama3-70b-8192".into(),
    };

    let err = client.submit(&query).await.unwrap_err();
    assert_eq!(err.to_string(), "model field present: false");
}

#[tokio::test]
async fn server_error_is_a_status_error() {
    let (base_url, _) = spawn_backend().await;
    let client = ApiClient::new(
        Arc::new(HttpTransport::new(&base_url, None).unwrap()),
        Endpoints::default()
    );
    let query = ChatQuery {
        prompt: "Hi".into(),
        provider: Provider::OpenAI,
        groq_model: String::new(),
    };

    match client.submit(&query).await {
        Err(ApiError::Status { status, path }) => {
            assert_eq!(status, 500);
            assert_eq!(path, "/api/chat");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn non_json_success_body_shows_connection_message() {
    let (base_url, _) = spawn_backend().await;
    let app = app_for(&base_url, true);
    app.with_registry(|registry| {
        registry.set_value(ElementId::QueryInput, "Compare");
        registry.set_value(ElementId::ProviderGroup, "compare");
    });

    app.dispatch(UiEvent::Submit).await;

    let page = app.snapshot();
    assert_eq!(page.text(ElementId::ErrorText), Some(CONNECTION_FAILED));
    assert!(!page.is_visible(ElementId::CompareArea));
    assert!(!page.is_visible(ElementId::LoadingIndicator));
    assert!(!page.is_disabled(ElementId::SubmitButton));
}

#[tokio::test]
async fn unreachable_backend_shows_connection_message() {
    let app = app_for("http://127.0.0.1:9", true);
    app.with_registry(|registry| registry.set_value(ElementId::QueryInput, "Hi"));

    app.dispatch(UiEvent::Submit).await;

    let page = app.snapshot();
    assert!(page.is_visible(ElementId::ErrorArea));
    assert!(!page.is_visible(ElementId::LoadingIndicator));
    assert!(!page.is_disabled(ElementId::SubmitButton));
}

#[tokio::test]
async fn search_view_and_delete_against_backend() {
    let (base_url, backend) = spawn_backend().await;
    let app = app_for(&base_url, true);

    app.with_registry(|registry| registry.set_value(ElementId::HistorySearch, "tokio"));
    app.dispatch(UiEvent::SearchHistory).await;
    let list = app.snapshot().html(ElementId::HistoryList).unwrap().to_string();
    assert!(list.contains("Explain tokio"));
    assert!(!list.contains("Bonjour"));

    app.dispatch(UiEvent::ViewConversation(1)).await;
    let page = app.snapshot();
    assert!(page.is_visible(ElementId::HistoryModal));
    assert!(page.html(ElementId::ModalBody).unwrap().contains("<strong>answer</strong>"));

    app.dispatch(UiEvent::DeleteConversation(2)).await;
    assert_eq!(backend.conversations.lock().unwrap().len(), 1);
    assert!(!app.snapshot().html(ElementId::HistoryList).unwrap().contains("Bonjour"));
}

#[tokio::test]
async fn declined_delete_keeps_backend_state() {
    let (base_url, backend) = spawn_backend().await;
    let app = app_for(&base_url, false);

    app.dispatch(UiEvent::DeleteConversation(1)).await;

    assert_eq!(backend.conversations.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn stats_panel_from_backend() {
    let (base_url, _) = spawn_backend().await;
    let app = app_for(&base_url, true);

    app.load_stats().await;

    let page = app.snapshot();
    assert_eq!(page.text(ElementId::TotalConversations), Some("2"));
    assert_eq!(page.text(ElementId::SuccessRate), Some("50.0%"));
    assert_eq!(page.text(ElementId::TodayConversations), Some("0"));
}
