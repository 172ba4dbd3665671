//! Drives `HttpTransport` and the controller against a local axum backend.

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use documind_lib::models::RequestState;
use documind_lib::render::ChunkList;
use documind_lib::{ChatError, Endpoint, Flow, HttpTransport, PageModel, SubmissionController, Transport};
use serde_json::{json, Value};

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn echo_chat() -> Router {
    Router::new().route(
        "/chat",
        post(|Json(body): Json<Value>| async move {
            Json(json!({
                "relevant_chunks": [
                    { "id": 0, "text": "first", "distance": 0.25 },
                    { "id": "x-1", "text": "second", "distance": 0.333333 }
                ],
                "llm_response": format!("you asked: {}", body["prompt"].as_str().unwrap_or("?")),
            }))
        }),
    )
}

#[tokio::test]
async fn test_send_returns_body_on_success() {
    let base = spawn_backend(echo_chat()).await;
    let transport = HttpTransport::new(base);

    let body = transport
        .send(Endpoint::Chat, json!({ "prompt": "ping" }))
        .await
        .unwrap();
    assert_eq!(body["llm_response"], "you asked: ping");
}

#[tokio::test]
async fn test_send_extracts_server_error_field() {
    let router = Router::new().route(
        "/chat",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "db down" })),
            )
        }),
    );
    let transport = HttpTransport::new(spawn_backend(router).await);

    match transport.send(Endpoint::Chat, json!({ "prompt": "q" })).await {
        Err(ChatError::Http { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "db down");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_send_uses_status_text_without_json() {
    let router = Router::new().route(
        "/chat",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "") }),
    );
    let transport = HttpTransport::new(spawn_backend(router).await);

    let err = transport
        .send(Endpoint::Chat, json!({ "prompt": "q" }))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Internal Server Error");
}

#[tokio::test]
async fn test_send_rejects_non_json_success_body() {
    let router = Router::new().route("/chat", post(|| async { "<html>not json</html>" }));
    let transport = HttpTransport::new(spawn_backend(router).await);

    let err = transport
        .send(Endpoint::Chat, json!({ "prompt": "q" }))
        .await
        .unwrap_err();
    assert!(matches!(err, ChatError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn test_send_reports_connection_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpTransport::new(format!("http://{addr}"));
    let err = transport
        .send(Endpoint::Chat, json!({ "prompt": "q" }))
        .await
        .unwrap_err();
    assert!(matches!(err, ChatError::Network(_)), "{err:?}");
}

#[tokio::test]
async fn test_controller_end_to_end() {
    let base = spawn_backend(echo_chat()).await;
    let mut controller =
        SubmissionController::new(HttpTransport::new(base), PageModel::default(), Flow::Combined);

    controller.submit("  what is polled?  ").await;

    assert!(matches!(controller.state(), RequestState::Succeeded(_)));
    let page = controller.view();
    assert!(page.submit_enabled);
    assert!(!page.loading_visible);
    assert_eq!(page.answer, "you asked: what is polled?");
    let Some(ChunkList::Entries { entries }) = &page.chunks else {
        panic!("expected entries, got {:?}", page.chunks);
    };
    let shown: Vec<(&str, &str)> = entries
        .iter()
        .map(|e| (e.label.as_str(), e.distance.as_str()))
        .collect();
    assert_eq!(shown, vec![("ID: 0", "0.2500"), ("ID: x-1", "0.3333")]);
}

#[tokio::test]
async fn test_controller_network_failure_releases_control() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut controller = SubmissionController::new(
        HttpTransport::new(format!("http://{addr}")),
        PageModel::default(),
        Flow::Combined,
    );
    controller.submit("q").await;

    assert!(matches!(controller.state(), RequestState::Failed(_)));
    let page = controller.view();
    assert!(page.answer.starts_with("Error: Network error"));
    assert!(page.submit_enabled);
    assert!(!page.loading_visible);
}

#[tokio::test]
async fn test_two_step_against_backend() {
    let router = Router::new()
        .route(
            "/get_relevant_chunks",
            post(|| async {
                Json(json!({ "relevant_chunks": [
                    { "id": 3, "text": "alpha", "distance": 0.1 }
                ]}))
            }),
        )
        .route(
            "/generate",
            post(|Json(body): Json<Value>| async move {
                Json(json!({ "response": format!("chunks={}", body["chunks"]) }))
            }),
        );
    let base = spawn_backend(router).await;
    let mut controller =
        SubmissionController::new(HttpTransport::new(base), PageModel::default(), Flow::TwoStep);

    controller.submit("q").await;

    assert_eq!(controller.view().answer, "chunks=[\"alpha\"]");
    assert_eq!(controller.view().chunks.as_ref().map(ChunkList::len), Some(1));
}
