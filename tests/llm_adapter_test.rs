//! Vendor adapters against a local HTTP stand-in.

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use orientation_api::domain::HistoryItem;
use orientation_api::infra::llm::http_client;
use orientation_api::infra::{ChatPrompt, ChatProvider, GeminiProvider, GroqProvider, ProviderError};

const GEMINI_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";
const GROQ_PATH: &str = "/openai/v1/chat/completions";

fn prompt() -> ChatPrompt {
    ChatPrompt {
        system: "Tu es un conseiller d'orientation.".to_string(),
        history: vec![HistoryItem {
            role: "user".to_string(),
            text: "Je suis en bac SM".to_string(),
        }],
        message: "Quelles écoles d'ingénieurs ?".to_string(),
    }
}

fn gemini_answer(text: &str) -> Value {
    json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] })
}

async fn request_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|req| serde_json::from_slice(&req.body).unwrap())
        .collect()
}

#[tokio::test]
async fn test_gemini_retries_without_search_after_429() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .and(query_param("key", "gm-key"))
        .respond_with(ResponseTemplate::new(429).set_body_string("search quota exhausted"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .and(query_param("key", "gm-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_answer("ENSA, ENSAM, EMI")))
        .mount(&server)
        .await;

    let provider = GeminiProvider::with_url(
        http_client().unwrap(),
        Some("gm-key"),
        format!("{}{}", server.uri(), GEMINI_PATH),
    );

    let reply = provider.complete(&prompt()).await.unwrap();
    assert_eq!(reply, "ENSA, ENSAM, EMI");

    let bodies = request_bodies(&server).await;
    assert_eq!(bodies.len(), 2);
    assert!(bodies[0]["tools"][0]["google_search"].is_object());
    assert!(bodies[1].get("tools").is_none());
    assert_eq!(bodies[1]["contents"][1]["parts"][0]["text"], "Quelles écoles d'ingénieurs ?");
}

#[tokio::test]
async fn test_gemini_second_429_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("per_minute limit"))
        .mount(&server)
        .await;

    let provider = GeminiProvider::with_url(
        http_client().unwrap(),
        Some("gm-key"),
        format!("{}{}", server.uri(), GEMINI_PATH),
    );

    match provider.complete(&prompt()).await {
        Err(ProviderError::Status { status, body }) => {
            assert_eq!(status, 429);
            assert_eq!(body, "per_minute limit");
        }
        other => panic!("expected a 429 status, got {:?}", other),
    }
    assert_eq!(request_bodies(&server).await.len(), 2);
}

#[tokio::test]
async fn test_gemini_missing_candidates_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let provider = GeminiProvider::with_url(
        http_client().unwrap(),
        Some("gm-key"),
        format!("{}{}", server.uri(), GEMINI_PATH),
    );

    let reply = provider.complete(&prompt()).await.unwrap();
    assert_eq!(reply, "Je suis désolé, je n'ai pas pu générer une réponse.");
}

#[tokio::test]
async fn test_groq_sends_bearer_and_reads_choice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GROQ_PATH))
        .and(header("authorization", "Bearer gq-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Vise l'ENSA Fès." } }]
        })))
        .mount(&server)
        .await;

    let provider = GroqProvider::with_url(
        http_client().unwrap(),
        Some("gq-key"),
        format!("{}{}", server.uri(), GROQ_PATH),
    );

    let reply = provider.complete(&prompt()).await.unwrap();
    assert_eq!(reply, "Vise l'ENSA Fès.");

    let bodies = request_bodies(&server).await;
    let messages = bodies[0]["messages"].as_array().unwrap();
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages.last().unwrap()["content"], "Quelles écoles d'ingénieurs ?");
}

#[tokio::test]
async fn test_groq_rejected_key_passes_status_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GROQ_PATH))
        .and(header("authorization", "Bearer bad-key"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let provider = GroqProvider::with_url(
        http_client().unwrap(),
        Some("bad-key"),
        format!("{}{}", server.uri(), GROQ_PATH),
    );

    match provider.complete(&prompt()).await {
        Err(ProviderError::Status { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("expected a 401 status, got {:?}", other),
    }
    assert_eq!(request_bodies(&server).await.len(), 1);
}
