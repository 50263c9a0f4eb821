//! Chat proxy behavior against hand-written vendor fakes.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use orientation_api::domain::{ChatRequest, HistoryItem, ProviderKind};
use orientation_api::infra::{ChatPrompt, ChatProvider, ProviderError};
use orientation_api::services::{ChatManager, ChatService, SYSTEM_PROMPT};

/// Records every prompt and answers with a fixed outcome
struct ScriptedProvider {
    kind: ProviderKind,
    outcome: Result<String, (u16, String)>,
    prompts: Mutex<Vec<ChatPrompt>>,
}

impl ScriptedProvider {
    fn replying(kind: ProviderKind, reply: &str) -> Arc<Self> {
        Arc::new(Self {
            kind,
            outcome: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing(kind: ProviderKind, status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            kind,
            outcome: Err((status, body.to_string())),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<ChatPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.outcome
            .clone()
            .map_err(|(status, body)| ProviderError::Status { status, body })
    }
}

/// Never reaches the vendor
struct Unreachable;

#[async_trait]
impl ChatProvider for Unreachable {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Groq
    }

    async fn complete(&self, _prompt: &ChatPrompt) -> Result<String, ProviderError> {
        Err(ProviderError::Transport("connection reset".to_string()))
    }
}

fn request(message: &str, provider: Option<&str>) -> ChatRequest {
    ChatRequest {
        message: message.to_string(),
        history: Vec::new(),
        provider: provider.map(str::to_string),
        user_profile: None,
    }
}

#[tokio::test]
async fn test_defaults_to_groq() {
    let groq = ScriptedProvider::replying(ProviderKind::Groq, "Salut depuis Groq");
    let gemini = ScriptedProvider::replying(ProviderKind::Gemini, "Salut depuis Gemini");
    let chat = ChatManager::new(groq.clone(), gemini.clone());

    let response = chat.chat(request("Bonjour", None)).await;

    assert_eq!(response.reply, "Salut depuis Groq");
    assert_eq!(groq.calls().len(), 1);
    assert!(gemini.calls().is_empty());
}

#[tokio::test]
async fn test_unknown_provider_flag_falls_back_to_groq() {
    let groq = ScriptedProvider::replying(ProviderKind::Groq, "groq");
    let gemini = ScriptedProvider::replying(ProviderKind::Gemini, "gemini");
    let chat = ChatManager::new(groq, gemini);

    let response = chat.chat(request("Bonjour", Some("openai"))).await;

    assert_eq!(response.reply, "groq");
}

#[tokio::test]
async fn test_prompt_carries_history_and_profile() {
    let groq = ScriptedProvider::replying(ProviderKind::Groq, "unused");
    let gemini = ScriptedProvider::replying(ProviderKind::Gemini, "ok");
    let chat = ChatManager::new(groq, gemini.clone());

    let history = vec![
        HistoryItem {
            role: "user".to_string(),
            text: "Je suis en 2ème année bac PC".to_string(),
        },
        HistoryItem {
            role: "model".to_string(),
            text: "Très bien, quelle est ta moyenne ?".to_string(),
        },
    ];
    let req = ChatRequest {
        message: "Environ 16".to_string(),
        history: history.clone(),
        provider: Some("GEMINI".to_string()),
        user_profile: Some("Série: Sciences Physiques, Ville: Fès".to_string()),
    };

    chat.chat(req).await;

    let calls = gemini.calls();
    assert_eq!(calls.len(), 1);
    let prompt = &calls[0];
    assert_eq!(prompt.message, "Environ 16");
    assert_eq!(prompt.history, history);
    assert!(prompt.system.starts_with(SYSTEM_PROMPT));
    assert!(prompt.system.ends_with("Série: Sciences Physiques, Ville: Fès"));
}

#[tokio::test]
async fn test_blank_profile_leaves_system_prompt_untouched() {
    let groq = ScriptedProvider::replying(ProviderKind::Groq, "ok");
    let chat = ChatManager::new(groq.clone(), Arc::new(Unreachable));

    let mut req = request("Bonjour", None);
    req.user_profile = Some("   ".to_string());
    chat.chat(req).await;

    assert_eq!(groq.calls()[0].system, SYSTEM_PROMPT);
}

#[tokio::test]
async fn test_invalid_key_becomes_reply() {
    let groq = ScriptedProvider::failing(ProviderKind::Groq, 401, "invalid api key");
    let chat = ChatManager::new(groq, Arc::new(Unreachable));

    let response = chat.chat(request("Bonjour", None)).await;

    assert_eq!(response.reply, "⚠️ Clé API groq invalide ou non autorisée.");
}

#[tokio::test]
async fn test_gemini_minute_limit_becomes_reply() {
    let gemini = ScriptedProvider::failing(
        ProviderKind::Gemini,
        429,
        r#"{"error":{"message":"Quota exceeded for GenerateRequestsPerMinutePerProjectPerModel per_minute"}}"#,
    );
    let chat = ChatManager::new(Arc::new(Unreachable), gemini);

    let response = chat.chat(request("Bonjour", Some("gemini"))).await;

    assert!(response.reply.contains("15 requêtes/minute"));
}

#[tokio::test]
async fn test_client_error_reports_status() {
    let gemini = ScriptedProvider::failing(ProviderKind::Gemini, 404, "model not found");
    let chat = ChatManager::new(Arc::new(Unreachable), gemini);

    let response = chat.chat(request("Bonjour", Some("gemini"))).await;

    assert_eq!(response.reply, "Erreur API gemini (404). Veuillez réessayer.");
}

#[tokio::test]
async fn test_vendor_outage_becomes_generic_reply() {
    let groq = ScriptedProvider::failing(ProviderKind::Groq, 503, "overloaded");
    let chat = ChatManager::new(groq, Arc::new(Unreachable));

    let response = chat.chat(request("Bonjour", None)).await;

    assert_eq!(
        response.reply,
        "Je rencontre un problème technique temporaire. Veuillez réessayer dans un instant."
    );
}

#[tokio::test]
async fn test_transport_failure_becomes_generic_reply() {
    let chat = ChatManager::new(
        Arc::new(Unreachable),
        ScriptedProvider::replying(ProviderKind::Gemini, "unused"),
    );

    let response = chat.chat(request("Bonjour", None)).await;

    assert_eq!(
        response.reply,
        "Je rencontre un problème technique temporaire. Veuillez réessayer dans un instant."
    );
}
