//! Advisory chat request/response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// LLM vendor used to answer a chat request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Groq,
    Gemini,
}

impl ProviderKind {
    /// `"gemini"` (any case) selects Gemini; anything else, including no value,
    /// falls back to Groq.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag.map(|f| f.trim().to_lowercase()) {
            Some(f) if f == "gemini" => ProviderKind::Gemini,
            _ => ProviderKind::Groq,
        }
    }

    /// Lowercase flag, as the front end sends it; replies quote it verbatim
    pub fn flag(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "groq",
            ProviderKind::Gemini => "gemini",
        }
    }
}

/// Previous conversation turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistoryItem {
    /// `"user"` or `"model"`
    #[schema(example = "user")]
    pub role: String,
    pub text: String,
}

impl HistoryItem {
    pub fn is_model(&self) -> bool {
        self.role.eq_ignore_ascii_case("model")
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChatRequest {
    /// Latest user message
    #[validate(length(min = 1, max = 4000, message = "Message must contain between 1 and 4000 characters"))]
    #[schema(example = "Quelles écoles d'ingénieurs recrutent via le CNC ?")]
    pub message: String,
    /// Conversation turns, oldest first
    #[serde(default)]
    pub history: Vec<HistoryItem>,
    /// `"groq"` (default) or `"gemini"`
    #[schema(example = "groq")]
    pub provider: Option<String>,
    /// Serialized profile used to personalise the answer
    pub user_profile: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChatResponse {
    pub reply: String,
}

impl ChatResponse {
    pub fn new(reply: impl Into<String>) -> Self {
        Self { reply: reply.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_flag() {
        assert_eq!(ProviderKind::from_flag(Some("GEMINI")), ProviderKind::Gemini);
        assert_eq!(ProviderKind::from_flag(Some("groq")), ProviderKind::Groq);
        assert_eq!(ProviderKind::from_flag(Some("openai")), ProviderKind::Groq);
        assert_eq!(ProviderKind::from_flag(None), ProviderKind::Groq);
        assert_eq!(ProviderKind::from_flag(Some(" Gemini ")).flag(), "gemini");
    }

    #[test]
    fn test_history_role() {
        let turn = HistoryItem { role: "model".into(), text: "Bonjour".into() };
        assert!(turn.is_model());
    }
}
