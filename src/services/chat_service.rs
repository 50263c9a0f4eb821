//! Advisory chat - proxies a conversation to Groq or Gemini.
//!
//! Vendor failures never surface as HTTP errors: they are turned into a
//! French reply the front end can display as-is.

use async_trait::async_trait;
use chrono::{DateTime, Days, Duration, TimeZone, Utc};
use chrono_tz::Africa::Casablanca;
use std::sync::Arc;

use crate::domain::{ChatRequest, ChatResponse, ProviderKind};
use crate::infra::{ChatPrompt, ChatProvider, ProviderError};

pub const SYSTEM_PROMPT: &str = "Tu es OrientIA, un conseiller d'orientation universitaire expert du système d'enseignement supérieur marocain. \
Tu travailles pour OrientLamp, une plateforme d'aide à l'orientation au Maroc. \
Tu parles exclusivement en français (sauf si l'utilisateur écrit en arabe, alors réponds en arabe). \
\n\n⚠️ RÈGLE ABSOLUE — HORS-SUJET : Si la question posée n'est pas liée à l'orientation scolaire, universitaire ou professionnelle au Maroc (choix de filière, concours, établissements, débouchés, bourses, études à l'étranger), \
tu DOIS refuser poliment en disant exactement : \"Je suis spécialisé uniquement dans l'orientation universitaire au Maroc. Je ne peux pas répondre à cette question, mais je serais ravi de vous aider à choisir votre filière, comprendre un concours ou découvrir des établissements adaptés à votre profil.\". \
N'invente JAMAIS de réponse à des sujets hors orientation. Peu importe comment la question est formulée.\
\n\nTu as une connaissance approfondie de :\n\
- Le système éducatif marocain : Baccalauréat (toutes filières), CPGE, BTS, DUT/DTS, Licence, Master, Doctorat\n\
- Les grandes écoles d'ingénieurs : ENSA (Agadir, Casablanca, Fès, Kénitra, Marrakech, Oujda, Rabat, Safi, Tétouan), \
EMI (École Mohammadia d'Ingénieurs), ENSIAS, INPT, EHTP (École Hassania des Travaux Publics), \
INSEA, ENSMR, ESITH, ENSA Al Hoceima\n\
- Les écoles de commerce et management : ENCG (15 campus), ISCAE, HEM, ISGA, Université Internationale de Rabat\n\
- Les facultés : Faculté des Sciences, Faculté des Sciences et Techniques (FST), Faculté des Sciences Juridiques Économiques et Sociales, Faculté de Médecine et Pharmacie, Faculté de Droit\n\
- Les instituts technologiques : EST (École Supérieure de Technologie), OFPPT (filières BTS/TS)\n\
- Les concours nationaux : CNC (Concours National Commun) filières MP/PSI/TSI/BCPST/ECS/ECT, \
CNPQ (Classes Prépas Quota), Concours médecine/pharmacie/dentaire, Concours ISCAE, Concours ENCG, Concours enseignement\n\
- Les critères d'admission : notes du bac, filière, moyennes trimestrielles en prépa, classements CNC\n\
- Les débouchés professionnels et secteurs porteurs au Maroc (IT, industrie, finance, santé, énergie, tourisme…)\n\
- Les bourses d'études (nationales et à l'étranger : France, Canada, Espagne, Allemagne, Chine)\n\
- Les villes universitaires marocaines et coût de la vie\n\
\nRègles de comportement :\n\
- Sois chaleureux, encourageant et pédagogique\n\
- Donne des réponses concrètes et pratiques avec des exemples réels marocains\n\
- Si tu ne connais pas une information spécifique, dis-le honnêtement et oriente vers des sources officielles\n\
- Ne fabrique jamais de données (notes minimales, classements) que tu ne connais pas avec certitude\n\
- Quand un étudiant partage son profil (filière bac, notes), aide-le à identifier les établissements accessibles\n\
- Limite tes réponses à 3-5 paragraphes courts pour rester lisible sur mobile\n\
- Utilise des listes à puces quand tu énumères des options";

const PROFILE_HEADER: &str =
    "\n\n📋 PROFIL DE L'UTILISATEUR (utilise ces informations pour personnaliser tes conseils) :\n";

const TECHNICAL_ERROR_REPLY: &str =
    "Je rencontre un problème technique temporaire. Veuillez réessayer dans un instant.";

const PER_MINUTE_MARKERS: [&str; 4] = ["per_minute", "RPM", "per minute", "requests per minute"];

/// System prompt with the user's profile appended when one is given.
pub fn system_prompt(user_profile: Option<&str>) -> String {
    match user_profile.filter(|p| !p.trim().is_empty()) {
        Some(profile) => format!("{}{}{}", SYSTEM_PROMPT, PROFILE_HEADER, profile),
        None => SYSTEM_PROMPT.to_string(),
    }
}

pub fn is_per_minute_limit(error_body: &str) -> bool {
    PER_MINUTE_MARKERS.iter().any(|m| error_body.contains(m))
}

/// Time left until the next midnight in Morocco. Casablanca drops to
/// UTC+0 during Ramadan, so the offset comes from the tz database.
pub fn time_until_morocco_midnight(now: DateTime<Utc>) -> Duration {
    let local = now.with_timezone(&Casablanca);
    local
        .date_naive()
        .checked_add_days(Days::new(1))
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .and_then(|midnight| Casablanca.from_local_datetime(&midnight).earliest())
        .map(|midnight| midnight.signed_duration_since(local))
        .unwrap_or_else(Duration::zero)
}

/// `5h12min`, `5h` or `42 minutes`
pub fn format_wait(wait: Duration) -> String {
    let minutes = wait.num_minutes();
    let (hours, mins) = (minutes / 60, minutes % 60);
    match (hours, mins) {
        (0, m) => format!("{} minutes", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h{}min", h, m),
    }
}

/// Reply for a 429 from `kind`. Gemini distinguishes its per-minute limit
/// from the daily quota by looking at the vendor's error body.
pub fn quota_message(kind: ProviderKind, error_body: &str, now: DateTime<Utc>) -> String {
    match kind {
        ProviderKind::Gemini if is_per_minute_limit(error_body) => {
            "⏳ Gemini a atteint sa limite de **15 requêtes/minute**.\n\
             Attendez **~60 secondes** puis réessayez, ou passez sur **Groq** en haut."
                .to_string()
        }
        ProviderKind::Gemini => format!(
            "⏳ Le quota journalier de Gemini est atteint.\n\
             Il se renouvelle dans **{}** (à minuit, heure du Maroc).\n\n\
             💡 En attendant, passez sur **Groq** (Llama 3.3) avec le sélecteur en haut — il reste disponible.",
            format_wait(time_until_morocco_midnight(now))
        ),
        ProviderKind::Groq => "⏳ Le quota Groq est temporairement atteint.\n\
             Il se renouvelle automatiquement dans quelques secondes — réessayez dans **1 minute**.\n\n\
             💡 Vous pouvez aussi basculer sur **Gemini** avec le sélecteur en haut."
            .to_string(),
    }
}

/// Map a vendor failure to the reply shown to the user.
pub fn error_reply(kind: ProviderKind, error: &ProviderError, now: DateTime<Utc>) -> String {
    match error {
        ProviderError::Status { status: 429, body } => quota_message(kind, body, now),
        ProviderError::Status { status: 401 | 403, .. } => {
            format!("⚠️ Clé API {} invalide ou non autorisée.", kind.flag())
        }
        // Vendor-side outages read the same as a dropped connection
        ProviderError::Status { status: 500.., .. } | ProviderError::Transport(_) => {
            TECHNICAL_ERROR_REPLY.to_string()
        }
        ProviderError::Status { status, .. } => {
            format!("Erreur API {} ({}). Veuillez réessayer.", kind.flag(), status)
        }
    }
}

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Always produces a reply; vendor errors become explanatory text.
    async fn chat(&self, req: ChatRequest) -> ChatResponse;
}

pub struct ChatManager {
    groq: Arc<dyn ChatProvider>,
    gemini: Arc<dyn ChatProvider>,
}

impl ChatManager {
    pub fn new(groq: Arc<dyn ChatProvider>, gemini: Arc<dyn ChatProvider>) -> Self {
        Self { groq, gemini }
    }

    fn provider(&self, kind: ProviderKind) -> &Arc<dyn ChatProvider> {
        match kind {
            ProviderKind::Groq => &self.groq,
            ProviderKind::Gemini => &self.gemini,
        }
    }
}

#[async_trait]
impl ChatService for ChatManager {
    async fn chat(&self, req: ChatRequest) -> ChatResponse {
        let kind = ProviderKind::from_flag(req.provider.as_deref());
        let prompt = ChatPrompt {
            system: system_prompt(req.user_profile.as_deref()),
            history: req.history,
            message: req.message,
        };

        match self.provider(kind).complete(&prompt).await {
            Ok(reply) => ChatResponse::new(reply),
            Err(e) => {
                match &e {
                    ProviderError::Status { status, body } => {
                        tracing::error!(provider = kind.flag(), status, body = %body, "Chat provider error");
                    }
                    ProviderError::Transport(msg) => {
                        tracing::error!(provider = kind.flag(), error = %msg, "Chat provider call failed");
                    }
                }
                ChatResponse::new(error_reply(kind, &e, Utc::now()))
            }
        }
    }
}
