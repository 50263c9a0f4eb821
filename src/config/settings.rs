//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_BASE_URL, DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS,
    DEFAULT_JWT_REFRESH_EXPIRATION_HOURS, DEFAULT_REDIS_URL, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEFAULT_SMTP_FROM, DEFAULT_SMTP_PORT, DEFAULT_UPLOAD_DIR,
    DEFAULT_VERIFICATION_EXPIRATION_SECONDS, MIN_JWT_SECRET_LENGTH,
};

/// Outgoing mail settings. Delivery is disabled when `host` is unset.
#[derive(Clone, Default)]
pub struct SmtpSettings {
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    password: Option<String>,
    pub from: String,
}

impl SmtpSettings {
    fn from_env() -> Self {
        Self {
            host: env::var("SMTP_HOST").ok().filter(|h| !h.is_empty()),
            port: parse_var("SMTP_PORT").unwrap_or(DEFAULT_SMTP_PORT),
            username: env::var("SMTP_USER").ok(),
            password: env::var("SMTP_PASS").ok(),
            from: env::var("SMTP_FROM").unwrap_or_else(|_| DEFAULT_SMTP_FROM.to_string()),
        }
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.host.is_some()
    }
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from", &self.from)
            .finish()
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub jwt_refresh_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    /// Public URL of this service, used for verification links and uploads
    pub base_url: String,
    pub upload_dir: String,
    pub verification_expiration_seconds: u64,
    pub smtp: SmtpSettings,
    groq_api_key: Option<String>,
    gemini_api_key: Option<String>,
    pub seed_on_startup: bool,
    pub seed_force: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("jwt_refresh_expiration_hours", &self.jwt_refresh_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("base_url", &self.base_url)
            .field("upload_dir", &self.upload_dir)
            .field("verification_expiration_seconds", &self.verification_expiration_seconds)
            .field("smtp", &self.smtp)
            .field("groq_api_key", &"[REDACTED]")
            .field("gemini_api_key", &"[REDACTED]")
            .field("seed_on_startup", &self.seed_on_startup)
            .field("seed_force", &self.seed_force)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is not set or is too short (security requirement).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
            jwt_secret,
            jwt_expiration_hours: parse_var("JWT_EXPIRATION_HOURS")
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            jwt_refresh_expiration_hours: parse_var("JWT_REFRESH_EXPIRATION_HOURS")
                .unwrap_or(DEFAULT_JWT_REFRESH_EXPIRATION_HOURS),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_var("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT),
            base_url: env::var("APP_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string()),
            verification_expiration_seconds: parse_var("VERIFICATION_EXPIRATION_SECONDS")
                .unwrap_or(DEFAULT_VERIFICATION_EXPIRATION_SECONDS),
            smtp: SmtpSettings::from_env(),
            groq_api_key: env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            seed_on_startup: parse_flag("SEED_ON_STARTUP"),
            seed_force: parse_flag("SEED_FORCE"),
        }
    }

    /// Minimal configuration for tests: no external services, fixed secret.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn for_tests() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            jwt_secret: "test-secret-key-for-testing-only-32chars".to_string(),
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            jwt_refresh_expiration_hours: DEFAULT_JWT_REFRESH_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            base_url: DEFAULT_BASE_URL.to_string(),
            upload_dir: DEFAULT_UPLOAD_DIR.to_string(),
            verification_expiration_seconds: DEFAULT_VERIFICATION_EXPIRATION_SECONDS,
            smtp: SmtpSettings::default(),
            groq_api_key: None,
            gemini_api_key: None,
            seed_on_startup: false,
            seed_force: false,
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    pub fn groq_api_key(&self) -> Option<&str> {
        self.groq_api_key.as_deref()
    }

    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini_api_key.as_deref()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn parse_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let mut config = Config::for_tests();
        config.groq_api_key = Some("gsk_live_secret".to_string());
        config.smtp.password = Some("hunter2".to_string());

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("gsk_live_secret"));
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("test-secret-key"));
        assert!(rendered.contains("base_url"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::for_tests();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_smtp_disabled_without_host() {
        assert!(!SmtpSettings::default().is_configured());
    }
}
