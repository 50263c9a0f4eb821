//! Email background job.
//!
//! Jobs are pushed by the API after the surrounding transaction commits and
//! delivered by the `jobs work` process. Without `SMTP_HOST` the worker logs
//! the message instead of sending it.

use apalis::prelude::Data;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use serde::{Deserialize, Serialize};

use crate::config::{SmtpSettings, VERIFICATION_EMAIL_SUBJECT};
use crate::errors::{AppError, AppResult};

/// Email job payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailJob {
    /// Recipient email address
    pub to: String,
    pub subject: String,
    /// Plain text body
    pub body: String,
    /// Optional sender override (defaults to SMTP_FROM)
    #[serde(default)]
    pub from: Option<String>,
}

impl EmailJob {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            from: None,
        }
    }

    /// Account verification message pointing at `verify_url`
    pub fn verification(
        to: impl Into<String>,
        first_name: Option<&str>,
        verify_url: &str,
        expiration_seconds: u64,
    ) -> Self {
        let name = first_name.filter(|n| !n.trim().is_empty()).unwrap_or("user");
        let body = format!(
            "Hello {},\n\n\
             Please click the link below to verify your email address:\n\
             {}\n\n\
             This link will expire in {} minutes.\n\n\
             If you didn't create an account, please ignore this email.",
            name,
            verify_url,
            expiration_seconds / 60
        );
        Self::new(to, VERIFICATION_EMAIL_SUBJECT, body)
    }
}

/// SMTP delivery shared by every job the worker runs.
#[derive(Clone)]
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl Mailer {
    pub fn from_settings(smtp: &SmtpSettings) -> AppResult<Self> {
        let transport = match &smtp.host {
            Some(host) => {
                let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                    .map_err(|e| AppError::internal(format!("Invalid SMTP relay {}: {}", host, e)))?
                    .port(smtp.port);
                if let Some(user) = &smtp.username {
                    builder = builder.credentials(Credentials::new(
                        user.clone(),
                        smtp.password().unwrap_or_default().to_string(),
                    ));
                }
                Some(builder.build())
            }
            None => None,
        };

        Ok(Self {
            transport,
            from: smtp.from.clone(),
        })
    }

    fn message(&self, job: &EmailJob) -> AppResult<Message> {
        let from = job.from.as_deref().unwrap_or(&self.from);
        Message::builder()
            .from(
                from.parse()
                    .map_err(|e| AppError::internal(format!("Invalid sender {}: {}", from, e)))?,
            )
            .to(job
                .to
                .parse()
                .map_err(|e| AppError::internal(format!("Invalid recipient {}: {}", job.to, e)))?)
            .subject(&job.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(job.body.clone())
            .map_err(|e| AppError::internal(format!("Failed to build email: {}", e)))
    }

    pub async fn deliver(&self, job: &EmailJob) -> AppResult<()> {
        let Some(transport) = &self.transport else {
            tracing::warn!("SMTP not configured - logging email instead of sending");
            tracing::info!(
                "=== EMAIL (not sent) ===\n\
                 To: {}\n\
                 Subject: {}\n\
                 Body:\n{}\n\
                 ========================",
                job.to,
                job.subject,
                job.body
            );
            return Ok(());
        };

        let message = self.message(job)?;
        transport
            .send(message)
            .await
            .map_err(|e| AppError::internal(format!("SMTP delivery failed: {}", e)))?;
        Ok(())
    }
}

/// Email job handler - processes email sending jobs
pub async fn email_job_handler(job: EmailJob, mailer: Data<Mailer>) -> Result<(), AppError> {
    tracing::info!(to = %job.to, subject = %job.subject, "Processing email job");

    mailer.deliver(&job).await?;

    tracing::info!(to = %job.to, "Email processed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_body() {
        let job = EmailJob::verification(
            "amine@example.ma",
            Some("Amine"),
            "http://localhost:8080/api/auth/verify-email?token=abc",
            86_400,
        );

        assert_eq!(job.subject, "Email Verification");
        assert!(job.body.starts_with("Hello Amine,"));
        assert!(job.body.contains("verify-email?token=abc"));
        assert!(job.body.contains("expire in 1440 minutes"));
    }

    #[test]
    fn test_verification_greeting_fallback() {
        let job = EmailJob::verification("x@example.ma", Some("  "), "http://x", 600);
        assert!(job.body.starts_with("Hello user,"));
        assert!(job.body.contains("10 minutes"));
    }

    #[tokio::test]
    async fn test_unconfigured_mailer_logs_only() {
        let mailer = Mailer::from_settings(&SmtpSettings::default()).unwrap();
        let job = EmailJob::new("x@example.ma", "Subject", "Body");
        tokio_test::assert_ok!(mailer.deliver(&job).await);
    }

    #[test]
    fn test_invalid_recipient_rejected() {
        let mut settings = SmtpSettings::default();
        settings.from = "noreply@orientlamp.ma".into();
        let mailer = Mailer::from_settings(&settings).unwrap();
        let job = EmailJob::new("not-an-address", "Subject", "Body");
        tokio_test::assert_err!(mailer.message(&job));
    }
}
