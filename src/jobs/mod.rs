//! Background jobs (apalis).

mod email_job;
mod mail_queue;

pub use email_job::{email_job_handler, EmailJob, Mailer};
pub use mail_queue::{MailQueue, PostgresMailQueue};

#[cfg(any(test, feature = "test-utils"))]
pub use mail_queue::MockMailQueue;
