use async_trait::async_trait;
use thiserror::Error;

pub mod resend;
pub mod templates;

/// One fully rendered outgoing email, ready for the provider.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub attachments: Vec<EmailAttachment>,
}

#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    /// Base64 of the raw file bytes, passed through to the provider as-is.
    pub content: String,
    pub content_type: String,
}

/// Provider acknowledgement for one accepted email.
#[derive(Debug, Clone)]
pub struct SendReceipt {
    pub id: String,
}

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Email transport boundary. The gateway renders emails and hands them
/// here; everything provider-specific stays behind this trait.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt, MailerError>;
}
