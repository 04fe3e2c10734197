/// Resend client — the single point of entry for all outbound email.
///
/// No other module may call the Resend API directly; everything goes
/// through `ResendMailer` behind the `Mailer` trait.
///
/// Dispatch is single-attempt by design: a failed send is reported to the
/// submitter, who decides whether to resubmit. No retry, no backoff.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{EmailAttachment, Mailer, MailerError, OutgoingEmail, SendReceipt};

const RESEND_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<ResendAttachment<'a>>,
}

#[derive(Debug, Serialize)]
struct ResendAttachment<'a> {
    filename: &'a str,
    /// Base64-encoded file content.
    content: &'a str,
    content_type: &'a str,
}

impl<'a> From<&'a EmailAttachment> for ResendAttachment<'a> {
    fn from(attachment: &'a EmailAttachment) -> Self {
        Self {
            filename: &attachment.filename,
            content: &attachment.content,
            content_type: &attachment.content_type,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ResendErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct ResendMailer {
    client: Client,
    api_key: String,
}

impl ResendMailer {
    pub fn new(api_key: String) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            api_key,
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt, MailerError> {
        let request_body = ResendRequest {
            from: &email.from,
            to: &email.to,
            subject: &email.subject,
            html: &email.html,
            attachments: email.attachments.iter().map(Into::into).collect(),
        };

        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the provider's error message
            let message = serde_json::from_str::<ResendErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(MailerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let accepted: ResendResponse = response.json().await?;
        debug!("Resend accepted email: id={}", accepted.id);

        Ok(SendReceipt { id: accepted.id })
    }
}
