use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Largest résumé the form accepts: 5 MiB of raw (decoded) bytes.
pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

/// Media types a résumé may carry: PDF, DOC, DOCX.
pub const ALLOWED_MEDIA_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// One contact-form submission as received from the client.
/// Built fresh per submit on the form side; never persisted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<SubmissionAttachment>,
}

impl SubmissionRequest {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionAttachment {
    pub filename: String,
    pub media_type: String,
    /// Base64 of the original file bytes.
    pub encoded_content: String,
}

/// Wire response for `POST /api/v1/contact`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency_email_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicant_email_id: Option<String>,
}

/// Rejects a submission before any rendering or dispatch happens.
/// The form performs the same checks client-side; this is the boundary
/// enforcement for callers that bypass it.
pub fn validate_submission(req: &SubmissionRequest) -> Result<(), AppError> {
    let required = [
        &req.first_name,
        &req.last_name,
        &req.email,
        &req.message,
    ];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(AppError::Validation("All fields are required".to_string()));
    }

    if !is_valid_email(req.email.trim()) {
        return Err(AppError::Validation(format!(
            "'{}' is not a valid email address",
            req.email.trim()
        )));
    }

    if let Some(attachment) = &req.attachment {
        if attachment.filename.trim().is_empty() {
            return Err(AppError::Validation(
                "Attachment filename must not be empty".to_string(),
            ));
        }
        if !ALLOWED_MEDIA_TYPES.contains(&attachment.media_type.as_str()) {
            return Err(AppError::Validation(format!(
                "Unsupported attachment media type '{}'",
                attachment.media_type
            )));
        }
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(&attachment.encoded_content)
            .map_err(|_| {
                AppError::Validation("Attachment content is not valid base64".to_string())
            })?;
        if decoded.len() > MAX_ATTACHMENT_BYTES {
            return Err(AppError::Validation(format!(
                "Attachment exceeds the {} MiB limit",
                MAX_ATTACHMENT_BYTES / (1024 * 1024)
            )));
        }
    }

    Ok(())
}

/// Mirrors the form's `^[^\s@]+@[^\s@]+\.[^\s@]+$` check without pulling
/// in a regex engine: no whitespace anywhere, exactly one `@` with a
/// non-empty local part, and a dot in the domain with at least one
/// character on each side.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    let len = domain.chars().count();
    domain
        .chars()
        .enumerate()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < len)
}
