use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::error::FormError;
use crate::file::{ResumeFile, ALLOWED_MEDIA_TYPES, MAX_RESUME_BYTES};
use crate::gateway::{DeliveryGateway, SubmissionAttachment, SubmissionRequest};
use crate::notify::{NoticeKind, Notifier};

const GENERIC_FAILURE: &str = "Failed to send message. Please try again.";

/// The four text inputs of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Message,
}

#[derive(Debug, Clone, Default)]
struct FormState {
    first_name: String,
    last_name: String,
    email: String,
    message: String,
    resume: Option<ResumeFile>,
}

/// Owns form field state and orchestrates one submission at a time.
///
/// The controller is single-threaded with respect to user interaction;
/// the in-flight flag exists only to suppress re-entrant `submit` calls
/// while a prior one is awaiting the gateway, so a double click never
/// produces a duplicate send.
pub struct ContactForm {
    state: Mutex<FormState>,
    submitting: AtomicBool,
    gateway: Arc<dyn DeliveryGateway>,
    notifier: Arc<dyn Notifier>,
}

impl ContactForm {
    pub fn new(gateway: Arc<dyn DeliveryGateway>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: Mutex::new(FormState::default()),
            submitting: AtomicBool::new(false),
            gateway,
            notifier,
        }
    }

    /// Stores a field value as typed. No validation happens here;
    /// everything is checked at submit time.
    pub fn update_field(&self, field: Field, value: impl Into<String>) {
        let value = value.into();
        let mut state = self.state();
        match field {
            Field::FirstName => state.first_name = value,
            Field::LastName => state.last_name = value,
            Field::Email => state.email = value,
            Field::Message => state.message = value,
        }
    }

    pub fn field(&self, field: Field) -> String {
        let state = self.state();
        match field {
            Field::FirstName => state.first_name.clone(),
            Field::LastName => state.last_name.clone(),
            Field::Email => state.email.clone(),
            Field::Message => state.message.clone(),
        }
    }

    /// Validates a candidate résumé before accepting it. On rejection the
    /// previously selected file (if any) stays in place.
    pub fn select_file(&self, file: ResumeFile) -> Result<(), FormError> {
        if file.len() > MAX_RESUME_BYTES {
            self.notifier.notify(
                "Error",
                "File must be 5 MB or smaller.",
                NoticeKind::Error,
            );
            return Err(FormError::FileTooLarge { size: file.len() });
        }
        if !ALLOWED_MEDIA_TYPES.contains(&file.media_type.as_str()) {
            self.notifier.notify(
                "Error",
                "Please upload a PDF, DOC, or DOCX file.",
                NoticeKind::Error,
            );
            return Err(FormError::UnsupportedFileType {
                media_type: file.media_type.clone(),
            });
        }
        self.state().resume = Some(file);
        Ok(())
    }

    pub fn clear_file(&self) {
        self.state().resume = None;
    }

    /// Filename of the currently held résumé, if one is selected.
    pub fn selected_file(&self) -> Option<String> {
        self.state().resume.as_ref().map(|f| f.filename.clone())
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Runs one submission attempt: validate, encode the résumé if one is
    /// held, call the gateway, and map the outcome to a notification.
    ///
    /// On success all fields and the file are cleared; on any failure they
    /// are left intact so the user can resubmit without re-entering data.
    pub async fn submit(&self) -> Result<(), FormError> {
        if self.submitting.swap(true, Ordering::SeqCst) {
            return Err(FormError::SubmissionInFlight);
        }
        let result = self.run_submission().await;
        self.submitting.store(false, Ordering::SeqCst);
        result
    }

    async fn run_submission(&self) -> Result<(), FormError> {
        let snapshot = self.state().clone();

        let required = [
            &snapshot.first_name,
            &snapshot.last_name,
            &snapshot.email,
            &snapshot.message,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            self.notifier
                .notify("Error", "Please fill in all fields.", NoticeKind::Error);
            return Err(FormError::MissingFields);
        }

        if !is_valid_email(snapshot.email.trim()) {
            self.notifier.notify(
                "Error",
                "Please enter a valid email address.",
                NoticeKind::Error,
            );
            return Err(FormError::InvalidEmail);
        }

        let attachment = match &snapshot.resume {
            Some(file) => {
                debug!(
                    "Encoding resume for upload: {} ({}, {} bytes)",
                    file.filename,
                    file.media_type,
                    file.len()
                );
                match file.read_base64().await {
                    Ok(encoded) => Some(SubmissionAttachment {
                        filename: file.filename.clone(),
                        media_type: file.media_type.clone(),
                        encoded_content: encoded,
                    }),
                    Err(e) => {
                        self.notifier.notify(
                            "Error",
                            "Failed to read the selected file. Please try again.",
                            NoticeKind::Error,
                        );
                        return Err(e);
                    }
                }
            }
            None => None,
        };

        let request = SubmissionRequest {
            first_name: snapshot.first_name,
            last_name: snapshot.last_name,
            email: snapshot.email,
            message: snapshot.message,
            attachment,
        };

        let result = match self.gateway.deliver(&request).await {
            Ok(result) => result,
            Err(e) => {
                self.notifier
                    .notify("Error", GENERIC_FAILURE, NoticeKind::Error);
                return Err(e);
            }
        };

        if result.succeeded {
            *self.state() = FormState::default();
            self.notifier.notify(
                "Message Sent!",
                "Thank you for your message! We will get back to you within 24 hours.",
                NoticeKind::Success,
            );
            Ok(())
        } else {
            let reason = result
                .failure_reason
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            self.notifier.notify("Error", &reason, NoticeKind::Error);
            Err(FormError::DeliveryFailed(reason))
        }
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().expect("form state lock poisoned")
    }
}

/// Mirrors the form's `^[^\s@]+@[^\s@]+\.[^\s@]+$` email check: no
/// whitespace anywhere, exactly one `@` with a non-empty local part, and
/// a dot in the domain with at least one character on each side.
fn is_valid_email(email: &str) -> bool {
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
