use axum::{extract::State, Json};
use tracing::{info, warn};

use crate::contact::{validate_submission, SubmissionRequest, SubmissionResponse};
use crate::email::templates;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/contact
///
/// Validates one submission, renders the agency notification and the
/// applicant confirmation, and dispatches both through the mailer.
/// Sends are sequential, agency first; the confirmation is attempted
/// even when the agency send fails, and the overall result is success
/// only if both were accepted.
pub async fn handle_submission(
    State(state): State<AppState>,
    Json(req): Json<SubmissionRequest>,
) -> Result<Json<SubmissionResponse>, AppError> {
    info!(
        "Contact form submission from {} <{}> (message: \"{}\", attachment: {})",
        req.full_name(),
        req.email.trim(),
        log_preview(&req.message),
        req.attachment
            .as_ref()
            .map(|a| format!("{} ({})", a.filename, a.media_type))
            .unwrap_or_else(|| "none".to_string()),
    );

    validate_submission(&req)?;

    let agency = templates::agency_notification(&req, &state.config);
    let confirmation = templates::applicant_confirmation(&req, &state.config);

    let agency_sent = state.mailer.send(&agency).await;
    if let Err(e) = &agency_sent {
        warn!("Agency notification failed: {e}");
    }
    let applicant_sent = state.mailer.send(&confirmation).await;
    if let Err(e) = &applicant_sent {
        warn!("Applicant confirmation failed: {e}");
    }

    match (agency_sent, applicant_sent) {
        (Ok(agency_receipt), Ok(applicant_receipt)) => {
            info!(
                "Emails dispatched: agency={}, applicant={}",
                agency_receipt.id, applicant_receipt.id
            );
            Ok(Json(SubmissionResponse {
                success: true,
                error: None,
                agency_email_id: Some(agency_receipt.id),
                applicant_email_id: Some(applicant_receipt.id),
            }))
        }
        (agency_result, applicant_result) => {
            let reason = agency_result
                .err()
                .or_else(|| applicant_result.err())
                .map(|e| e.to_string())
                .unwrap_or_else(|| "Failed to send message. Please try again.".to_string());
            Err(AppError::Dispatch(reason))
        }
    }
}

/// Message excerpt for the request log; never logs attachment content.
fn log_preview(message: &str) -> String {
    const LIMIT: usize = 50;
    if message.chars().count() <= LIMIT {
        return message.to_string();
    }
    let truncated: String = message.chars().take(LIMIT).collect();
    format!("{truncated}...")
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, HeaderName, Method, Request, StatusCode};
    use base64::Engine;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::email::{Mailer, MailerError, OutgoingEmail, SendReceipt};
    use crate::routes::build_router;
    use crate::state::AppState;

    enum MailerMode {
        Accept,
        FailAll(String),
        FailFirst(String),
    }

    struct MockMailer {
        sent: Mutex<Vec<OutgoingEmail>>,
        mode: MailerMode,
        calls: AtomicUsize,
    }

    impl MockMailer {
        fn new(mode: MailerMode) -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                mode,
                calls: AtomicUsize::new(0),
            })
        }

        fn sent(&self) -> Vec<OutgoingEmail> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for MockMailer {
        async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt, MailerError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            self.sent.lock().unwrap().push(email.clone());
            match &self.mode {
                MailerMode::Accept => Ok(SendReceipt {
                    id: format!("email-{n}"),
                }),
                MailerMode::FailAll(message) => Err(MailerError::Api {
                    status: 422,
                    message: message.clone(),
                }),
                MailerMode::FailFirst(message) if n == 0 => Err(MailerError::Api {
                    status: 422,
                    message: message.clone(),
                }),
                MailerMode::FailFirst(_) => Ok(SendReceipt {
                    id: format!("email-{n}"),
                }),
            }
        }
    }

    fn app(mailer: Arc<MockMailer>) -> axum::Router {
        build_router(AppState {
            mailer,
            config: Config {
                resend_api_key: "re_test".to_string(),
                agency_email: "agency@example.com".to_string(),
                from_address: "Rock Solid Manpower <noreply@example.com>".to_string(),
                port: 8080,
                rust_log: "info".to_string(),
            },
        })
    }

    fn submission() -> Value {
        json!({
            "firstName": "Maria",
            "lastName": "Santos",
            "email": "maria@example.com",
            "message": "Interested in overseas opportunities."
        })
    }

    fn post_json(body: &Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/v1/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_valid_submission_sends_both_emails() {
        let mailer = MockMailer::new(MailerMode::Accept);
        let response = app(Arc::clone(&mailer))
            .oneshot(post_json(&submission()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["agencyEmailId"], json!("email-0"));
        assert_eq!(body["applicantEmailId"], json!("email-1"));

        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, vec!["agency@example.com".to_string()]);
        assert!(sent[0].subject.contains("Maria Santos"));
        assert_eq!(sent[1].to, vec!["maria@example.com".to_string()]);
    }

    #[tokio::test]
    async fn test_attachment_reaches_the_agency_email() {
        let mailer = MockMailer::new(MailerMode::Accept);
        let content = base64::engine::general_purpose::STANDARD.encode(b"resume bytes");
        let mut body = submission();
        body["attachment"] = json!({
            "filename": "maria-cv.pdf",
            "mediaType": "application/pdf",
            "encodedContent": content,
        });

        let response = app(Arc::clone(&mailer))
            .oneshot(post_json(&body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let sent = mailer.sent();
        assert_eq!(sent[0].attachments.len(), 1);
        assert_eq!(sent[0].attachments[0].filename, "maria-cv.pdf");
        assert_eq!(sent[0].attachments[0].content, content);
        assert!(sent[1].attachments.is_empty());
    }

    #[tokio::test]
    async fn test_full_size_attachment_clears_the_body_limit() {
        // 5 MiB of raw bytes is ~6.8 MB of JSON once base64-encoded;
        // the route's body limit must still let it through.
        let mailer = MockMailer::new(MailerMode::Accept);
        let content = base64::engine::general_purpose::STANDARD
            .encode(vec![0u8; crate::contact::MAX_ATTACHMENT_BYTES]);
        let mut body = submission();
        body["attachment"] = json!({
            "filename": "maria-cv.pdf",
            "mediaType": "application/pdf",
            "encodedContent": content,
        });

        let response = app(Arc::clone(&mailer))
            .oneshot(post_json(&body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(mailer.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_blank_field_rejected_before_dispatch() {
        let mailer = MockMailer::new(MailerMode::Accept);
        let mut body = submission();
        body["message"] = json!("   ");

        let response = app(Arc::clone(&mailer))
            .oneshot(post_json(&body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_email_rejected_before_dispatch() {
        let mailer = MockMailer::new(MailerMode::Accept);
        let mut body = submission();
        body["email"] = json!("not-an-email");

        let response = app(Arc::clone(&mailer))
            .oneshot(post_json(&body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces_its_message() {
        let mailer = MockMailer::new(MailerMode::FailAll("quota exceeded".to_string()));
        let response = app(Arc::clone(&mailer))
            .oneshot(post_json(&submission()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert!(body["error"].as_str().unwrap().contains("quota exceeded"));
        // Both sends were still attempted.
        assert_eq!(mailer.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_partial_success_is_reported_as_failure() {
        let mailer = MockMailer::new(MailerMode::FailFirst("domain not verified".to_string()));
        let response = app(Arc::clone(&mailer))
            .oneshot(post_json(&submission()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("domain not verified"));
        assert_eq!(mailer.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_client_error() {
        let mailer = MockMailer::new(MailerMode::Accept);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app(Arc::clone(&mailer)).oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_non_post_method_is_405() {
        let mailer = MockMailer::new(MailerMode::Accept);
        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/v1/contact")
            .body(Body::empty())
            .unwrap();

        let response = app(mailer).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_preflight_is_answered_with_cors_headers() {
        let mailer = MockMailer::new(MailerMode::Accept);
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/v1/contact")
            .header(header::ORIGIN, "https://rocksolidmanpower.online")
            .header(
                HeaderName::from_static("access-control-request-method"),
                "POST",
            )
            .body(Body::empty())
            .unwrap();

        let response = app(Arc::clone(&mailer)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
        assert!(mailer.sent().is_empty());
    }
}
