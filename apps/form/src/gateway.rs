use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FormError;

/// Payload for one submission, as the gateway expects it on the wire.
/// Declared here independently of the server crate, the same way the two
/// ends of the wire each declare the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<SubmissionAttachment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionAttachment {
    pub filename: String,
    pub media_type: String,
    /// Base64 of the original file bytes.
    pub encoded_content: String,
}

/// What the gateway reported for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub succeeded: bool,
    pub failure_reason: Option<String>,
}

/// Wire shape of the gateway's JSON response. The provider message ids
/// that ride along on success are of no use to the form and are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GatewayResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// One request/response call to the delivery gateway.
///
/// `Err` means the gateway could not be reached at all; an unsuccessful
/// [`SubmissionResult`] means it answered and reported a delivery failure.
#[async_trait]
pub trait DeliveryGateway: Send + Sync {
    async fn deliver(&self, request: &SubmissionRequest) -> Result<SubmissionResult, FormError>;
}

/// Production gateway client: POSTs the submission as JSON to the
/// configured endpoint.
pub struct HttpDeliveryGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpDeliveryGateway {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl DeliveryGateway for HttpDeliveryGateway {
    async fn deliver(&self, request: &SubmissionRequest) -> Result<SubmissionResult, FormError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| FormError::GatewayUnreachable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FormError::GatewayUnreachable(e.to_string()))?;
        debug!("Gateway answered {status}");

        Ok(interpret_response(status, &body))
    }
}

/// Maps a gateway HTTP response onto a [`SubmissionResult`]. A body that
/// does not parse as the expected shape is treated by status alone.
fn interpret_response(status: StatusCode, body: &str) -> SubmissionResult {
    match serde_json::from_str::<GatewayResponse>(body) {
        Ok(parsed) => SubmissionResult {
            succeeded: parsed.success && status.is_success(),
            failure_reason: parsed.error,
        },
        Err(_) if status.is_success() => SubmissionResult {
            succeeded: true,
            failure_reason: None,
        },
        Err(_) => SubmissionResult {
            succeeded: false,
            failure_reason: Some(format!("gateway returned status {status}")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body() {
        let result = interpret_response(
            StatusCode::OK,
            r#"{"success":true,"agencyEmailId":"a","applicantEmailId":"b"}"#,
        );
        assert!(result.succeeded);
        assert!(result.failure_reason.is_none());
    }

    #[test]
    fn test_failure_body_carries_reason() {
        let result = interpret_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"success":false,"error":"quota exceeded"}"#,
        );
        assert!(!result.succeeded);
        assert_eq!(result.failure_reason.as_deref(), Some("quota exceeded"));
    }

    #[test]
    fn test_unparseable_error_body_falls_back_to_status() {
        let result = interpret_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert!(!result.succeeded);
        assert!(result
            .failure_reason
            .unwrap()
            .contains("502"));
    }

    #[test]
    fn test_success_status_with_mismatched_body_still_fails_closed() {
        // success:true in the body but a 500 status: trust the status.
        let result = interpret_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"success":true}"#,
        );
        assert!(!result.succeeded);
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = SubmissionRequest {
            first_name: "Maria".to_string(),
            last_name: "Santos".to_string(),
            email: "maria@example.com".to_string(),
            message: "Hello".to_string(),
            attachment: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["firstName"], "Maria");
        assert!(json.get("attachment").is_none());
    }
}
