use std::sync::Arc;

use crate::config::Config;
use crate::email::Mailer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable email transport. Production uses `ResendMailer`; tests
    /// substitute a recording mock.
    pub mailer: Arc<dyn Mailer>,
    pub config: Config,
}
