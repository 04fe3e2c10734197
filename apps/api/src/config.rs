use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the Resend transactional email provider.
    pub resend_api_key: String,
    /// Inbox that receives the agency notification for each submission.
    pub agency_email: String,
    /// Sender identity for both outgoing emails. Must belong to a domain
    /// verified with Resend.
    pub from_address: String,
    pub port: u16,
    pub rust_log: String,
}

const DEFAULT_FROM_ADDRESS: &str = "Rock Solid Manpower <noreply@rocksolidmanpower.online>";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            resend_api_key: require_env("RESEND_API_KEY")?,
            agency_email: require_env("AGENCY_EMAIL")?,
            from_address: std::env::var("FROM_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
