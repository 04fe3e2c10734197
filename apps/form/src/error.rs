use thiserror::Error;

/// Everything that can end one submission attempt early. All variants are
/// terminal for that attempt; the user corrects the input (or just tries
/// again) and resubmits — nothing here retries on its own.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("all fields must be filled in")]
    MissingFields,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("file of {size} bytes exceeds the 5 MiB limit")]
    FileTooLarge { size: u64 },

    #[error("unsupported file type: {media_type}")]
    UnsupportedFileType { media_type: String },

    #[error("failed to read file for upload: {0}")]
    EncodingFailed(#[from] std::io::Error),

    #[error("a submission is already in progress")]
    SubmissionInFlight,

    #[error("could not reach the delivery gateway: {0}")]
    GatewayUnreachable(String),

    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
}
