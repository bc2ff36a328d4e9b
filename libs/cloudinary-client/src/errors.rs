use thiserror::Error;

/// Errors returned by the Cloudinary client.
#[derive(Debug, Error)]
pub enum CdnError {
    /// Account configuration is missing or malformed
    #[error("cloudinary configuration error: {0}")]
    Config(String),

    /// Transport-level failure talking to the API
    #[error("cloudinary request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("cloudinary api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A local upload source could not be read
    #[error("failed to read upload source: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CdnError>;
