use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use thiserror::Error;

use cloudinary_client::CdnError;

/// Errors surfaced by the media facade.
///
/// Provider failures are passed through untranslated; only environment
/// validation and body aggregation have messages of their own.
#[derive(Debug, Error)]
pub enum MediaError {
    /// Required storage credentials are absent from the environment
    #[error("the following required environment values were not set: {names}")]
    MissingEnvironment { names: String },

    /// The CDN provider rejected or failed a delegated call
    #[error(transparent)]
    Cdn(#[from] CdnError),

    /// The storage provider rejected or failed an object read
    #[error(transparent)]
    Storage(#[from] SdkError<GetObjectError>),

    /// The object body stream could not be aggregated
    #[error("failed to read object body: {0}")]
    ObjectBody(#[from] aws_smithy_types::byte_stream::error::Error),
}

pub type Result<T> = std::result::Result<T, MediaError>;
