/// REST client for the Cloudinary upload, admin and delivery APIs
///
/// Covers account configuration (including the `CLOUDINARY_URL` convention),
/// delivery URL and image tag building, request signing, uploads, deletion,
/// resource metadata and listing, browser-direct upload forms, and the
/// browser-side configuration snippet.
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod options;
pub mod signing;
pub mod urls;

pub use client::CloudinaryClient;
pub use config::CdnConfig;
pub use errors::{CdnError, Result};
pub use models::{
    DestroyResponse, DirectUploadForm, ResourceDetails, ResourceList, UploadResponse,
};
pub use options::{
    DestroyOptions, ImageOptions, ListOptions, ResourceOptions, Transformation, UploadOptions,
    UrlOptions,
};
pub use signing::sign_params;
pub use urls::{image_tag, url_for};
