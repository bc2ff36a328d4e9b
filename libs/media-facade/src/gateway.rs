use std::sync::Arc;

use async_trait::async_trait;
use cloudinary_client::models::{
    DestroyResponse, DirectUploadForm, ResourceDetails, ResourceList, UploadResponse,
};
use cloudinary_client::options::{
    DestroyOptions, ImageOptions, ListOptions, ResourceOptions, UploadOptions, UrlOptions,
};
use cloudinary_client::{CdnConfig, CdnError, CloudinaryClient};

/// Seam between the facade and the CDN vendor.
///
/// The facade only talks to the vendor through this trait, so tests swap in
/// a mock and the rest of the system never notices which provider is wired
/// underneath.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CdnGateway: Send + Sync {
    /// Build a delivery URL for a stored asset.
    fn url(&self, public_id: &str, options: &UrlOptions) -> String;

    /// Render an `<img>` tag for a stored asset.
    fn image_tag(&self, source: &str, options: &ImageOptions) -> String;

    /// Update one account setting, returning the resulting snapshot.
    fn configure(&self, name: &str, value: &str) -> Result<CdnConfig, CdnError>;

    /// Emit the `<script>` block that configures the browser-side library.
    fn js_config(&self) -> String;

    /// Describe the signed form a browser posts for a direct upload.
    fn direct_upload(&self, callback_url: &str, options: &UploadOptions) -> DirectUploadForm;

    /// Upload a local file or remote reference.
    async fn upload(&self, file: &str, options: &UploadOptions)
        -> Result<UploadResponse, CdnError>;

    /// Delete a stored asset.
    async fn destroy(
        &self,
        public_id: &str,
        options: &DestroyOptions,
    ) -> Result<DestroyResponse, CdnError>;

    /// Fetch stored metadata for one asset.
    async fn resource(
        &self,
        public_id: &str,
        options: &ResourceOptions,
    ) -> Result<ResourceDetails, CdnError>;

    /// Page through stored assets.
    async fn resources(&self, options: &ListOptions) -> Result<ResourceList, CdnError>;
}

/// Shared gateway handle the facade holds.
pub type DynCdnGateway = Arc<dyn CdnGateway>;

#[async_trait]
impl CdnGateway for CloudinaryClient {
    fn url(&self, public_id: &str, options: &UrlOptions) -> String {
        CloudinaryClient::url(self, public_id, options)
    }

    fn image_tag(&self, source: &str, options: &ImageOptions) -> String {
        CloudinaryClient::image_tag(self, source, options)
    }

    fn configure(&self, name: &str, value: &str) -> Result<CdnConfig, CdnError> {
        CloudinaryClient::configure(self, name, value)
    }

    fn js_config(&self) -> String {
        CloudinaryClient::js_config(self)
    }

    fn direct_upload(&self, callback_url: &str, options: &UploadOptions) -> DirectUploadForm {
        CloudinaryClient::direct_upload(self, callback_url, options)
    }

    async fn upload(
        &self,
        file: &str,
        options: &UploadOptions,
    ) -> Result<UploadResponse, CdnError> {
        CloudinaryClient::upload(self, file, options).await
    }

    async fn destroy(
        &self,
        public_id: &str,
        options: &DestroyOptions,
    ) -> Result<DestroyResponse, CdnError> {
        CloudinaryClient::destroy(self, public_id, options).await
    }

    async fn resource(
        &self,
        public_id: &str,
        options: &ResourceOptions,
    ) -> Result<ResourceDetails, CdnError> {
        CloudinaryClient::resource(self, public_id, options).await
    }

    async fn resources(&self, options: &ListOptions) -> Result<ResourceList, CdnError> {
        CloudinaryClient::resources(self, options).await
    }
}
