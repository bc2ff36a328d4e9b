use std::sync::Arc;

use bytes::Bytes;
use tracing::debug;

use cloudinary_client::models::{
    DestroyResponse, DirectUploadForm, ResourceDetails, ResourceList, UploadResponse,
};
use cloudinary_client::options::{
    DestroyOptions, ImageOptions, ListOptions, ResourceOptions, UploadOptions, UrlOptions,
};
use cloudinary_client::{CdnConfig, CloudinaryClient};

use crate::composite::CompositeId;
use crate::embed;
use crate::error::Result;
use crate::gateway::DynCdnGateway;
use crate::storage::ObjectStore;

/// Single entry point for media work: delivery URLs and tags, uploads and
/// deletions through the CDN provider, and raw object reads from storage.
///
/// The CDN side is an injected [`crate::gateway::CdnGateway`], the storage
/// side an [`ObjectStore`] that validates its environment on first use.
pub struct MediaFacade {
    cdn: DynCdnGateway,
    store: ObjectStore,
}

impl MediaFacade {
    /// Assemble a facade from an explicit gateway and store.
    pub fn new(cdn: DynCdnGateway, store: ObjectStore) -> Self {
        Self { cdn, store }
    }

    /// Assemble the production wiring: a Cloudinary client configured from
    /// `CLOUDINARY_URL` and a store that reads its credentials lazily.
    pub fn from_env() -> Result<Self> {
        let client = CloudinaryClient::from_env()?;
        Ok(Self::new(Arc::new(client), ObjectStore::new()))
    }

    /// Build a delivery URL for a stored asset.
    pub fn url(&self, public_id: &str, options: &UrlOptions) -> String {
        self.cdn.url(public_id, options)
    }

    /// Render an `<img>` tag for a stored asset.
    pub fn image_tag(&self, source: &str, options: &ImageOptions) -> String {
        self.cdn.image_tag(source, options)
    }

    /// Update one CDN account setting and return the resulting snapshot.
    pub fn configure(&self, name: &str, value: &str) -> Result<CdnConfig> {
        Ok(self.cdn.configure(name, value)?)
    }

    /// Describe the signed form a browser posts for a direct upload.
    pub fn direct_upload(&self, callback_url: &str, options: &UploadOptions) -> DirectUploadForm {
        self.cdn.direct_upload(callback_url, options)
    }

    /// Emit the page embed: the vendor configuration script followed by the
    /// fallback script that routes composite image sources.
    pub fn embed_script(&self) -> String {
        embed::embed_script(&self.cdn.js_config())
    }

    /// Upload an asset and stamp the response with a composite identifier.
    ///
    /// The returned `public_id` becomes `<cdn id>#<uploaded reference>`;
    /// every other response field is passed through untouched. The embedded
    /// reference is what the fallback script tries first when rendering.
    pub async fn upload(&self, file: &str, options: &UploadOptions) -> Result<UploadResponse> {
        debug!(file = %file, "uploading media asset");

        let mut response = self.cdn.upload(file, options).await?;
        let composite = CompositeId::new(response.public_id.clone(), file);
        response.public_id = composite.to_string();

        Ok(response)
    }

    /// Delete a stored asset.
    pub async fn destroy(
        &self,
        public_id: &str,
        options: &DestroyOptions,
    ) -> Result<DestroyResponse> {
        Ok(self.cdn.destroy(public_id, options).await?)
    }

    /// Fetch stored metadata for one asset.
    pub async fn resource(
        &self,
        public_id: &str,
        options: &ResourceOptions,
    ) -> Result<ResourceDetails> {
        Ok(self.cdn.resource(public_id, options).await?)
    }

    /// Page through stored assets.
    pub async fn resources(&self, options: &ListOptions) -> Result<ResourceList> {
        Ok(self.cdn.resources(options).await?)
    }

    /// Read one object from storage into memory.
    pub async fn read_object(&self, bucket: &str, key: &str) -> Result<Bytes> {
        self.store.read_object(bucket, key).await
    }

    /// The storage side of the facade.
    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    /// Mutable storage access, for dropping the cached client between tests.
    pub fn store_mut(&mut self) -> &mut ObjectStore {
        &mut self.store
    }
}
