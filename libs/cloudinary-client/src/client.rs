use std::collections::BTreeMap;
use std::path::Path;
use std::sync::RwLock;

use chrono::Utc;
use reqwest::multipart;
use tracing::{debug, info};

use crate::config::CdnConfig;
use crate::errors::{CdnError, Result};
use crate::models::{
    ApiErrorEnvelope, DestroyResponse, DirectUploadForm, ResourceDetails, ResourceList,
    UploadResponse,
};
use crate::options::{
    DestroyOptions, ImageOptions, ListOptions, ResourceOptions, UploadOptions, UrlOptions,
};
use crate::signing::sign_params;
use crate::urls;

/// Sources the upload endpoint fetches by reference instead of receiving by
/// content.
const REMOTE_SOURCE_PREFIXES: &[&str] = &["http:", "https:", "s3:", "gs:", "ftp:", "data:"];

/// Client for the Cloudinary upload and admin APIs.
///
/// The account configuration sits behind a lock so `configure` updates are
/// visible to every later call on the same client.
pub struct CloudinaryClient {
    http_client: reqwest::Client,
    config: RwLock<CdnConfig>,
}

impl CloudinaryClient {
    /// Create a client from explicit account settings.
    pub fn new(config: CdnConfig) -> Self {
        info!(cloud_name = %config.cloud_name, "initialized cloudinary client");

        Self {
            http_client: reqwest::Client::new(),
            config: RwLock::new(config),
        }
    }

    /// Create a client from the `CLOUDINARY_URL` environment variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(CdnConfig::from_env()?))
    }

    /// Snapshot of the current account settings.
    pub fn config(&self) -> CdnConfig {
        self.config.read().expect("config lock poisoned").clone()
    }

    /// Update one account setting and return the resulting snapshot.
    pub fn configure(&self, name: &str, value: &str) -> Result<CdnConfig> {
        let mut config = self.config.write().expect("config lock poisoned");
        config.set(name, value)?;
        Ok(config.clone())
    }

    /// Build a delivery URL for a stored asset.
    pub fn url(&self, public_id: &str, options: &UrlOptions) -> String {
        urls::url_for(&self.config(), public_id, options)
    }

    /// Render an `<img>` tag for a stored asset.
    pub fn image_tag(&self, source: &str, options: &ImageOptions) -> String {
        urls::image_tag(&self.config(), source, options)
    }

    /// Emit the `<script>` block that configures the browser-side library.
    pub fn js_config(&self) -> String {
        let params: serde_json::Map<String, serde_json::Value> = self
            .config()
            .client_params()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();

        format!(
            "<script type='text/javascript'>\n$.cloudinary.config({});\n</script>\n",
            serde_json::Value::Object(params)
        )
    }

    /// Describe the form a browser posts for a direct-to-CDN upload.
    ///
    /// The returned fields are signed, so they must be rendered into the
    /// page as-is; `callback_url` receives the vendor's cross-frame response
    /// document.
    pub fn direct_upload(&self, callback_url: &str, options: &UploadOptions) -> DirectUploadForm {
        let config = self.config();

        let mut fields = options.to_params();
        fields.insert("callback".to_string(), callback_url.to_string());
        fields.insert("timestamp".to_string(), Utc::now().timestamp().to_string());

        let signature = sign_params(&fields, &config.api_secret);
        fields.insert("signature".to_string(), signature);
        fields.insert("api_key".to_string(), config.api_key.clone());

        DirectUploadForm {
            action: upload_api_url(&config, options.resource_type(), "upload"),
            method: "post".to_string(),
            fields,
        }
    }

    /// Upload a local file or a remote reference (`http(s):`, `s3:`, `gs:`,
    /// `ftp:` and `data:` sources are fetched by the vendor).
    pub async fn upload(&self, file: &str, options: &UploadOptions) -> Result<UploadResponse> {
        let config = self.config();

        let mut params = options.to_params();
        params.insert("timestamp".to_string(), Utc::now().timestamp().to_string());
        let signature = sign_params(&params, &config.api_secret);

        let mut form = multipart::Form::new();
        for (name, value) in &params {
            form = form.text(name.clone(), value.clone());
        }
        form = form
            .text("signature", signature)
            .text("api_key", config.api_key.clone());

        form = if is_remote_source(file) {
            form.text("file", file.to_string())
        } else {
            let contents = tokio::fs::read(file).await?;
            let file_name = Path::new(file)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "file".to_string());
            form.part("file", multipart::Part::bytes(contents).file_name(file_name))
        };

        debug!(file = %file, resource_type = %options.resource_type(), "uploading asset");

        let url = upload_api_url(&config, options.resource_type(), "upload");
        let response = self.http_client.post(&url).multipart(form).send().await?;

        parse_response(response).await
    }

    /// Delete a stored asset.
    pub async fn destroy(
        &self,
        public_id: &str,
        options: &DestroyOptions,
    ) -> Result<DestroyResponse> {
        let config = self.config();

        let mut params = BTreeMap::new();
        params.insert("public_id".to_string(), public_id.to_string());
        if let Some(invalidate) = options.invalidate {
            params.insert("invalidate".to_string(), invalidate.to_string());
        }
        params.insert("timestamp".to_string(), Utc::now().timestamp().to_string());

        let signature = sign_params(&params, &config.api_secret);
        params.insert("signature".to_string(), signature);
        params.insert("api_key".to_string(), config.api_key.clone());

        debug!(public_id = %public_id, "destroying asset");

        let url = upload_api_url(&config, options.resource_type(), "destroy");
        let response = self.http_client.post(&url).form(&params).send().await?;

        parse_response(response).await
    }

    /// Fetch stored metadata for one asset.
    pub async fn resource(
        &self,
        public_id: &str,
        options: &ResourceOptions,
    ) -> Result<ResourceDetails> {
        let config = self.config();

        let url = admin_api_url(
            &config,
            &format!(
                "resources/{}/{}/{}",
                options.resource_type(),
                options.delivery_type(),
                public_id
            ),
        );

        let response = self
            .http_client
            .get(&url)
            .basic_auth(&config.api_key, Some(&config.api_secret))
            .query(&options.query_params())
            .send()
            .await?;

        parse_response(response).await
    }

    /// Page through stored assets.
    pub async fn resources(&self, options: &ListOptions) -> Result<ResourceList> {
        let config = self.config();

        let mut path = format!("resources/{}", options.resource_type());
        if let Some(delivery_type) = &options.delivery_type {
            path.push('/');
            path.push_str(delivery_type);
        }

        let response = self
            .http_client
            .get(admin_api_url(&config, &path))
            .basic_auth(&config.api_key, Some(&config.api_secret))
            .query(&options.query_params())
            .send()
            .await?;

        parse_response(response).await
    }
}

fn upload_api_url(config: &CdnConfig, resource_type: &str, action: &str) -> String {
    format!(
        "{}/v1_1/{}/{}/{}",
        config.upload_prefix, config.cloud_name, resource_type, action
    )
}

fn admin_api_url(config: &CdnConfig, path: &str) -> String {
    format!("{}/v1_1/{}/{}", config.upload_prefix, config.cloud_name, path)
}

fn is_remote_source(file: &str) -> bool {
    REMOTE_SOURCE_PREFIXES
        .iter()
        .any(|prefix| file.starts_with(prefix))
}

/// Decode a success payload or map the API's error envelope onto
/// [`CdnError::Api`].
async fn parse_response<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json::<T>().await?)
    } else {
        let message = match response.json::<ApiErrorEnvelope>().await {
            Ok(envelope) => envelope.error.message,
            Err(_) => format!("http status {status}"),
        };
        Err(CdnError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_client() -> CloudinaryClient {
        CloudinaryClient::new(CdnConfig::new("demo", "key123", "secret"))
    }

    #[test]
    fn test_js_config_emits_whitelisted_params() {
        let client = create_test_client();

        assert_eq!(
            client.js_config(),
            "<script type='text/javascript'>\n$.cloudinary.config({\"api_key\":\"key123\",\"cloud_name\":\"demo\"});\n</script>\n"
        );
    }

    #[test]
    fn test_configure_updates_later_urls() {
        let client = create_test_client();

        let updated = client.configure("cloud_name", "other").unwrap();
        assert_eq!(updated.cloud_name, "other");

        let url = client.url("sample", &UrlOptions::default());
        assert_eq!(url, "https://res.cloudinary.com/other/image/upload/sample");
    }

    #[test]
    fn test_configure_rejects_unknown_setting() {
        let client = create_test_client();
        assert!(client.configure("shard_count", "4").is_err());
    }

    #[test]
    fn test_direct_upload_signs_fields() {
        let client = create_test_client();
        let options = UploadOptions {
            public_id: Some("sample".to_string()),
            ..Default::default()
        };

        let form = client.direct_upload("https://app.example.com/cb", &options);

        assert_eq!(form.action, "https://api.cloudinary.com/v1_1/demo/image/upload");
        assert_eq!(form.method, "post");
        assert_eq!(
            form.fields.get("callback"),
            Some(&"https://app.example.com/cb".to_string())
        );
        assert_eq!(form.fields.get("api_key"), Some(&"key123".to_string()));

        // The signature must cover everything except itself and the api key.
        let mut signed: BTreeMap<String, String> = form.fields.clone();
        signed.remove("signature");
        signed.remove("api_key");
        assert_eq!(
            form.fields.get("signature"),
            Some(&sign_params(&signed, "secret"))
        );
    }

    #[test]
    fn test_remote_source_detection() {
        assert!(is_remote_source("https://example.com/a.png"));
        assert!(is_remote_source("http://example.com/a.png"));
        assert!(is_remote_source("s3://bucket/key.png"));
        assert!(is_remote_source("gs://bucket/key.png"));
        assert!(is_remote_source("data:image/png;base64,AAAA"));

        assert!(!is_remote_source("photo.png"));
        assert!(!is_remote_source("/tmp/photo.png"));
    }

    #[test]
    fn test_api_urls() {
        let config = CdnConfig::new("demo", "key", "secret");

        assert_eq!(
            upload_api_url(&config, "image", "upload"),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
        assert_eq!(
            upload_api_url(&config, "video", "destroy"),
            "https://api.cloudinary.com/v1_1/demo/video/destroy"
        );
        assert_eq!(
            admin_api_url(&config, "resources/image"),
            "https://api.cloudinary.com/v1_1/demo/resources/image"
        );
    }
}
