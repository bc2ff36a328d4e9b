/// Credential gate and object reads for the storage provider
///
/// The S3 client is built lazily from explicit environment credentials on
/// first use and shared by every later call. Validation failures construct
/// nothing, so the next call starts over with a fresh look at the
/// environment.
use std::env;
use std::fmt;
use std::sync::Arc;

use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::Client;
use bytes::Bytes;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::error::{MediaError, Result};

/// Environment variables the storage client requires, in the order they are
/// checked and reported.
pub const REQUIRED_ENVIRONMENT: [&str; 3] =
    ["AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY", "S3_REGION"];

/// Optional custom endpoint, for S3-compatible storage like MinIO.
pub const ENDPOINT_VAR: &str = "S3_ENDPOINT";

/// Optional switch to path-style bucket addressing.
pub const PATH_STYLE_VAR: &str = "S3_PATH_STYLE";

/// Credentials and addressing read from the environment.
#[derive(Clone)]
pub struct StorageSettings {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub endpoint: Option<String>,
    pub path_style: bool,
}

impl StorageSettings {
    /// Read and validate the required environment, collecting every missing
    /// name into one error. An empty value counts as missing.
    pub fn from_env() -> Result<Self> {
        let mut missing = Vec::new();
        for name in REQUIRED_ENVIRONMENT {
            match env::var(name) {
                Ok(value) if !value.is_empty() => {}
                _ => missing.push(name),
            }
        }

        if !missing.is_empty() {
            return Err(MediaError::MissingEnvironment {
                names: missing.join(", "),
            });
        }

        Ok(Self {
            access_key_id: env::var("AWS_ACCESS_KEY_ID").unwrap_or_default(),
            secret_access_key: env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_default(),
            region: env::var("S3_REGION").unwrap_or_default(),
            endpoint: env::var(ENDPOINT_VAR).ok().filter(|value| !value.is_empty()),
            path_style: matches!(env::var(PATH_STYLE_VAR).as_deref(), Ok("true") | Ok("1")),
        })
    }
}

impl fmt::Debug for StorageSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageSettings")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[redacted]")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("path_style", &self.path_style)
            .finish()
    }
}

/// Lazily-initialized S3 client shared by every storage read.
pub struct ObjectStore {
    client: OnceCell<Arc<Client>>,
}

impl ObjectStore {
    /// Create a store with no client yet; the handle is built on first use.
    pub fn new() -> Self {
        Self {
            client: OnceCell::new(),
        }
    }

    /// Create a store around an already-built client, for wiring done at
    /// process startup and for tests.
    pub fn with_client(client: Arc<Client>) -> Self {
        Self {
            client: OnceCell::new_with(Some(client)),
        }
    }

    /// Drop the cached handle so the next call rebuilds it.
    pub fn reset(&mut self) {
        self.client = OnceCell::new();
    }

    /// Get the shared client, validating the environment and constructing
    /// the handle on first use. Concurrent first calls construct exactly one
    /// client; a failed construction leaves the store empty.
    pub async fn ensure_client(&self) -> Result<Arc<Client>> {
        self.client
            .get_or_try_init(|| async {
                let settings = StorageSettings::from_env()?;
                Ok(Arc::new(build_client(&settings).await))
            })
            .await
            .map(Arc::clone)
    }

    /// Read one object and aggregate its body into memory.
    pub async fn read_object(&self, bucket: &str, key: &str) -> Result<Bytes> {
        let client = self.ensure_client().await?;

        let response = client.get_object().bucket(bucket).key(key).send().await?;
        let body = response.body.collect().await?;

        debug!(bucket = %bucket, key = %key, "read object from storage");

        Ok(body.into_bytes())
    }
}

impl Default for ObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the SDK client from explicit credentials; the ambient AWS
/// credential chain is never consulted.
async fn build_client(settings: &StorageSettings) -> Client {
    let credentials = Credentials::new(
        &settings.access_key_id,
        &settings.secret_access_key,
        None,
        None,
        "media-facade-env",
    );

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(settings.region.clone()))
        .credentials_provider(credentials);

    if let Some(endpoint) = &settings.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    let shared_config = loader.load().await;

    let mut builder = aws_sdk_s3::config::Builder::from(&shared_config);
    if settings.path_style {
        builder = builder.force_path_style(true);
    }

    info!(region = %settings.region, "initialized storage client");

    Client::from_conf(builder.build())
}
