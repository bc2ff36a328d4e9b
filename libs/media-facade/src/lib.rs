//! Facade over the media CDN provider and S3-compatible object storage
//!
//! This library fronts two providers behind one surface:
//! - Cloudinary for delivery URLs and image tags, uploads, deletion,
//!   resource metadata and browser-direct upload forms, reached through the
//!   swappable [`gateway::CdnGateway`] seam
//! - S3-compatible object storage for raw object reads, with credentials
//!   validated lazily on first use and the client cached afterwards
//!
//! Uploads come back stamped with a composite identifier
//! (`<cdn id>#<uploaded reference>`) that the page embed script reads to
//! point images at storage first and fall back to the CDN copy.
//!
//! # Example
//!
//! ```no_run
//! use media_facade::options::UrlOptions;
//! use media_facade::MediaFacade;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // CLOUDINARY_URL configures the CDN side; AWS_ACCESS_KEY_ID,
//!     // AWS_SECRET_ACCESS_KEY and S3_REGION are read on the first
//!     // storage call.
//!     let facade = MediaFacade::from_env()?;
//!
//!     let url = facade.url("abc123", &UrlOptions::default());
//!     println!("{url}");
//!
//!     let photo = facade.read_object("media", "uploads/photo.png").await?;
//!     println!("{} bytes", photo.len());
//!     Ok(())
//! }
//! ```

pub mod composite;
mod embed;
pub mod error;
pub mod facade;
pub mod gateway;
pub mod storage;

pub use composite::{CompositeId, ParseCompositeIdError, COMPOSITE_SEPARATOR};
pub use error::{MediaError, Result};
pub use facade::MediaFacade;
pub use gateway::{CdnGateway, DynCdnGateway};
pub use storage::{ObjectStore, StorageSettings, REQUIRED_ENVIRONMENT};

pub use cloudinary_client::models;
pub use cloudinary_client::options;
pub use cloudinary_client::{CdnConfig, CdnError, CloudinaryClient};
