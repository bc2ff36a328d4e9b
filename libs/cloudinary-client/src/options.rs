use std::collections::BTreeMap;

/// Transformation applied by the CDN at delivery time.
///
/// Serialized to the vendor's comma-joined shortcode form, so only the
/// parameters the facade actually forwards are modeled here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transformation {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Crop mode, e.g. `fill`, `fit`, `scale`.
    pub crop: Option<String>,
    /// Gravity hint for cropping, e.g. `face`, `auto`.
    pub gravity: Option<String>,
    /// Quality, a number or `auto`.
    pub quality: Option<String>,
    /// Rotation in degrees.
    pub angle: Option<i32>,
    /// Named effect, e.g. `grayscale`.
    pub effect: Option<String>,
    /// Corner radius in pixels, or `max`.
    pub radius: Option<String>,
    /// Delivery format override, e.g. `auto`.
    pub fetch_format: Option<String>,
}

impl Transformation {
    /// Serialize to the shortcode form (`c_fill,h_100,w_150`), parameters in
    /// stable alphabetical order. Empty transformations yield `None`.
    pub fn to_param_string(&self) -> Option<String> {
        let mut parts: Vec<String> = Vec::new();
        if let Some(angle) = self.angle {
            parts.push(format!("a_{angle}"));
        }
        if let Some(crop) = &self.crop {
            parts.push(format!("c_{crop}"));
        }
        if let Some(effect) = &self.effect {
            parts.push(format!("e_{effect}"));
        }
        if let Some(format) = &self.fetch_format {
            parts.push(format!("f_{format}"));
        }
        if let Some(gravity) = &self.gravity {
            parts.push(format!("g_{gravity}"));
        }
        if let Some(height) = self.height {
            parts.push(format!("h_{height}"));
        }
        if let Some(quality) = &self.quality {
            parts.push(format!("q_{quality}"));
        }
        if let Some(radius) = &self.radius {
            parts.push(format!("r_{radius}"));
        }
        if let Some(width) = self.width {
            parts.push(format!("w_{width}"));
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(","))
        }
    }
}

/// Options for building a delivery URL.
#[derive(Debug, Clone, Default)]
pub struct UrlOptions {
    pub transformation: Transformation,
    /// Asset version, rendered as a `v<n>` path segment.
    pub version: Option<u64>,
    /// `image`, `video` or `raw` (default `image`).
    pub resource_type: Option<String>,
    /// Delivery type: `upload`, `fetch`, `private`, ... (default `upload`).
    pub delivery_type: Option<String>,
    /// File format appended as an extension, e.g. `jpg`.
    pub format: Option<String>,
}

impl UrlOptions {
    pub(crate) fn resource_type(&self) -> &str {
        self.resource_type.as_deref().unwrap_or("image")
    }

    pub(crate) fn delivery_type(&self) -> &str {
        self.delivery_type.as_deref().unwrap_or("upload")
    }
}

/// Options for rendering an `<img>` tag.
#[derive(Debug, Clone, Default)]
pub struct ImageOptions {
    /// URL options for the `src` attribute.
    pub url: UrlOptions,
    pub alt: Option<String>,
    pub class: Option<String>,
    pub id: Option<String>,
    /// Extra HTML attributes rendered verbatim.
    pub attributes: BTreeMap<String, String>,
}

/// Options accepted by the upload endpoint.
///
/// Signed parameters beyond the typed ones travel through `extra` under
/// their wire names.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// Identifier to assign instead of a generated one.
    pub public_id: Option<String>,
    pub folder: Option<String>,
    pub tags: Vec<String>,
    pub overwrite: Option<bool>,
    /// Also purge cached CDN copies of an overwritten asset.
    pub invalidate: Option<bool>,
    /// `image`, `video`, `raw` or `auto` (default `image`).
    pub resource_type: Option<String>,
    /// Additional signed parameters, passed straight through.
    pub extra: BTreeMap<String, String>,
}

impl UploadOptions {
    /// Collect the signable request parameters under their wire names.
    pub(crate) fn to_params(&self) -> BTreeMap<String, String> {
        let mut params = self.extra.clone();
        if let Some(public_id) = &self.public_id {
            params.insert("public_id".to_string(), public_id.clone());
        }
        if let Some(folder) = &self.folder {
            params.insert("folder".to_string(), folder.clone());
        }
        if !self.tags.is_empty() {
            params.insert("tags".to_string(), self.tags.join(","));
        }
        if let Some(overwrite) = self.overwrite {
            params.insert("overwrite".to_string(), overwrite.to_string());
        }
        if let Some(invalidate) = self.invalidate {
            params.insert("invalidate".to_string(), invalidate.to_string());
        }
        params
    }

    pub(crate) fn resource_type(&self) -> &str {
        self.resource_type.as_deref().unwrap_or("image")
    }
}

/// Options for the destroy endpoint.
#[derive(Debug, Clone, Default)]
pub struct DestroyOptions {
    /// `image`, `video` or `raw` (default `image`).
    pub resource_type: Option<String>,
    /// Also purge cached CDN copies.
    pub invalidate: Option<bool>,
}

impl DestroyOptions {
    pub(crate) fn resource_type(&self) -> &str {
        self.resource_type.as_deref().unwrap_or("image")
    }
}

/// Options for fetching a single resource's metadata.
#[derive(Debug, Clone, Default)]
pub struct ResourceOptions {
    pub resource_type: Option<String>,
    /// Delivery type segment of the admin path (default `upload`).
    pub delivery_type: Option<String>,
    /// Include dominant color information.
    pub colors: bool,
    /// Include face coordinates.
    pub faces: bool,
    /// Include embedded image metadata.
    pub image_metadata: bool,
}

impl ResourceOptions {
    pub(crate) fn resource_type(&self) -> &str {
        self.resource_type.as_deref().unwrap_or("image")
    }

    pub(crate) fn delivery_type(&self) -> &str {
        self.delivery_type.as_deref().unwrap_or("upload")
    }

    pub(crate) fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if self.colors {
            params.push(("colors", "true".to_string()));
        }
        if self.faces {
            params.push(("faces", "true".to_string()));
        }
        if self.image_metadata {
            params.push(("image_metadata", "true".to_string()));
        }
        params
    }
}

/// Options for listing resources.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub resource_type: Option<String>,
    /// Restrict the listing to one delivery type.
    pub delivery_type: Option<String>,
    /// Page size; the vendor defaults to 10 and caps at 500.
    pub max_results: Option<u32>,
    /// Opaque cursor from the previous page.
    pub next_cursor: Option<String>,
    /// Only identifiers with this prefix.
    pub prefix: Option<String>,
}

impl ListOptions {
    pub(crate) fn resource_type(&self) -> &str {
        self.resource_type.as_deref().unwrap_or("image")
    }

    pub(crate) fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(max_results) = self.max_results {
            params.push(("max_results", max_results.to_string()));
        }
        if let Some(next_cursor) = &self.next_cursor {
            params.push(("next_cursor", next_cursor.clone()));
        }
        if let Some(prefix) = &self.prefix {
            params.push(("prefix", prefix.clone()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transformation_param_order_is_stable() {
        let transformation = Transformation {
            width: Some(150),
            height: Some(100),
            crop: Some("fill".to_string()),
            ..Default::default()
        };

        assert_eq!(
            transformation.to_param_string(),
            Some("c_fill,h_100,w_150".to_string())
        );
    }

    #[test]
    fn test_empty_transformation_yields_none() {
        assert_eq!(Transformation::default().to_param_string(), None);
    }

    #[test]
    fn test_upload_params_join_tags() {
        let options = UploadOptions {
            public_id: Some("sample".to_string()),
            tags: vec!["a".to_string(), "b".to_string()],
            overwrite: Some(true),
            ..Default::default()
        };

        let params = options.to_params();
        assert_eq!(params.get("public_id"), Some(&"sample".to_string()));
        assert_eq!(params.get("tags"), Some(&"a,b".to_string()));
        assert_eq!(params.get("overwrite"), Some(&"true".to_string()));
    }

    #[test]
    fn test_upload_params_pass_extra_through() {
        let mut extra = BTreeMap::new();
        extra.insert("context".to_string(), "alt=Flower".to_string());

        let options = UploadOptions {
            extra,
            ..Default::default()
        };

        assert_eq!(
            options.to_params().get("context"),
            Some(&"alt=Flower".to_string())
        );
    }

    #[test]
    fn test_list_query_params() {
        let options = ListOptions {
            max_results: Some(25),
            prefix: Some("uploads/".to_string()),
            ..Default::default()
        };

        let params = options.query_params();
        assert!(params.contains(&("max_results", "25".to_string())));
        assert!(params.contains(&("prefix", "uploads/".to_string())));
        assert_eq!(params.len(), 2);
    }
}
