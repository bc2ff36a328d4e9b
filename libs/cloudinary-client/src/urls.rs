/// Delivery URL and HTML tag building
///
/// URL grammar:
/// `<scheme>://<host>/<cloud_name>/<resource_type>/<type>[/<transformation>][/v<version>]/<public_id>[.<format>]`
/// where the cloud name segment is dropped for private CDN distributions,
/// which already carry it in the hostname.
use std::collections::BTreeMap;

use crate::config::{CdnConfig, SHARED_CDN};
use crate::options::{ImageOptions, UrlOptions};

fn delivery_host(config: &CdnConfig) -> String {
    if config.secure {
        if let Some(distribution) = &config.secure_distribution {
            return distribution.clone();
        }
    }
    if config.private_cdn {
        format!("{}-{}", config.cloud_name, SHARED_CDN)
    } else {
        SHARED_CDN.to_string()
    }
}

/// Build a delivery URL for a stored asset.
pub fn url_for(config: &CdnConfig, public_id: &str, options: &UrlOptions) -> String {
    let scheme = if config.secure { "https" } else { "http" };
    let host = delivery_host(config);

    let mut segments: Vec<String> = Vec::new();
    if !config.private_cdn {
        segments.push(config.cloud_name.clone());
    }
    segments.push(options.resource_type().to_string());
    segments.push(options.delivery_type().to_string());
    if let Some(transformation) = options.transformation.to_param_string() {
        segments.push(transformation);
    }
    if let Some(version) = options.version {
        segments.push(format!("v{version}"));
    }

    let mut file = public_id.to_string();
    if let Some(format) = &options.format {
        file.push('.');
        file.push_str(format);
    }
    segments.push(file);

    format!("{scheme}://{host}/{}", segments.join("/"))
}

/// Render an `<img>` tag whose source is the delivery URL for `source`.
/// Attributes are emitted single-quoted in stable alphabetical order.
pub fn image_tag(config: &CdnConfig, source: &str, options: &ImageOptions) -> String {
    let mut attributes: BTreeMap<String, String> = options.attributes.clone();
    if let Some(alt) = &options.alt {
        attributes.insert("alt".to_string(), alt.clone());
    }
    if let Some(class) = &options.class {
        attributes.insert("class".to_string(), class.clone());
    }
    if let Some(id) = &options.id {
        attributes.insert("id".to_string(), id.clone());
    }
    attributes.insert("src".to_string(), url_for(config, source, &options.url));

    let rendered = attributes
        .iter()
        .map(|(name, value)| format!("{name}='{value}'"))
        .collect::<Vec<_>>()
        .join(" ");

    format!("<img {rendered}/>")
}
