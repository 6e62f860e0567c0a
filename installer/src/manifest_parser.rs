//! Manifest deserialisation for bridges that exchange JSON.
//!
//! Hosts running out of process hand the parsed installation manifest over
//! as JSON. [`parse_manifest`] turns that payload into a [`Manifest`].

use crate::manifest::Manifest;

/// Errors arising from manifest parsing.
#[derive(Debug, thiserror::Error)]
pub enum ManifestParseError {
    /// JSON deserialisation failed.
    #[error("manifest parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a JSON string into a [`Manifest`].
///
/// `name` and `files` default to empty when absent; `type` is required.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or has no `type` field.
///
/// # Examples
///
/// ```
/// use joomla_extension_installer::manifest_parser::parse_manifest;
///
/// let json = r#"{"type":"plugin","name":"Cache","files":[{"plugin":"cache"}]}"#;
/// let manifest = parse_manifest(json).expect("valid manifest");
/// assert_eq!(manifest.kind().as_str(), "plugin");
/// assert_eq!(manifest.files()[0].attribute("plugin"), Some("cache"));
/// ```
pub fn parse_manifest(json: &str) -> Result<Manifest, ManifestParseError> {
    Ok(serde_json::from_str(json)?)
}
