//! Installation manifest model.
//!
//! A Joomla extension ships an installation manifest declaring its type,
//! display name, and the files it installs. The host parses the manifest;
//! this module holds the subset the installer needs to work out which
//! element the extension is tracked under.
//!
//! The serialised form used by [`crate::manifest_parser`] is:
//!
//! ```json
//! {
//!   "type": "module",
//!   "name": "Login Module",
//!   "files": [
//!     { "module": "mod_login" },
//!     { "folder": "tmpl" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The `type` attribute of an installation manifest.
///
/// Unrecognised values are kept verbatim in [`ExtensionType::Other`] so that
/// the host can still be asked about them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExtensionType {
    /// `component`
    Component,
    /// `module`
    Module,
    /// `plugin`
    Plugin,
    /// `template`
    Template,
    /// `package`
    Package,
    /// `file`
    File,
    /// `library`
    Library,
    /// `language`
    Language,
    /// Any other type string.
    Other(String),
}

impl ExtensionType {
    /// Return the type exactly as the manifest spells it.
    ///
    /// # Examples
    ///
    /// ```
    /// use joomla_extension_installer::manifest::ExtensionType;
    ///
    /// assert_eq!(ExtensionType::from("plugin").as_str(), "plugin");
    /// assert_eq!(ExtensionType::from("widget").as_str(), "widget");
    /// ```
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Component => "component",
            Self::Module => "module",
            Self::Plugin => "plugin",
            Self::Template => "template",
            Self::Package => "package",
            Self::File => "file",
            Self::Library => "library",
            Self::Language => "language",
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for ExtensionType {
    fn from(value: &str) -> Self {
        match value {
            "component" => Self::Component,
            "module" => Self::Module,
            "plugin" => Self::Plugin,
            "template" => Self::Template,
            "package" => Self::Package,
            "file" => Self::File,
            "library" => Self::Library,
            "language" => Self::Language,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for ExtensionType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<ExtensionType> for String {
    fn from(value: ExtensionType) -> Self {
        match value {
            ExtensionType::Other(other) => other,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One file declaration inside the manifest's file list.
///
/// Only the attributes are retained; the element text is irrelevant to
/// element resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileEntry {
    attributes: BTreeMap<String, String>,
}

impl FileEntry {
    /// Create an entry from attribute name/value pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use joomla_extension_installer::manifest::FileEntry;
    ///
    /// let entry = FileEntry::new([("module", "mod_login")]);
    /// assert_eq!(entry.attribute("module"), Some("mod_login"));
    /// assert_eq!(entry.attribute("plugin"), None);
    /// ```
    #[must_use]
    pub fn new<I, K, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            attributes: attributes
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Return the value of the named attribute, if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Return the named attribute only when it is present and non-empty.
    #[must_use]
    pub fn non_empty_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name).filter(|value| !value.is_empty())
    }

    /// Iterate over all attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// The parsed installation manifest of an extension package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "type")]
    kind: ExtensionType,
    #[serde(default)]
    name: String,
    #[serde(default)]
    files: Vec<FileEntry>,
}

impl Manifest {
    /// Construct a manifest from its parts.
    ///
    /// # Examples
    ///
    /// ```
    /// use joomla_extension_installer::manifest::{ExtensionType, FileEntry, Manifest};
    ///
    /// let manifest = Manifest::new(
    ///     ExtensionType::Module,
    ///     "Login",
    ///     vec![FileEntry::new([("module", "mod_login")])],
    /// );
    /// assert_eq!(manifest.kind(), &ExtensionType::Module);
    /// assert_eq!(manifest.files().len(), 1);
    /// ```
    #[must_use]
    pub fn new(kind: ExtensionType, name: impl Into<String>, files: Vec<FileEntry>) -> Self {
        Self {
            kind,
            name: name.into(),
            files,
        }
    }

    /// Return the extension type.
    #[must_use]
    pub const fn kind(&self) -> &ExtensionType {
        &self.kind
    }

    /// Return the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the file entries in declaration order.
    #[must_use]
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }
}
