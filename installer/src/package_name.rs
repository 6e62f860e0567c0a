//! Package naming convention for Joomla extension packages.
//!
//! Extension packages are named `vendor/xyz_name`, where `xyz` is a short
//! token identifying the Joomla extension type. This module owns the closed
//! set of accepted prefixes and the validation rules applied before any
//! files are placed.

use crate::error::{InstallerError, Result};
use std::fmt;
use std::str::FromStr;

/// Short extension-type token found before the first underscore of a
/// package's name segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionPrefix {
    /// `com`: component.
    Com,
    /// `plg`: plugin.
    Plg,
    /// `mod`: module.
    Mod,
    /// `tpl`: template.
    Tpl,
    /// `pkg`: package.
    Pkg,
    /// `file`: file extension.
    File,
    /// `lib`: library.
    Lib,
    /// `lng`: language pack.
    Lng,
}

impl ExtensionPrefix {
    /// Every accepted prefix, in the order used by error messages.
    pub const ALL: [Self; 8] = [
        Self::Com,
        Self::Plg,
        Self::Mod,
        Self::Tpl,
        Self::Pkg,
        Self::File,
        Self::Lib,
        Self::Lng,
    ];

    /// Return the prefix token as it appears in package names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Com => "com",
            Self::Plg => "plg",
            Self::Mod => "mod",
            Self::Tpl => "tpl",
            Self::Pkg => "pkg",
            Self::File => "file",
            Self::Lib => "lib",
            Self::Lng => "lng",
        }
    }

    /// Return the Joomla extension type this prefix stands for.
    ///
    /// # Examples
    ///
    /// ```
    /// use joomla_extension_installer::package_name::ExtensionPrefix;
    ///
    /// assert_eq!(ExtensionPrefix::Plg.extension_type(), "plugin");
    /// ```
    #[must_use]
    pub const fn extension_type(self) -> &'static str {
        match self {
            Self::Com => "component",
            Self::Plg => "plugin",
            Self::Mod => "module",
            Self::Tpl => "template",
            Self::Pkg => "package",
            Self::File => "file",
            Self::Lib => "library",
            Self::Lng => "language",
        }
    }
}

impl FromStr for ExtensionPrefix {
    type Err = UnknownPrefix;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|prefix| prefix.as_str() == value)
            .ok_or_else(|| UnknownPrefix(value.to_owned()))
    }
}

impl fmt::Display for ExtensionPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A prefix token outside the accepted set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown extension prefix `{0}`")]
pub struct UnknownPrefix(String);

/// Render the accepted prefixes as a comma-separated list.
///
/// # Examples
///
/// ```
/// use joomla_extension_installer::package_name::allowed_prefixes;
///
/// assert_eq!(allowed_prefixes(), "com, plg, mod, tpl, pkg, file, lib, lng");
/// ```
#[must_use]
pub fn allowed_prefixes() -> String {
    ExtensionPrefix::ALL
        .iter()
        .map(|prefix| prefix.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A package pretty name that follows the `vendor/xyz_name` convention.
///
/// # Examples
///
/// ```
/// use joomla_extension_installer::package_name::{ExtensionPrefix, PackageName};
///
/// let name = PackageName::parse("acme/com_blog").expect("valid package name");
/// assert_eq!(name.vendor(), "acme");
/// assert_eq!(name.name(), "com_blog");
/// assert_eq!(name.prefix(), ExtensionPrefix::Com);
/// assert_eq!(name.rest(), Some("blog"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName {
    pretty: String,
    vendor_len: usize,
    prefix: ExtensionPrefix,
}

impl PackageName {
    /// Parse and validate a package pretty name.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::InvalidName`] when the name is not of the form
    /// `vendor/xyz_name` with `xyz` in [`ExtensionPrefix::ALL`].
    pub fn parse(pretty_name: &str) -> Result<Self> {
        let invalid = || InstallerError::InvalidName {
            name: pretty_name.to_owned(),
            allowed: allowed_prefixes(),
        };

        let (vendor, name) = split_segments(pretty_name).ok_or_else(invalid)?;
        let prefix = prefix_candidate(name)
            .parse::<ExtensionPrefix>()
            .map_err(|_| invalid())?;

        Ok(Self {
            pretty: pretty_name.to_owned(),
            vendor_len: vendor.len(),
            prefix,
        })
    }

    /// Return the full pretty name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pretty
    }

    /// Return the vendor segment.
    #[must_use]
    pub fn vendor(&self) -> &str {
        self.pretty.get(..self.vendor_len).unwrap_or_default()
    }

    /// Return the name segment after the slash.
    #[must_use]
    pub fn name(&self) -> &str {
        self.pretty.get(self.vendor_len + 1..).unwrap_or_default()
    }

    /// Return the extension prefix.
    #[must_use]
    pub const fn prefix(&self) -> ExtensionPrefix {
        self.prefix
    }

    /// Return the remainder after the first underscore, if any.
    #[must_use]
    pub fn rest(&self) -> Option<&str> {
        self.name().split_once('_').map(|(_, rest)| rest)
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.pretty
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty)
    }
}

/// Check whether a pretty name follows the `vendor/xyz_name` convention.
///
/// Malformed names (no slash, more than one slash, empty name segment) are
/// reported as `false` so that the caller can choose its own error.
///
/// # Examples
///
/// ```
/// use joomla_extension_installer::package_name::is_valid_name;
///
/// assert!(is_valid_name("acme/mod_login"));
/// assert!(!is_valid_name("acme/widget_login"));
/// assert!(!is_valid_name("mod_login"));
/// ```
#[must_use]
pub fn is_valid_name(pretty_name: &str) -> bool {
    split_segments(pretty_name)
        .is_some_and(|(_, name)| prefix_candidate(name).parse::<ExtensionPrefix>().is_ok())
}

/// Split `vendor/name`, requiring exactly one slash and a non-empty name.
fn split_segments(pretty_name: &str) -> Option<(&str, &str)> {
    let (vendor, name) = pretty_name.split_once('/')?;
    if name.is_empty() || name.contains('/') {
        return None;
    }
    Some((vendor, name))
}

/// The text before the first underscore, or the whole segment without one.
fn prefix_candidate(name: &str) -> &str {
    name.split_once('_').map_or(name, |(prefix, _)| prefix)
}
