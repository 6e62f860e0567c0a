//! Host credentials configuration.
//!
//! The installer authenticates against the host as an administrative user.
//! The identity comes from a `host` configuration block; every key is
//! optional and overrides the built-in default individually:
//!
//! ```toml
//! [host]
//! name = "Site Admin"
//! username = "admin"
//! groups = [7, 8]
//! email = "admin@example.com"
//! ```
//!
//! When the block is absent, or is not a table, the defaults are used
//! unchanged. Unknown keys are logged and ignored.

use crate::error::{InstallerError, Result};
use camino::Utf8Path;
use log::{debug, warn};
use serde::Deserialize;
use std::collections::BTreeSet;

/// Default display name of the installing user.
pub const DEFAULT_NAME: &str = "root";

/// Default login name of the installing user.
pub const DEFAULT_USERNAME: &str = "root";

/// Default group of the installing user (Joomla's Super Users group).
pub const DEFAULT_GROUP: u32 = 8;

/// Default e-mail address of the installing user.
pub const DEFAULT_EMAIL: &str = "root@localhost.home";

const HOST_KEYS: [&str; 4] = ["name", "username", "groups", "email"];

/// Identity the installer presents to the host.
///
/// Built once at startup and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    name: String,
    username: String,
    groups: BTreeSet<u32>,
    email: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_owned(),
            username: DEFAULT_USERNAME.to_owned(),
            groups: BTreeSet::from([DEFAULT_GROUP]),
            email: DEFAULT_EMAIL.to_owned(),
        }
    }
}

/// Values read from the `host` block. Absent keys keep their defaults.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct HostOverrides {
    /// Display name override.
    pub name: Option<String>,
    /// Login name override.
    pub username: Option<String>,
    /// Group membership override; replaces the default set wholesale.
    pub groups: Option<BTreeSet<u32>>,
    /// E-mail override.
    pub email: Option<String>,
}

impl Credentials {
    /// Apply overrides key by key on top of the defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use joomla_extension_installer::config::{Credentials, HostOverrides};
    ///
    /// let credentials = Credentials::with_overrides(HostOverrides {
    ///     username: Some("admin".to_owned()),
    ///     ..HostOverrides::default()
    /// });
    /// assert_eq!(credentials.username(), "admin");
    /// assert_eq!(credentials.name(), "root");
    /// ```
    #[must_use]
    pub fn with_overrides(overrides: HostOverrides) -> Self {
        let defaults = Self::default();
        Self {
            name: overrides.name.unwrap_or(defaults.name),
            username: overrides.username.unwrap_or(defaults.username),
            groups: overrides.groups.unwrap_or(defaults.groups),
            email: overrides.email.unwrap_or(defaults.email),
        }
    }

    /// Read credentials from the `[host]` table of a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::InvalidConfig`] if the document cannot be
    /// parsed or a known `host` key has the wrong value type.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut document: toml::Table = source.parse().map_err(invalid_config)?;
        match document.remove("host") {
            None => Ok(Self::default()),
            Some(toml::Value::Table(block)) => {
                warn_unknown_keys(block.keys());
                let overrides: HostOverrides =
                    toml::Value::Table(block).try_into().map_err(invalid_config)?;
                Ok(Self::with_overrides(overrides))
            }
            Some(other) => {
                warn!(
                    "host configuration is a {}, not a table; using defaults",
                    other.type_str()
                );
                Ok(Self::default())
            }
        }
    }

    /// Read credentials from the `host` key of a JSON configuration object.
    ///
    /// A missing or `null` `host` key yields the defaults, as does a `host`
    /// value that is not an object.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::InvalidConfig`] if a known `host` key has
    /// the wrong value type.
    pub fn from_json_value(config: &serde_json::Value) -> Result<Self> {
        match config.get("host") {
            None | Some(serde_json::Value::Null) => Ok(Self::default()),
            Some(block @ serde_json::Value::Object(entries)) => {
                warn_unknown_keys(entries.keys());
                let overrides = HostOverrides::deserialize(block).map_err(invalid_config)?;
                Ok(Self::with_overrides(overrides))
            }
            Some(_) => {
                warn!("host configuration is not an object; using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load credentials from a TOML file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file exists but cannot be read, or
    /// [`InstallerError::InvalidConfig`] if it cannot be parsed.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("no host configuration at {path}; using defaults");
                Ok(Self::default())
            }
            Err(err) => Err(InstallerError::Io(err)),
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Login name; also used as the host's root user.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Group identifiers.
    #[must_use]
    pub const fn groups(&self) -> &BTreeSet<u32> {
        &self.groups
    }

    /// E-mail address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

fn warn_unknown_keys<'a>(keys: impl IntoIterator<Item = &'a String>) {
    for key in keys {
        if !HOST_KEYS.contains(&key.as_str()) {
            warn!("ignoring unknown host configuration key `{key}`");
        }
    }
}

fn invalid_config(err: impl std::fmt::Display) -> InstallerError {
    InstallerError::InvalidConfig {
        reason: err.to_string(),
    }
}
