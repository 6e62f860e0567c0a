//! Error types for the extension installer.
//!
//! Every failure the lifecycle can surface is a variant of [`InstallerError`].
//! Host-side failures carry the error-severity diagnostics that the host
//! queued while the operation ran, so callers can print them verbatim.

use crate::bridge::PlacementError;
use thiserror::Error;

/// Errors that can occur while installing, updating, or inspecting an
/// extension package.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// The package name does not follow the `vendor/xyz_name` convention.
    #[error(
        "invalid package name `{name}`: name should be of the format `vendor/xyz_name`, \
         where xyz is a valid Joomla extension type ({allowed})"
    )]
    InvalidName {
        /// The pretty name that failed validation.
        name: String,
        /// Comma-separated list of the accepted prefixes.
        allowed: String,
    },

    /// The host reported that installing the extension failed.
    #[error("{}", failure_message("installing", .package, .details))]
    InstallationFailed {
        /// Pretty name of the package being installed.
        package: String,
        /// Error-severity diagnostics collected from the host, in queue order.
        details: Vec<String>,
    },

    /// The host reported that updating the extension failed.
    #[error("{}", failure_message("updating", .package, .details))]
    UpdateFailed {
        /// Pretty name of the target package.
        package: String,
        /// Error-severity diagnostics collected from the host, in queue order.
        details: Vec<String>,
    },

    /// Placing or removing package files failed in the library installer.
    #[error(transparent)]
    Placement(#[from] PlacementError),

    /// The host refused the configured credentials.
    #[error("host authentication failed: {reason}")]
    Authentication {
        /// Description of why authentication failed.
        reason: String,
    },

    /// The `host` configuration block could not be read.
    #[error("invalid host configuration: {reason}")]
    InvalidConfig {
        /// Description of the parse error.
        reason: String,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InstallerError {
    /// Returns the collected host diagnostics for lifecycle failures.
    ///
    /// Other variants carry no host diagnostics and yield an empty slice.
    #[must_use]
    pub fn details(&self) -> &[String] {
        match self {
            Self::InstallationFailed { details, .. } | Self::UpdateFailed { details, .. } => {
                details
            }
            _ => &[],
        }
    }
}

fn failure_message(verb: &str, package: &str, details: &[String]) -> String {
    let mut message = format!("Error while {verb} {package}");
    if !details.is_empty() {
        message.push(':');
        message.push('\n');
        message.push_str(&details.join("\n"));
    }
    message
}

/// Result type alias using [`InstallerError`].
pub type Result<T> = std::result::Result<T, InstallerError>;
