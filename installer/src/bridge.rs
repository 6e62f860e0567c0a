//! Collaborator contracts used by the installer lifecycle.
//!
//! Two external parties do the real work:
//!
//! - the package manager's generic [`LibraryInstaller`], which places and
//!   removes package files on disk and knows where each package lives;
//! - the [`HostBridge`], which asks the Joomla site to install, update, or
//!   look up an extension and exposes the messages it queued meanwhile.
//!
//! Both are traits so that the lifecycle can be exercised without a live
//! site or package manager.

use crate::config::Credentials;
use crate::diagnostics::DiagnosticQueue;
use crate::element::ElementId;
use crate::manifest::{ExtensionType, Manifest};
use camino::{Utf8Path, Utf8PathBuf};

/// Path key under which the host installer expects the extension sources.
pub const SOURCE_PATH_KEY: &str = "source";

/// Package descriptor handed over by the package manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pretty_name: String,
    version: String,
}

impl Package {
    /// Create a package descriptor.
    ///
    /// # Examples
    ///
    /// ```
    /// use joomla_extension_installer::bridge::Package;
    ///
    /// let package = Package::new("acme/com_blog", "1.2.0");
    /// assert_eq!(package.pretty_name(), "acme/com_blog");
    /// assert_eq!(package.version(), "1.2.0");
    /// ```
    #[must_use]
    pub fn new(pretty_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            pretty_name: pretty_name.into(),
            version: version.into(),
        }
    }

    /// Return the `vendor/name` pretty name.
    #[must_use]
    pub fn pretty_name(&self) -> &str {
        &self.pretty_name
    }

    /// Return the package version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Errors reported by the library installer while placing files.
#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    /// Filesystem access failed.
    #[error("failed to place files at {path}: {source}")]
    Io {
        /// Path being written or removed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The library installer rejected the operation.
    #[error("failed to place {package}: {reason}")]
    Failed {
        /// Pretty name of the package.
        package: String,
        /// Description of the failure.
        reason: String,
    },
}

/// The package manager's generic file-placement installer.
#[cfg_attr(test, mockall::automock)]
pub trait LibraryInstaller {
    /// Return the directory a package is (or will be) installed into.
    fn install_path(&self, package: &Package) -> Utf8PathBuf;

    /// Place the files of a freshly installed package.
    ///
    /// # Errors
    ///
    /// Returns an error if the files cannot be placed.
    fn install(&self, package: &Package) -> Result<(), PlacementError>;

    /// Replace the files of `initial` with those of `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the files cannot be replaced.
    fn update(&self, initial: &Package, target: &Package) -> Result<(), PlacementError>;

    /// Remove the files of an installed package.
    ///
    /// # Errors
    ///
    /// Returns an error if the files cannot be removed.
    fn uninstall(&self, package: &Package) -> Result<(), PlacementError>;
}

/// Errors reported by the host bridge outside the install/update verdicts.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The host refused the supplied credentials.
    #[error("credentials for `{username}` were rejected: {reason}")]
    Rejected {
        /// Login name presented to the host.
        username: String,
        /// Description of the rejection.
        reason: String,
    },
}

/// The host's installer sub-object.
pub trait HostInstaller {
    /// Point one of the installer's working paths at `value`.
    fn set_path(&mut self, key: &str, value: &Utf8Path);

    /// Parse the installation manifest found under the source path.
    ///
    /// Returns `None` when no manifest could be found or parsed.
    fn manifest(&self) -> Option<Manifest>;
}

/// Capability object for the Joomla site the extensions are installed into.
pub trait HostBridge {
    /// Log in to the host as the configured user. Called once at startup.
    ///
    /// Implementations register [`Credentials::username`] as the host's
    /// root user, so the session runs with that account's privileges.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the credentials.
    fn authenticate(&mut self, credentials: &Credentials) -> Result<(), BridgeError>;

    /// Install the extension found at `path`; `false` signals failure.
    fn install(&mut self, path: &Utf8Path) -> bool;

    /// Update the extension found at `path`; `false` signals failure.
    fn update(&mut self, path: &Utf8Path) -> bool;

    /// Snapshot of the messages queued by the host so far.
    fn message_queue(&self) -> DiagnosticQueue;

    /// Access the host's installer sub-object.
    fn installer(&mut self) -> &mut dyn HostInstaller;

    /// Returns `true` if the host tracks an extension with this element and type.
    fn has_extension(&self, element: &ElementId, kind: &ExtensionType) -> bool;

    /// Close the host's session so it is not torn down after its connection.
    fn close_session(&mut self);
}
