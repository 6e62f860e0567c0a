//! Install, update, and existence checks for Joomla extension packages.
//!
//! [`ExtensionInstaller`] sits between the package manager and the Joomla
//! site. For each package it validates the name, lets the
//! [`LibraryInstaller`] place the files, asks the [`HostBridge`] to do the
//! actual installation, and turns a failed verdict plus the host's queued
//! error messages into a single [`InstallerError`].
//!
//! Each operation is synchronous and single-shot. The only state kept
//! between calls is the credentials and the collaborators supplied at
//! construction.

use crate::bridge::{HostBridge, LibraryInstaller, Package, SOURCE_PATH_KEY};
use crate::config::Credentials;
use crate::context::HostContext;
use crate::diagnostics::collect_errors;
use crate::element::resolve;
use crate::error::{InstallerError, Result};
use crate::package_name::PackageName;
use log::{debug, trace, warn};
use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};

/// Drives extension installation through a host bridge.
#[derive(Debug)]
pub struct ExtensionInstaller<B, L> {
    context: HostContext,
    bridge: B,
    library: L,
    credentials: Credentials,
}

impl<B: HostBridge, L: LibraryInstaller> ExtensionInstaller<B, L> {
    /// Build an installer and authenticate against the host.
    ///
    /// If the host rejects the credentials the session is closed before the
    /// error is returned, exactly as [`Self::shutdown`] would.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::Authentication`] if the host rejects the
    /// credentials.
    pub fn new(
        context: HostContext,
        mut bridge: B,
        library: L,
        credentials: Credentials,
    ) -> Result<Self> {
        debug!(
            "authenticating against host at {} as `{}`",
            context.root(),
            credentials.username()
        );
        if let Err(err) = bridge.authenticate(&credentials) {
            close_session(&context, &mut bridge);
            return Err(InstallerError::Authentication {
                reason: err.to_string(),
            });
        }

        Ok(Self {
            context,
            bridge,
            library,
            credentials,
        })
    }

    /// Return the credentials presented to the host.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Return the host context.
    #[must_use]
    pub const fn context(&self) -> &HostContext {
        &self.context
    }

    /// Install a package into the host.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::InvalidName`] before touching anything if the
    /// name is not `vendor/xyz_name`, placement errors unchanged, and
    /// [`InstallerError::InstallationFailed`] if the host reports failure.
    pub fn install(&mut self, package: &Package) -> Result<()> {
        let name = PackageName::parse(package.pretty_name())?;

        self.library.install(package)?;

        let path = self.library.install_path(package);
        debug!("installing {name} from {path}");
        if self.bridge.install(&path) {
            debug!("installed {name}");
            return Ok(());
        }

        let details = collect_errors(&self.bridge.message_queue());
        warn!(
            "host failed to install {name} ({} error message(s))",
            details.len()
        );
        Err(InstallerError::InstallationFailed {
            package: name.to_string(),
            details,
        })
    }

    /// Update an installed package to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::InvalidName`] if the target name is invalid,
    /// placement errors unchanged, and [`InstallerError::UpdateFailed`] if
    /// the host reports failure.
    pub fn update(&mut self, initial: &Package, target: &Package) -> Result<()> {
        let name = PackageName::parse(target.pretty_name())?;

        self.library.update(initial, target)?;

        let path = self.library.install_path(target);
        debug!(
            "updating {name} from {} to {} at {path}",
            initial.version(),
            target.version()
        );
        if self.bridge.update(&path) {
            debug!("updated {name}");
            return Ok(());
        }

        let details = collect_errors(&self.bridge.message_queue());
        warn!(
            "host failed to update {name} ({} error message(s))",
            details.len()
        );
        Err(InstallerError::UpdateFailed {
            package: name.to_string(),
            details,
        })
    }

    /// Remove a package's files.
    ///
    /// The extension stays registered in the host; only the package
    /// manager's copy is removed.
    ///
    /// # Errors
    ///
    /// Returns placement errors unchanged.
    pub fn uninstall(&mut self, package: &Package) -> Result<()> {
        debug!("removing files of {}", package.pretty_name());
        self.library.uninstall(package)?;
        Ok(())
    }

    /// Returns `true` if the host tracks the extension shipped by `package`.
    ///
    /// A missing manifest or an unresolvable element count as "not installed".
    pub fn is_installed(&mut self, package: &Package) -> bool {
        let path = self.library.install_path(package);
        let installer = self.bridge.installer();
        installer.set_path(SOURCE_PATH_KEY, &path);

        let Some(manifest) = installer.manifest() else {
            trace!("is_installed: no manifest under {path}");
            return false;
        };

        let resolved = resolve(&manifest);
        if resolved.element.is_unresolved() {
            trace!(
                "is_installed: no element for {} manifest under {path}",
                resolved.kind
            );
            return false;
        }

        self.bridge.has_extension(&resolved.element, &resolved.kind)
    }

    /// Release the host session and return the bridge.
    ///
    /// The session is closed only when the context records a bootstrapped
    /// runtime.
    pub fn shutdown(mut self) -> B {
        close_session(&self.context, &mut self.bridge);
        self.bridge
    }
}

/// Run `operation` against a fresh installer and always shut it down.
///
/// # Errors
///
/// Returns the authentication error from [`ExtensionInstaller::new`] or
/// whatever `operation` returns. The session is closed in every case,
/// including when `operation` panics; the panic is then resumed.
///
/// # Examples
///
/// ```
/// use joomla_extension_installer::bridge::Package;
/// use joomla_extension_installer::config::Credentials;
/// use joomla_extension_installer::context::HostContext;
/// use joomla_extension_installer::lifecycle::with_installer;
/// use joomla_extension_installer::test_utils::{StubHost, StubLibrary};
///
/// let package = Package::new("acme/com_blog", "1.0.0");
/// let outcome = with_installer(
///     HostContext::bootstrapped("/var/www/site"),
///     StubHost::succeeding(),
///     StubLibrary::new("/var/www/site/vendor"),
///     Credentials::default(),
///     |installer| installer.install(&package),
/// );
/// assert!(outcome.is_ok());
/// ```
pub fn with_installer<B, L, T, F>(
    context: HostContext,
    bridge: B,
    library: L,
    credentials: Credentials,
    operation: F,
) -> Result<T>
where
    B: HostBridge,
    L: LibraryInstaller,
    F: FnOnce(&mut ExtensionInstaller<B, L>) -> Result<T>,
{
    let mut installer = ExtensionInstaller::new(context, bridge, library, credentials)?;
    let outcome = catch_unwind(AssertUnwindSafe(|| operation(&mut installer)));
    installer.shutdown();
    match outcome {
        Ok(result) => result,
        Err(payload) => resume_unwind(payload),
    }
}

fn close_session<B: HostBridge>(context: &HostContext, bridge: &mut B) {
    if context.is_bootstrapped() {
        trace!("closing host session");
        bridge.close_session();
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
