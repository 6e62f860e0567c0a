//! Host runtime context.
//!
//! Bootstrapping the Joomla runtime (constants, framework, session) happens
//! once, outside this crate. The caller records the outcome in a
//! [`HostContext`] and hands it to the installer, which uses it to decide
//! whether the host session must be closed on shutdown.

use camino::{Utf8Path, Utf8PathBuf};

/// Outcome of the one-time host bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    root: Utf8PathBuf,
    bootstrapped: bool,
}

impl HostContext {
    /// Context for a site whose runtime has been bootstrapped.
    ///
    /// # Examples
    ///
    /// ```
    /// use joomla_extension_installer::context::HostContext;
    ///
    /// let context = HostContext::bootstrapped("/var/www/site");
    /// assert!(context.is_bootstrapped());
    /// assert_eq!(context.root().as_str(), "/var/www/site");
    /// ```
    #[must_use]
    pub fn bootstrapped(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            bootstrapped: true,
        }
    }

    /// Context for a site whose runtime was never initialised.
    ///
    /// Shutting down an installer built on a detached context leaves the
    /// host session alone.
    #[must_use]
    pub fn detached(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            bootstrapped: false,
        }
    }

    /// Root directory of the Joomla site.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns `true` if the host runtime was bootstrapped.
    #[must_use]
    pub const fn is_bootstrapped(&self) -> bool {
        self.bootstrapped
    }
}
