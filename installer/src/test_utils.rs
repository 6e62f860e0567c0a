//! Shared test utilities for the installer crate.
//!
//! [`StubHost`] answers install/update/lookup calls with scripted results and
//! records what it was asked, so lifecycle tests run without a Joomla site.

use crate::bridge::{
    BridgeError, HostBridge, HostInstaller, LibraryInstaller, Package, PlacementError,
};
use crate::config::Credentials;
use crate::diagnostics::{DiagnosticMessage, DiagnosticQueue};
use crate::element::ElementId;
use crate::manifest::{ExtensionType, Manifest};
use camino::{Utf8Path, Utf8PathBuf};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Installer sub-object of [`StubHost`].
#[derive(Debug, Default)]
pub struct StubHostInstaller {
    manifest: Option<Manifest>,
    paths: Vec<(String, Utf8PathBuf)>,
    manifest_reads: Cell<usize>,
}

impl StubHostInstaller {
    /// Paths set via [`HostInstaller::set_path`], in call order.
    #[must_use]
    pub fn paths(&self) -> &[(String, Utf8PathBuf)] {
        &self.paths
    }

    /// Number of manifest reads.
    #[must_use]
    pub fn manifest_reads(&self) -> usize {
        self.manifest_reads.get()
    }
}

impl HostInstaller for StubHostInstaller {
    fn set_path(&mut self, key: &str, value: &Utf8Path) {
        self.paths.push((key.to_owned(), value.to_owned()));
    }

    fn manifest(&self) -> Option<Manifest> {
        self.manifest_reads.set(self.manifest_reads.get() + 1);
        self.manifest.clone()
    }
}

/// A scripted [`HostBridge`].
#[derive(Debug)]
pub struct StubHost {
    verdict: bool,
    queue: DiagnosticQueue,
    rejection: Option<String>,
    extensions: Vec<(ElementId, ExtensionType)>,
    installer: StubHostInstaller,
    authenticated: Vec<Credentials>,
    installed: Vec<Utf8PathBuf>,
    updated: Vec<Utf8PathBuf>,
    lookups: RefCell<Vec<(ElementId, ExtensionType)>>,
    sessions_closed: Rc<Cell<usize>>,
}

impl StubHost {
    /// A host whose install and update calls succeed.
    #[must_use]
    pub fn succeeding() -> Self {
        Self {
            verdict: true,
            queue: DiagnosticQueue::new(),
            rejection: None,
            extensions: Vec::new(),
            installer: StubHostInstaller::default(),
            authenticated: Vec::new(),
            installed: Vec::new(),
            updated: Vec::new(),
            lookups: RefCell::new(Vec::new()),
            sessions_closed: Rc::new(Cell::new(0)),
        }
    }

    /// A host whose install and update calls fail after queuing `messages`.
    #[must_use]
    pub fn failing_with(messages: impl IntoIterator<Item = DiagnosticMessage>) -> Self {
        Self {
            verdict: false,
            queue: messages.into_iter().collect(),
            ..Self::succeeding()
        }
    }

    /// Reject authentication with `reason`.
    #[must_use]
    pub fn rejecting_credentials(mut self, reason: &str) -> Self {
        self.rejection = Some(reason.to_owned());
        self
    }

    /// Serve `manifest` from the installer sub-object.
    #[must_use]
    pub fn with_manifest(mut self, manifest: Manifest) -> Self {
        self.installer.manifest = Some(manifest);
        self
    }

    /// Register an installed extension.
    #[must_use]
    pub fn with_extension(mut self, element: &str, kind: ExtensionType) -> Self {
        self.extensions.push((ElementId::new(element), kind));
        self
    }

    /// Credentials received by [`HostBridge::authenticate`].
    #[must_use]
    pub fn authenticated(&self) -> &[Credentials] {
        &self.authenticated
    }

    /// Paths passed to [`HostBridge::install`].
    #[must_use]
    pub fn installed(&self) -> &[Utf8PathBuf] {
        &self.installed
    }

    /// Paths passed to [`HostBridge::update`].
    #[must_use]
    pub fn updated(&self) -> &[Utf8PathBuf] {
        &self.updated
    }

    /// `(element, type)` pairs passed to [`HostBridge::has_extension`].
    #[must_use]
    pub fn lookups(&self) -> Vec<(ElementId, ExtensionType)> {
        self.lookups.borrow().clone()
    }

    /// Number of [`HostBridge::close_session`] calls.
    #[must_use]
    pub fn sessions_closed(&self) -> usize {
        self.sessions_closed.get()
    }

    /// Shared [`HostBridge::close_session`] counter that stays readable
    /// after the host has been moved into an installer.
    #[must_use]
    pub fn session_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.sessions_closed)
    }

    /// The installer sub-object.
    #[must_use]
    pub fn host_installer(&self) -> &StubHostInstaller {
        &self.installer
    }
}

impl HostBridge for StubHost {
    fn authenticate(&mut self, credentials: &Credentials) -> Result<(), BridgeError> {
        self.authenticated.push(credentials.clone());
        match &self.rejection {
            Some(reason) => Err(BridgeError::Rejected {
                username: credentials.username().to_owned(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    fn install(&mut self, path: &Utf8Path) -> bool {
        self.installed.push(path.to_owned());
        self.verdict
    }

    fn update(&mut self, path: &Utf8Path) -> bool {
        self.updated.push(path.to_owned());
        self.verdict
    }

    fn message_queue(&self) -> DiagnosticQueue {
        self.queue.clone()
    }

    fn installer(&mut self) -> &mut dyn HostInstaller {
        &mut self.installer
    }

    fn has_extension(&self, element: &ElementId, kind: &ExtensionType) -> bool {
        self.lookups
            .borrow_mut()
            .push((element.clone(), kind.clone()));
        self.extensions
            .iter()
            .any(|(known, known_kind)| known == element && known_kind == kind)
    }

    fn close_session(&mut self) {
        self.sessions_closed.set(self.sessions_closed.get() + 1);
    }
}

/// A [`LibraryInstaller`] that installs every package under `base/<name>`.
#[derive(Debug)]
pub struct StubLibrary {
    base: Utf8PathBuf,
    failure: Option<String>,
    calls: RefCell<Vec<String>>,
}

impl StubLibrary {
    /// A library installer rooted at `base` whose operations succeed.
    #[must_use]
    pub fn new(base: impl Into<Utf8PathBuf>) -> Self {
        Self {
            base: base.into(),
            failure: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Fail every placement with `reason`.
    #[must_use]
    pub fn failing(mut self, reason: &str) -> Self {
        self.failure = Some(reason.to_owned());
        self
    }

    /// Recorded operations, formatted as `"<op> <pretty name>"`.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, operation: &str, package: &Package) -> Result<(), PlacementError> {
        self.calls
            .borrow_mut()
            .push(format!("{operation} {}", package.pretty_name()));
        match &self.failure {
            Some(reason) => Err(PlacementError::Failed {
                package: package.pretty_name().to_owned(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl LibraryInstaller for StubLibrary {
    fn install_path(&self, package: &Package) -> Utf8PathBuf {
        self.base.join(package.pretty_name())
    }

    fn install(&self, package: &Package) -> Result<(), PlacementError> {
        self.record("install", package)
    }

    fn update(&self, initial: &Package, target: &Package) -> Result<(), PlacementError> {
        self.calls
            .borrow_mut()
            .push(format!("remove {}", initial.pretty_name()));
        self.record("update", target)
    }

    fn uninstall(&self, package: &Package) -> Result<(), PlacementError> {
        self.record("uninstall", package)
    }
}
