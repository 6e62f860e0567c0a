//! Behaviour-driven tests for the extension installer lifecycle.
//!
//! These scenarios drive install, update, and existence checks against a
//! scripted host. Tests use the rstest-bdd v0.5.0 mutable world pattern.

use joomla_extension_installer::bridge::Package;
use joomla_extension_installer::config::Credentials;
use joomla_extension_installer::context::HostContext;
use joomla_extension_installer::diagnostics::{DiagnosticMessage, Severity};
use joomla_extension_installer::error::InstallerError;
use joomla_extension_installer::lifecycle::ExtensionInstaller;
use joomla_extension_installer::manifest::{ExtensionType, Manifest};
use joomla_extension_installer::test_utils::{StubHost, StubLibrary};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

// ---------------------------------------------------------------------------
// World types
// ---------------------------------------------------------------------------

#[derive(Default)]
struct LifecycleWorld {
    package: Option<Package>,
    host_rejects: bool,
    queue: Vec<DiagnosticMessage>,
    manifest: Option<Manifest>,
    extensions: Vec<(String, ExtensionType)>,
    outcome: Option<Result<(), InstallerError>>,
    installed: Option<bool>,
    host: Option<StubHost>,
}

impl LifecycleWorld {
    fn build_host(&self) -> StubHost {
        let mut host = if self.host_rejects {
            StubHost::failing_with(self.queue.clone())
        } else {
            StubHost::succeeding()
        };
        if let Some(manifest) = &self.manifest {
            host = host.with_manifest(manifest.clone());
        }
        for (element, kind) in &self.extensions {
            host = host.with_extension(element, kind.clone());
        }
        host
    }

    fn run<T>(
        &mut self,
        operation: impl FnOnce(&mut ExtensionInstaller<StubHost, StubLibrary>, &Package) -> T,
    ) -> T {
        let package = self.package.clone().expect("package set");
        let mut installer = ExtensionInstaller::new(
            HostContext::bootstrapped("/var/www/site"),
            self.build_host(),
            StubLibrary::new("/var/www/site/vendor"),
            Credentials::default(),
        )
        .expect("stub host accepts credentials");

        let result = operation(&mut installer, &package);
        self.host = Some(installer.shutdown());
        result
    }

    fn error(&self) -> &InstallerError {
        self.outcome
            .as_ref()
            .expect("operation ran")
            .as_ref()
            .expect_err("operation should fail")
    }
}

#[fixture]
fn world() -> LifecycleWorld {
    LifecycleWorld::default()
}

// ---------------------------------------------------------------------------
// Step definitions
// ---------------------------------------------------------------------------

#[given("a package named \"{name}\"")]
fn given_package(world: &mut LifecycleWorld, name: String) {
    world.package = Some(Package::new(name, "1.0.0"));
}

#[given("the host accepts installations")]
fn given_host_accepts(world: &mut LifecycleWorld) {
    world.host_rejects = false;
}

#[given("the host rejects installations")]
fn given_host_rejects(world: &mut LifecycleWorld) {
    world.host_rejects = true;
}

#[given("the host queues an \"{severity}\" message \"{text}\"")]
fn given_queued_message_an(world: &mut LifecycleWorld, severity: String, text: String) {
    world
        .queue
        .push(DiagnosticMessage::new(Severity::from(severity), text));
}

#[given("the host queues a \"{severity}\" message \"{text}\"")]
fn given_queued_message_a(world: &mut LifecycleWorld, severity: String, text: String) {
    world
        .queue
        .push(DiagnosticMessage::new(Severity::from(severity), text));
}

#[given("the package ships a \"{kind}\" manifest named \"{name}\"")]
fn given_manifest(world: &mut LifecycleWorld, kind: String, name: String) {
    world.manifest = Some(Manifest::new(ExtensionType::from(kind), name, Vec::new()));
}

#[given("the host tracks the \"{kind}\" extension \"{element}\"")]
fn given_tracked_extension(world: &mut LifecycleWorld, kind: String, element: String) {
    world.extensions.push((element, ExtensionType::from(kind)));
}

#[when("the package is installed")]
fn when_installed(world: &mut LifecycleWorld) {
    let outcome = world.run(|installer, package| installer.install(package));
    world.outcome = Some(outcome);
}

#[when("the package is updated")]
fn when_updated(world: &mut LifecycleWorld) {
    let outcome = world.run(|installer, package| {
        let initial = Package::new(package.pretty_name(), "0.9.0");
        installer.update(&initial, package)
    });
    world.outcome = Some(outcome);
}

#[when("the installation status is checked")]
fn when_status_checked(world: &mut LifecycleWorld) {
    let installed = world.run(|installer, package| installer.is_installed(package));
    world.installed = Some(installed);
}

#[then("the operation succeeds")]
fn then_succeeds(world: &mut LifecycleWorld) {
    let outcome = world.outcome.as_ref().expect("operation ran");
    assert!(outcome.is_ok(), "unexpected failure: {outcome:?}");
}

#[then("the operation fails with message \"{expected}\"")]
fn then_fails_with_message(world: &mut LifecycleWorld, expected: String) {
    assert_eq!(world.error().to_string(), expected.replace("\\n", "\n"));
}

#[then("the failure details are \"{expected}\"")]
fn then_failure_details(world: &mut LifecycleWorld, expected: String) {
    let details: Vec<&str> = expected.split(", ").collect();
    assert_eq!(world.error().details(), details.as_slice());
}

#[then("the operation fails with an invalid name error")]
fn then_invalid_name(world: &mut LifecycleWorld) {
    assert!(matches!(world.error(), InstallerError::InvalidName { .. }));
}

#[then("the host was not asked to install anything")]
fn then_nothing_installed(world: &mut LifecycleWorld) {
    let host = world.host.as_ref().expect("host shut down");
    assert!(host.installed().is_empty());
}

#[then("the host session was closed")]
fn then_session_closed(world: &mut LifecycleWorld) {
    let host = world.host.as_ref().expect("host shut down");
    assert_eq!(host.sessions_closed(), 1);
}

#[then("the package is reported as installed")]
fn then_reported_installed(world: &mut LifecycleWorld) {
    assert_eq!(world.installed, Some(true));
}

#[then("the package is reported as not installed")]
fn then_reported_not_installed(world: &mut LifecycleWorld) {
    assert_eq!(world.installed, Some(false));
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/lifecycle.feature",
    name = "Install succeeds when the host accepts the package"
)]
fn scenario_install_succeeds(world: LifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/lifecycle.feature",
    name = "Install failure aggregates host error messages"
)]
fn scenario_install_failure_aggregates(world: LifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/lifecycle.feature",
    name = "Invalid package names are rejected before installation"
)]
fn scenario_invalid_name(world: LifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/lifecycle.feature",
    name = "Update failure reports the target package"
)]
fn scenario_update_failure(world: LifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/lifecycle.feature",
    name = "Package without a manifest is not installed"
)]
fn scenario_missing_manifest(world: LifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/lifecycle.feature",
    name = "Registered component is installed"
)]
fn scenario_registered_component(world: LifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/lifecycle.feature",
    name = "Module manifest without a module attribute is not installed"
)]
fn scenario_module_without_attribute(world: LifecycleWorld) {
    let _ = world;
}
