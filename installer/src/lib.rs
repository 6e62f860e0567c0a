//! Joomla extension installer library.
//!
//! This crate plugs a package manager's installer lifecycle into a Joomla
//! site. The package manager resolves, downloads, and places package files;
//! the site performs the actual extension installation. This library decides
//! whether a package is installable, which element an installed extension is
//! tracked under, and how host feedback becomes a single pass/fail result.
//!
//! # Modules
//!
//! - [`bridge`] - Collaborator traits for the host site and file placement
//! - [`config`] - Host credentials and their configuration block
//! - [`context`] - Host runtime context and session teardown guard
//! - [`diagnostics`] - Host message queue filtering
//! - [`element`] - Element resolution from installation manifests
//! - [`error`] - Semantic error types
//! - [`lifecycle`] - Install, update, and existence checks
//! - [`manifest`] - Installation manifest model
//! - [`manifest_parser`] - JSON manifest decoding
//! - [`package_name`] - `vendor/xyz_name` naming convention

pub mod bridge;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod element;
pub mod error;
pub mod lifecycle;
pub mod manifest;
pub mod manifest_parser;
pub mod package_name;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use error::{InstallerError, Result};
pub use lifecycle::{ExtensionInstaller, with_installer};
