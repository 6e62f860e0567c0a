//! Element resolution from installation manifests.
//!
//! Joomla tracks each installed extension by its `(type, element)` pair. The
//! element is not stored in the manifest directly; it is derived with a rule
//! that depends on the extension type:
//!
//! - modules take the `module` attribute of the first file entry carrying one;
//! - plugins take the first file attribute named after the manifest type;
//! - components (and any other type) sanitise the display name and prefix it
//!   with `com_`.
//!
//! An empty element means "no identifier could be derived" and is a normal
//! outcome, not an error.

use crate::manifest::{ExtensionType, Manifest};
use log::trace;
use std::fmt;

/// Prefix carried by every component element.
const COMPONENT_PREFIX: &str = "com_";

/// The identifier a host uses to track one installed extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ElementId(String);

impl ElementId {
    /// Create an element identifier.
    #[must_use]
    pub fn new(element: impl Into<String>) -> Self {
        Self(element.into())
    }

    /// The empty, unresolved element.
    #[must_use]
    pub const fn unresolved() -> Self {
        Self(String::new())
    }

    /// Returns `true` when no element could be derived.
    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the element as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the element of a given extension type is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStrategy {
    /// First non-empty `module` attribute in the file list.
    ModuleAttribute,
    /// First non-empty file attribute whose name equals the manifest type.
    TypeNamedAttribute,
    /// Sanitised display name, prefixed with `com_`.
    SanitisedName,
}

impl ResolutionStrategy {
    /// Select the strategy for an extension type.
    ///
    /// # Examples
    ///
    /// ```
    /// use joomla_extension_installer::element::ResolutionStrategy;
    /// use joomla_extension_installer::manifest::ExtensionType;
    ///
    /// assert_eq!(
    ///     ResolutionStrategy::for_type(&ExtensionType::Plugin),
    ///     ResolutionStrategy::TypeNamedAttribute
    /// );
    /// assert_eq!(
    ///     ResolutionStrategy::for_type(&ExtensionType::Template),
    ///     ResolutionStrategy::SanitisedName
    /// );
    /// ```
    #[must_use]
    pub const fn for_type(kind: &ExtensionType) -> Self {
        match kind {
            ExtensionType::Module => Self::ModuleAttribute,
            ExtensionType::Plugin => Self::TypeNamedAttribute,
            _ => Self::SanitisedName,
        }
    }

    /// Apply the strategy to a manifest.
    #[must_use]
    pub fn apply(self, manifest: &Manifest) -> ElementId {
        match self {
            Self::ModuleAttribute => first_attribute(manifest, "module"),
            Self::TypeNamedAttribute => first_attribute(manifest, manifest.kind().as_str()),
            Self::SanitisedName => component_element(manifest.name()),
        }
    }
}

/// The `(type, element)` pair an extension is tracked under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExtension {
    /// The manifest type.
    pub kind: ExtensionType,
    /// The derived element; may be unresolved.
    pub element: ElementId,
}

/// Derive the element identifier from a manifest.
///
/// # Examples
///
/// ```
/// use joomla_extension_installer::element::resolve_element;
/// use joomla_extension_installer::manifest::{ExtensionType, Manifest};
///
/// let manifest = Manifest::new(ExtensionType::Component, "My Cool Extension!", Vec::new());
/// assert_eq!(resolve_element(&manifest).as_str(), "com_mycoolextension");
/// ```
#[must_use]
pub fn resolve_element(manifest: &Manifest) -> ElementId {
    let strategy = ResolutionStrategy::for_type(manifest.kind());
    let element = strategy.apply(manifest);
    trace!(
        "resolve_element: type `{}` via {strategy:?} -> `{element}`",
        manifest.kind()
    );
    element
}

/// Derive the `(type, element)` pair from a manifest.
#[must_use]
pub fn resolve(manifest: &Manifest) -> ResolvedExtension {
    ResolvedExtension {
        kind: manifest.kind().clone(),
        element: resolve_element(manifest),
    }
}

fn first_attribute(manifest: &Manifest, attribute: &str) -> ElementId {
    manifest
        .files()
        .iter()
        .find_map(|entry| entry.non_empty_attribute(attribute))
        .map_or_else(ElementId::unresolved, ElementId::new)
}

/// Keep `[A-Za-z0-9_.-]`, lowercase, and ensure the `com_` prefix.
fn component_element(name: &str) -> ElementId {
    let sanitised: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if sanitised.starts_with(COMPONENT_PREFIX) {
        ElementId(sanitised)
    } else {
        ElementId(format!("{COMPONENT_PREFIX}{sanitised}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::FileEntry;
    use rstest::rstest;

    fn manifest(kind: &str, name: &str, files: Vec<FileEntry>) -> Manifest {
        Manifest::new(ExtensionType::from(kind), name, files)
    }

    #[rstest]
    #[case::spaces_and_punctuation("My Cool Extension!", "com_mycoolextension")]
    #[case::already_prefixed("com_foo", "com_foo")]
    #[case::uppercase_prefix("COM_Foo", "com_foo")]
    #[case::keeps_dots_and_dashes("Blog-Tools.v2", "com_blog-tools.v2")]
    #[case::drops_non_ascii("Café Ünïcode", "com_cafncode")]
    #[case::empty_name("", "com_")]
    fn components_use_sanitised_name(#[case] name: &str, #[case] expected: &str) {
        let element = resolve_element(&manifest("component", name, Vec::new()));
        assert_eq!(element.as_str(), expected);
    }

    #[rstest]
    #[case::template("template")]
    #[case::unknown("widget")]
    fn other_types_fall_back_to_component_rule(#[case] kind: &str) {
        let element = resolve_element(&manifest(
            kind,
            "Dark Theme",
            vec![FileEntry::new([(kind, "ignored")])],
        ));
        assert_eq!(element.as_str(), "com_darktheme");
    }

    #[test]
    fn module_takes_first_module_attribute() {
        let files = vec![
            FileEntry::new([("folder", "tmpl")]),
            FileEntry::new([("module", "")]),
            FileEntry::new([("module", "mod_foo")]),
            FileEntry::new([("module", "mod_other")]),
        ];
        let element = resolve_element(&manifest("module", "Foo", files));
        assert_eq!(element.as_str(), "mod_foo");
    }

    #[rstest]
    #[case::no_files(Vec::new())]
    #[case::no_module_attribute(vec![FileEntry::new([("folder", "tmpl")])])]
    #[case::plugin_attribute_only(vec![FileEntry::new([("plugin", "cache")])])]
    fn module_without_attribute_is_unresolved(#[case] files: Vec<FileEntry>) {
        let element = resolve_element(&manifest("module", "Foo", files));
        assert!(element.is_unresolved());
    }

    #[test]
    fn plugin_takes_attribute_named_after_type() {
        let files = vec![
            FileEntry::new([("module", "mod_wrong")]),
            FileEntry::new([("plugin", "plg_bar")]),
        ];
        let element = resolve_element(&manifest("plugin", "Bar", files));
        assert_eq!(element.as_str(), "plg_bar");
    }

    #[test]
    fn plugin_without_attribute_is_unresolved() {
        let element = resolve_element(&manifest(
            "plugin",
            "Bar",
            vec![FileEntry::new([("plugin", "")])],
        ));
        assert_eq!(element, ElementId::unresolved());
    }

    #[test]
    fn resolve_pairs_type_and_element() {
        let resolved = resolve(&manifest("component", "com_foo", Vec::new()));
        assert_eq!(resolved.kind, ExtensionType::Component);
        assert_eq!(resolved.element.as_str(), "com_foo");
    }

    #[test]
    fn resolution_is_deterministic() {
        let subject = manifest("module", "Foo", vec![FileEntry::new([("module", "mod_foo")])]);
        assert_eq!(resolve(&subject), resolve(&subject));
    }
}
