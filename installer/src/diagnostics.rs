//! Host message queue handling.
//!
//! While it installs or updates an extension the host enqueues messages of
//! varying severity. Only error-severity entries are surfaced when an
//! operation fails; notices and warnings are dropped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a queued host message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    /// `error`
    Error,
    /// `warning`
    Warning,
    /// `notice`
    Notice,
    /// `message`, the host's informational level.
    Message,
    /// Any other severity label.
    Other(String),
}

impl Severity {
    /// Return the severity label as the host spells it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Notice => "notice",
            Self::Message => "message",
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for Severity {
    fn from(value: &str) -> Self {
        match value {
            "error" => Self::Error,
            "warning" => Self::Warning,
            "notice" => Self::Notice,
            "message" => Self::Message,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Severity> for String {
    fn from(value: Severity) -> Self {
        match value {
            Severity::Other(other) => other,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the host message queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticMessage {
    /// Severity label.
    #[serde(rename = "type")]
    pub severity: Severity,
    /// Message text.
    #[serde(rename = "message")]
    pub text: String,
}

impl DiagnosticMessage {
    /// Create a message.
    #[must_use]
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    /// Create an error-severity message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Severity::Error, text)
    }

    /// Returns `true` for error-severity messages.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Ordered snapshot of the host message queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagnosticQueue(Vec<DiagnosticMessage>);

impl DiagnosticQueue {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a message.
    pub fn push(&mut self, message: DiagnosticMessage) {
        self.0.push(message);
    }

    /// Iterate over the messages in queue order.
    pub fn iter(&self) -> std::slice::Iter<'_, DiagnosticMessage> {
        self.0.iter()
    }

    /// Number of queued messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<DiagnosticMessage> for DiagnosticQueue {
    fn from_iter<T: IntoIterator<Item = DiagnosticMessage>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DiagnosticQueue {
    type Item = &'a DiagnosticMessage;
    type IntoIter = std::slice::Iter<'a, DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Extract the text of every error-severity message, preserving order.
///
/// The queue is only read.
///
/// # Examples
///
/// ```
/// use joomla_extension_installer::diagnostics::{
///     collect_errors, DiagnosticMessage, DiagnosticQueue, Severity,
/// };
///
/// let queue: DiagnosticQueue = [
///     DiagnosticMessage::error("A"),
///     DiagnosticMessage::new(Severity::Notice, "B"),
///     DiagnosticMessage::error("C"),
/// ]
/// .into_iter()
/// .collect();
/// assert_eq!(collect_errors(&queue), ["A", "C"]);
/// ```
#[must_use]
pub fn collect_errors(queue: &DiagnosticQueue) -> Vec<String> {
    queue
        .iter()
        .filter(|message| message.is_error())
        .map(|message| message.text.clone())
        .collect()
}
