//! Command path and tenant identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a tenant (an isolated command namespace, e.g. a community)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub String);

impl TenantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TenantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TenantId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for TenantId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered path segments from a tree root to a command
///
/// The empty path addresses the root of a tree. The fully-qualified name of a
/// command is its segments joined with the configured separator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandPath(Vec<String>);

impl CommandPath {
    /// Path of the tree root
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from segments, dropping blank ones
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            segments
                .into_iter()
                .map(|s| {
                    let s: String = s.into();
                    s.trim().to_string()
                })
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }

    /// Split a fully-qualified name on `separator`
    ///
    /// A whitespace separator splits on any run of whitespace.
    pub fn parse(input: &str, separator: &str) -> Self {
        if separator.trim().is_empty() {
            Self::new(input.split_whitespace())
        } else {
            Self::new(input.split(separator))
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Last segment, empty for the root
    pub fn name(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or("")
    }

    /// Path of the parent; the parent of a top-level command is the root
    pub fn parent(&self) -> CommandPath {
        let mut segments = self.0.clone();
        segments.pop();
        Self(segments)
    }

    pub fn child(&self, name: impl Into<String>) -> CommandPath {
        let mut segments = self.0.clone();
        segments.push(name.into());
        Self(segments)
    }

    /// Whether `prefix` is this path or one of its ancestors
    pub fn starts_with(&self, prefix: &CommandPath) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Replace `old_prefix` with `new_prefix`, if this path lies under it
    pub fn rebase(&self, old_prefix: &CommandPath, new_prefix: &CommandPath) -> Option<CommandPath> {
        if !self.starts_with(old_prefix) {
            return None;
        }
        let mut segments = new_prefix.0.clone();
        segments.extend_from_slice(&self.0[old_prefix.len()..]);
        Some(Self(segments))
    }

    /// Fully-qualified name with the given separator
    pub fn join(&self, separator: &str) -> String {
        self.0.join(separator)
    }
}

impl fmt::Display for CommandPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

impl From<&str> for CommandPath {
    fn from(s: &str) -> Self {
        Self::new(s.split_whitespace())
    }
}
