//! Dotted field-path addressing for validation errors.

use std::fmt;

/// Dotted address identifying which configuration field an error refers to.
///
/// Paths are built from a caller-supplied root, extended one segment at a
/// time. Child segments join with `.`, map keys render in brackets:
///
/// ```rust
/// use preflight_config::field::FieldPath;
///
/// let root = FieldPath::new("platform").child("azure");
/// assert_eq!(root.to_string(), "platform.azure");
/// assert_eq!(root.child("region").to_string(), "platform.azure.region");
/// assert_eq!(root.child("userTags").key("env").to_string(), "platform.azure.userTags[env]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    /// Create a path rooted at `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Extend the path with a dot-separated child segment.
    pub fn child(&self, name: &str) -> Self {
        Self(format!("{}.{}", self.0, name))
    }

    /// Extend the path with a map-key segment, rendered as `path[key]`.
    pub fn key(&self, key: &str) -> Self {
        Self(format!("{}[{}]", self.0, key))
    }

    /// The rendered path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
