//! Error types for preflight-config.

use std::fmt;

/// Result type alias for preflight-config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when working with an install configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to deserialize an install configuration document.
    #[error("Failed to deserialize configuration: {0}")]
    DeserializationError(String),

    /// The configuration failed pre-provisioning validation.
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] AggregateError),
}

/// What kind of rule a field violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// A mandatory field was left empty.
    Required,
    /// A field value breaks a validation rule.
    Invalid,
    /// A field value is outside a fixed allow-list.
    Unsupported,
    /// A field value appears more than once where uniqueness is required.
    Duplicate,
}

impl FieldErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Required => "Required value",
            Self::Invalid => "Invalid value",
            Self::Unsupported => "Unsupported value",
            Self::Duplicate => "Duplicate value",
        }
    }
}

/// A single rule violation, addressed to the configuration field that broke it.
///
/// Rendering is stable and callers may match on it:
///
/// ```text
/// platform.azure.region: Required value: region should be set to one of the supported Azure regions
/// platform.azure.outboundType: Invalid value: "UserDefinedRouting": UserDefinedRouting is only allowed when installing to pre-existing network
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Which rule class was violated.
    pub kind: FieldErrorKind,
    /// Dotted path of the offending field.
    pub path: String,
    /// The offending value, when one exists (Required errors carry none).
    pub value: Option<String>,
    /// Human-readable explanation of the violated rule.
    pub detail: String,
}

impl FieldError {
    /// A mandatory field was left empty.
    pub fn required(path: impl fmt::Display, detail: impl Into<String>) -> Self {
        Self {
            kind: FieldErrorKind::Required,
            path: path.to_string(),
            value: None,
            detail: detail.into(),
        }
    }

    /// A field value breaks a validation rule.
    pub fn invalid(
        path: impl fmt::Display,
        value: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind: FieldErrorKind::Invalid,
            path: path.to_string(),
            value: Some(value.into()),
            detail: detail.into(),
        }
    }

    /// A field value is outside a fixed allow-list. The detail message lists
    /// the supported values.
    pub fn unsupported(
        path: impl fmt::Display,
        value: impl Into<String>,
        supported: &[&str],
    ) -> Self {
        let supported = supported
            .iter()
            .map(|v| format!("{:?}", v))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            kind: FieldErrorKind::Unsupported,
            path: path.to_string(),
            value: Some(value.into()),
            detail: format!("supported values: {}", supported),
        }
    }

    /// A value appears more than once where uniqueness is required.
    pub fn duplicate(path: impl fmt::Display, value: impl Into<String>) -> Self {
        Self {
            kind: FieldErrorKind::Duplicate,
            path: path.to_string(),
            value: Some(value.into()),
            detail: String::new(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind.as_str())?;
        if let Some(value) = &self.value {
            write!(f, ": {:?}", value)?;
        }
        if !self.detail.is_empty() {
            write!(f, ": {}", self.detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldError {}

/// Ordered collection of field errors produced by one validation pass.
///
/// Validation is exhaustive, never short-circuiting: every violated rule
/// contributes one entry, in rule evaluation order. An empty list means the
/// input is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrorList(Vec<FieldError>);

impl FieldErrorList {
    /// Create an empty error list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single error.
    pub fn push(&mut self, err: FieldError) {
        self.0.push(err);
    }

    /// Append every error from another list, preserving order.
    pub fn extend(&mut self, other: FieldErrorList) {
        self.0.extend(other.0);
    }

    /// True when no rule was violated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of violations collected.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the collected errors in order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Collapse the list into a single error value, or `None` when empty.
    pub fn into_aggregate(self) -> Option<AggregateError> {
        if self.0.is_empty() {
            None
        } else {
            Some(AggregateError(self.0))
        }
    }
}

impl IntoIterator for FieldErrorList {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrorList {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<FieldError>> for FieldErrorList {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

/// One or more field errors combined into a single error value.
///
/// A single error renders as itself; multiple render joined as
/// `[e1, e2, ...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateError(Vec<FieldError>);

impl AggregateError {
    /// The individual field errors, in evaluation order. Never empty.
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "{}", single),
            many => {
                write!(f, "[")?;
                for (i, err) in many.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl std::error::Error for AggregateError {}
