// Imports
use crate::ObjectKey;

/// Why an object was left out of an operation.
///
/// Skips are not errors, the operation continues with the remaining objects.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The object kind can't be styled.
    UnsupportedKind(String),
    /// The drawing surface has no area, so no pixel scale can be derived.
    DegenerateSurface,
    /// The geometry contains non-finite values or its coordinates differ in length.
    InvalidGeometry(String),
    /// The object has no parent.
    NoParent,
    /// The object is not among the children of the parent it was reordered in.
    NotInParent(ObjectKey),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedKind(type_name) => write!(f, "unsupported object type `{type_name}`"),
            Self::DegenerateSurface => write!(f, "degenerate drawing surface"),
            Self::InvalidGeometry(msg) => write!(f, "invalid geometry, {msg}"),
            Self::NoParent => write!(f, "object has no parent"),
            Self::NotInParent(parent) => write!(f, "object is not a child of {parent:?}"),
        }
    }
}

/// An object that was skipped, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedObject {
    pub key: ObjectKey,
    pub reason: SkipReason,
}

impl SkippedObject {
    pub fn new(key: ObjectKey, reason: SkipReason) -> Self {
        Self { key, reason }
    }
}
