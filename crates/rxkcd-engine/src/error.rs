// Imports
use crate::ObjectKey;
use rxkcd_compose::jitter::JitterError;
use rxkcd_compose::stacking::StackingError;
use thiserror::Error;

/// Errors that abort an operation on the scene before anything was changed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("object {0:?} does not exist in the scene")]
    InvalidHandle(ObjectKey),
    #[error("object {key:?} is of type `{found}`, expected {expected}")]
    UnexpectedKind {
        key: ObjectKey,
        expected: &'static str,
        found: String,
    },
    #[error("objects {first:?} and {other:?} do not share a parent")]
    NotSiblings { first: ObjectKey, other: ObjectKey },
    #[error("invalid xkcd config, `{field}` is {value}, expected {expected}")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
    #[error("new children of {0:?} are not a permutation of its current children")]
    ChildrenMismatch(ObjectKey),
    #[error(transparent)]
    Stacking(#[from] StackingError),
    #[error(transparent)]
    Jitter(#[from] JitterError),
}
