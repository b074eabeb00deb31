#![warn(missing_debug_implementations)]
#![allow(clippy::single_match)]
#![allow(clippy::derivable_impls)]

//! The rxkcd-engine crate holds the scene graph of charts and re-renders its objects in a hand-drawn, xkcd comic style.
//!
//! The main entry points are [SceneGraph] and [xkcd::xkcdify].

// Modules
pub mod error;
pub mod export;
pub mod scene;
pub mod skipped;
pub mod xkcd;

// Re-exports
pub use error::EngineError;
pub use scene::{ObjectKey, SceneGraph};
pub use skipped::{SkipReason, SkippedObject};
pub use xkcd::{xkcdify, XkcdConfig, XkcdReport};

// Renames
extern crate nalgebra as na;
extern crate parry2d_f64 as p2d;
