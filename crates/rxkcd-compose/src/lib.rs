#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![allow(clippy::single_match)]

//! the rxkcd-compose crate provides the building blocks for re-drawing chart geometry in a hand-drawn style:
//! tremor noise, smoothing, resampling and jittering of polylines, drawing surface scales and stacking order moves.

// Modules
/// colors
pub mod color;
/// module for extension traits for foreign types
pub mod ext;
/// module for the hand-drawn jitter pipeline
pub mod jitter;
/// module for reordering siblings in a stacking order
pub mod stacking;
/// pixel / data unit scale of a drawing surface
pub mod surfacescale;
/// other misc utilities
pub mod utils;

// Re-exports
pub use color::Color;
pub use jitter::JitterContext;
pub use stacking::{Placement, StackStep};
pub use surfacescale::SurfaceScale;

// Renames
extern crate nalgebra as na;
extern crate parry2d_f64 as p2d;
