// Imports
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::str::FromStr;
use thiserror::Error;

/// Errors when reordering siblings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackingError {
    /// The placement keyword is not one of `up`, `down`, `top`, `bottom`.
    #[error("invalid placement `{0}`, expected one of `up`, `down`, `top`, `bottom`")]
    InvalidPlacement(String),
    /// The step is not a positive integer.
    #[error("invalid step `{0}`, expected a positive integer")]
    InvalidStep(String),
    /// The target is not part of the siblings.
    #[error("target is not contained in the siblings")]
    NotFound,
}

/// Where an element is moved in the stacking order of its siblings.
///
/// Index 0 of the siblings is the front-most element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename = "placement")]
pub enum Placement {
    /// Move `step` positions toward the front.
    #[serde(rename = "up")]
    Up,
    /// Move `step` positions toward the back.
    #[serde(rename = "down")]
    Down,
    /// Move to the front.
    #[serde(rename = "top")]
    Top,
    /// Move to the back.
    #[serde(rename = "bottom")]
    Bottom,
}

impl FromStr for Placement {
    type Err = StackingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            _ => Err(StackingError::InvalidPlacement(s.to_string())),
        }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Top => "top",
            Self::Bottom => "bottom",
        };
        write!(f, "{s}")
    }
}

impl Placement {
    /// The new index for an element at `current` within `len` siblings.
    ///
    /// `len` must be non-zero and `current` must be smaller than `len`.
    pub fn target_index(self, current: usize, len: usize, step: StackStep) -> usize {
        let last = len.saturating_sub(1);

        match self {
            Self::Up => current.saturating_sub(step.get()),
            Self::Down => current.saturating_add(step.get()).min(last),
            Self::Top => 0,
            Self::Bottom => last,
        }
    }
}

/// The count of positions an element is moved for [Placement::Up] and [Placement::Down].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename = "stack_step")]
pub struct StackStep(NonZeroUsize);

impl Default for StackStep {
    fn default() -> Self {
        Self(NonZeroUsize::MIN)
    }
}

impl StackStep {
    /// A new step.
    pub fn new(step: NonZeroUsize) -> Self {
        Self(step)
    }

    /// The step as integer.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<i64> for StackStep {
    type Error = StackingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or_else(|| StackingError::InvalidStep(value.to_string()))
    }
}

impl TryFrom<f64> for StackStep {
    type Error = StackingError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value.fract() != 0.0 || value < 1.0 || value > usize::MAX as f64 {
            return Err(StackingError::InvalidStep(value.to_string()));
        }
        NonZeroUsize::new(value as usize)
            .map(Self)
            .ok_or_else(|| StackingError::InvalidStep(value.to_string()))
    }
}

/// A completed move of an element in the stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackMove {
    /// The index before the move.
    pub from: usize,
    /// The index after the move.
    pub to: usize,
}

impl StackMove {
    /// If the element stayed where it was.
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Move `target` within `siblings` according to the placement.
///
/// Only the target changes its position, all other siblings keep their relative order.
/// When the new index equals the current one the siblings are left untouched.
pub fn restack<T: PartialEq>(
    siblings: &mut [T],
    target: &T,
    placement: Placement,
    step: StackStep,
) -> Result<StackMove, StackingError> {
    let from = siblings
        .iter()
        .position(|s| s == target)
        .ok_or(StackingError::NotFound)?;
    let to = placement.target_index(from, siblings.len(), step);

    if to < from {
        siblings[to..=from].rotate_right(1);
    } else if to > from {
        siblings[from..=to].rotate_left(1);
    }

    Ok(StackMove { from, to })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(n: i64) -> StackStep {
        StackStep::try_from(n).unwrap()
    }

    #[test]
    fn placements() {
        let abc = ['a', 'b', 'c'];

        let mut v = abc;
        restack(&mut v, &'a', Placement::Bottom, StackStep::default()).unwrap();
        assert_eq!(v, ['b', 'c', 'a']);

        let mut v = abc;
        restack(&mut v, &'c', Placement::Top, StackStep::default()).unwrap();
        assert_eq!(v, ['c', 'a', 'b']);

        let mut v = abc;
        restack(&mut v, &'b', Placement::Up, step(1)).unwrap();
        assert_eq!(v, ['b', 'a', 'c']);

        let mut v = abc;
        restack(&mut v, &'a', Placement::Down, step(1)).unwrap();
        assert_eq!(v, ['b', 'a', 'c']);
    }

    #[test]
    fn steps_are_clamped() {
        let mut v = ['a', 'b', 'c', 'd', 'e'];

        let mv = restack(&mut v, &'d', Placement::Up, step(10)).unwrap();
        assert_eq!(mv, StackMove { from: 3, to: 0 });
        assert_eq!(v, ['d', 'a', 'b', 'c', 'e']);

        let mv = restack(&mut v, &'a', Placement::Down, step(2)).unwrap();
        assert_eq!(mv, StackMove { from: 1, to: 3 });
        assert_eq!(v, ['d', 'b', 'c', 'a', 'e']);

        let mv = restack(&mut v, &'b', Placement::Down, step(i64::MAX)).unwrap();
        assert_eq!(mv.to, 4);
        assert_eq!(v, ['d', 'c', 'a', 'e', 'b']);
    }

    #[test]
    fn noop_moves() {
        let mut v = vec![String::from("a"), String::from("b"), String::from("c")];
        let ptrs = v.iter().map(|s| s.as_ptr()).collect::<Vec<_>>();

        let mv = restack(&mut v, &String::from("a"), Placement::Top, step(1)).unwrap();
        assert!(mv.is_noop());
        let mv = restack(&mut v, &String::from("c"), Placement::Down, step(3)).unwrap();
        assert!(mv.is_noop());

        assert_eq!(v, ["a", "b", "c"]);
        assert_eq!(v.iter().map(|s| s.as_ptr()).collect::<Vec<_>>(), ptrs);
    }

    #[test]
    fn target_not_found() {
        let mut v = ['a', 'b'];

        assert_eq!(
            restack(&mut v, &'z', Placement::Top, step(1)),
            Err(StackingError::NotFound)
        );
        assert_eq!(v, ['a', 'b']);
    }

    #[test]
    fn parse_placement() {
        assert_eq!("up".parse::<Placement>(), Ok(Placement::Up));
        assert_eq!(" Bottom ".parse::<Placement>(), Ok(Placement::Bottom));
        assert_eq!(
            "sideways".parse::<Placement>(),
            Err(StackingError::InvalidPlacement(String::from("sideways")))
        );
        assert_eq!(Placement::Top.to_string(), "top");
    }

    #[test]
    fn invalid_steps() {
        assert!(StackStep::try_from(0_i64).is_err());
        assert!(StackStep::try_from(-2_i64).is_err());
        assert!(StackStep::try_from(1.5_f64).is_err());
        assert!(StackStep::try_from(f64::NAN).is_err());
        assert_eq!(StackStep::try_from(3.0_f64).map(StackStep::get), Ok(3));
    }
}
