// Imports
use super::{ObjectKey, SceneGraph};
use crate::{EngineError, SkipReason, SkippedObject};
use rxkcd_compose::stacking::{restack, StackMove, StackingError};
use rxkcd_compose::{Placement, StackStep};
use tracing::{debug, warn};

/// The outcome of reordering a batch of objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReorderReport {
    /// The objects that were moved (or stayed in place), with their indices before and after.
    pub moves: Vec<(ObjectKey, StackMove)>,
    pub skipped: Vec<SkippedObject>,
}

impl ReorderReport {
    fn skip(&mut self, key: ObjectKey, reason: SkipReason) {
        warn!("Skipped reordering object {key:?}, {reason}");
        self.skipped.push(SkippedObject::new(key, reason));
    }
}

impl SceneGraph {
    /// Move every target within the stacking order of its parent, one after another.
    ///
    /// Targets without a parent are skipped. Targets that have parents must all share the same one.
    pub fn reorder(
        &mut self,
        targets: &[ObjectKey],
        placement: Placement,
        step: StackStep,
    ) -> Result<ReorderReport, EngineError> {
        let mut common_parent: Option<(ObjectKey, ObjectKey)> = None;
        for &target in targets {
            let object = self.get(target).ok_or(EngineError::InvalidHandle(target))?;
            let Some(parent) = object.parent() else {
                continue;
            };
            match common_parent {
                Some((first, first_parent)) if first_parent != parent => {
                    return Err(EngineError::NotSiblings {
                        first,
                        other: target,
                    });
                }
                Some(_) => {}
                None => common_parent = Some((target, parent)),
            }
        }

        let mut report = ReorderReport::default();
        for &target in targets {
            match self.parent(target) {
                Some(parent) => self.reorder_single(parent, target, placement, step, &mut report),
                None => report.skip(target, SkipReason::NoParent),
            }
        }
        Ok(report)
    }

    /// Move every target within the stacking order of the given parent, one after another.
    ///
    /// Targets that are not among the children of the parent are skipped.
    pub fn reorder_within(
        &mut self,
        parent: ObjectKey,
        targets: &[ObjectKey],
        placement: Placement,
        step: StackStep,
    ) -> Result<ReorderReport, EngineError> {
        if !self.contains(parent) {
            return Err(EngineError::InvalidHandle(parent));
        }

        let mut report = ReorderReport::default();
        for &target in targets {
            self.reorder_single(parent, target, placement, step, &mut report);
        }
        Ok(report)
    }

    /// Like [SceneGraph::reorder], with the placement keyword and step as they are entered by users.
    ///
    /// Invalid keywords and steps are rejected before anything is moved.
    pub fn reorder_by_name(
        &mut self,
        targets: &[ObjectKey],
        placement: &str,
        step: i64,
    ) -> Result<ReorderReport, EngineError> {
        let placement = placement.parse::<Placement>()?;
        let step = StackStep::try_from(step)?;

        self.reorder(targets, placement, step)
    }

    fn reorder_single(
        &mut self,
        parent: ObjectKey,
        target: ObjectKey,
        placement: Placement,
        step: StackStep,
        report: &mut ReorderReport,
    ) {
        let mut children = self.children(parent).to_vec();

        match restack(&mut children, &target, placement, step) {
            Ok(stack_move) => {
                if !stack_move.is_noop() {
                    if let Err(e) = self.set_children(parent, children) {
                        // restack only permutes, so this can't happen
                        warn!("Installing reordered children of {parent:?} failed, Err: {e:?}");
                    }
                }
                debug!(
                    "Reordered object {target:?} with placement `{placement}`, from index {} to {}",
                    stack_move.from, stack_move.to
                );
                report.moves.push((target, stack_move));
            }
            Err(StackingError::NotFound) => report.skip(target, SkipReason::NotInParent(parent)),
            Err(e) => warn!("Reordering object {target:?} failed, Err: {e:?}"),
        }
    }
}
