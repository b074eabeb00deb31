// Modules
pub mod axes;
pub mod config;
mod line;
mod patch;
mod text;

// Re-exports
pub use axes::XKCD_AXES_TAG;
pub use config::XkcdConfig;

// Imports
use crate::scene::{ObjectType, SceneGraph};
use crate::{EngineError, ObjectKey, SkipReason, SkippedObject};
use itertools::Itertools;
use rand::Rng;
use rxkcd_compose::jitter::JitterError;
use rxkcd_compose::utils::{new_rng_default_pcg64, seed_advance};
use rxkcd_compose::{JitterContext, SurfaceScale};
use slotmap::SecondaryMap;
use tracing::{debug, warn};

/// What a call to [xkcdify] did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XkcdReport {
    /// The count of restyled axes.
    pub axes: usize,
    pub lines: usize,
    pub patches: usize,
    pub texts: usize,
    /// The count of created spines, tick marks and tick labels.
    pub decorations: usize,
    pub skipped: Vec<SkippedObject>,
}

impl XkcdReport {
    fn skip(&mut self, key: ObjectKey, reason: SkipReason) {
        warn!("Skipped restyling object {key:?}, {reason}");
        self.skipped.push(SkippedObject::new(key, reason));
    }
}

/// Scales of the drawing surfaces, keyed by their axes.
///
/// A scale must be invalidated when the position or the limits of its axes change.
#[derive(Debug, Clone, Default)]
pub struct SurfaceScaleCache {
    scales: SecondaryMap<ObjectKey, SurfaceScale>,
}

impl SurfaceScaleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached scale of the axes, computed from the axes when missing.
    pub fn get_or_compute(
        &mut self,
        scene: &SceneGraph,
        axes: ObjectKey,
    ) -> Result<SurfaceScale, EngineError> {
        if let Some(scale) = self.scales.get(axes) {
            return Ok(*scale);
        }

        let scale = scene
            .axes(axes)
            .ok_or_else(|| scene.unexpected_kind(axes, "axes"))?
            .scale()?;
        self.scales.insert(axes, scale);
        Ok(scale)
    }

    pub fn invalidate(&mut self, axes: ObjectKey) {
        self.scales.remove(axes);
    }

    pub fn clear(&mut self) {
        self.scales.clear();
    }
}

/// Re-render the given figures and axes in a hand-drawn, xkcd comic style.
///
/// Handles must be figures or axes, figures stand for all of their axes.
/// Lines and patch outlines get jittered, fonts replaced and, when configured, the axis
/// is redrawn with jittered spines and tick marks.
/// Objects that can't be restyled are skipped and listed in the report.
/// An invalid config or handle is an error, and the scene is left unchanged.
pub fn xkcdify(
    scene: &mut SceneGraph,
    handles: &[ObjectKey],
    config: &XkcdConfig,
) -> Result<XkcdReport, EngineError> {
    config.validate()?;

    let mut targets = Vec::new();
    for &handle in handles {
        match scene.object_type(handle) {
            Some(ObjectType::Figure) => targets.extend(
                scene
                    .children(handle)
                    .iter()
                    .copied()
                    .filter(|&child| scene.object_type(child) == Some(ObjectType::Axes)),
            ),
            Some(ObjectType::Axes) => targets.push(handle),
            Some(_) => return Err(scene.unexpected_kind(handle, "a figure or axes")),
            None => return Err(EngineError::InvalidHandle(handle)),
        }
    }
    let targets = targets.into_iter().unique().collect::<Vec<ObjectKey>>();

    let mut report = XkcdReport::default();
    let mut scales = SurfaceScaleCache::new();
    let mut seed = config.seed;

    for axes_key in targets {
        let scale = match scales.get_or_compute(scene, axes_key) {
            Ok(scale) => scale,
            Err(EngineError::Jitter(JitterError::DegenerateSurface { .. })) => {
                report.skip(axes_key, SkipReason::DegenerateSurface);
                continue;
            }
            Err(e) => return Err(e),
        };

        // one generator per axes, seeded ones advance in axes order
        let rng = new_rng_default_pcg64(seed);
        seed = seed.map(seed_advance);
        let mut cx = JitterContext::new(scale, rng).with_pixels_per_sample(config.pixels_per_sample);

        if config.draw_axes {
            axes::remove_decorations(scene, axes_key)?;
        }
        restyle_axes_children(scene, axes_key, &mut cx, config, &mut report);

        if let Some(axes_data) = scene.axes_mut(axes_key) {
            text::restyle_font(&mut axes_data.font, &config.font);
        }
        if config.draw_axes {
            report.decorations += axes::draw_decorations(scene, axes_key, &mut cx, config)?;
        }

        report.axes += 1;
        debug!(
            "Restyled axes {axes_key:?}, lines: {}, patches: {}, texts: {}",
            report.lines, report.patches, report.texts
        );
    }

    Ok(report)
}

/// Traverse the children of the axes and restyle every line, patch and text.
///
/// Hand-drawn decorations of earlier runs are left alone.
fn restyle_axes_children<R: Rng>(
    scene: &mut SceneGraph,
    axes: ObjectKey,
    cx: &mut JitterContext<R>,
    config: &XkcdConfig,
    report: &mut XkcdReport,
) {
    let jitter = cx.scale.pixels_to_data(config.jitter_px);
    // front-most first
    let mut worklist = scene
        .children(axes)
        .iter()
        .rev()
        .copied()
        .filter(|&child| {
            !scene
                .get(child)
                .is_some_and(|o| o.tag.as_deref() == Some(XKCD_AXES_TAG))
        })
        .collect::<Vec<ObjectKey>>();

    while let Some(key) = worklist.pop() {
        let Some(object_type) = scene.object_type(key) else {
            continue;
        };

        match object_type {
            ObjectType::Line => {
                let Some(line) = scene.line_mut(key) else {
                    continue;
                };
                match line::restyle_line(line, cx, jitter, config.line_width) {
                    Ok(()) => report.lines += 1,
                    Err(reason) => report.skip(key, reason),
                }
            }
            ObjectType::Patch => {
                let Some(patch) = scene.patch_mut(key) else {
                    continue;
                };
                match patch::restyle_patch(patch, cx, jitter, config.line_width) {
                    Ok(()) => report.patches += 1,
                    Err(reason) => report.skip(key, reason),
                }
            }
            ObjectType::Text => {
                if let Some(text) = scene.text_mut(key) {
                    text::restyle_font(&mut text.font, &config.font);
                    report.texts += 1;
                }
            }
            ObjectType::Group => worklist.extend(scene.children(key).iter().rev().copied()),
            ObjectType::Figure | ObjectType::Axes | ObjectType::Other => {
                let type_name = scene
                    .kind(key)
                    .map(|kind| kind.type_name().to_string())
                    .unwrap_or_default();
                report.skip(key, SkipReason::UnsupportedKind(type_name));
            }
        }
    }
}
