// Imports
use super::XkcdConfig;
use crate::scene::{
    HorizontalAlignment, LineObject, ObjectKind, SceneGraph, TextObject, VerticalAlignment,
};
use crate::{EngineError, ObjectKey};
use rand::Rng;
use rxkcd_compose::jitter::suppress_degenerate_jitter;
use rxkcd_compose::{Color, JitterContext};

/// The tag of the group that holds the hand-drawn spines, tick marks and tick labels of an axes.
pub const XKCD_AXES_TAG: &str = "xkcd-axes";

/// Remove the hand-drawn decorations of an earlier run from the axes.
pub(super) fn remove_decorations(scene: &mut SceneGraph, axes: ObjectKey) -> Result<(), EngineError> {
    let decorations = scene
        .children(axes)
        .iter()
        .copied()
        .filter(|&child| {
            scene
                .get(child)
                .is_some_and(|o| o.tag.as_deref() == Some(XKCD_AXES_TAG))
        })
        .collect::<Vec<ObjectKey>>();

    for decoration in decorations {
        scene.remove(decoration)?;
    }
    Ok(())
}

/// Hide the axis of the axes and draw hand-drawn spines, tick marks and tick labels instead.
///
/// The decorations are grouped in a group at the back of the axes children.
/// Returns the count of created decorations.
pub(super) fn draw_decorations<R: Rng>(
    scene: &mut SceneGraph,
    axes_key: ObjectKey,
    cx: &mut JitterContext<R>,
    config: &XkcdConfig,
) -> Result<usize, EngineError> {
    let axes = scene
        .axes(axes_key)
        .ok_or(EngineError::InvalidHandle(axes_key))?;

    let (mins, maxs) = (axes.limits.mins, axes.limits.maxs);
    let color = axes.axis_color;
    let xticks = axes.visible_xticks();
    let yticks = axes.visible_yticks();

    let jitter = cx.scale.pixels_to_data(config.jitter_px);
    let tick_length = cx.scale.pixels_to_data(config.tick_length_px);
    let gap = cx.scale.pixels_to_data(config.tick_label_gap_px);

    let mut lines = Vec::with_capacity(2 + xticks.len() + yticks.len());
    let mut texts = Vec::with_capacity(xticks.len() + yticks.len());

    // spines
    lines.push(jittered_line(cx, [mins[0], maxs[0]], [mins[1], mins[1]], jitter)?);
    lines.push(jittered_line(cx, [mins[0], mins[0]], [mins[1], maxs[1]], jitter)?);

    for (t, label) in xticks {
        lines.push(jittered_line(
            cx,
            [t, t],
            [mins[1], mins[1] + tick_length[1]],
            jitter,
        )?);
        texts.push(
            TextObject::new(label, na::vector![t, mins[1] - gap[1]])
                .with_alignment(HorizontalAlignment::Center, VerticalAlignment::Top),
        );
    }
    for (t, label) in yticks {
        lines.push(jittered_line(
            cx,
            [mins[0], mins[0] + tick_length[0]],
            [t, t],
            jitter,
        )?);
        texts.push(
            TextObject::new(label, na::vector![mins[0] - gap[0], t])
                .with_alignment(HorizontalAlignment::Right, VerticalAlignment::Middle),
        );
    }

    if let Some(axes) = scene.axes_mut(axes_key) {
        axes.axis_visible = false;
    }
    let group = scene.insert_back(axes_key, ObjectKind::Group)?;
    scene.set_tag(group, XKCD_AXES_TAG)?;

    let count = lines.len() + texts.len();
    for line in lines {
        scene.add_line(
            group,
            line.with_color(color).with_line_width(config.axis_line_width),
        )?;
    }
    for text in texts {
        scene.add_text(group, styled_label(text, config, color))?;
    }

    Ok(count)
}

fn jittered_line<R: Rng>(
    cx: &mut JitterContext<R>,
    x: [f64; 2],
    y: [f64; 2],
    jitter: na::Vector2<f64>,
) -> Result<LineObject, EngineError> {
    let jitter = suppress_degenerate_jitter(&x, &y, jitter);
    let (xdata, ydata) = cx.resample_and_jitter(&x, &y, jitter, None)?;

    Ok(LineObject::new(xdata, ydata))
}

fn styled_label(mut text: TextObject, config: &XkcdConfig, color: Color) -> TextObject {
    text.font = config.font.clone();
    text.color = color;
    text
}
