// Imports
use crate::scene::{
    Axes, FaceColor, HorizontalAlignment, LineObject, ObjectKind, PatchObject, SceneGraph,
    TextObject, VerticalAlignment,
};
use crate::{EngineError, ObjectKey};
use rxkcd_compose::ext::Vector2Ext;
use rxkcd_compose::{Color, SurfaceScale};
use svg::node::element;
use svg::Node;
use tracing::warn;

/// The length of the plain tick marks in pixels.
const PLAIN_TICK_LENGTH: f64 = 5.0;
/// The distance of the plain tick labels from the axis box in pixels.
const PLAIN_TICK_LABEL_GAP: f64 = 4.0;

/// Render a figure and everything below it as svg document.
///
/// Children are drawn back to front, so the first child ends up on top.
pub fn scene_to_svg(scene: &SceneGraph, figure_key: ObjectKey) -> Result<String, EngineError> {
    let figure = match scene.kind(figure_key) {
        Some(ObjectKind::Figure(figure)) => figure,
        Some(_) => return Err(scene.unexpected_kind(figure_key, "a figure")),
        None => return Err(EngineError::InvalidHandle(figure_key)),
    };

    let mut document = svg::Document::new()
        .set("xmlns:xlink", "http://www.w3.org/1999/xlink")
        .set("width", figure.size[0])
        .set("height", figure.size[1])
        .set(
            "viewBox",
            format!("{:.3} {:.3} {:.3} {:.3}", 0.0, 0.0, figure.size[0], figure.size[1]),
        )
        .add(
            element::Rectangle::new()
                .set("x", 0_f64)
                .set("y", 0_f64)
                .set("width", figure.size[0])
                .set("height", figure.size[1])
                .set("fill", figure.background.to_css_rgb())
                .set("fill-opacity", figure.background.a),
        );

    for &child in scene.children(figure_key).iter().rev() {
        match scene.get(child) {
            Some(object) if object.visible => match &object.kind {
                ObjectKind::Axes(axes) => {
                    if let Some(group) = axes_to_svg(scene, child, axes) {
                        document = document.add(group);
                    }
                }
                _ => {
                    let mut group = element::Group::new();
                    for node in subtree_to_svg(scene, child, None) {
                        group = group.add(node);
                    }
                    document = document.add(group);
                }
            },
            _ => {}
        }
    }

    Ok(document.to_string())
}

/// Maps data units of an axes to figure pixels.
struct Mapping<'a> {
    axes: &'a Axes,
    scale: SurfaceScale,
}

impl Mapping<'_> {
    fn to_pixel(&self, p: na::Vector2<f64>) -> na::Vector2<f64> {
        self.axes.data_to_pixel(&self.scale, p)
    }
}

/// Objects outside of axes are positioned in figure pixels.
fn map_point(mapping: Option<&Mapping>, p: na::Vector2<f64>) -> na::Vector2<f64> {
    mapping.map(|m| m.to_pixel(p)).unwrap_or(p)
}

fn axes_to_svg(scene: &SceneGraph, key: ObjectKey, axes: &Axes) -> Option<element::Group> {
    let scale = match axes.scale() {
        Ok(scale) => scale,
        Err(e) => {
            warn!("Not exporting axes {key:?}, Err: {e}");
            return None;
        }
    };
    let mapping = Mapping { axes, scale };
    let mut group = element::Group::new();

    if axes.axis_visible {
        group = group.add(axis_box_to_svg(&mapping));
    }
    for node in subtree_to_svg(scene, key, Some(&mapping)) {
        group = group.add(node);
    }
    group = group.add(axes_labels_to_svg(axes));

    Some(group)
}

/// The children of `parent` in painting order, descending into groups.
fn subtree_to_svg(
    scene: &SceneGraph,
    parent: ObjectKey,
    mapping: Option<&Mapping>,
) -> Vec<Box<dyn Node>> {
    let mut nodes: Vec<Box<dyn Node>> = Vec::new();
    // popping yields the back-most object first
    let mut stack = scene.children(parent).to_vec();

    while let Some(key) = stack.pop() {
        let Some(object) = scene.get(key) else {
            continue;
        };
        if !object.visible {
            continue;
        }

        match &object.kind {
            ObjectKind::Line(line) => {
                if let Some(path) = line_to_svg(line, mapping) {
                    nodes.push(Box::new(path));
                }
            }
            ObjectKind::Patch(patch) => {
                for path in patch_to_svg(patch, mapping) {
                    nodes.push(Box::new(path));
                }
            }
            ObjectKind::Text(text) => nodes.push(Box::new(text_to_svg(text, mapping))),
            ObjectKind::Group => stack.extend(scene.children(key).iter().copied()),
            ObjectKind::Figure(_) | ObjectKind::Axes(_) | ObjectKind::Other { .. } => {
                warn!(
                    "Not exporting object {key:?} of type `{}`",
                    object.kind.type_name()
                );
            }
        }
    }

    nodes
}

fn polyline_path(points: impl IntoIterator<Item = na::Vector2<f64>>, closed: bool) -> kurbo::BezPath {
    let mut path = kurbo::BezPath::new();
    for (i, p) in points.into_iter().enumerate() {
        if i == 0 {
            path.move_to(p.to_kurbo_point());
        } else {
            path.line_to(p.to_kurbo_point());
        }
    }
    if closed {
        path.close_path();
    }
    path
}

fn line_to_svg(line: &LineObject, mapping: Option<&Mapping>) -> Option<element::Path> {
    if line.xdata.len() < 2 || line.xdata.len() != line.ydata.len() {
        return None;
    }
    let path = polyline_path(line.points().map(|p| map_point(mapping, p)), false);

    Some(
        element::Path::new()
            .set("d", path.to_svg())
            .set("fill", "none")
            .set("stroke", line.color.to_css_rgb())
            .set("stroke-opacity", line.color.a)
            .set("stroke-width", line.line_width)
            .set("stroke-linejoin", "round")
            .set("stroke-linecap", "round"),
    )
}

/// Svgs have no per-vertex colors, interpolated faces get the average of their vertex colors.
fn average_color(colors: &[Color]) -> Option<Color> {
    let (first, rest) = colors.split_first()?;

    Some(
        rest.iter()
            .enumerate()
            .fold(*first, |avg, (i, c)| avg.mix(*c, 1.0 / (i as f64 + 2.0))),
    )
}

fn patch_to_svg(patch: &PatchObject, mapping: Option<&Mapping>) -> Vec<element::Path> {
    patch
        .faces
        .iter()
        .filter(|face| face.vertices.len() >= 2)
        .map(|face| {
            let path = polyline_path(face.vertices.iter().map(|v| map_point(mapping, *v)), true);
            let fill = match &face.color {
                FaceColor::None => None,
                FaceColor::Flat(color) => Some(*color),
                FaceColor::Interpolated(colors) => average_color(colors),
            };

            let mut node = element::Path::new().set("d", path.to_svg());
            node = match fill {
                Some(color) => node
                    .set("fill", color.to_css_rgb())
                    .set("fill-opacity", color.a),
                None => node.set("fill", "none"),
            };
            node = match patch.edge_color {
                Some(color) => node
                    .set("stroke", color.to_css_rgb())
                    .set("stroke-opacity", color.a)
                    .set("stroke-width", patch.line_width)
                    .set("stroke-linejoin", "round"),
                None => node.set("stroke", "none"),
            };
            node
        })
        .collect()
}

fn text_node(
    content: &str,
    pos: na::Vector2<f64>,
    text: &TextObject,
) -> element::Text {
    let anchor = match text.halign {
        HorizontalAlignment::Left => "start",
        HorizontalAlignment::Center => "middle",
        HorizontalAlignment::Right => "end",
    };
    let baseline = match text.valign {
        VerticalAlignment::Top => "hanging",
        VerticalAlignment::Middle => "central",
        VerticalAlignment::Bottom => "alphabetic",
    };

    let mut node = element::Text::new(content)
        .set("x", pos[0])
        .set("y", pos[1])
        .set("font-family", text.font.family.as_str())
        .set("font-size", format!("{}pt", text.font.size))
        .set("fill", text.color.to_css_rgb())
        .set("fill-opacity", text.color.a)
        .set("text-anchor", anchor)
        .set("dominant-baseline", baseline);
    if text.rotation != 0.0 {
        // svg rotates clockwise, with the y axis pointing down
        node = node.set(
            "transform",
            format!("rotate({} {} {})", -text.rotation, pos[0], pos[1]),
        );
    }
    node
}

fn text_to_svg(text: &TextObject, mapping: Option<&Mapping>) -> element::Text {
    text_node(&text.content, map_point(mapping, text.position), text)
}

/// The plain axis box with tick marks and tick labels.
fn axis_box_to_svg(mapping: &Mapping) -> element::Group {
    let axes = mapping.axes;
    let pos = &axes.position;
    let stroke = axes.axis_color.to_css_rgb();
    let label_style = TextObject {
        font: axes.font.clone(),
        color: axes.axis_color,
        ..Default::default()
    };

    let mut group = element::Group::new().add(
        element::Rectangle::new()
            .set("x", pos.mins[0])
            .set("y", pos.mins[1])
            .set("width", pos.extents()[0])
            .set("height", pos.extents()[1])
            .set("fill", "none")
            .set("stroke", stroke.as_str())
            .set("stroke-width", 1_f64),
    );

    for (t, label) in axes.visible_xticks() {
        let p = mapping.to_pixel(na::vector![t, axes.limits.mins[1]]);
        group = group
            .add(tick_mark(p, p + na::vector![0.0, PLAIN_TICK_LENGTH], &stroke))
            .add(text_node(
                &label,
                p + na::vector![0.0, PLAIN_TICK_LENGTH + PLAIN_TICK_LABEL_GAP],
                &TextObject {
                    halign: HorizontalAlignment::Center,
                    valign: VerticalAlignment::Top,
                    ..label_style.clone()
                },
            ));
    }
    for (t, label) in axes.visible_yticks() {
        let p = mapping.to_pixel(na::vector![axes.limits.mins[0], t]);
        group = group
            .add(tick_mark(p, p - na::vector![PLAIN_TICK_LENGTH, 0.0], &stroke))
            .add(text_node(
                &label,
                p - na::vector![PLAIN_TICK_LENGTH + PLAIN_TICK_LABEL_GAP, 0.0],
                &TextObject {
                    halign: HorizontalAlignment::Right,
                    valign: VerticalAlignment::Middle,
                    ..label_style.clone()
                },
            ));
    }

    group
}

fn tick_mark(from: na::Vector2<f64>, to: na::Vector2<f64>, stroke: &str) -> element::Line {
    element::Line::new()
        .set("x1", from[0])
        .set("y1", from[1])
        .set("x2", to[0])
        .set("y2", to[1])
        .set("stroke", stroke)
        .set("stroke-width", 1_f64)
}

/// The x label, y label and title of the axes.
fn axes_labels_to_svg(axes: &Axes) -> element::Group {
    let pos = &axes.position;
    let center = pos.center();
    // leave room for the tick labels
    let offset = axes.font.size * 2.5;
    let style = TextObject {
        font: axes.font.clone(),
        color: axes.axis_color,
        halign: HorizontalAlignment::Center,
        ..Default::default()
    };

    let mut group = element::Group::new();
    if !axes.xlabel.is_empty() {
        group = group.add(text_node(
            &axes.xlabel,
            na::vector![center[0], pos.maxs[1] + offset],
            &TextObject {
                valign: VerticalAlignment::Top,
                ..style.clone()
            },
        ));
    }
    if !axes.ylabel.is_empty() {
        group = group.add(text_node(
            &axes.ylabel,
            na::vector![pos.mins[0] - offset, center[1]],
            &TextObject {
                valign: VerticalAlignment::Bottom,
                rotation: 90.0,
                ..style.clone()
            },
        ));
    }
    if !axes.title.is_empty() {
        group = group.add(text_node(
            &axes.title,
            na::vector![center[0], pos.mins[1] - axes.font.size],
            &TextObject {
                valign: VerticalAlignment::Bottom,
                ..style
            },
        ));
    }
    group
}
