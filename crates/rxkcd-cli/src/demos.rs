// Imports
use p2d::bounding_volume::Aabb;
use rxkcd_compose::ext::AabbExt;
use rxkcd_compose::Color;
use rxkcd_engine::scene::{
    Axes, Face, Figure, HorizontalAlignment, LineObject, PatchObject, TextObject,
    VerticalAlignment,
};
use rxkcd_engine::{ObjectKey, SceneGraph};

/// The tags of the overlapping shapes in the stacking demo.
pub(crate) const STACKING_TAGS: [&str; 3] = ["red", "blue", "green"];

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DemoKind {
    /// A line chart with two curves and an annotation.
    Line,
    /// A bar chart with labeled bars.
    Bar,
    /// Boxplots of three samples.
    Boxplot,
    /// Three overlapping shapes, red in front and green in the back.
    Stacking,
}

impl DemoKind {
    pub(crate) fn build(self) -> anyhow::Result<(SceneGraph, ObjectKey)> {
        match self {
            Self::Line => line_chart(),
            Self::Bar => bar_chart(),
            Self::Boxplot => boxplot(),
            Self::Stacking => stacking(),
        }
    }
}

fn new_chart(limits: Aabb) -> (SceneGraph, ObjectKey, Axes) {
    let mut scene = SceneGraph::new();
    let figure = scene.add_figure(Figure::default());
    let axes = Axes::new(
        Aabb::new_positive(na::point![80.0, 50.0], na::point![600.0, 410.0]),
        limits,
    );
    (scene, figure, axes)
}

/// Evenly spaced ticks from `start` to `end`.
fn ticks(start: f64, end: f64, step: f64) -> Vec<f64> {
    let count = ((end - start) / step).round() as usize;
    (0..=count).map(|i| start + i as f64 * step).collect()
}

pub(crate) fn line_chart() -> anyhow::Result<(SceneGraph, ObjectKey)> {
    let (mut scene, figure, mut axes) = new_chart(Aabb::new_positive(
        na::point![0.0, -1.5],
        na::point![10.0, 1.5],
    ));
    axes.xticks = ticks(0.0, 10.0, 2.0);
    axes.yticks = ticks(-1.0, 1.0, 0.5);
    axes.xlabel = String::from("time");
    axes.ylabel = String::from("my overall health");
    axes.title = String::from("Things that happen over time");
    let axes = scene.add_axes(figure, axes)?;

    let xdata = (0..=100).map(|i| i as f64 * 0.1).collect::<Vec<f64>>();
    let wave = xdata.iter().map(|x| (x * 0.9).sin()).collect();
    let decline = xdata
        .iter()
        .map(|x| 1.0 - 2.0 / (1.0 + (-(x - 6.0) * 1.5).exp()))
        .collect();

    scene.add_line(
        axes,
        LineObject::new(xdata.clone(), wave).with_color(Color::from_rgb_u8(31, 119, 180)),
    )?;
    scene.add_line(
        axes,
        LineObject::new(xdata, decline).with_color(Color::from_rgb_u8(214, 39, 40)),
    )?;
    scene.add_line(
        axes,
        LineObject::new(vec![6.0, 7.0], vec![0.0, 0.8]).with_color(Color::BLACK),
    )?;
    scene.add_text(
        axes,
        TextObject::new("the day I realized I could cook bacon whenever I wanted", na::vector![7.1, 0.85])
            .with_alignment(HorizontalAlignment::Left, VerticalAlignment::Bottom),
    )?;

    Ok((scene, figure))
}

pub(crate) fn bar_chart() -> anyhow::Result<(SceneGraph, ObjectKey)> {
    let heights = [3.0, 7.5, 4.2, 9.1, 5.6];
    let labels = ["mon", "tue", "wed", "thu", "fri"];

    let (mut scene, figure, mut axes) = new_chart(Aabb::new_positive(
        na::point![0.0, 0.0],
        na::point![heights.len() as f64 + 1.0, 10.0],
    ));
    axes.xticks = ticks(1.0, heights.len() as f64, 1.0);
    axes.xtick_labels = Some(labels.iter().map(|l| l.to_string()).collect());
    axes.yticks = ticks(0.0, 10.0, 2.0);
    axes.ylabel = String::from("cups of coffee");
    axes.title = String::from("Coffee consumption");
    let axes = scene.add_axes(figure, axes)?;

    let faces = heights
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let center = i as f64 + 1.0;
            Face::rectangle(
                Aabb::new_positive(na::point![center - 0.35, 0.0], na::point![center + 0.35, *h]),
                Color::from_rgb_u8(255, 127, 14),
            )
        })
        .collect();
    scene.add_patch(axes, PatchObject::new(faces))?;

    Ok((scene, figure))
}

pub(crate) fn boxplot() -> anyhow::Result<(SceneGraph, ObjectKey)> {
    // min, lower quartile, median, upper quartile, max
    let samples = [
        [1.2, 2.8, 3.9, 5.1, 7.4],
        [2.5, 4.0, 4.6, 6.3, 8.9],
        [0.8, 1.9, 2.4, 3.0, 4.2],
    ];

    let (mut scene, figure, mut axes) = new_chart(Aabb::new_positive(
        na::point![0.0, 0.0],
        na::point![samples.len() as f64 + 1.0, 10.0],
    ));
    axes.xticks = ticks(1.0, samples.len() as f64, 1.0);
    axes.xtick_labels = Some(
        ["before", "during", "after"]
            .into_iter()
            .map(String::from)
            .collect(),
    );
    axes.yticks = ticks(0.0, 10.0, 2.0);
    axes.title = String::from("Hours of sleep");
    let axes = scene.add_axes(figure, axes)?;

    for (i, [min, q1, median, q3, max]) in samples.into_iter().enumerate() {
        let x = i as f64 + 1.0;
        let half_width = 0.25;
        let group = scene.add_group(axes)?;

        let mut box_patch = PatchObject::new(vec![Face::rectangle(
            Aabb::new_positive(na::point![x - half_width, q1], na::point![x + half_width, q3]),
            Color::from_rgb_u8(174, 199, 232),
        )]);
        box_patch.edge_color = Some(Color::from_rgb_u8(31, 119, 180));
        scene.add_patch(group, box_patch)?;

        let whiskers = [
            (vec![x, x], vec![min, q1]),
            (vec![x, x], vec![q3, max]),
            (vec![x - half_width / 2.0, x + half_width / 2.0], vec![min, min]),
            (vec![x - half_width / 2.0, x + half_width / 2.0], vec![max, max]),
        ];
        for (xdata, ydata) in whiskers {
            scene.add_line(group, LineObject::new(xdata, ydata))?;
        }
        scene.add_line(
            group,
            LineObject::new(vec![x - half_width, x + half_width], vec![median, median])
                .with_color(Color::from_rgb_u8(214, 39, 40)),
        )?;
    }

    Ok((scene, figure))
}

/// Three overlapping squares, tagged with [STACKING_TAGS].
pub(crate) fn stacking() -> anyhow::Result<(SceneGraph, ObjectKey)> {
    let (mut scene, figure, mut axes) = new_chart(Aabb::new_positive(
        na::point![0.0, 0.0],
        na::point![10.0, 10.0],
    ));
    axes.xticks = ticks(0.0, 10.0, 2.0);
    axes.yticks = ticks(0.0, 10.0, 2.0);
    axes.title = String::from("Who is on top?");
    let axes = scene.add_axes(figure, axes)?;

    // added back to front, new objects are placed in front
    let squares = [
        ("green", Color::GREEN, na::point![5.0, 1.5]),
        ("blue", Color::BLUE, na::point![3.5, 3.5]),
        ("red", Color::RED, na::point![2.0, 5.0]),
    ];
    for (tag, color, corner) in squares {
        let square = scene.add_patch(
            axes,
            PatchObject::new(vec![Face::rectangle(
                Aabb::new_positive(corner, corner + na::vector![3.5, 3.5]),
                color,
            )]),
        )?;
        scene.set_tag(square, tag)?;
    }

    Ok((scene, figure))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rxkcd_engine::scene::ObjectType;

    #[test]
    fn demos_build() {
        for kind in [DemoKind::Line, DemoKind::Bar, DemoKind::Boxplot, DemoKind::Stacking] {
            let (scene, figure) = kind.build().unwrap();
            let axes = scene.children(figure)[0];
            assert_eq!(scene.object_type(axes), Some(ObjectType::Axes));
            assert!(!scene.children(axes).is_empty());
        }
    }

    #[test]
    fn stacking_order_is_red_blue_green() {
        let (scene, figure) = stacking().unwrap();
        let axes = scene.children(figure)[0];

        let tagged = STACKING_TAGS
            .iter()
            .map(|tag| scene.find_by_tag(tag).unwrap())
            .collect::<Vec<ObjectKey>>();
        assert_eq!(scene.children(axes), tagged.as_slice());
    }

    #[test]
    fn tick_spacing() {
        assert_eq!(ticks(0.0, 10.0, 2.5), vec![0.0, 2.5, 5.0, 7.5, 10.0]);
    }
}
