// Imports
use p2d::bounding_volume::Aabb;
use rxkcd_compose::ext::AabbExt;
use rxkcd_compose::jitter::JitterError;
use rxkcd_compose::{Color, SurfaceScale};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// The kind of a scene object, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Figure,
    Axes,
    Line,
    Patch,
    Text,
    Group,
    Other,
}

/// A scene object's kind together with its kind specific data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "object_kind")]
pub enum ObjectKind {
    #[serde(rename = "figure")]
    Figure(Figure),
    #[serde(rename = "axes")]
    Axes(Axes),
    #[serde(rename = "line")]
    Line(LineObject),
    #[serde(rename = "patch")]
    Patch(PatchObject),
    #[serde(rename = "text")]
    Text(TextObject),
    #[serde(rename = "group")]
    Group,
    /// Kinds that are part of the scene, but can't be styled (images, surfaces, lights, ..).
    #[serde(rename = "other")]
    Other {
        #[serde(rename = "type_name")]
        type_name: String,
    },
}

impl ObjectKind {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Self::Figure(_) => ObjectType::Figure,
            Self::Axes(_) => ObjectType::Axes,
            Self::Line(_) => ObjectType::Line,
            Self::Patch(_) => ObjectType::Patch,
            Self::Text(_) => ObjectType::Text,
            Self::Group => ObjectType::Group,
            Self::Other { .. } => ObjectType::Other,
        }
    }

    /// The type tag, as it is shown in messages.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Figure(_) => "figure",
            Self::Axes(_) => "axes",
            Self::Line(_) => "line",
            Self::Patch(_) => "patch",
            Self::Text(_) => "text",
            Self::Group => "group",
            Self::Other { type_name } => type_name,
        }
    }
}

/// The top level window content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename = "figure")]
pub struct Figure {
    /// The size in pixels.
    #[serde(rename = "size")]
    pub size: na::Vector2<f64>,
    #[serde(rename = "background")]
    pub background: Color,
}

impl Default for Figure {
    fn default() -> Self {
        Self {
            size: na::vector![640.0, 480.0],
            background: Color::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename = "font")]
pub struct Font {
    #[serde(rename = "family")]
    pub family: String,
    /// The size in points.
    #[serde(rename = "size")]
    pub size: f64,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: String::from("Helvetica"),
            size: 10.0,
        }
    }
}

impl Font {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

/// A drawing surface.
///
/// Maps the data coordinate limits onto a rectangle in figure pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename = "axes")]
pub struct Axes {
    /// The position in figure pixels, with the y axis pointing down.
    #[serde(rename = "position")]
    pub position: Aabb,
    /// The data coordinate limits, with the y axis pointing up.
    #[serde(rename = "limits")]
    pub limits: Aabb,
    #[serde(rename = "xticks")]
    pub xticks: Vec<f64>,
    #[serde(rename = "yticks")]
    pub yticks: Vec<f64>,
    /// Labels for the x ticks. Formatted tick values are shown when not set.
    #[serde(rename = "xtick_labels")]
    pub xtick_labels: Option<Vec<String>>,
    /// Labels for the y ticks. Formatted tick values are shown when not set.
    #[serde(rename = "ytick_labels")]
    pub ytick_labels: Option<Vec<String>>,
    #[serde(rename = "xlabel")]
    pub xlabel: String,
    #[serde(rename = "ylabel")]
    pub ylabel: String,
    #[serde(rename = "title")]
    pub title: String,
    #[serde(rename = "font")]
    pub font: Font,
    /// If the axis box with ticks and tick labels is drawn.
    #[serde(rename = "axis_visible")]
    pub axis_visible: bool,
    #[serde(rename = "axis_color")]
    pub axis_color: Color,
}

impl Default for Axes {
    fn default() -> Self {
        Self {
            position: Aabb::new_positive(na::point![80.0, 40.0], na::point![600.0, 420.0]),
            limits: Aabb::new_positive(na::point![0.0, 0.0], na::point![1.0, 1.0]),
            xticks: vec![0.0, 0.5, 1.0],
            yticks: vec![0.0, 0.5, 1.0],
            xtick_labels: None,
            ytick_labels: None,
            xlabel: String::new(),
            ylabel: String::new(),
            title: String::new(),
            font: Font::default(),
            axis_visible: true,
            axis_color: Color::BLACK,
        }
    }
}

impl Axes {
    pub fn new(position: Aabb, limits: Aabb) -> Self {
        Self {
            position,
            limits,
            ..Default::default()
        }
    }

    /// The pixel per data unit scale, computed from the current position and limits.
    pub fn scale(&self) -> Result<SurfaceScale, JitterError> {
        SurfaceScale::from_extents(self.position.extents(), &self.limits)
    }

    /// Map a point in data units to figure pixels.
    pub fn data_to_pixel(&self, scale: &SurfaceScale, p: na::Vector2<f64>) -> na::Vector2<f64> {
        let offset = scale.to_pixels(p - self.limits.mins.coords);
        na::vector![
            self.position.mins[0] + offset[0],
            self.position.maxs[1] - offset[1]
        ]
    }

    /// The x ticks that lie within the limits, with their labels.
    pub fn visible_xticks(&self) -> Vec<(f64, String)> {
        visible_ticks(
            &self.xticks,
            self.xtick_labels.as_deref(),
            self.limits.range_x(),
        )
    }

    /// The y ticks that lie within the limits, with their labels.
    pub fn visible_yticks(&self) -> Vec<(f64, String)> {
        visible_ticks(
            &self.yticks,
            self.ytick_labels.as_deref(),
            self.limits.range_y(),
        )
    }
}

fn visible_ticks(
    ticks: &[f64],
    labels: Option<&[String]>,
    range: RangeInclusive<f64>,
) -> Vec<(f64, String)> {
    ticks
        .iter()
        .enumerate()
        .filter(|(_, t)| range.contains(*t))
        .map(|(i, t)| {
            let label = labels
                .and_then(|labels| labels.get(i).cloned())
                .unwrap_or_else(|| rxkcd_compose::utils::format_tick_value(*t));
            (*t, label)
        })
        .collect()
}

/// A polyline in data units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename = "line")]
pub struct LineObject {
    #[serde(rename = "xdata")]
    pub xdata: Vec<f64>,
    #[serde(rename = "ydata")]
    pub ydata: Vec<f64>,
    #[serde(rename = "color")]
    pub color: Color,
    #[serde(rename = "line_width")]
    pub line_width: f64,
}

impl Default for LineObject {
    fn default() -> Self {
        Self {
            xdata: Vec::new(),
            ydata: Vec::new(),
            color: Color::BLACK,
            line_width: 0.5,
        }
    }
}

impl LineObject {
    pub fn new(xdata: Vec<f64>, ydata: Vec<f64>) -> Self {
        Self {
            xdata,
            ydata,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn points(&self) -> impl Iterator<Item = na::Vector2<f64>> + '_ {
        self.xdata
            .iter()
            .zip(self.ydata.iter())
            .map(|(x, y)| na::vector![*x, *y])
    }
}

/// The fill of a face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "face_color")]
pub enum FaceColor {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "flat")]
    Flat(Color),
    /// One color per vertex, interpolated across the face.
    #[serde(rename = "interpolated")]
    Interpolated(Vec<Color>),
}

impl Default for FaceColor {
    fn default() -> Self {
        Self::Flat(Color::BLACK)
    }
}

/// A closed polygon. The closing edge from the last to the first vertex is implicit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename = "face")]
pub struct Face {
    #[serde(rename = "vertices")]
    pub vertices: Vec<na::Vector2<f64>>,
    #[serde(rename = "color")]
    pub color: FaceColor,
}

impl Face {
    pub fn new(vertices: Vec<na::Vector2<f64>>, color: FaceColor) -> Self {
        Self { vertices, color }
    }

    /// An axis aligned rectangle, as bar charts are made of.
    pub fn rectangle(bounds: Aabb, color: Color) -> Self {
        Self::new(
            vec![
                na::vector![bounds.mins[0], bounds.mins[1]],
                na::vector![bounds.maxs[0], bounds.mins[1]],
                na::vector![bounds.maxs[0], bounds.maxs[1]],
                na::vector![bounds.mins[0], bounds.maxs[1]],
            ],
            FaceColor::Flat(color),
        )
    }
}

/// A filled shape made of one or more faces, in data units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename = "patch")]
pub struct PatchObject {
    #[serde(rename = "faces")]
    pub faces: Vec<Face>,
    /// The edge color. When set to None, the edges are not drawn.
    #[serde(rename = "edge_color")]
    pub edge_color: Option<Color>,
    #[serde(rename = "line_width")]
    pub line_width: f64,
}

impl Default for PatchObject {
    fn default() -> Self {
        Self {
            faces: Vec::new(),
            edge_color: Some(Color::BLACK),
            line_width: 0.5,
        }
    }
}

impl PatchObject {
    pub fn new(faces: Vec<Face>) -> Self {
        Self {
            faces,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "horizontal_alignment")]
pub enum HorizontalAlignment {
    #[default]
    #[serde(rename = "left")]
    Left,
    #[serde(rename = "center")]
    Center,
    #[serde(rename = "right")]
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "vertical_alignment")]
pub enum VerticalAlignment {
    #[serde(rename = "top")]
    Top,
    #[default]
    #[serde(rename = "middle")]
    Middle,
    #[serde(rename = "bottom")]
    Bottom,
}

/// A text label anchored at a position in data units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename = "text")]
pub struct TextObject {
    #[serde(rename = "content")]
    pub content: String,
    #[serde(rename = "position")]
    pub position: na::Vector2<f64>,
    #[serde(rename = "font")]
    pub font: Font,
    #[serde(rename = "color")]
    pub color: Color,
    #[serde(rename = "halign")]
    pub halign: HorizontalAlignment,
    #[serde(rename = "valign")]
    pub valign: VerticalAlignment,
    /// Counter clockwise rotation in degrees.
    #[serde(rename = "rotation")]
    pub rotation: f64,
}

impl Default for TextObject {
    fn default() -> Self {
        Self {
            content: String::new(),
            position: na::Vector2::zeros(),
            font: Font::default(),
            color: Color::BLACK,
            halign: HorizontalAlignment::default(),
            valign: VerticalAlignment::default(),
            rotation: 0.0,
        }
    }
}

impl TextObject {
    pub fn new(content: impl Into<String>, position: na::Vector2<f64>) -> Self {
        Self {
            content: content.into(),
            position,
            ..Default::default()
        }
    }

    pub fn with_alignment(mut self, halign: HorizontalAlignment, valign: VerticalAlignment) -> Self {
        self.halign = halign;
        self.valign = valign;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn axes_data_to_pixel() {
        let axes = Axes::new(
            Aabb::new_positive(na::point![100.0, 50.0], na::point![500.0, 350.0]),
            Aabb::new_positive(na::point![0.0, -1.0], na::point![4.0, 2.0]),
        );
        let scale = axes.scale().unwrap();

        assert_relative_eq!(
            axes.data_to_pixel(&scale, na::vector![0.0, -1.0]),
            na::vector![100.0, 350.0]
        );
        assert_relative_eq!(
            axes.data_to_pixel(&scale, na::vector![4.0, 2.0]),
            na::vector![500.0, 50.0]
        );
        assert_relative_eq!(
            axes.data_to_pixel(&scale, na::vector![1.0, 0.5]),
            na::vector![200.0, 200.0]
        );
    }

    #[test]
    fn ticks_outside_limits_are_hidden() {
        let mut axes = Axes::new(
            Aabb::new_positive(na::point![0.0, 0.0], na::point![100.0, 100.0]),
            Aabb::new_positive(na::point![0.0, 0.0], na::point![2.0, 2.0]),
        );
        axes.xticks = vec![-1.0, 0.0, 1.0, 2.0, 3.0];
        axes.xtick_labels = Some(
            ["a", "b", "c"]
                .into_iter()
                .map(String::from)
                .collect(),
        );

        let ticks = axes.visible_xticks();
        assert_eq!(
            ticks,
            vec![
                (0.0, String::from("b")),
                (1.0, String::from("c")),
                (2.0, String::from("2")),
            ]
        );
    }
}
