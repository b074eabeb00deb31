// Imports
use p2d::bounding_volume::Aabb;
use std::ops::RangeInclusive;

/// Extension trait for [`na::Vector2<f64>`].
pub trait Vector2Ext
where
    Self: Sized,
{
    /// Converts to kurbo::Point
    fn to_kurbo_point(&self) -> kurbo::Point;
    /// Converts from kurbo::Point
    fn from_kurbo_point(kurbo_point: kurbo::Point) -> Self;
    /// Approximate equality
    fn approx_eq(&self, other: &Self) -> bool;
}

impl Vector2Ext for na::Vector2<f64> {
    fn to_kurbo_point(&self) -> kurbo::Point {
        kurbo::Point {
            x: self[0],
            y: self[1],
        }
    }

    fn from_kurbo_point(kurbo_point: kurbo::Point) -> Self {
        na::vector![kurbo_point.x, kurbo_point.y]
    }

    fn approx_eq(&self, other: &Self) -> bool {
        approx::relative_eq!(self[0], other[0]) && approx::relative_eq!(self[1], other[1])
    }
}

/// Extension trait for [p2d::bounding_volume::Aabb].
pub trait AabbExt
where
    Self: Sized,
{
    /// New Aabb, ensuring its mins, maxs are valid (maxs >= mins)
    fn new_positive(start: na::Point2<f64>, end: na::Point2<f64>) -> Self;
    /// The closed range covered on the x axis.
    fn range_x(&self) -> RangeInclusive<f64>;
    /// The closed range covered on the y axis.
    fn range_y(&self) -> RangeInclusive<f64>;
    /// If the Aabb has a finite, strictly positive extent on both axes.
    fn is_proper(&self) -> bool;
}

impl AabbExt for Aabb {
    fn new_positive(start: na::Point2<f64>, end: na::Point2<f64>) -> Self {
        Aabb::new(
            na::point![start[0].min(end[0]), start[1].min(end[1])],
            na::point![start[0].max(end[0]), start[1].max(end[1])],
        )
    }

    fn range_x(&self) -> RangeInclusive<f64> {
        self.mins[0]..=self.maxs[0]
    }

    fn range_y(&self) -> RangeInclusive<f64> {
        self.mins[1]..=self.maxs[1]
    }

    fn is_proper(&self) -> bool {
        let extents = self.extents();
        extents.iter().all(|e| e.is_finite() && *e > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{AabbExt, Vector2Ext};
    use p2d::bounding_volume::Aabb;

    #[test]
    fn aabb_new_positive() {
        let aabb = Aabb::new_positive(na::point![4.0, -1.0], na::point![1.0, 3.0]);

        assert_eq!(aabb.mins, na::point![1.0, -1.0]);
        assert_eq!(aabb.maxs, na::point![4.0, 3.0]);
        assert!(aabb.is_proper());
        assert!(aabb.range_x().contains(&2.5));
        assert!(!aabb.range_y().contains(&3.5));
    }

    #[test]
    fn aabb_flat_is_not_proper() {
        let aabb = Aabb::new_positive(na::point![0.0, 2.0], na::point![5.0, 2.0]);

        assert!(!aabb.is_proper());
    }

    #[test]
    fn kurbo_point_conversion() {
        let v = na::vector![1.5, -2.0];

        assert!(v.approx_eq(&na::Vector2::from_kurbo_point(v.to_kurbo_point())));
    }
}
