// Imports
use crate::scene::LineObject;
use crate::SkipReason;
use rand::Rng;
use rxkcd_compose::jitter::suppress_degenerate_jitter;
use rxkcd_compose::JitterContext;

/// Restyle a line with the configured width and replace its data with a jittered version.
///
/// Lines with a single point keep their data. The width is set in every case.
pub(super) fn restyle_line<R: Rng>(
    line: &mut LineObject,
    cx: &mut JitterContext<R>,
    jitter: na::Vector2<f64>,
    line_width: f64,
) -> Result<(), SkipReason> {
    line.line_width = line_width;

    if line.xdata.len() != line.ydata.len() {
        return Err(SkipReason::InvalidGeometry(format!(
            "x data has {} values, y data {}",
            line.xdata.len(),
            line.ydata.len()
        )));
    }
    if line.points().any(|p| !p.iter().all(|v| v.is_finite())) {
        return Err(SkipReason::InvalidGeometry(String::from(
            "data contains non-finite values",
        )));
    }
    if line.xdata.len() <= 1 {
        return Ok(());
    }

    let jitter = suppress_degenerate_jitter(&line.xdata, &line.ydata, jitter);
    let (xdata, ydata) = cx
        .resample_and_jitter(&line.xdata, &line.ydata, jitter, None)
        .map_err(|e| SkipReason::InvalidGeometry(e.to_string()))?;
    line.xdata = xdata;
    line.ydata = ydata;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use p2d::bounding_volume::Aabb;
    use rxkcd_compose::ext::AabbExt;
    use rxkcd_compose::utils::new_rng_default_pcg64;
    use rxkcd_compose::SurfaceScale;

    fn context() -> JitterContext<rand_pcg::Pcg64> {
        let limits = Aabb::new_positive(na::point![0.0, 0.0], na::point![10.0, 10.0]);
        let scale = SurfaceScale::from_extents(na::vector![400.0, 400.0], &limits).unwrap();
        JitterContext::new(scale, new_rng_default_pcg64(Some(11)))
    }

    #[test]
    fn line_is_resampled() {
        let mut cx = context();
        let mut line = LineObject::new(vec![0.0, 5.0, 10.0], vec![0.0, 10.0, 0.0]);

        restyle_line(&mut line, &mut cx, na::vector![0.1, 0.1], 2.0).unwrap();

        assert_eq!(line.line_width, 2.0);
        assert_eq!(line.xdata.len(), line.ydata.len());
        assert!(line.xdata.len() > 3);
    }

    #[test]
    fn horizontal_line_stays_on_its_row() {
        let mut cx = context();
        let mut line = LineObject::new(vec![1.0, 9.0], vec![5.0, 5.0]);

        restyle_line(&mut line, &mut cx, na::vector![0.2, 0.2], 2.0).unwrap();

        let plain = rxkcd_compose::jitter::resample_linear(&[1.0, 9.0], line.xdata.len());
        assert_eq!(line.xdata, plain);
    }

    #[test]
    fn single_point_only_gets_width() {
        let mut cx = context();
        let mut line = LineObject::new(vec![3.0], vec![4.0]);

        restyle_line(&mut line, &mut cx, na::vector![0.2, 0.2], 3.0).unwrap();

        assert_eq!(line.xdata, vec![3.0]);
        assert_eq!(line.ydata, vec![4.0]);
        assert_eq!(line.line_width, 3.0);
    }

    #[test]
    fn non_finite_data_is_rejected() {
        let mut cx = context();
        let mut line = LineObject::new(vec![0.0, f64::NAN], vec![0.0, 1.0]);

        assert!(matches!(
            restyle_line(&mut line, &mut cx, na::vector![0.2, 0.2], 2.0),
            Err(SkipReason::InvalidGeometry(_))
        ));
        assert_eq!(line.ydata, vec![0.0, 1.0]);
    }
}
