// Imports
use crate::scene::{Face, FaceColor, PatchObject};
use crate::SkipReason;
use rand::Rng;
use rxkcd_compose::jitter::{resample_colors, suppress_degenerate_jitter};
use rxkcd_compose::JitterContext;

/// Restyle a patch with the configured edge width and jitter the outline of every face.
///
/// The jittered outline starts and ends at the first vertex of the face, so faces stay closed.
/// Face colors are kept, per-vertex colors are resampled along the outline.
pub(super) fn restyle_patch<R: Rng>(
    patch: &mut PatchObject,
    cx: &mut JitterContext<R>,
    jitter: na::Vector2<f64>,
    line_width: f64,
) -> Result<(), SkipReason> {
    patch.line_width = line_width;

    for (i, face) in patch.faces.iter().enumerate() {
        if face.vertices.iter().any(|v| !v.iter().all(|c| c.is_finite())) {
            return Err(SkipReason::InvalidGeometry(format!(
                "face {i} contains non-finite vertices"
            )));
        }
        if let FaceColor::Interpolated(colors) = &face.color {
            if colors.len() != face.vertices.len() {
                return Err(SkipReason::InvalidGeometry(format!(
                    "face {i} has {} vertices, but {} vertex colors",
                    face.vertices.len(),
                    colors.len()
                )));
            }
        }
    }

    for face in patch.faces.iter_mut() {
        jitter_face(face, cx, jitter)?;
    }

    Ok(())
}

fn jitter_face<R: Rng>(
    face: &mut Face,
    cx: &mut JitterContext<R>,
    jitter: na::Vector2<f64>,
) -> Result<(), SkipReason> {
    let Some(first) = face.vertices.first().copied() else {
        return Ok(());
    };
    if face.vertices.len() < 2 {
        return Ok(());
    }

    // close the outline explicitly
    let (x, y): (Vec<f64>, Vec<f64>) = face
        .vertices
        .iter()
        .chain(std::iter::once(&first))
        .map(|v| (v[0], v[1]))
        .unzip();

    // at least as many samples as the outline has vertices
    let count = cx.target_count_for(&x, &y).max(x.len());
    let jitter = suppress_degenerate_jitter(&x, &y, jitter);
    let (mut x_out, mut y_out) = cx
        .resample_and_jitter(&x, &y, jitter, Some(count))
        .map_err(|e| SkipReason::InvalidGeometry(e.to_string()))?;

    x_out[0] = first[0];
    y_out[0] = first[1];
    // the closing vertex coincides with the first one and stays implicit
    x_out.pop();
    y_out.pop();

    if let FaceColor::Interpolated(colors) = &mut face.color {
        let mut closed = colors.clone();
        closed.push(colors[0]);
        let mut resampled = resample_colors(&closed, count);
        resampled.pop();
        *colors = resampled;
    }

    face.vertices = x_out
        .into_iter()
        .zip(y_out)
        .map(|(x, y)| na::vector![x, y])
        .collect();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use p2d::bounding_volume::Aabb;
    use rxkcd_compose::ext::AabbExt;
    use rxkcd_compose::utils::new_rng_default_pcg64;
    use rxkcd_compose::{Color, SurfaceScale};

    fn context() -> JitterContext<rand_pcg::Pcg64> {
        let limits = Aabb::new_positive(na::point![0.0, 0.0], na::point![10.0, 10.0]);
        let scale = SurfaceScale::from_extents(na::vector![400.0, 400.0], &limits).unwrap();
        JitterContext::new(scale, new_rng_default_pcg64(Some(21)))
    }

    #[test]
    fn face_stays_pinned_and_keeps_color() {
        let mut cx = context();
        let color = Color::from_rgb_u8(40, 120, 200);
        let bar = Face::rectangle(
            Aabb::new_positive(na::point![1.0, 0.0], na::point![3.0, 6.0]),
            color,
        );
        let mut patch = PatchObject::new(vec![bar]);

        restyle_patch(&mut patch, &mut cx, na::vector![0.1, 0.1], 2.0).unwrap();

        let face = &patch.faces[0];
        assert!(face.vertices.len() > 4);
        assert_eq!(face.vertices[0], na::vector![1.0, 0.0]);
        assert_eq!(face.color, FaceColor::Flat(color));
        assert_eq!(patch.line_width, 2.0);
    }

    #[test]
    fn vertex_colors_follow_the_outline() {
        let mut cx = context();
        let face = Face::new(
            vec![
                na::vector![0.0, 0.0],
                na::vector![4.0, 0.0],
                na::vector![4.0, 4.0],
            ],
            FaceColor::Interpolated(vec![Color::RED, Color::GREEN, Color::BLUE]),
        );
        let mut patch = PatchObject::new(vec![face]);

        restyle_patch(&mut patch, &mut cx, na::vector![0.05, 0.05], 2.0).unwrap();

        let face = &patch.faces[0];
        let FaceColor::Interpolated(colors) = &face.color else {
            panic!("face color is not interpolated anymore");
        };
        assert_eq!(colors.len(), face.vertices.len());
        assert_eq!(colors[0], Color::RED);
    }

    #[test]
    fn mismatched_vertex_colors_are_rejected() {
        let mut cx = context();
        let face = Face::new(
            vec![na::vector![0.0, 0.0], na::vector![1.0, 1.0]],
            FaceColor::Interpolated(vec![Color::RED]),
        );
        let mut patch = PatchObject::new(vec![face]);

        assert!(matches!(
            restyle_patch(&mut patch, &mut cx, na::vector![0.05, 0.05], 2.0),
            Err(SkipReason::InvalidGeometry(_))
        ));
        assert_eq!(patch.faces[0].vertices.len(), 2);
    }
}
