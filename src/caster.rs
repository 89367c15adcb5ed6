use crate::geometry::{Shape, intersect_line_segment};
use crate::vectors::magnitude;

/// Distance from the origin to the nearest shape hit by the ray at `angle`.
///
/// `shapes` must already be in viewer-relative space.
pub fn cast_ray(shapes: &[Shape], angle: f64) -> Option<f64> {
    shapes
        .iter()
        .filter_map(|shape| match shape {
            Shape::Segment(seg) => intersect_line_segment(seg, angle),
        })
        .map(magnitude)
        .min_by(f64::total_cmp)
}
