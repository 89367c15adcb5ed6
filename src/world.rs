use crate::geometry::{LineSegment, Shape};
use crate::vectors::V2;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("polygon must have at least 2 points, got {vertices}")]
    DegeneratePolygon { vertices: usize },
}

/// Closed loop through `points`: one segment per vertex, the last one wrapping
/// back to the first vertex.
pub fn polygon(points: &[V2]) -> Result<Vec<Shape>, SceneError> {
    let n = points.len();
    if n < 2 {
        return Err(SceneError::DegeneratePolygon { vertices: n });
    }
    Ok((0..n)
        .map(|i| Shape::Segment(LineSegment::new(points[i], points[(i + 1) % n])))
        .collect())
}

/// World-space geometry. Immutable once built.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn from_polygons<P: AsRef<[V2]>>(polygons: &[P]) -> Result<Self, SceneError> {
        let mut shapes = Vec::new();
        for points in polygons {
            shapes.extend(polygon(points.as_ref())?);
        }
        log::info!(
            "scene built: {} polygon(s), {} segment(s)",
            polygons.len(),
            shapes.len()
        );
        Ok(Self { shapes })
    }

    /// The four-sided room the viewer starts inside.
    pub fn demo() -> Result<Self, SceneError> {
        Self::from_polygons(&[[
            V2::new(-1.0, -1.0),
            V2::new(1.0, -1.0),
            V2::new(1.0, 3.0),
            V2::new(-3.0, 1.0),
        ]])
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// The scene as seen from `position`: every endpoint shifted by `-position`,
    /// so the viewer sits at the origin.
    pub fn relative_to(&self, position: V2) -> Vec<Shape> {
        let offset = V2::new(-position.x, -position.y);
        self.shapes.iter().map(|s| s.translated(offset)).collect()
    }
}
