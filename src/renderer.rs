use std::f64::consts::SQRT_2;

use crate::caster::cast_ray;
use crate::camera::Viewer;
use crate::geometry::Shape;

/// Stroke colour handed to the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    /// `rgb(c, c, c)` with `c` left unclamped; the surface decides how to clamp.
    Gray(f64),
    /// Red, drawn where a column sees no geometry.
    Void,
}

/// The drawing primitives the column loop needs, in the spirit of a 2D canvas
/// context.
pub trait Surface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn set_stroke_color(&mut self, color: Color);
    fn stroke(&mut self);
    /// Host-side reallocation, used only by the resize handler.
    fn resize(&mut self, width: u32, height: u32);
}

/// Column index -> ray angle mapping for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderPlan {
    pub angle_start: f64,
    pub angle_step: f64,
}

impl RenderPlan {
    /// Spread `fov` radians evenly over `width` columns, centred on the heading.
    pub fn derive(viewer: &Viewer, fov: f64, width: u32) -> Self {
        Self {
            angle_start: viewer.facing - fov / 2.0,
            angle_step: fov / width as f64,
        }
    }

    #[inline]
    pub fn angle_at(&self, column: u32) -> f64 {
        self.angle_start + column as f64 * self.angle_step
    }
}

/// `exp(-d / sqrt 2) * 256`: 256 at the viewer, falling towards 0.
#[inline]
pub fn intensity(distance: f64) -> f64 {
    (-distance / SQRT_2).exp() * 256.0
}

pub fn shade(distance: Option<f64>) -> Color {
    match distance {
        Some(d) => Color::Gray(intensity(d)),
        None => Color::Void,
    }
}

/// Draw one full-height line per column, left to right.
///
/// `shapes` must already be relative to the viewer the plan was derived from.
pub fn render_frame<S: Surface + ?Sized>(
    surface: &mut S,
    shapes: &[Shape],
    plan: &RenderPlan,
    width: u32,
    height: u32,
) {
    surface.clear_rect(0.0, 0.0, width as f64, height as f64);
    let bottom = height as f64;
    for i in 0..width {
        let x = i as f64;
        surface.begin_path();
        surface.move_to(x, 0.0);
        surface.line_to(x, bottom);
        surface.set_stroke_color(shade(cast_ray(shapes, plan.angle_at(i))));
        surface.stroke();
    }
}
