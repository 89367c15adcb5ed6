use crate::vectors::{M2x2, V2, append, invert, mul_mv, scale};

/// Slack on the endpoint bounds check, absorbs rounding in `start + t * (end - start)`.
const BOUNDS_EPS: f64 = 1e-9;

/// Finite directed edge. Intersections do not depend on the direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    pub start: V2,
    pub end: V2,
}

impl LineSegment {
    #[inline]
    pub const fn new(start: V2, end: V2) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn reversed(self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    #[inline]
    pub fn direction(&self) -> V2 {
        V2::new(self.end.x - self.start.x, self.end.y - self.start.y)
    }

    pub fn translated(&self, offset: V2) -> Self {
        Self {
            start: append(self.start, offset),
            end: append(self.end, offset),
        }
    }
}

/// Scene geometry. Every kind must be handled by the caster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Segment(LineSegment),
}

impl Shape {
    pub fn translated(&self, offset: V2) -> Self {
        match self {
            Shape::Segment(seg) => Shape::Segment(seg.translated(offset)),
        }
    }
}

#[inline]
fn within(v: f64, a: f64, b: f64) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    v >= lo - BOUNDS_EPS && v <= hi + BOUNDS_EPS
}

/// Where a ray leaving the origin at `angle` first crosses `segment`.
///
/// Solves `start + t * (end - start) = r * (cos angle, sin angle)` as
///
/// ```text
/// | dx  -cos | |t|   |-start.x|
/// | dy  -sin | |r| = |-start.y|
/// ```
///
/// A singular system means the ray runs parallel to the segment and yields
/// `None`. Hits behind the origin (`r < 0`) and points outside the segment's
/// bounding box are rejected as well.
pub fn intersect_line_segment(segment: &LineSegment, angle: f64) -> Option<V2> {
    let LineSegment { start, end } = *segment;
    let dir = segment.direction();
    let system = M2x2 {
        a: dir.x,
        b: -angle.cos(),
        c: dir.y,
        d: -angle.sin(),
    };
    let rhs = V2::new(-start.x, -start.y);

    let inverted = invert(system)?;
    let V2 { x: t, y: r } = mul_mv(inverted, rhs);
    if r < 0.0 {
        return None;
    }

    let hit = append(start, scale(dir, t));
    if within(hit.x, start.x, end.x) && within(hit.y, start.y, end.y) {
        Some(hit)
    } else {
        None
    }
}
