/// A point or direction in the plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct V2 {
    pub x: f64,
    pub y: f64,
}

impl V2 {
    pub const ZERO: V2 = V2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Row-major 2x2 matrix:
///
/// ```text
/// | a b |
/// | c d |
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct M2x2 {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl M2x2 {
    pub const IDENTITY: M2x2 = M2x2 {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
    };
}

#[inline]
pub fn magnitude(v: V2) -> f64 {
    v.x.hypot(v.y)
}

#[inline]
pub fn scale(v: V2, s: f64) -> V2 {
    V2::new(v.x * s, v.y * s)
}

/// Vector addition.
#[inline]
pub fn append(a: V2, b: V2) -> V2 {
    V2::new(a.x + b.x, a.y + b.y)
}

/// Unit heading for `angle` radians, 0 along +x.
#[inline]
pub fn facing(angle: f64) -> V2 {
    V2::new(angle.cos(), angle.sin())
}

#[inline]
pub fn mul_mv(m: M2x2, v: V2) -> V2 {
    V2::new(m.a * v.x + m.b * v.y, m.c * v.x + m.d * v.y)
}

pub fn mul_mm(l: M2x2, r: M2x2) -> M2x2 {
    M2x2 {
        a: l.a * r.a + l.b * r.c,
        b: l.a * r.b + l.b * r.d,
        c: l.c * r.a + l.d * r.c,
        d: l.c * r.b + l.d * r.d,
    }
}

#[inline]
pub fn determinant(m: M2x2) -> f64 {
    m.a * m.d - m.b * m.c
}

/// `None` only when the determinant is exactly zero.
pub fn invert(m: M2x2) -> Option<M2x2> {
    let det = determinant(m);
    if det == 0.0 {
        return None;
    }
    Some(M2x2 {
        a: m.d / det,
        b: -m.b / det,
        c: -m.c / det,
        d: m.a / det,
    })
}
