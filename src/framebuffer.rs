use crate::renderer::{Color, Surface};

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // BGRA8 in little-endian memory
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
    // Alpha at 0
}

/// Round and saturate a channel value the way a canvas does.
#[inline]
fn channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

pub fn pack_color(color: Color) -> u32 {
    match color {
        Color::Gray(c) => {
            let c = channel(c);
            pack_rgb(c, c, c)
        }
        Color::Void => pack_rgb(255, 0, 0),
    }
}

/// Software canvas: row-major 0RGB pixels plus the current path and stroke.
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
    path: Vec<Vec<(f64, f64)>>,
    stroke: u32,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width as usize, height as usize);
        Self {
            width,
            height,
            pixels: vec![0; width * height],
            path: Vec::new(),
            stroke: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }

    /// Integer Bresenham, clipped per pixel.
    fn draw_line(&mut self, mut x0: i32, mut y0: i32, x1: i32, y1: i32) {
        let (w, h) = (self.width as i32, self.height as i32);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if (0..w).contains(&x0) && (0..h).contains(&y0) {
                self.pixels[y0 as usize * self.width + x0 as usize] = self.stroke;
            }
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

impl Surface for Framebuffer {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let x0 = (x.max(0.0) as usize).min(self.width);
        let y0 = (y.max(0.0) as usize).min(self.height);
        let x1 = ((x + w).max(0.0) as usize).min(self.width);
        let y1 = ((y + h).max(0.0) as usize).min(self.height);
        for row in y0..y1 {
            let base = row * self.width;
            self.pixels[base + x0..base + x1].fill(0);
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(vec![(x, y)]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        match self.path.last_mut() {
            Some(sub) => sub.push((x, y)),
            // A canvas treats a leading lineTo as moveTo.
            None => self.path.push(vec![(x, y)]),
        }
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke = pack_color(color);
    }

    fn stroke(&mut self) {
        let path = std::mem::take(&mut self.path);
        for sub in &path {
            for pair in sub.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                self.draw_line(
                    a.0.floor() as i32,
                    a.1.floor() as i32,
                    b.0.floor() as i32,
                    b.1.floor() as i32,
                );
            }
        }
        self.path = path;
    }

    fn resize(&mut self, width: u32, height: u32) {
        *self = Framebuffer::new(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Viewer;
    use crate::renderer::{RenderPlan, render_frame};
    use crate::vectors::V2;
    use crate::world::Scene;
    use std::f64::consts::PI;

    #[test]
    fn gray_saturates_and_void_is_red() {
        assert_eq!(pack_color(Color::Gray(256.0)), pack_rgb(255, 255, 255));
        assert_eq!(pack_color(Color::Gray(127.6)), pack_rgb(128, 128, 128));
        assert_eq!(pack_color(Color::Gray(0.0001)), 0);
        assert_eq!(pack_color(Color::Void), 0x00FF_0000);
    }

    #[test]
    fn vertical_stroke_fills_column() {
        let mut fb = Framebuffer::new(4, 3);
        fb.begin_path();
        fb.move_to(2.0, 0.0);
        fb.line_to(2.0, 3.0);
        fb.set_stroke_color(Color::Void);
        fb.stroke();
        for y in 0..3 {
            assert_eq!(fb.pixel(2, y), pack_rgb(255, 0, 0));
            assert_eq!(fb.pixel(1, y), 0);
            assert_eq!(fb.pixel(3, y), 0);
        }
    }

    #[test]
    fn begin_path_forgets_previous_lines() {
        let mut fb = Framebuffer::new(3, 3);
        fb.begin_path();
        fb.move_to(0.0, 0.0);
        fb.line_to(0.0, 3.0);
        fb.set_stroke_color(Color::Gray(255.0));
        fb.stroke();
        fb.begin_path();
        fb.move_to(2.0, 0.0);
        fb.line_to(2.0, 3.0);
        fb.set_stroke_color(Color::Void);
        fb.stroke();
        assert_eq!(fb.pixel(0, 1), pack_rgb(255, 255, 255));
        assert_eq!(fb.pixel(2, 1), pack_rgb(255, 0, 0));
    }

    #[test]
    fn clear_and_resize_blank_the_canvas() {
        let mut fb = Framebuffer::new(2, 2);
        fb.set_stroke_color(Color::Void);
        fb.move_to(0.0, 0.0);
        fb.line_to(1.0, 1.0);
        fb.stroke();
        assert_eq!(fb.pixel(1, 1), pack_rgb(255, 0, 0));
        fb.clear_rect(0.0, 0.0, 2.0, 2.0);
        assert!(fb.pixels().iter().all(|&p| p == 0));

        fb.resize(5, 1);
        assert_eq!((fb.width(), fb.height(), fb.pixels().len()), (5, 1, 5));
    }

    #[test]
    fn rendered_room_has_no_void_columns() {
        let scene = Scene::demo().unwrap();
        let viewer = Viewer::new(V2::new(0.0, 0.5), 0.0);
        let plan = RenderPlan::derive(&viewer, 1.5 * PI, 32);
        let mut fb = Framebuffer::new(32, 8);
        render_frame(&mut fb, &scene.relative_to(viewer.position), &plan, 32, 8);

        let red = pack_rgb(255, 0, 0);
        for x in 0..32 {
            let top = fb.pixel(x, 0);
            assert_ne!(top, red, "column {x} saw the void");
            // Full height, single colour.
            assert!((0..8).all(|y| fb.pixel(x, y) == top));
        }
    }
}
