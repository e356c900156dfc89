//! Software rasteriser for the cloth.
//!
//! [`Raster`] owns the framebuffer handed to the window.  To draw the cloth
//! into it, borrow a [`Painter`] that binds the current texture; the painter
//! is the [`ClothCanvas`] the cloth draws onto.
//!
//! | Primitive | How |
//! |---|---|
//! | textured quad | two affine-textured triangles, nearest sampling |
//! | line | Bresenham |
//! | handle marker | four solid petal triangles |

use glam::Vec2;

use image_cloth::render::marker_petals;
use image_cloth::{ClothCanvas, Colour, TexturedQuad};

use crate::texture::Texture;

/// Coordinates further out than this are treated as diverged and skipped.
const FAR: f32 = 1.0e5;

// ════════════════════════════════════════════════════════════════════════════
// Raster
// ════════════════════════════════════════════════════════════════════════════

pub struct Raster {
    width:  usize,
    height: usize,
    buf:    Vec<Colour>,
}

impl Raster {
    pub fn new(width: usize, height: usize, fill: Colour) -> Self {
        Raster { width, height, buf: vec![fill; width * height] }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn buffer(&self) -> &[Colour] { &self.buf }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Colour> {
        (x < self.width && y < self.height).then(|| self.buf[y * self.width + x])
    }

    pub fn clear(&mut self, colour: Colour) {
        self.buf.fill(colour);
    }

    /// Pull every pixel `alpha`/255 of the way toward `colour`.
    pub fn fade(&mut self, colour: Colour, alpha: u8) {
        let t = alpha as f32 / 255.0;
        for px in self.buf.iter_mut() {
            *px = blend(*px, colour, t);
        }
    }

    /// Draw the cloth with `texture` bound.
    pub fn painter<'a>(&'a mut self, texture: &'a Texture) -> Painter<'a> {
        Painter { raster: self, texture }
    }

    // ── primitive drawing helpers ─────────────────────────────────────────

    fn set_pixel(&mut self, x: i64, y: i64, colour: Colour) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buf[y as usize * self.width + x as usize] = colour;
        }
    }

    /// Fill a triangle; `shade` gets the barycentric weights of each
    /// covered pixel centre.
    fn fill_triangle(&mut self, v: [Vec2; 3], shade: impl Fn([f32; 3]) -> Colour) {
        if v.iter().any(|p| !p.is_finite() || p.abs().max_element() > FAR) { return; }

        let area = edge(v[0], v[1], v[2]);
        if area.abs() < 1e-6 { return; }

        let min = v[0].min(v[1]).min(v[2]).max(Vec2::ZERO);
        let max = v[0].max(v[1]).max(v[2])
            .min(Vec2::new(self.width as f32 - 1.0, self.height as f32 - 1.0));
        if min.x > max.x || min.y > max.y { return; }

        for y in min.y as usize..=max.y as usize {
            for x in min.x as usize..=max.x as usize {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w = [
                    edge(v[1], v[2], p) / area,
                    edge(v[2], v[0], p) / area,
                    edge(v[0], v[1], p) / area,
                ];
                if w.iter().all(|&wi| wi >= 0.0) {
                    self.buf[y * self.width + x] = shade(w);
                }
            }
        }
    }

    fn line(&mut self, from: Vec2, to: Vec2, colour: Colour) {
        if !from.is_finite() || !to.is_finite() { return; }
        if from.abs().max_element() > FAR || to.abs().max_element() > FAR { return; }

        let (mut x0, mut y0) = (from.x.round() as i64, from.y.round() as i64);
        let (x1, y1)         = (to.x.round()   as i64, to.y.round()   as i64);
        let dx =  (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x0, y0, colour);
            if x0 == x1 && y0 == y1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x0 += sx; }
            if e2 <= dx { err += dx; y0 += sy; }
        }
    }

    /// Minimal bitmap font: 3×5 characters for the status line.
    pub fn draw_label(&mut self, text: &str, x: usize, y: usize, colour: Colour) {
        let mut cx = x;
        for ch in text.chars() {
            for (row, &bits) in char_glyph(ch).iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.set_pixel((cx + col) as i64, (y + row) as i64, colour);
                    }
                }
            }
            cx += 4; // 3 wide + 1 gap
            if cx + 4 > self.width { break; }
        }
    }
}

/// Twice the signed area of `(a, b, p)`.
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

// ════════════════════════════════════════════════════════════════════════════
// Painter
// ════════════════════════════════════════════════════════════════════════════

/// A [`Raster`] with a texture bound, ready for the cloth to draw on.
pub struct Painter<'a> {
    raster:  &'a mut Raster,
    texture: &'a Texture,
}

impl ClothCanvas for Painter<'_> {
    fn textured_quad(&mut self, quad: &TexturedQuad) {
        let pos: [Vec2; 4] = quad.corners.map(|c| c.position.truncate());
        let uv:  [Vec2; 4] = quad.corners.map(|c| c.uv);
        let texture = self.texture;

        for [a, b, c] in [[0, 1, 2], [0, 2, 3]] {
            let tri_uv = [uv[a], uv[b], uv[c]];
            self.raster.fill_triangle([pos[a], pos[b], pos[c]], |w| {
                let t = tri_uv[0] * w[0] + tri_uv[1] * w[1] + tri_uv[2] * w[2];
                texture.sample(t.x, t.y)
            });
        }

        if let Some(stroke) = quad.stroke {
            for k in 0..4 {
                self.raster.line(pos[k], pos[(k + 1) % 4], stroke);
            }
        }
    }

    fn line(&mut self, from: Vec2, to: Vec2, colour: Colour) {
        self.raster.line(from, to, colour);
    }

    fn handle_marker(&mut self, at: Vec2, colour: Colour) {
        for petal in marker_petals(at) {
            self.raster.fill_triangle(petal, |_| colour);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000],
    }
}

/// Linear blend of two ARGB colours. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
pub fn blend(a: Colour, b: Colour, t: f32) -> Colour {
    let t = t.clamp(0.0, 1.0);
    let lerp = |shift: u32| {
        let ca = ((a >> shift) & 0xFF) as f32;
        let cb = ((b >> shift) & 0xFF) as f32;
        ((ca * (1.0 - t) + cb * t).round() as u32) << shift
    };
    0xFF000000 | lerp(16) | lerp(8) | lerp(0)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use image_cloth::TexVertex;

    const BG: Colour = 0xFF000000;

    fn quad(x0: f32, y0: f32, x1: f32, y1: f32, stroke: Option<Colour>) -> TexturedQuad {
        let v = |x: f32, y: f32, u: f32, w: f32| TexVertex {
            position: Vec3::new(x, y, 0.0),
            uv:       Vec2::new(u, w),
        };
        TexturedQuad {
            corners: [v(x0, y0, 0.0, 0.0), v(x0, y1, 0.0, 1.9), v(x1, y1, 1.9, 1.9), v(x1, y0, 1.9, 0.0)],
            stroke,
        }
    }

    fn two_by_two() -> Texture {
        Texture { width: 2, height: 2, pixels: vec![0xFFFF0000, 0xFF00FF00, 0xFF0000FF, 0xFFFFFFFF] }
    }

    #[test]
    fn blend_endpoints_and_midpoint() {
        assert_eq!(blend(0xFF000000, 0xFFFFFFFF, 0.0), 0xFF000000);
        assert_eq!(blend(0xFF000000, 0xFFFFFFFF, 1.0), 0xFFFFFFFF);
        assert_eq!(blend(0xFF000000, 0xFF0000C8, 0.5), 0xFF000064);
    }

    #[test]
    fn quad_maps_texture_corners() {
        let mut r = Raster::new(20, 20, BG);
        let tex = two_by_two();
        r.painter(&tex).textured_quad(&quad(0.0, 0.0, 20.0, 20.0, None));
        assert_eq!(r.pixel(1, 1),   Some(0xFFFF0000));
        assert_eq!(r.pixel(18, 1),  Some(0xFF00FF00));
        assert_eq!(r.pixel(1, 18),  Some(0xFF0000FF));
        assert_eq!(r.pixel(18, 18), Some(0xFFFFFFFF));
        assert!(r.buffer().iter().all(|&c| c != BG));
    }

    #[test]
    fn quad_winding_does_not_matter() {
        let mut r = Raster::new(10, 10, BG);
        let tex = Texture::new(1, 1, 0xFF123456);
        let mut q = quad(0.0, 0.0, 10.0, 10.0, None);
        q.corners.reverse();
        r.painter(&tex).textured_quad(&q);
        assert_eq!(r.pixel(5, 5), Some(0xFF123456));
    }

    #[test]
    fn stroke_outlines_the_quad() {
        let mut r = Raster::new(30, 30, BG);
        let tex = Texture::new(1, 1, 0xFF111111);
        r.painter(&tex).textured_quad(&quad(5.0, 5.0, 25.0, 25.0, Some(0xFFFFFF00)));
        assert_eq!(r.pixel(5, 15),  Some(0xFFFFFF00));
        assert_eq!(r.pixel(15, 25), Some(0xFFFFFF00));
        assert_eq!(r.pixel(15, 15), Some(0xFF111111));
    }

    #[test]
    fn line_hits_both_endpoints() {
        let mut r = Raster::new(10, 10, BG);
        let tex = Texture::new(1, 1, 0);
        r.painter(&tex).line(Vec2::new(1.0, 1.0), Vec2::new(8.0, 5.0), 7);
        assert_eq!(r.pixel(1, 1), Some(7));
        assert_eq!(r.pixel(8, 5), Some(7));
        assert_eq!(r.buffer().iter().filter(|&&c| c == 7).count(), 8);
    }

    #[test]
    fn offscreen_and_diverged_geometry_is_skipped() {
        let mut r = Raster::new(10, 10, BG);
        let tex = Texture::new(1, 1, 0xFFFFFFFF);
        let mut p = r.painter(&tex);
        p.line(Vec2::new(f32::NAN, 0.0), Vec2::new(5.0, 5.0), 1);
        p.line(Vec2::new(-1e9, 0.0), Vec2::new(5.0, 5.0), 1);
        p.textured_quad(&quad(50.0, 50.0, 60.0, 60.0, None));
        assert!(r.buffer().iter().all(|&c| c == BG));
    }

    #[test]
    fn marker_draws_four_petals_around_an_empty_centre() {
        let mut r = Raster::new(60, 60, BG);
        let tex = Texture::new(1, 1, 0);
        r.painter(&tex).handle_marker(Vec2::new(30.0, 30.0), 0xFF00FFFF);
        assert_eq!(r.pixel(30, 30), Some(BG));
        assert_eq!(r.pixel(30, 16), Some(0xFF00FFFF)); // up
        assert_eq!(r.pixel(30, 44), Some(0xFF00FFFF)); // down
        assert_eq!(r.pixel(16, 30), Some(0xFF00FFFF)); // left
        assert_eq!(r.pixel(44, 30), Some(0xFF00FFFF)); // right
    }

    #[test]
    fn fade_moves_toward_background() {
        let mut r = Raster::new(2, 1, 0xFFFFFFFF);
        r.fade(BG, 20);
        let c = r.pixel(0, 0).unwrap();
        assert!(c != 0xFFFFFFFF && c != BG);
        assert_eq!(c & 0xFF, 235);
    }

    #[test]
    fn clear_fills_everything() {
        let mut r = Raster::new(3, 3, 1);
        r.clear(BG);
        assert!(r.buffer().iter().all(|&c| c == BG));
    }

    #[test]
    fn label_writes_pixels() {
        let mut r = Raster::new(40, 10, BG);
        r.draw_label("G 1", 0, 0, 0xFFFFFFFF);
        assert!(r.buffer().iter().any(|&c| c == 0xFFFFFFFF));
        assert_eq!(char_glyph('g'), char_glyph('G'));
    }
}
