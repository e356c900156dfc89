//! Images mapped onto the cloth.
//!
//! A [`TextureSource`] hands out one frame per tick.  The installation fed
//! live video here; [`TestPattern`] is a procedural stand-in of the same
//! size.

use image_cloth::Colour;

/// An ARGB pixel buffer, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub width:  usize,
    pub height: usize,
    pub pixels: Vec<Colour>,
}

impl Texture {
    pub fn new(width: usize, height: usize, fill: Colour) -> Self {
        Texture { width, height, pixels: vec![fill; width * height] }
    }

    /// Nearest pixel at texture coordinate `(u, v)` in pixels, clamped to
    /// the image.
    pub fn sample(&self, u: f32, v: f32) -> Colour {
        if self.pixels.is_empty() { return 0; }
        let x = (u.max(0.0) as usize).min(self.width  - 1);
        let y = (v.max(0.0) as usize).min(self.height - 1);
        self.pixels[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, c: Colour) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = c;
        }
    }
}

/// Supplies the image for the next frame.
pub trait TextureSource {
    /// `None` when no new frame is available; the caller keeps the last one.
    fn next_frame(&mut self) -> Option<&Texture>;
}

// ════════════════════════════════════════════════════════════════════════════
// TestPattern
// ════════════════════════════════════════════════════════════════════════════

const CELL: usize = 16;

/// A scrolling checkerboard with a colour sweep, so texture mapping and
/// cloth motion are both easy to see.
pub struct TestPattern {
    texture: Texture,
    frame:   u32,
}

impl TestPattern {
    pub fn new(width: usize, height: usize) -> Self {
        let mut p = TestPattern { texture: Texture::new(width, height, 0xFF000000), frame: 0 };
        p.paint();
        p
    }

    pub fn frame(&self) -> u32 { self.frame }

    fn paint(&mut self) {
        let shift = self.frame as usize;
        let (w, h) = (self.texture.width, self.texture.height);
        for y in 0..h {
            for x in 0..w {
                let checker = ((x + shift) / CELL + y / CELL) % 2 == 0;
                let r = (x * 255 / w.max(1)) as u32;
                let g = (y * 255 / h.max(1)) as u32;
                let b = ((shift * 2) % 256) as u32;
                let base = 0xFF000000 | (r << 16) | (g << 8) | b;
                let c = if checker { base } else { dim(base) };
                self.texture.set(x, y, c);
            }
        }
    }
}

impl TextureSource for TestPattern {
    fn next_frame(&mut self) -> Option<&Texture> {
        self.frame = self.frame.wrapping_add(1);
        self.paint();
        Some(&self.texture)
    }
}

fn dim(c: Colour) -> Colour {
    0xFF000000 | ((c >> 1) & 0x007F7F7F)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_clamps_to_edges() {
        let mut t = Texture::new(4, 3, 0);
        t.set(3, 2, 7);
        t.set(0, 0, 9);
        assert_eq!(t.sample(100.0, 100.0), 7);
        assert_eq!(t.sample(-5.0, -5.0), 9);
        assert_eq!(t.sample(3.9, 2.1), 7);
    }

    #[test]
    fn empty_texture_samples_black() {
        assert_eq!(Texture::new(0, 0, 5).sample(1.0, 1.0), 0);
    }

    #[test]
    fn pattern_has_requested_size_and_animates() {
        let mut p = TestPattern::new(32, 24);
        let first = p.next_frame().unwrap().clone();
        assert_eq!((first.width, first.height), (32, 24));
        assert_eq!(first.pixels.len(), 32 * 24);
        let second = p.next_frame().unwrap().clone();
        assert_ne!(first, second);
        assert_eq!(p.frame(), 2);
        assert!(second.pixels.iter().all(|&c| c >> 24 == 0xFF));
    }
}
