//! The drawing interface.
//!
//! The cloth never rasterises anything itself.  It describes a frame as a
//! sequence of primitives issued to a [`ClothCanvas`]; backends decide how
//! to turn those into pixels.  [`DrawList`] is a canvas that just records
//! what it is given, which is what the tests use.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Packed `0xAARRGGBB`.
pub type Colour = u32;

/// A mesh corner with its texture coordinate in image pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TexVertex {
    pub position: Vec3,
    pub uv:       Vec2,
}

/// One mesh cell.  Corners run (i,j), (i,j+1), (i+1,j+1), (i+1,j).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TexturedQuad {
    pub corners: [TexVertex; 4],
    /// Wireframe colour, set when mesh lines are enabled.
    pub stroke:  Option<Colour>,
}

/// A rendering backend.
pub trait ClothCanvas {
    fn textured_quad(&mut self, quad: &TexturedQuad);
    fn line(&mut self, from: Vec2, to: Vec2, colour: Colour);
    /// A four-petal marker centred on `at`.
    fn handle_marker(&mut self, at: Vec2, colour: Colour);
}

/// Which overlays `draw` adds on top of the textured mesh.  All off by
/// default: a fresh cloth draws only its texture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub handles:  bool,
    pub outlines: bool,
    pub mesh:     bool,
}

/// Marker petal in local coordinates, before rotation.
pub const PETAL: [Vec2; 3] = [
    Vec2::new(-4.0, -17.0),
    Vec2::new( 4.0, -17.0),
    Vec2::new( 0.0,  -5.0),
];

/// The four petals of a handle marker, translated to `at`.
pub fn marker_petals(at: Vec2) -> [[Vec2; 3]; 4] {
    let mut out = [[Vec2::ZERO; 3]; 4];
    for (k, petal) in out.iter_mut().enumerate() {
        let rot = Vec2::from_angle(k as f32 * std::f32::consts::FRAC_PI_2);
        for (v, p) in petal.iter_mut().zip(PETAL) {
            *v = at + rot.rotate(p);
        }
    }
    out
}

// ── recording canvas ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Quad(TexturedQuad),
    Line { from: Vec2, to: Vec2, colour: Colour },
    Marker { at: Vec2, colour: Colour },
}

#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self { Self::default() }

    pub fn quads(&self) -> impl Iterator<Item = &TexturedQuad> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Quad(q) => Some(q),
            _ => None,
        })
    }

    pub fn line_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Line { .. })).count()
    }

    pub fn markers(&self) -> Vec<(Vec2, Colour)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Marker { at, colour } => Some((*at, *colour)),
            _ => None,
        }).collect()
    }
}

impl ClothCanvas for DrawList {
    fn textured_quad(&mut self, quad: &TexturedQuad) {
        self.commands.push(DrawCommand::Quad(*quad));
    }

    fn line(&mut self, from: Vec2, to: Vec2, colour: Colour) {
        self.commands.push(DrawCommand::Line { from, to, colour });
    }

    fn handle_marker(&mut self, at: Vec2, colour: Colour) {
        self.commands.push(DrawCommand::Marker { at, colour });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn petals_point_in_four_directions() {
        let petals = marker_petals(Vec2::new(100.0, 100.0));
        // Tip of each petal is 5px from the centre.
        let tips: Vec<Vec2> = petals.iter().map(|p| p[2] - Vec2::new(100.0, 100.0)).collect();
        assert!((tips[0] - Vec2::new(0.0, -5.0)).length() < 1e-4);
        assert!((tips[1] - Vec2::new(5.0,  0.0)).length() < 1e-4);
        assert!((tips[2] - Vec2::new(0.0,  5.0)).length() < 1e-4);
        assert!((tips[3] - Vec2::new(-5.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn draw_list_records_in_order() {
        let mut list = DrawList::new();
        list.line(Vec2::ZERO, Vec2::ONE, 1);
        list.handle_marker(Vec2::ONE, 2);
        assert_eq!(list.line_count(), 1);
        assert_eq!(list.markers(), vec![(Vec2::ONE, 2)]);
        assert!(matches!(list.commands[0], DrawCommand::Line { .. }));
    }
}
