//! Mesh construction: a square grid of particles with structural springs.

use glam::Vec3;

use cloth_physics::{ParticleId, ParticleSystem};

use crate::error::ClothError;
use crate::handle::Handle;

/// Physical constants applied to every particle and spring of a mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
    pub mass:     f32,
    pub strength: f32,
    pub damping:  f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        SpringParams { mass: 0.2, strength: 8.0, damping: 0.5 }
    }
}

/// An `n`×`n` grid of particle ids living in some [`ParticleSystem`].
///
/// Index `(i, j)` is column `i`, row `j`.  Particle `(i, j)` starts at
/// `(i·step_x, j·step_y, 0)`.
#[derive(Clone, Debug)]
pub struct Mesh {
    size:   usize,
    points: Vec<ParticleId>,
    step_x: f32,
    step_y: f32,
}

impl Mesh {
    /// Lay out `size`×`size` particles over `width`×`height` and join
    /// horizontal neighbours `(i-1,j)-(i,j)` and vertical neighbours
    /// `(i,j-1)-(i,j)` with springs whose rest length is the grid step.
    ///
    /// Produces `size²` particles and `2·size·(size-1)` springs.
    pub fn build(
        system: &mut ParticleSystem,
        size:   usize,
        width:  f32,
        height: f32,
        params: SpringParams,
    ) -> Result<Mesh, ClothError> {
        if size < 2 {
            return Err(ClothError::MeshTooSmall(size));
        }

        let step_x = width  / size as f32;
        let step_y = height / size as f32;
        let mut points = Vec::with_capacity(size * size);

        for i in 0..size {
            for j in 0..size {
                let id = system.make_particle(
                    params.mass,
                    Vec3::new(i as f32 * step_x, j as f32 * step_y, 0.0),
                );
                points.push(id);
                if i > 0 {
                    let left = points[(i - 1) * size + j];
                    system.make_spring(left, id, params.strength, params.damping, step_x);
                }
            }
        }

        for i in 0..size {
            for j in 1..size {
                let above = points[i * size + j - 1];
                let here  = points[i * size + j];
                system.make_spring(above, here, params.strength, params.damping, step_y);
            }
        }

        Ok(Mesh { size, points, step_x, step_y })
    }

    pub fn size(&self) -> usize { self.size }
    pub fn step_x(&self) -> f32 { self.step_x }
    pub fn step_y(&self) -> f32 { self.step_y }

    /// Particle at column `i`, row `j`.
    ///
    /// # Panics
    /// If `i` or `j` is outside the mesh.
    pub fn id(&self, i: usize, j: usize) -> ParticleId {
        assert!(i < self.size && j < self.size, "mesh index ({}, {}) out of range", i, j);
        self.points[i * self.size + j]
    }

    pub fn get(&self, i: usize, j: usize) -> Option<ParticleId> {
        (i < self.size && j < self.size).then(|| self.points[i * self.size + j])
    }

    pub fn corner(&self, handle: Handle) -> ParticleId {
        let (i, j) = handle.mesh_index(self.size);
        self.id(i, j)
    }

    /// True if `(i, j)` lies on the outer ring.
    pub fn is_edge(&self, i: usize, j: usize) -> bool {
        let last = self.size - 1;
        i == 0 || j == 0 || i == last || j == last
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
