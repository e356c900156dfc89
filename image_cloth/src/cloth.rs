//! The cloth itself: a mesh over a particle system, four handles and a
//! drawing pass.

use glam::{Vec2, Vec3};
use log::{debug, info, warn};

use cloth_physics::{Particle, ParticleId, ParticleSystem};

use crate::config::ClothConfig;
use crate::error::ClothError;
use crate::handle::Handle;
use crate::mesh::{Mesh, SpringParams};
use crate::render::{ClothCanvas, Colour, DisplayOptions, TexVertex, TexturedQuad};

/// A textured mass-spring cloth with four corner handles.
///
/// Built once from a [`ClothConfig`]; afterwards it is driven by one
/// [`step`](ImageCloth::step) per frame plus whatever handle commands the
/// input layer issues in between.
#[derive(Clone, Debug)]
pub struct ImageCloth {
    config:         ClothConfig,
    system:         ParticleSystem,
    mesh:           Mesh,
    sample_w:       f32,
    sample_h:       f32,
    display:        DisplayOptions,
    handle_colours: [Colour; 4],
}

impl ImageCloth {
    /// Build the mesh, move the handles to their layout positions and fix them.
    pub fn new(config: ClothConfig) -> Result<Self, ClothError> {
        config.validate()?;
        if !config.divides_evenly() {
            warn!(
                "mesh size {} does not divide cloth {}x{}; texture sampling will be uneven",
                config.mesh_size, config.cloth_width, config.cloth_height,
            );
        }

        let mut system = ParticleSystem::new(config.gravity, config.drag);
        system.set_integrator(config.integrator);

        let params = SpringParams {
            mass:     config.particle_mass,
            strength: config.spring_strength,
            damping:  config.spring_damping,
        };
        let mesh = Mesh::build(
            &mut system,
            config.mesh_size,
            config.mesh_width(),
            config.mesh_height(),
            params,
        )?;

        info!(
            "cloth: {}x{} mesh, {} particles, {} springs, {} integrator",
            mesh.size(), mesh.size(),
            system.number_of_particles(), system.number_of_springs(),
            system.integrator().name(),
        );

        let mut cloth = ImageCloth {
            sample_w:       config.sample_width(),
            sample_h:       config.sample_height(),
            handle_colours: config.resolved_handle_colours(),
            display:        DisplayOptions::default(),
            config,
            system,
            mesh,
        };
        cloth.reset_handles();
        cloth.fix_handles();
        Ok(cloth)
    }

    /// Advance the simulation by one fixed time step.
    pub fn step(&mut self) {
        self.system.advance_time(self.config.time_step);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Handles
    // ═══════════════════════════════════════════════════════════════════════

    fn corner(&self, h: Handle) -> &Particle {
        self.system.particle(self.mesh.corner(h))
    }

    fn corner_mut(&mut self, h: Handle) -> &mut Particle {
        let id = self.mesh.corner(h);
        self.system.particle_mut(id)
    }

    pub fn fix_handle(&mut self, h: Handle) {
        self.corner_mut(h).make_fixed();
        debug!("handle {} fixed", h.name());
    }

    pub fn free_handle(&mut self, h: Handle) {
        self.corner_mut(h).make_free();
        debug!("handle {} freed", h.name());
    }

    pub fn handle_is_fixed(&self, h: Handle) -> bool {
        self.corner(h).is_fixed()
    }

    /// Teleport a handle.  Bypasses the springs entirely.
    pub fn set_handle_position(&mut self, h: Handle, x: f32, y: f32, z: f32) {
        self.corner_mut(h).move_to(Vec3::new(x, y, z));
    }

    pub fn offset_handle_position(&mut self, h: Handle, dx: f32, dy: f32, dz: f32) {
        self.corner_mut(h).move_by(Vec3::new(dx, dy, dz));
    }

    pub fn set_handle_velocity(&mut self, h: Handle, vx: f32, vy: f32, vz: f32) {
        self.corner_mut(h).set_velocity(Vec3::new(vx, vy, vz));
    }

    pub fn clear_handle_velocity(&mut self, h: Handle) {
        self.corner_mut(h).clear_velocity();
    }

    pub fn handle_position(&self, h: Handle) -> Vec3 {
        self.corner(h).position()
    }

    pub fn handle_velocity(&self, h: Handle) -> Vec3 {
        self.corner(h).velocity()
    }

    /// Move every handle back to its layout position, a margin in from the
    /// canvas corners.  Fixed state is left alone.
    pub fn reset_handles(&mut self) {
        let (w, h, m) = (
            self.config.canvas_width as f32,
            self.config.canvas_height as f32,
            self.config.margin,
        );
        for handle in Handle::ALL {
            let p = handle.layout_position(w, h, m);
            self.set_handle_position(handle, p.x, p.y, p.z);
        }
    }

    pub fn fix_handles(&mut self) {
        for h in Handle::ALL { self.fix_handle(h); }
    }

    pub fn free_handles(&mut self) {
        for h in Handle::ALL { self.free_handle(h); }
    }

    // ── arbitrary mesh points ────────────────────────────────────────────
    //
    // Same operations addressed by (column, row).  Indices outside the mesh
    // are ignored; queries on them return `None`.

    fn point(&self, i: usize, j: usize) -> Option<ParticleId> {
        self.mesh.get(i, j)
    }

    fn with_point(&mut self, i: usize, j: usize, f: impl FnOnce(&mut Particle)) {
        match self.point(i, j) {
            Some(id) => f(self.system.particle_mut(id)),
            None     => debug!("mesh point ({}, {}) outside {}x{} mesh", i, j, self.mesh.size(), self.mesh.size()),
        }
    }

    pub fn fix_mesh_point(&mut self, i: usize, j: usize) {
        self.with_point(i, j, Particle::make_fixed);
    }

    pub fn free_mesh_point(&mut self, i: usize, j: usize) {
        self.with_point(i, j, Particle::make_free);
    }

    pub fn mesh_point_is_fixed(&self, i: usize, j: usize) -> Option<bool> {
        self.point(i, j).map(|id| self.system.particle(id).is_fixed())
    }

    pub fn mesh_point_position(&self, i: usize, j: usize) -> Option<Vec3> {
        self.point(i, j).map(|id| self.system.particle(id).position())
    }

    pub fn set_mesh_point_position(&mut self, i: usize, j: usize, x: f32, y: f32, z: f32) {
        self.with_point(i, j, |p| p.move_to(Vec3::new(x, y, z)));
    }

    pub fn offset_mesh_point_position(&mut self, i: usize, j: usize, dx: f32, dy: f32, dz: f32) {
        self.with_point(i, j, |p| p.move_by(Vec3::new(dx, dy, dz)));
    }

    pub fn set_mesh_point_velocity(&mut self, i: usize, j: usize, vx: f32, vy: f32, vz: f32) {
        self.with_point(i, j, |p| p.set_velocity(Vec3::new(vx, vy, vz)));
    }

    pub fn clear_mesh_point_velocity(&mut self, i: usize, j: usize) {
        self.with_point(i, j, Particle::clear_velocity);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Environment
    // ═══════════════════════════════════════════════════════════════════════

    pub fn set_gravity(&mut self, g: f32) {
        self.system.set_gravity(g);
        debug!("gravity {:.2}", g);
    }

    /// Current downward gravity magnitude.
    pub fn gravity(&self) -> f32 {
        self.system.gravity().y
    }

    pub fn set_drag(&mut self, drag: f32) { self.system.set_drag(drag); }
    pub fn drag(&self) -> f32 { self.system.drag() }

    // ═══════════════════════════════════════════════════════════════════════
    // Display
    // ═══════════════════════════════════════════════════════════════════════

    pub fn set_draw_handles(&mut self, on: bool) { self.display.handles = on; }
    pub fn set_draw_outlines(&mut self, on: bool) { self.display.outlines = on; }
    pub fn set_draw_mesh(&mut self, on: bool) { self.display.mesh = on; }

    pub fn draws_handles(&self) -> bool { self.display.handles }
    pub fn draws_outlines(&self) -> bool { self.display.outlines }
    pub fn draws_mesh(&self) -> bool { self.display.mesh }

    pub fn display(&self) -> DisplayOptions { self.display }
    pub fn set_display(&mut self, display: DisplayOptions) { self.display = display; }

    /// Marker colours in [`Handle::ALL`] order.
    pub fn set_handle_colours(&mut self, colours: [Colour; 4]) {
        self.handle_colours = colours;
    }

    pub fn handle_colour(&self, h: Handle) -> Colour {
        self.handle_colours[h.index()]
    }

    pub fn foreground_colour(&self) -> Colour { self.config.foreground_colour }

    // ═══════════════════════════════════════════════════════════════════════
    // Drawing
    // ═══════════════════════════════════════════════════════════════════════

    fn vertex(&self, i: usize, j: usize) -> TexVertex {
        TexVertex {
            position: self.system.particle(self.mesh.id(i, j)).position(),
            uv:       Vec2::new(i as f32 * self.sample_w, j as f32 * self.sample_h),
        }
    }

    fn screen(&self, i: usize, j: usize) -> Vec2 {
        self.system.particle(self.mesh.id(i, j)).position().truncate()
    }

    /// Issue the whole frame: one quad per cell, then outlines and handle
    /// markers as enabled.
    pub fn draw<C: ClothCanvas + ?Sized>(&self, canvas: &mut C) {
        let n = self.mesh.size();
        let stroke = self.display.mesh.then_some(self.config.foreground_colour);

        for i in 0..n - 1 {
            for j in 0..n - 1 {
                let quad = TexturedQuad {
                    corners: [
                        self.vertex(i,     j),
                        self.vertex(i,     j + 1),
                        self.vertex(i + 1, j + 1),
                        self.vertex(i + 1, j),
                    ],
                    stroke,
                };
                canvas.textured_quad(&quad);
            }
        }

        if self.display.outlines {
            self.draw_outlines(canvas);
        }
        if self.display.handles {
            self.draw_handles(canvas);
        }
    }

    fn draw_outlines<C: ClothCanvas + ?Sized>(&self, canvas: &mut C) {
        let last = self.mesh.size() - 1;
        let colour = self.config.foreground_colour;
        for k in 0..last {
            canvas.line(self.screen(k, 0),    self.screen(k + 1, 0),    colour);
            canvas.line(self.screen(k, last), self.screen(k + 1, last), colour);
            canvas.line(self.screen(0, k),    self.screen(0, k + 1),    colour);
            canvas.line(self.screen(last, k), self.screen(last, k + 1), colour);
        }
    }

    /// One marker per handle, in its own colour.
    pub fn draw_handles<C: ClothCanvas + ?Sized>(&self, canvas: &mut C) {
        for h in Handle::ALL {
            canvas.handle_marker(self.handle_position(h).truncate(), self.handle_colour(h));
        }
    }

    // ── accessors ────────────────────────────────────────────────────────

    pub fn config(&self) -> &ClothConfig { &self.config }
    pub fn mesh(&self) -> &Mesh { &self.mesh }
    pub fn mesh_size(&self) -> usize { self.mesh.size() }
    pub fn particle_system(&self) -> &ParticleSystem { &self.system }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
