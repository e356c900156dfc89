//! The particle system: storage, force accumulation and stepping.

use glam::Vec3;

use crate::integrator::{self, Integrator};
use crate::particle::{Particle, ParticleId};
use crate::spring::Spring;

/// Owns every particle and spring of a simulation.
///
/// Gravity acts along +y (screen space, downward) with magnitude `g`;
/// drag is a linear force `-drag * velocity`.
#[derive(Clone, Debug)]
pub struct ParticleSystem {
    particles:  Vec<Particle>,
    springs:    Vec<Spring>,
    gravity:    Vec3,
    drag:       f32,
    integrator: Integrator,
}

impl ParticleSystem {
    /// Create an empty system with gravity `g` and drag `drag`.
    pub fn new(g: f32, drag: f32) -> Self {
        ParticleSystem {
            particles:  Vec::new(),
            springs:    Vec::new(),
            gravity:    Vec3::new(0.0, g, 0.0),
            drag,
            integrator: Integrator::default(),
        }
    }

    // ── construction ──────────────────────────────────────────────────────

    pub fn make_particle(&mut self, mass: f32, position: Vec3) -> ParticleId {
        self.particles.push(Particle::new(mass, position));
        ParticleId(self.particles.len() - 1)
    }

    /// Join `a` and `b` with a spring.
    ///
    /// # Panics
    /// If either id does not belong to this system.
    pub fn make_spring(
        &mut self,
        a:           ParticleId,
        b:           ParticleId,
        strength:    f32,
        damping:     f32,
        rest_length: f32,
    ) -> &Spring {
        assert!(a.0 < self.particles.len() && b.0 < self.particles.len(),
                "spring endpoint outside this system");
        self.springs.push(Spring::new(a, b, strength, damping, rest_length));
        &self.springs[self.springs.len() - 1]
    }

    // ── environment ───────────────────────────────────────────────────────

    /// Set the downward gravity magnitude.
    pub fn set_gravity(&mut self, g: f32) { self.gravity = Vec3::new(0.0, g, 0.0); }
    pub fn gravity(&self) -> Vec3 { self.gravity }

    pub fn set_drag(&mut self, drag: f32) { self.drag = drag; }
    pub fn drag(&self) -> f32 { self.drag }

    pub fn set_integrator(&mut self, integrator: Integrator) { self.integrator = integrator; }
    pub fn integrator(&self) -> Integrator { self.integrator }

    // ── access ────────────────────────────────────────────────────────────

    pub fn particle(&self, id: ParticleId) -> &Particle { &self.particles[id.0] }
    pub fn particle_mut(&mut self, id: ParticleId) -> &mut Particle { &mut self.particles[id.0] }

    pub fn particles(&self) -> &[Particle] { &self.particles }
    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] { &mut self.particles }

    pub fn springs(&self) -> &[Spring] { &self.springs }

    pub fn number_of_particles(&self) -> usize { self.particles.len() }
    pub fn number_of_springs(&self) -> usize { self.springs.len() }

    /// Number of springs attached to `id`.
    pub fn spring_count_for(&self, id: ParticleId) -> usize {
        self.springs.iter().filter(|s| s.connects(id)).count()
    }

    // ── dynamics ──────────────────────────────────────────────────────────

    /// Recompute the force accumulator of every particle from the current
    /// positions and velocities.  Fixed particles end with zero force.
    pub fn apply_forces(&mut self) {
        let gravity = self.gravity;
        let drag    = self.drag;

        for p in self.particles.iter_mut() {
            p.clear_force();
            if p.is_fixed() { continue; }
            let f = gravity * p.mass() - p.velocity() * drag;
            p.add_force(f);
        }

        for s in &self.springs {
            s.apply(&mut self.particles);
        }
    }

    /// Advance the simulation by `t` time units with the configured integrator.
    pub fn advance_time(&mut self, t: f32) {
        match self.integrator {
            Integrator::Euler => integrator::euler_step(self, t),
            Integrator::ModifiedEuler => integrator::modified_euler_step(self, t),
            Integrator::RungeKutta => integrator::runge_kutta_step(self, t),
        }
    }

    /// Sum of `½·m·|v|²` over free particles.
    pub fn kinetic_energy(&self) -> f32 {
        self.particles.iter()
            .filter(|p| p.is_free())
            .map(|p| 0.5 * p.mass() * p.velocity().length_squared())
            .sum()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
