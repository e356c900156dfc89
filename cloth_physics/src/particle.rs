//! Point masses.

use glam::Vec3;

// ════════════════════════════════════════════════════════════════════════════
// ParticleId
// ════════════════════════════════════════════════════════════════════════════

/// Index of a particle inside its owning [`ParticleSystem`](crate::ParticleSystem).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub(crate) usize);

impl ParticleId {
    /// Position of the particle in the system's storage order.
    pub fn index(self) -> usize { self.0 }
}

// ════════════════════════════════════════════════════════════════════════════
// Particle
// ════════════════════════════════════════════════════════════════════════════

/// A point mass with position, velocity and an accumulated force.
///
/// A particle is either *free* (integrated every step) or *fixed* (held at
/// its last assigned position).  Making a particle fixed discards its
/// velocity.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    position: Vec3,
    velocity: Vec3,
    force:    Vec3,
    mass:     f32,
    fixed:    bool,
}

impl Particle {
    pub fn new(mass: f32, position: Vec3) -> Self {
        Particle {
            position,
            velocity: Vec3::ZERO,
            force:    Vec3::ZERO,
            mass,
            fixed:    false,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn position(&self) -> Vec3 { self.position }
    pub fn velocity(&self) -> Vec3 { self.velocity }
    pub fn force(&self) -> Vec3 { self.force }
    pub fn mass(&self) -> f32 { self.mass }
    pub fn is_fixed(&self) -> bool { self.fixed }
    pub fn is_free(&self) -> bool { !self.fixed }

    // ── state changes ─────────────────────────────────────────────────────

    /// Teleport to `position`.  No spring force is involved.
    pub fn move_to(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Teleport by `delta` from the current position.
    pub fn move_by(&mut self, delta: Vec3) {
        self.position += delta;
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    pub fn clear_velocity(&mut self) {
        self.velocity = Vec3::ZERO;
    }

    /// Pin the particle in place and drop its velocity.
    pub fn make_fixed(&mut self) {
        self.fixed = true;
        self.velocity = Vec3::ZERO;
    }

    pub fn make_free(&mut self) {
        self.fixed = false;
    }

    // ── force accumulator (used by the system) ────────────────────────────

    pub(crate) fn add_force(&mut self, f: Vec3) {
        self.force += f;
    }

    pub(crate) fn clear_force(&mut self) {
        self.force = Vec3::ZERO;
    }

    /// Raw state write used by the integrators between force evaluations.
    pub(crate) fn set_state(&mut self, position: Vec3, velocity: Vec3) {
        self.position = position;
        self.velocity = velocity;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
