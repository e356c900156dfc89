//! Time integration schemes.
//!
//! All three schemes evaluate forces through [`ParticleSystem::apply_forces`]
//! and only ever touch free particles.  Fourth-order Runge–Kutta is the
//! default; the Euler variants are cheaper but go unstable much sooner on
//! stiff meshes.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::system::ParticleSystem;

/// Which scheme [`ParticleSystem::advance_time`] uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Integrator {
    /// Explicit Euler: `x += v·t`, `v += a·t`.
    Euler,
    /// Euler with the `½·a·t²` position term.
    ModifiedEuler,
    /// Classic fourth-order Runge–Kutta.
    #[default]
    RungeKutta,
}

impl Integrator {
    pub fn name(self) -> &'static str {
        match self {
            Integrator::Euler => "euler",
            Integrator::ModifiedEuler => "modified_euler",
            Integrator::RungeKutta => "runge_kutta",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Euler
// ════════════════════════════════════════════════════════════════════════════

pub(crate) fn euler_step(system: &mut ParticleSystem, t: f32) {
    system.apply_forces();
    for p in system.particles_mut().iter_mut().filter(|p| p.is_free()) {
        let a = p.force() / p.mass();
        let position = p.position() + p.velocity() * t;
        let velocity = p.velocity() + a * t;
        p.set_state(position, velocity);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Modified Euler
// ════════════════════════════════════════════════════════════════════════════

pub(crate) fn modified_euler_step(system: &mut ParticleSystem, t: f32) {
    system.apply_forces();
    let half_tt = 0.5 * t * t;
    for p in system.particles_mut().iter_mut().filter(|p| p.is_free()) {
        let a = p.force() / p.mass();
        let position = p.position() + p.velocity() * t + a * half_tt;
        let velocity = p.velocity() + a * t;
        p.set_state(position, velocity);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Runge–Kutta 4
// ════════════════════════════════════════════════════════════════════════════

/// One RK4 stage sample: the velocity and force seen by every particle.
struct Stage {
    velocity: Vec<Vec3>,
    force:    Vec<Vec3>,
}

fn sample(system: &ParticleSystem) -> Stage {
    let particles = system.particles();
    Stage {
        velocity: particles.iter().map(|p| p.velocity()).collect(),
        force:    particles.iter().map(|p| p.force()).collect(),
    }
}

/// Move every free particle to `origin + k·h`, ready for the next stage.
fn project(system: &mut ParticleSystem, origin: &[(Vec3, Vec3)], k: &Stage, h: f32) {
    for (i, p) in system.particles_mut().iter_mut().enumerate() {
        if p.is_fixed() { continue; }
        let (x0, v0) = origin[i];
        let position = x0 + k.velocity[i] * h;
        let velocity = v0 + k.force[i] * (h / p.mass());
        p.set_state(position, velocity);
    }
}

pub(crate) fn runge_kutta_step(system: &mut ParticleSystem, t: f32) {
    let origin: Vec<(Vec3, Vec3)> = system.particles().iter()
        .map(|p| (p.position(), p.velocity()))
        .collect();

    system.apply_forces();
    let k1 = sample(system);

    project(system, &origin, &k1, 0.5 * t);
    system.apply_forces();
    let k2 = sample(system);

    project(system, &origin, &k2, 0.5 * t);
    system.apply_forces();
    let k3 = sample(system);

    project(system, &origin, &k3, t);
    system.apply_forces();
    let k4 = sample(system);

    let sixth = t / 6.0;
    for (i, p) in system.particles_mut().iter_mut().enumerate() {
        if p.is_fixed() { continue; }
        let (x0, v0) = origin[i];
        let dv = k1.velocity[i] + 2.0 * k2.velocity[i] + 2.0 * k3.velocity[i] + k4.velocity[i];
        let df = k1.force[i]    + 2.0 * k2.force[i]    + 2.0 * k3.force[i]    + k4.force[i];
        p.set_state(x0 + dv * sixth, v0 + df * (sixth / p.mass()));
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
