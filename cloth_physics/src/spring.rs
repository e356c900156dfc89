//! Damped springs between two particles.

use glam::Vec3;

use crate::particle::{Particle, ParticleId};

/// A damped elastic link that pulls two particles toward `rest_length`.
///
/// Springs are immutable once created; the system only reads them when it
/// accumulates forces.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring {
    a:           ParticleId,
    b:           ParticleId,
    strength:    f32,
    damping:     f32,
    rest_length: f32,
}

impl Spring {
    pub fn new(a: ParticleId, b: ParticleId, strength: f32, damping: f32, rest_length: f32) -> Self {
        Spring { a, b, strength, damping, rest_length }
    }

    pub fn strength(&self) -> f32 { self.strength }
    pub fn damping(&self) -> f32 { self.damping }
    pub fn rest_length(&self) -> f32 { self.rest_length }

    /// True if `id` is either end of this spring.
    pub fn connects(&self, id: ParticleId) -> bool {
        self.a == id || self.b == id
    }

    /// Current length of the spring for the given particle slice.
    pub fn current_length(&self, particles: &[Particle]) -> f32 {
        let a = &particles[self.a.0];
        let b = &particles[self.b.0];
        a.position().distance(b.position())
    }

    /// Force the spring exerts on end `a`; end `b` receives the negation.
    ///
    /// Coincident ends have no defined axis and produce no force.
    pub fn force_on_a(&self, particles: &[Particle]) -> Vec3 {
        let a = &particles[self.a.0];
        let b = &particles[self.b.0];

        let a2b = a.position() - b.position();
        let distance = a2b.length();
        if distance <= f32::EPSILON {
            return Vec3::ZERO;
        }
        let dir = a2b / distance;

        let spring_force  = -(distance - self.rest_length) * self.strength;
        let relative_vel  = a.velocity() - b.velocity();
        let damping_force = -self.damping * dir.dot(relative_vel);

        dir * (spring_force + damping_force)
    }

    /// Accumulate this spring's force onto its free ends.
    pub(crate) fn apply(&self, particles: &mut [Particle]) {
        let f = self.force_on_a(particles);
        if f == Vec3::ZERO { return; }
        if particles[self.a.0].is_free() { particles[self.a.0].add_force(f);  }
        if particles[self.b.0].is_free() { particles[self.b.0].add_force(-f); }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(dx: f32) -> Vec<Particle> {
        vec![
            Particle::new(1.0, Vec3::ZERO),
            Particle::new(1.0, Vec3::new(dx, 0.0, 0.0)),
        ]
    }

    #[test]
    fn at_rest_length_no_force() {
        let ps = pair(10.0);
        let s = Spring::new(ParticleId(0), ParticleId(1), 8.0, 0.5, 10.0);
        assert_eq!(s.force_on_a(&ps), Vec3::ZERO);
    }

    #[test]
    fn stretched_spring_pulls_ends_together() {
        let ps = pair(12.0);
        let s = Spring::new(ParticleId(0), ParticleId(1), 8.0, 0.0, 10.0);
        let f = s.force_on_a(&ps);
        // a sits at x=0, b at x=12: a is pulled toward +x with 2 * 8 = 16.
        assert!((f.x - 16.0).abs() < 1e-5);
        assert_eq!(f.y, 0.0);
    }

    #[test]
    fn compressed_spring_pushes_ends_apart() {
        let ps = pair(5.0);
        let s = Spring::new(ParticleId(0), ParticleId(1), 2.0, 0.0, 10.0);
        assert!(s.force_on_a(&ps).x < 0.0);
    }

    #[test]
    fn damping_opposes_separation_speed() {
        let mut ps = pair(10.0);
        ps[1].set_velocity(Vec3::new(4.0, 0.0, 0.0));
        let s = Spring::new(ParticleId(0), ParticleId(1), 8.0, 0.5, 10.0);
        // b moving away from a: damping pulls a toward b (+x).
        assert!((s.force_on_a(&ps).x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn coincident_ends_are_inert() {
        let ps = pair(0.0);
        let s = Spring::new(ParticleId(0), ParticleId(1), 8.0, 0.5, 10.0);
        assert_eq!(s.force_on_a(&ps), Vec3::ZERO);
    }

    #[test]
    fn fixed_end_receives_nothing() {
        let mut ps = pair(12.0);
        ps[0].make_fixed();
        let s = Spring::new(ParticleId(0), ParticleId(1), 8.0, 0.0, 10.0);
        s.apply(&mut ps);
        assert_eq!(ps[0].force(), Vec3::ZERO);
        assert!(ps[1].force().x < 0.0);
    }
}
