//! # cloth_physics
//!
//! A small mass-spring particle system: point masses joined by damped
//! springs, pulled by uniform gravity and slowed by linear drag.
//!
//! Particles are addressed by [`ParticleId`] handles returned from
//! [`ParticleSystem::make_particle`]; the system owns every particle and
//! spring, so callers never hold references into it across a step.
//!
//! ## Quick start
//!
//! ```rust
//! use cloth_physics::{ParticleSystem, Integrator};
//! use glam::Vec3;
//!
//! let mut ps = ParticleSystem::new(0.0, 0.05);
//! ps.set_integrator(Integrator::RungeKutta);
//!
//! let a = ps.make_particle(0.2, Vec3::new(0.0, 0.0, 0.0));
//! let b = ps.make_particle(0.2, Vec3::new(12.0, 0.0, 0.0));
//! ps.make_spring(a, b, 8.0, 0.5, 10.0);
//! ps.particle_mut(a).make_fixed();
//!
//! for _ in 0..50 { ps.advance_time(0.1); }
//! assert_eq!(ps.particle(a).position(), Vec3::ZERO);
//! ```
//!
//! ## Force model
//!
//! | Source | Force on particle |
//! |---|---|
//! | Gravity | `(0, g, 0) * mass` |
//! | Drag | `-drag * velocity` |
//! | Spring | Hooke's law on the stretch plus damping on the relative velocity, both along the spring axis |
//!
//! Fixed particles receive no forces and are never integrated; they keep
//! whatever position was last assigned to them.

pub mod particle;
pub mod spring;
pub mod integrator;
pub mod system;

pub use glam::Vec3;
pub use particle::{Particle, ParticleId};
pub use spring::Spring;
pub use integrator::Integrator;
pub use system::ParticleSystem;
