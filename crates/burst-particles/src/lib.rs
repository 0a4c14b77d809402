//! Burst Particles - pooled burst effects
//!
//! Small meshes that fly outward from a point, spin and shrink, then go
//! back to an idle pool for the next burst:
//! - `ParticleConfig`: every tunable of the burst, loadable from TOML
//! - `Particle`: one pooled mesh node and its explode animation
//! - `ParticlePool`: idle particles, borrowed from the back and returned
//!   to the front
//! - `ParticleEffects`: the spawner: holder node, pool, active set
//! - `ParticleSystem`: `RuntimeSystem` that owns a `Tweener` and drives
//!   the effects once per frame

pub mod config;
pub mod effects;
pub mod particle;
pub mod pool;
pub mod system;

pub use config::{ParticleConfig, ParticleStyle};
pub use effects::{spawn_count, BurstRequest, ParticleEffects};
pub use particle::{Explosion, Particle};
pub use pool::ParticlePool;
pub use system::{ParticleStats, ParticleSystem};
