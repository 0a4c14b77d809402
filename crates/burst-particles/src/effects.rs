//! Particle spawner: holder node, idle pool, and active set

use crate::config::ParticleConfig;
use crate::particle::{Explosion, Particle};
use crate::pool::ParticlePool;
use burst_core::{Color, NodeId, Result, Vec3};
use burst_runtime::GameEvent;
use burst_scene::SceneGraph;
use burst_tween::{Animate, TweenComplete, TweenId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameters of one burst
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurstRequest {
    /// World-space burst point
    pub position: Vec3,
    /// Particle count; floored, negatives spawn nothing
    pub density: f32,
    pub color: Color,
    pub scale: f32,
}

impl From<&GameEvent> for BurstRequest {
    fn from(event: &GameEvent) -> Self {
        match *event {
            GameEvent::Burst {
                position,
                density,
                color,
                scale,
            } => Self {
                position,
                density,
                color,
                scale,
            },
        }
    }
}

/// Number of particles a density spawns: `floor(density)`, with negative
/// and non-finite densities spawning none.
pub fn spawn_count(density: f32) -> usize {
    if !density.is_finite() || density <= 0.0 {
        0
    } else {
        density.floor() as usize
    }
}

/// A particle that is currently animating
#[derive(Debug)]
struct ActiveParticle {
    particle: Particle,
    explosion: Explosion,
}

/// Spawns pooled particles under a shared holder node.
///
/// Spawning is best effort and never fails the caller: a missing holder
/// or a broken particle is logged and skipped.
pub struct ParticleEffects {
    config: ParticleConfig,
    pool: ParticlePool,
    /// Keyed by the travel tween, whose completion retires the particle
    active: HashMap<TweenId, ActiveParticle>,
    holder: Option<NodeId>,
    constructed: usize,
    rng: StdRng,
}

impl ParticleEffects {
    /// Effects with an OS-seeded random source
    pub fn new(config: ParticleConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Effects with a reproducible random source
    pub fn with_seed(config: ParticleConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: ParticleConfig, rng: StdRng) -> Self {
        Self {
            config,
            pool: ParticlePool::new(),
            active: HashMap::new(),
            holder: None,
            constructed: 0,
            rng,
        }
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn holder(&self) -> Option<NodeId> {
        self.holder
    }

    /// Set the node particles attach to. Until one is set, spawning is a
    /// logged no-op.
    pub fn set_holder(&mut self, holder: Option<NodeId>) {
        self.holder = holder;
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn idle_count(&self) -> usize {
        self.pool.len()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Particles constructed since creation or the last `clear`
    pub fn constructed_count(&self) -> usize {
        self.constructed
    }

    /// Node ids of the particles currently animating
    pub fn active_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.active.values().map(|a| a.particle.node())
    }

    /// Spawn the particles of one queued request
    pub fn spawn<A>(&mut self, scene: &mut SceneGraph, animator: &mut A, request: &BurstRequest)
    where
        A: Animate + ?Sized,
    {
        self.spawn_particles(
            scene,
            animator,
            request.position,
            request.density,
            request.color,
            request.scale,
        );
    }

    /// Spawn `floor(density)` particles bursting from the world-space
    /// `position`, reusing idle particles before constructing new ones.
    pub fn spawn_particles<A>(
        &mut self,
        scene: &mut SceneGraph,
        animator: &mut A,
        position: Vec3,
        density: f32,
        color: Color,
        scale: f32,
    ) where
        A: Animate + ?Sized,
    {
        let Some(holder) = self.holder.filter(|h| scene.contains(*h)) else {
            log::warn!("particle holder not initialized; dropping burst at {position:?}");
            return;
        };

        let Some(local) = scene.world_to_local(holder, position) else {
            log::warn!("particle holder {holder} has a degenerate transform; dropping burst");
            return;
        };

        self.forget_stale(scene, animator);

        let count = spawn_count(density);
        for _ in 0..count {
            let particle = self.acquire(scene);
            match self.launch(scene, animator, holder, &particle, local, color, scale) {
                Ok(explosion) => {
                    self.active.insert(
                        explosion.position,
                        ActiveParticle {
                            particle,
                            explosion,
                        },
                    );
                }
                Err(err) => {
                    log::warn!("failed to launch particle {}: {err}", particle.node());
                    if particle.retire(scene).is_ok() {
                        self.pool.release(particle);
                    }
                }
            }
        }
        log::trace!(
            "burst of {count} at {position:?}: {} active, {} idle",
            self.active.len(),
            self.pool.len()
        );
    }

    /// Handle a tween completion. Returns true if it finished one of this
    /// spawner's particles, which is then detached and pooled.
    pub fn on_tween_complete<A>(
        &mut self,
        scene: &mut SceneGraph,
        animator: &mut A,
        event: &TweenComplete,
    ) -> bool
    where
        A: Animate + ?Sized,
    {
        let Some(ActiveParticle {
            particle,
            explosion,
        }) = self.active.remove(&event.id)
        else {
            return false;
        };

        // Rotation and scale normally finish first; make sure neither can
        // write into the particle once it is pooled.
        animator.cancel(explosion.rotation);
        animator.cancel(explosion.scale);

        match particle.retire(scene) {
            Ok(()) => self.pool.release(particle),
            Err(err) => log::debug!("discarding particle {}: {err}", particle.node()),
        }
        true
    }

    /// Forget active particles whose node was despawned behind our back.
    /// Their travel tween is dropped without a completion, so nothing else
    /// would ever remove them. Returns how many were forgotten.
    pub fn forget_stale<A>(&mut self, scene: &SceneGraph, animator: &mut A) -> usize
    where
        A: Animate + ?Sized,
    {
        let stale: Vec<TweenId> = self
            .active
            .iter()
            .filter(|(_, a)| !scene.contains(a.particle.node()))
            .map(|(id, _)| *id)
            .collect();
        for id in &stale {
            if let Some(active) = self.active.remove(id) {
                for tween in active.explosion.ids() {
                    animator.cancel(tween);
                }
                log::debug!("forgetting despawned particle {}", active.particle.node());
            }
        }
        stale.len()
    }

    /// Tear down: cancel active animations and despawn every particle
    pub fn clear<A>(&mut self, scene: &mut SceneGraph, animator: &mut A)
    where
        A: Animate + ?Sized,
    {
        for (_, active) in self.active.drain() {
            for id in active.explosion.ids() {
                animator.cancel(id);
            }
            let _ = scene.despawn(active.particle.node());
        }
        for particle in self.pool.drain() {
            let _ = scene.despawn(particle.node());
        }
        self.constructed = 0;
    }

    /// Pop idle particles until one still exists in the scene, else build one
    fn acquire(&mut self, scene: &mut SceneGraph) -> Particle {
        while let Some(particle) = self.pool.take() {
            if scene.contains(particle.node()) {
                return particle;
            }
            log::debug!("dropping stale pooled particle {}", particle.node());
        }
        self.constructed += 1;
        Particle::new(scene, &self.config.style)
    }

    #[allow(clippy::too_many_arguments)]
    fn launch<A>(
        &mut self,
        scene: &mut SceneGraph,
        animator: &mut A,
        holder: NodeId,
        particle: &Particle,
        local: Vec3,
        color: Color,
        scale: f32,
    ) -> Result<Explosion>
    where
        A: Animate + ?Sized,
    {
        scene.add_child(holder, particle.node())?;
        scene.set_visible(particle.node(), true)?;
        particle.explode(scene, animator, &mut self.rng, &self.config, local, color, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burst_core::Transform;
    use burst_tween::Tweener;
    use std::collections::HashSet;

    fn setup() -> (SceneGraph, NodeId, ParticleEffects, Tweener) {
        let mut scene = SceneGraph::new();
        let holder = scene.spawn("particles");
        let mut effects = ParticleEffects::with_seed(ParticleConfig::default(), 42);
        effects.set_holder(Some(holder));
        (scene, holder, effects, Tweener::new())
    }

    /// Advance long enough for every particle to finish, routing completions
    fn settle(scene: &mut SceneGraph, effects: &mut ParticleEffects, tweener: &mut Tweener) {
        for _ in 0..60 {
            for event in tweener.advance(scene, 1.0 / 60.0) {
                effects.on_tween_complete(scene, tweener, &event);
            }
        }
    }

    #[test]
    fn spawn_count_floors_and_clamps() {
        assert_eq!(spawn_count(5.7), 5);
        assert_eq!(spawn_count(3.0), 3);
        assert_eq!(spawn_count(0.0), 0);
        assert_eq!(spawn_count(0.99), 0);
        assert_eq!(spawn_count(-4.0), 0);
        assert_eq!(spawn_count(f32::NAN), 0);
        assert_eq!(spawn_count(f32::INFINITY), 0);
    }

    #[test]
    fn fractional_density_spawns_floor_and_all_return() {
        let (mut scene, holder, mut effects, mut tweener) = setup();

        effects.spawn_particles(&mut scene, &mut tweener, Vec3::ZERO, 5.7, Color::RED, 1.0);

        assert_eq!(effects.constructed_count(), 5);
        assert_eq!(effects.active_count(), 5);
        assert_eq!(scene.child_count(holder), 5);
        assert_eq!(tweener.active_count(), 15);
        for node in effects.active_nodes() {
            assert!(scene.is_visible(node));
            assert_eq!(scene.mesh(node).unwrap().material.color, Color::RED);
        }

        settle(&mut scene, &mut effects, &mut tweener);

        assert_eq!(effects.active_count(), 0);
        assert_eq!(effects.idle_count(), 5);
        assert_eq!(scene.child_count(holder), 0);
        assert_eq!(tweener.active_count(), 0);
        for particle in effects.pool().iter() {
            assert_eq!(scene.parent(particle.node()), None);
            assert_eq!(scene.transform(particle.node()).unwrap().scale, Vec3::ONE);
        }
    }

    #[test]
    fn back_to_back_bursts_construct_distinct_particles() {
        let (mut scene, holder, mut effects, mut tweener) = setup();

        effects.spawn_particles(&mut scene, &mut tweener, Vec3::ZERO, 3.0, Color::BLUE, 2.0);
        effects.spawn_particles(&mut scene, &mut tweener, Vec3::ZERO, 3.0, Color::BLUE, 2.0);

        assert_eq!(effects.active_count(), 6);
        assert_eq!(effects.constructed_count(), 6);
        assert_eq!(effects.idle_count(), 0);
        assert_eq!(scene.child_count(holder), 6);
        let distinct: HashSet<NodeId> = effects.active_nodes().collect();
        assert_eq!(distinct.len(), 6);
    }

    #[test]
    fn idle_particles_are_reused_before_constructing() {
        let (mut scene, _, mut effects, mut tweener) = setup();

        effects.spawn_particles(&mut scene, &mut tweener, Vec3::ZERO, 4.0, Color::RED, 1.0);
        settle(&mut scene, &mut effects, &mut tweener);
        assert_eq!(effects.idle_count(), 4);

        effects.spawn_particles(&mut scene, &mut tweener, Vec3::ZERO, 3.0, Color::GREEN, 1.0);
        assert_eq!(effects.idle_count(), 1);
        assert_eq!(effects.constructed_count(), 4);

        effects.spawn_particles(&mut scene, &mut tweener, Vec3::ZERO, 3.0, Color::GREEN, 1.0);
        assert_eq!(effects.idle_count(), 0);
        assert_eq!(effects.constructed_count(), 6);
        assert_eq!(effects.active_count(), 6);
    }

    #[test]
    fn pooled_particles_appear_once() {
        let (mut scene, _, mut effects, mut tweener) = setup();
        for _ in 0..3 {
            effects.spawn_particles(&mut scene, &mut tweener, Vec3::ZERO, 4.0, Color::RED, 1.0);
            settle(&mut scene, &mut effects, &mut tweener);
        }

        let nodes: Vec<NodeId> = effects.pool().iter().map(Particle::node).collect();
        let distinct: HashSet<NodeId> = nodes.iter().copied().collect();
        assert_eq!(nodes.len(), 4);
        assert_eq!(distinct.len(), 4);
    }

    #[test]
    fn missing_holder_is_a_silent_no_op() {
        let mut scene = SceneGraph::new();
        let mut effects = ParticleEffects::with_seed(ParticleConfig::default(), 1);
        let mut tweener = Tweener::new();

        effects.spawn_particles(&mut scene, &mut tweener, Vec3::ZERO, 10.0, Color::RED, 1.0);

        assert_eq!(effects.active_count(), 0);
        assert_eq!(effects.constructed_count(), 0);
        assert_eq!(scene.node_count(), 0);
        assert_eq!(tweener.active_count(), 0);
    }

    #[test]
    fn despawned_holder_is_treated_as_missing() {
        let (mut scene, holder, mut effects, mut tweener) = setup();
        scene.despawn(holder).unwrap();

        effects.spawn_particles(&mut scene, &mut tweener, Vec3::ZERO, 3.0, Color::RED, 1.0);
        assert_eq!(effects.active_count(), 0);
        assert_eq!(scene.node_count(), 0);
    }

    #[test]
    fn zero_negative_and_fractional_densities_spawn_nothing() {
        let (mut scene, holder, mut effects, mut tweener) = setup();
        for density in [0.0, 0.5, -3.0] {
            effects.spawn_particles(&mut scene, &mut tweener, Vec3::ZERO, density, Color::RED, 1.0);
        }
        assert_eq!(effects.active_count(), 0);
        assert_eq!(scene.child_count(holder), 0);
    }

    #[test]
    fn burst_point_is_converted_into_holder_space() {
        let mut scene = SceneGraph::new();
        let stage = scene.spawn("stage");
        let holder = scene.spawn("particles");
        scene.add_child(stage, holder).unwrap();
        scene
            .set_transform(stage, Transform::from_position(Vec3::new(100.0, 0.0, 0.0)))
            .unwrap();
        scene
            .set_transform(holder, Transform::default().with_scale(Vec3::splat(2.0)))
            .unwrap();

        let mut config = ParticleConfig::default();
        config.spawn_radius = 0.0;
        let mut effects = ParticleEffects::with_seed(config, 3);
        effects.set_holder(Some(holder));
        let mut tweener = Tweener::new();

        let world = Vec3::new(104.0, 6.0, -2.0);
        effects.spawn_particles(&mut scene, &mut tweener, world, 1.0, Color::RED, 1.0);

        let node = effects.active_nodes().next().unwrap();
        let local = scene.transform(node).unwrap().position;
        assert!(local.abs_diff_eq(&Vec3::new(2.0, 3.0, -1.0), 1e-4));
        let back = scene.world_position(node).unwrap();
        assert!(back.abs_diff_eq(&world, 1e-4));
    }

    #[test]
    fn unrelated_completions_are_ignored() {
        let (mut scene, _, mut effects, mut tweener) = setup();
        let other = scene.spawn("other");
        let event = TweenComplete {
            id: TweenId(9999),
            node: other,
            property: burst_tween::TweenProperty::Position,
        };
        assert!(!effects.on_tween_complete(&mut scene, &mut tweener, &event));
    }

    #[test]
    fn stale_pooled_particles_are_replaced() {
        let (mut scene, _, mut effects, mut tweener) = setup();
        effects.spawn_particles(&mut scene, &mut tweener, Vec3::ZERO, 2.0, Color::RED, 1.0);
        settle(&mut scene, &mut effects, &mut tweener);

        let stale: Vec<NodeId> = effects.pool().iter().map(Particle::node).collect();
        for node in &stale {
            scene.despawn(*node).unwrap();
        }

        effects.spawn_particles(&mut scene, &mut tweener, Vec3::ZERO, 2.0, Color::RED, 1.0);
        assert_eq!(effects.active_count(), 2);
        assert_eq!(effects.constructed_count(), 4);
        assert_eq!(effects.idle_count(), 0);
    }

    #[test]
    fn despawned_active_particles_are_forgotten() {
        let (mut scene, _, mut effects, mut tweener) = setup();
        effects.spawn_particles(&mut scene, &mut tweener, Vec3::ZERO, 3.0, Color::RED, 1.0);
        let gone = effects.active_nodes().next().unwrap();
        scene.despawn(gone).unwrap();

        for _ in 0..600 {
            for event in tweener.advance(&mut scene, 1.0 / 60.0) {
                effects.on_tween_complete(&mut scene, &mut tweener, &event);
            }
        }
        assert_eq!(effects.active_count(), 1);

        assert_eq!(effects.forget_stale(&scene, &mut tweener), 1);
        assert_eq!(effects.active_count(), 0);
        assert_eq!(effects.idle_count(), 2);
        assert!(!effects.pool().contains(gone));
        assert_eq!(tweener.active_count(), 0);
    }

    #[test]
    fn spawning_sweeps_despawned_active_particles() {
        let (mut scene, _, mut effects, mut tweener) = setup();
        effects.spawn_particles(&mut scene, &mut tweener, Vec3::ZERO, 2.0, Color::RED, 1.0);
        let gone = effects.active_nodes().next().unwrap();
        scene.despawn(gone).unwrap();

        effects.spawn_particles(&mut scene, &mut tweener, Vec3::ZERO, 2.0, Color::RED, 1.0);

        assert_eq!(effects.active_count(), 3);
        assert!(effects.active_nodes().all(|node| scene.contains(node)));
        // Rotation and scale of the despawned particle are cancelled too
        assert_eq!(tweener.active_count(), 9);
    }

    #[test]
    fn degenerate_holder_drops_the_burst() {
        let (mut scene, holder, mut effects, mut tweener) = setup();
        scene
            .set_transform(holder, Transform::default().with_scale(Vec3::ZERO))
            .unwrap();

        effects.spawn_particles(&mut scene, &mut tweener, Vec3::new(1.0, 2.0, 3.0), 4.0, Color::RED, 1.0);

        assert_eq!(effects.active_count(), 0);
        assert_eq!(effects.constructed_count(), 0);
        assert_eq!(scene.child_count(holder), 0);
        assert_eq!(tweener.active_count(), 0);
    }

    #[test]
    fn clear_despawns_everything() {
        let (mut scene, holder, mut effects, mut tweener) = setup();
        effects.spawn_particles(&mut scene, &mut tweener, Vec3::ZERO, 3.0, Color::RED, 1.0);
        settle(&mut scene, &mut effects, &mut tweener);
        effects.spawn_particles(&mut scene, &mut tweener, Vec3::ZERO, 5.0, Color::RED, 1.0);

        effects.clear(&mut scene, &mut tweener);

        assert_eq!(effects.active_count(), 0);
        assert_eq!(effects.idle_count(), 0);
        assert_eq!(tweener.active_count(), 0);
        assert_eq!(scene.node_count(), 1);
        assert!(scene.contains(holder));
    }

    #[test]
    fn request_from_game_event() {
        let event = GameEvent::Burst {
            position: Vec3::UP,
            density: 2.5,
            color: Color::GREEN,
            scale: 0.5,
        };
        let request = BurstRequest::from(&event);
        assert_eq!(request.position, Vec3::UP);
        assert_eq!(request.density, 2.5);
        assert_eq!(request.color, Color::GREEN);
    }
}
