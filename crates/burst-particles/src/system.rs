//! Runtime system driving particle bursts from the game loop

use crate::config::ParticleConfig;
use crate::effects::{BurstRequest, ParticleEffects};
use burst_core::{BurstError, NodeId, Result};
use burst_runtime::{EventBus, RuntimeSystem};
use burst_scene::SceneGraph;
use burst_tween::Tweener;
use serde::Serialize;

/// Snapshot of pool and animation counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParticleStats {
    pub idle: usize,
    pub active: usize,
    pub constructed: usize,
    pub tweens: usize,
}

/// Owns the particle effects and their tween scheduler.
///
/// Each frame it spawns the bursts raised on the event bus (and any queued
/// directly), advances the tweens, and returns finished particles to the
/// pool.
pub struct ParticleSystem {
    pub effects: ParticleEffects,
    pub tweener: Tweener,
    pending: Vec<BurstRequest>,
    /// Node the holder is created under; scene root when unset
    parent: Option<NodeId>,
    /// Whether `initialize` created the holder
    owns_holder: bool,
}

impl ParticleSystem {
    pub fn new(config: ParticleConfig) -> Self {
        Self::from_effects(ParticleEffects::new(config))
    }

    /// System with a reproducible random source
    pub fn with_seed(config: ParticleConfig, seed: u64) -> Self {
        Self::from_effects(ParticleEffects::with_seed(config, seed))
    }

    fn from_effects(effects: ParticleEffects) -> Self {
        Self {
            effects,
            tweener: Tweener::new(),
            pending: Vec::new(),
            parent: None,
            owns_holder: false,
        }
    }

    /// Create the holder under `parent` instead of at the scene root
    pub fn under(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Spawn a burst on the next update, without going through the bus
    pub fn queue_burst(&mut self, request: BurstRequest) {
        self.pending.push(request);
    }

    pub fn stats(&self) -> ParticleStats {
        ParticleStats {
            idle: self.effects.idle_count(),
            active: self.effects.active_count(),
            constructed: self.effects.constructed_count(),
            tweens: self.tweener.active_count(),
        }
    }
}

impl RuntimeSystem for ParticleSystem {
    fn initialize(&mut self, scene: &mut SceneGraph) -> Result<()> {
        if self.effects.holder().is_some_and(|h| scene.contains(h)) {
            return Ok(());
        }
        if let Some(parent) = self.parent.filter(|p| !scene.contains(*p)) {
            return Err(BurstError::NodeNotFound(parent));
        }
        let holder = scene.spawn("particles");
        if let Some(parent) = self.parent {
            scene.add_child(parent, holder)?;
        }
        self.effects.set_holder(Some(holder));
        self.owns_holder = true;
        log::debug!("particle holder {holder} created");
        Ok(())
    }

    fn update(&mut self, scene: &mut SceneGraph, events: &EventBus, dt: f64) -> Result<()> {
        let requests: Vec<BurstRequest> = events
            .iter()
            .map(BurstRequest::from)
            .chain(self.pending.drain(..))
            .collect();
        for request in &requests {
            self.effects.spawn(scene, &mut self.tweener, request);
        }

        for event in self.tweener.advance(scene, dt as f32) {
            self.effects.on_tween_complete(scene, &mut self.tweener, &event);
        }
        self.effects.forget_stale(scene, &mut self.tweener);
        Ok(())
    }

    fn shutdown(&mut self, scene: &mut SceneGraph) -> Result<()> {
        self.effects.clear(scene, &mut self.tweener);
        self.tweener.clear();
        self.pending.clear();
        if self.owns_holder {
            if let Some(holder) = self.effects.holder() {
                if scene.contains(holder) {
                    scene.despawn(holder)?;
                }
            }
            self.effects.set_holder(None);
            self.owns_holder = false;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "particles"
    }
}
