//! A single pooled particle and its explode animation

use crate::config::{ParticleConfig, ParticleStyle};
use burst_core::{BurstError, Color, NodeId, Result, Vec3};
use burst_scene::SceneGraph;
use burst_tween::{Animate, TweenId, TweenProperty, TweenRequest};
use rand::Rng;
use std::f32::consts::TAU;

/// Handle to one particle mesh node.
///
/// Deliberately neither `Clone` nor `Copy`: a particle is owned either by
/// the idle pool or by the active set, never both, so it can never be
/// pooled twice.
#[derive(Debug, PartialEq, Eq)]
pub struct Particle {
    node: NodeId,
}

/// Tweens started by one explode. The particle is finished when the
/// `position` tween completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Explosion {
    pub rotation: TweenId,
    pub scale: TweenId,
    pub position: TweenId,
}

impl Explosion {
    pub fn ids(&self) -> [TweenId; 3] {
        [self.rotation, self.scale, self.position]
    }
}

impl Particle {
    /// Spawn a new, unattached particle node
    pub fn new(scene: &mut SceneGraph, style: &ParticleStyle) -> Self {
        let node = scene.spawn_mesh("particle", style.mesh());
        Self { node }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Recolor and rescale the particle, place it at a random point around
    /// `position` (in its parent's space), and schedule the burst tweens.
    #[allow(clippy::too_many_arguments)]
    pub fn explode<A, R>(
        &self,
        scene: &mut SceneGraph,
        animator: &mut A,
        rng: &mut R,
        config: &ParticleConfig,
        position: Vec3,
        color: Color,
        scale: f32,
    ) -> Result<Explosion>
    where
        A: Animate + ?Sized,
        R: Rng,
    {
        if let Some(mut mesh) = scene.mesh_mut(self.node) {
            mesh.material.set_color(color);
        }

        let radius = uniform(rng, 0.0, config.spawn_radius);
        let angle = uniform(rng, 0.0, TAU);
        let start = Vec3::new(
            position.x + angle.cos() * radius,
            position.y,
            position.z + angle.sin() * radius,
        );

        {
            let mut transform = scene
                .transform_mut(self.node)
                .ok_or(BurstError::NodeNotFound(self.node))?;
            transform.scale = Vec3::splat(scale);
            transform.position = start;
        }

        let target_radius = radius + config.spread_increment;
        let target_angle = angle + (uniform(rng, 0.0, 1.0) - 0.5) * config.angle_jitter;
        let duration = uniform(rng, config.duration_min, config.duration_max);

        let spin = Vec3::new(
            uniform(rng, 0.0, config.rotation_max),
            uniform(rng, 0.0, config.rotation_max),
            uniform(rng, 0.0, config.rotation_max),
        );
        let rotation = animator.animate(
            TweenRequest::new(self.node, TweenProperty::Rotation, spin, duration).with_ease(config.ease),
        );

        let shrink = animator.animate(
            TweenRequest::new(
                self.node,
                TweenProperty::Scale,
                Vec3::splat(config.end_scale),
                duration,
            )
            .with_ease(config.ease),
        );

        let target = Vec3::new(
            position.x + target_angle.cos() * target_radius,
            position.y + (uniform(rng, 0.0, 1.0) - 0.5) * config.height_jitter,
            position.z + target_angle.sin() * target_radius,
        );
        let travel = animator.animate(
            TweenRequest::new(self.node, TweenProperty::Position, target, duration)
                .with_delay(uniform(rng, 0.0, config.max_delay))
                .with_ease(config.position_ease),
        );

        Ok(Explosion {
            rotation,
            scale: shrink,
            position: travel,
        })
    }

    /// Detach from the current parent and restore unit scale, ready for
    /// the idle pool
    pub fn retire(&self, scene: &mut SceneGraph) -> Result<()> {
        scene.detach(self.node);
        let mut transform = scene
            .transform_mut(self.node)
            .ok_or(BurstError::NodeNotFound(self.node))?;
        transform.scale = Vec3::ONE;
        Ok(())
    }
}

/// Uniform sample in [min, max); returns `min` for an empty range
fn uniform<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        min + rng.random::<f32>() * (max - min)
    } else {
        min
    }
}
