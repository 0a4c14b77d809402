//! Per-frame tween scheduler

use crate::ease::Ease;
use crate::tween::{Animate, TweenComplete, TweenId, TweenProperty, TweenRequest};
use burst_core::{NodeId, Vec3};
use burst_scene::SceneGraph;

/// Playback state for one scheduled tween
#[derive(Debug, Clone)]
struct ActiveTween {
    id: TweenId,
    node: NodeId,
    property: TweenProperty,
    /// Captured when the delay has elapsed
    from: Option<Vec3>,
    to: Vec3,
    duration: f32,
    delay: f32,
    ease: Ease,
    elapsed: f32,
}

/// Drives every scheduled tween from the game loop.
///
/// Tweens are advanced in scheduling order and write straight into the
/// scene's local transforms.
pub struct Tweener {
    tweens: Vec<ActiveTween>,
    next_id: u64,
}

impl Tweener {
    pub fn new() -> Self {
        Self {
            tweens: Vec::new(),
            next_id: 1,
        }
    }

    /// Number of scheduled tweens (delayed ones included)
    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_active(&self, id: TweenId) -> bool {
        self.tweens.iter().any(|t| t.id == id)
    }

    /// Cancel every tween driving `node`. Returns how many were removed.
    pub fn cancel_node(&mut self, node: NodeId) -> usize {
        let before = self.tweens.len();
        self.tweens.retain(|t| t.node != node);
        before - self.tweens.len()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }

    /// Advance all tweens by `dt` seconds and return the ones that finished.
    ///
    /// A finished tween leaves its property exactly at the target. Tweens
    /// whose node no longer exists are dropped without a completion.
    pub fn advance(&mut self, scene: &mut SceneGraph, dt: f32) -> Vec<TweenComplete> {
        let mut completed = Vec::new();
        let dt = dt.max(0.0);

        self.tweens.retain_mut(|tween| {
            tween.elapsed += dt;
            if tween.elapsed < tween.delay {
                return true;
            }

            let from = match tween.from {
                Some(from) => from,
                None => match read_property(scene, tween.node, tween.property) {
                    Some(current) => {
                        tween.from = Some(current);
                        current
                    }
                    None => {
                        log::debug!("dropping {}: node {} is gone", tween.id, tween.node);
                        return false;
                    }
                },
            };

            let progress = if tween.duration <= 0.0 {
                1.0
            } else {
                ((tween.elapsed - tween.delay) / tween.duration).min(1.0)
            };
            let value = if progress >= 1.0 {
                tween.to
            } else {
                from.lerp(tween.to, tween.ease.apply(progress))
            };

            if !write_property(scene, tween.node, tween.property, value) {
                log::debug!("dropping {}: node {} is gone", tween.id, tween.node);
                return false;
            }

            if progress >= 1.0 {
                completed.push(TweenComplete {
                    id: tween.id,
                    node: tween.node,
                    property: tween.property,
                });
                return false;
            }
            true
        });

        completed
    }
}

impl Default for Tweener {
    fn default() -> Self {
        Self::new()
    }
}

impl Animate for Tweener {
    fn animate(&mut self, request: TweenRequest) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;

        self.tweens
            .retain(|t| !(t.node == request.node && t.property == request.property));
        self.tweens.push(ActiveTween {
            id,
            node: request.node,
            property: request.property,
            from: None,
            to: request.to,
            duration: request.duration,
            delay: request.delay.max(0.0),
            ease: request.ease,
            elapsed: 0.0,
        });
        id
    }

    fn cancel(&mut self, id: TweenId) -> bool {
        let before = self.tweens.len();
        self.tweens.retain(|t| t.id != id);
        before != self.tweens.len()
    }
}

fn read_property(scene: &SceneGraph, node: NodeId, property: TweenProperty) -> Option<Vec3> {
    let transform = scene.transform(node)?;
    Some(match property {
        TweenProperty::Position => transform.position,
        TweenProperty::Rotation => transform.rotation,
        TweenProperty::Scale => transform.scale,
    })
}

fn write_property(scene: &mut SceneGraph, node: NodeId, property: TweenProperty, value: Vec3) -> bool {
    let Some(mut transform) = scene.transform_mut(node) else {
        return false;
    };
    match property {
        TweenProperty::Position => transform.position = value,
        TweenProperty::Rotation => transform.rotation = value,
        TweenProperty::Scale => transform.scale = value,
    }
    true
}
