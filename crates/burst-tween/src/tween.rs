//! Tween request and completion types

use crate::ease::Ease;
use burst_core::{NodeId, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle for a scheduled tween
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TweenId(pub u64);

impl fmt::Display for TweenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tween#{}", self.0)
    }
}

/// Which transform property a tween drives
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TweenProperty {
    Position,
    /// Euler angles in radians
    Rotation,
    Scale,
}

/// A request to move one property of a node toward `to`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenRequest {
    pub node: NodeId,
    pub property: TweenProperty,
    pub to: Vec3,
    /// Seconds
    pub duration: f32,
    /// Seconds to wait before the tween starts
    pub delay: f32,
    pub ease: Ease,
}

impl TweenRequest {
    pub fn new(node: NodeId, property: TweenProperty, to: Vec3, duration: f32) -> Self {
        Self {
            node,
            property,
            to,
            duration,
            delay: 0.0,
            ease: Ease::default(),
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Emitted once when a tween reaches its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweenComplete {
    pub id: TweenId,
    pub node: NodeId,
    pub property: TweenProperty,
}

/// Anything that can schedule tweens.
///
/// Completion is reported out of band (see `Tweener::advance`), keyed by the
/// returned `TweenId`.
pub trait Animate {
    /// Schedule a tween. Any tween already driving the same node and
    /// property is cancelled.
    fn animate(&mut self, request: TweenRequest) -> TweenId;

    /// Cancel a tween without emitting a completion. Returns false if the
    /// id is unknown or already finished.
    fn cancel(&mut self, id: TweenId) -> bool;
}
