//! Game events consumed by runtime systems

use burst_core::{Color, Vec3};
use serde::{Deserialize, Serialize};

/// Requests raised by gameplay code during a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Spawn `floor(density)` particles at a world position
    Burst {
        position: Vec3,
        density: f32,
        color: Color,
        scale: f32,
    },
}
