//! Runtime system trait

use crate::event_bus::EventBus;
use burst_core::Result;
use burst_scene::SceneGraph;

/// A system that can be ticked by the game loop
///
/// Systems are updated in registration order, once per frame.
pub trait RuntimeSystem {
    /// Called once before the first frame
    fn initialize(&mut self, scene: &mut SceneGraph) -> Result<()>;

    /// Called once per frame with the events raised since the last frame
    fn update(&mut self, scene: &mut SceneGraph, events: &EventBus, dt: f64) -> Result<()>;

    /// Called when the loop is torn down
    fn shutdown(&mut self, scene: &mut SceneGraph) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
