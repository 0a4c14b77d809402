//! Frame loop driver

use crate::clock::FrameClock;
use crate::event::GameEvent;
use crate::event_bus::EventBus;
use crate::system::RuntimeSystem;
use burst_core::Result;
use burst_scene::SceneGraph;

/// Owns the scene, the event bus and the clock, and runs borrowed systems.
///
/// Systems stay owned by the caller so gameplay code keeps typed access to
/// them between frames.
pub struct GameLoop {
    pub scene: SceneGraph,
    pub clock: FrameClock,
    events: EventBus,
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl GameLoop {
    pub fn new() -> Self {
        Self::with_scene(SceneGraph::new())
    }

    pub fn with_scene(scene: SceneGraph) -> Self {
        Self {
            scene,
            clock: FrameClock::new(),
            events: EventBus::new(),
        }
    }

    /// Queue an event for the next frame
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn initialize(&mut self, systems: &mut [&mut dyn RuntimeSystem]) -> Result<()> {
        for system in systems.iter_mut() {
            log::debug!("initializing system '{}'", system.name());
            system.initialize(&mut self.scene)?;
        }
        Ok(())
    }

    /// Run one frame of `dt` seconds. Pending events are visible to every
    /// system and cleared afterwards, even if a system fails.
    pub fn frame(&mut self, systems: &mut [&mut dyn RuntimeSystem], dt: f64) -> Result<()> {
        let dt = self.clock.step(dt);
        let result = systems
            .iter_mut()
            .try_for_each(|system| system.update(&mut self.scene, &self.events, dt));
        self.events.clear();
        result
    }

    /// Run one frame timed by the wall clock
    pub fn tick(&mut self, systems: &mut [&mut dyn RuntimeSystem]) -> Result<()> {
        let dt = self.clock.tick();
        let result = systems
            .iter_mut()
            .try_for_each(|system| system.update(&mut self.scene, &self.events, dt));
        self.events.clear();
        result
    }

    /// Run `frames` frames of `dt` seconds each
    pub fn run_fixed(
        &mut self,
        systems: &mut [&mut dyn RuntimeSystem],
        frames: u64,
        dt: f64,
    ) -> Result<()> {
        for _ in 0..frames {
            self.frame(systems, dt)?;
        }
        Ok(())
    }

    pub fn shutdown(&mut self, systems: &mut [&mut dyn RuntimeSystem]) -> Result<()> {
        for system in systems.iter_mut().rev() {
            log::debug!("shutting down system '{}'", system.name());
            system.shutdown(&mut self.scene)?;
        }
        Ok(())
    }
}
