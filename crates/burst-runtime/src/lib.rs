//! Burst Runtime - frame loop infrastructure
//!
//! Provides the building blocks for driving effects once per frame:
//! - `FrameClock`: wall-clock or fixed-step frame timing
//! - `GameEvent` / `EventBus`: per-frame queue of gameplay requests
//! - `RuntimeSystem`: trait for systems ticked by the loop
//! - `GameLoop`: owns the scene and runs systems in registration order

mod clock;
mod event;
mod event_bus;
mod game_loop;
mod system;

pub use clock::FrameClock;
pub use event::GameEvent;
pub use event_bus::EventBus;
pub use game_loop::GameLoop;
pub use system::RuntimeSystem;
