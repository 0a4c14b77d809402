//! Tween scheduling for Burst
//!
//! Animates node transform properties toward target values over time:
//! - `Ease`: easing curves (linear, power and sine families)
//! - `TweenRequest` / `Animate`: the request type and the scheduling seam
//! - `Tweener`: per-frame scheduler that writes into a `SceneGraph` and
//!   reports completions as `TweenComplete` events

pub mod ease;
pub mod tween;
pub mod tweener;

pub use ease::Ease;
pub use tween::{Animate, TweenComplete, TweenId, TweenProperty, TweenRequest};
pub use tweener::Tweener;
