//! Easing curves

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Maps normalized time in [0, 1] to eased progress.
///
/// Power1 is quadratic, Power2 cubic, Power3 quartic. The default is
/// `Power1Out`, the usual default of tween libraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    Power1In,
    #[default]
    Power1Out,
    Power1InOut,
    Power2In,
    Power2Out,
    Power2InOut,
    Power3In,
    Power3Out,
    Power3InOut,
    SineIn,
    SineOut,
    SineInOut,
}

impl Ease {
    /// Evaluate the curve. `t` is clamped to [0, 1].
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Ease::Linear => t,
            Ease::Power1In => power_in(t, 2),
            Ease::Power1Out => power_out(t, 2),
            Ease::Power1InOut => power_in_out(t, 2),
            Ease::Power2In => power_in(t, 3),
            Ease::Power2Out => power_out(t, 3),
            Ease::Power2InOut => power_in_out(t, 3),
            Ease::Power3In => power_in(t, 4),
            Ease::Power3Out => power_out(t, 4),
            Ease::Power3InOut => power_in_out(t, 4),
            Ease::SineIn => 1.0 - (t * PI * 0.5).cos(),
            Ease::SineOut => (t * PI * 0.5).sin(),
            Ease::SineInOut => -((PI * t).cos() - 1.0) * 0.5,
        }
    }
}

fn power_in(t: f32, exp: i32) -> f32 {
    t.powi(exp)
}

fn power_out(t: f32, exp: i32) -> f32 {
    1.0 - (1.0 - t).powi(exp)
}

fn power_in_out(t: f32, exp: i32) -> f32 {
    if t < 0.5 {
        (2.0 * t).powi(exp) * 0.5
    } else {
        1.0 - (2.0 * (1.0 - t)).powi(exp) * 0.5
    }
}
