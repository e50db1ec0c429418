//! Easing curves mapping linear progress in `[0, 1]` to eased progress.

use serde::{Deserialize, Serialize};

/// Available easing curves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Constant speed.
    Linear,
    /// Quadratic ease-in-out (the host toolkit's timing default).
    #[default]
    InOutQuad,
    /// Cubic ease-out: fast start, gentle stop.
    CubicOut,
}

impl EasingType {
    /// Apply the curve to a progress value. Input is clamped to `[0, 1]`.
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::InOutQuad => in_out_quad(t),
            EasingType::CubicOut => cubic_out(t),
        }
    }
}

#[inline]
fn in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[inline]
fn cubic_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}
