//! Pure timing helpers: progress from elapsed time, interpolation.

use std::time::Duration;

/// Progress of an animation in `[0, 1]`. Zero-length animations are complete.
#[inline]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Whether `elapsed` has reached `duration`.
#[inline]
pub fn is_complete(elapsed: Duration, duration: Duration) -> bool {
    elapsed >= duration
}

/// Linear interpolation between `from` and `to`.
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
