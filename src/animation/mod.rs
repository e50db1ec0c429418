//! Timing animations: easing curves, progress math, and the animation arena.

pub mod animator;
pub mod easing;
pub mod timing;

pub use animator::{
    AnimationEnd, AnimationFrame, AnimationId, AnimationTarget, Animator, TickOutput, Timing,
};
pub use easing::EasingType;
