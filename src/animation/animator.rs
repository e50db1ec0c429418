//! Timing-animation arena.
//!
//! [`Animator`] owns every in-flight timing animation in a slotmap. Each
//! animation drives exactly one [`AnimationTarget`]; starting a new animation
//! for a target cancels the previous one first, so two animations never
//! overlap on the same value. [`Animator::tick`] advances time and reports
//! per-target frames and completions in target order.

use std::collections::BTreeMap;
use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

use super::easing::EasingType;
use super::timing::{is_complete, lerp, progress};

new_key_type! {
    /// Identifies an animation slot inside the [`Animator`].
    pub struct AnimationId;
}

// ---------------------------------------------------------------------------
// Targets and specs
// ---------------------------------------------------------------------------

/// The value an animation drives. Ordering is the frame application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnimationTarget {
    /// A scene's refresh track (refresh reveal plus restored list offset).
    RefreshTrack(usize),
    /// A scene's scroll offset (snap and animated scroll commands).
    SceneOffset(usize),
    /// A scene's snap debounce timer. The value carries no meaning.
    SnapDebounce(usize),
}

impl AnimationTarget {
    /// The scene index this target belongs to.
    pub fn scene(self) -> usize {
        match self {
            AnimationTarget::RefreshTrack(i)
            | AnimationTarget::SceneOffset(i)
            | AnimationTarget::SnapDebounce(i) => i,
        }
    }
}

/// Parameters of a timing animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    pub easing: EasingType,
}

impl Timing {
    /// A timing animation from `from` to `to`.
    pub fn new(from: f64, to: f64, duration: Duration, easing: EasingType) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
        }
    }

    fn value_at(&self, elapsed: Duration) -> f64 {
        let t = self.easing.apply(progress(elapsed, self.duration));
        lerp(self.from, self.to, t)
    }
}

/// One interpolated value produced by a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub id: AnimationId,
    pub target: AnimationTarget,
    pub value: f64,
}

/// Completion report. `finished` is `false` when the animation was cancelled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationEnd {
    pub id: AnimationId,
    pub target: AnimationTarget,
    pub value: f64,
    pub finished: bool,
}

/// Everything a single tick produced.
#[derive(Debug, Default)]
pub struct TickOutput {
    pub frames: Vec<AnimationFrame>,
    pub ends: Vec<AnimationEnd>,
}

#[derive(Debug)]
struct Animation {
    target: AnimationTarget,
    timing: Timing,
    elapsed: Duration,
    value: f64,
}

// ---------------------------------------------------------------------------
// Animator
// ---------------------------------------------------------------------------

/// Arena of in-flight animations, at most one per target.
#[derive(Debug, Default)]
pub struct Animator {
    animations: SlotMap<AnimationId, Animation>,
    by_target: BTreeMap<AnimationTarget, AnimationId>,
}

impl Animator {
    /// Create an empty animator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an animation, cancelling any animation already driving `target`.
    ///
    /// Returns the new id and, if one was preempted, its cancellation report.
    pub fn start(
        &mut self,
        target: AnimationTarget,
        timing: Timing,
    ) -> (AnimationId, Option<AnimationEnd>) {
        let cancelled = self.cancel(target);
        let id = self.animations.insert(Animation {
            target,
            timing,
            elapsed: Duration::ZERO,
            value: timing.from,
        });
        self.by_target.insert(target, id);
        (id, cancelled)
    }

    /// Cancel the animation driving `target`, if any.
    pub fn cancel(&mut self, target: AnimationTarget) -> Option<AnimationEnd> {
        let id = self.by_target.remove(&target)?;
        let anim = self.animations.remove(id)?;
        Some(AnimationEnd {
            id,
            target,
            value: anim.value,
            finished: false,
        })
    }

    /// Cancel every animation belonging to `scene`.
    pub fn cancel_scene(&mut self, scene: usize) -> Vec<AnimationEnd> {
        let targets: Vec<AnimationTarget> = self
            .by_target
            .keys()
            .copied()
            .filter(|t| t.scene() == scene)
            .collect();
        targets.into_iter().filter_map(|t| self.cancel(t)).collect()
    }

    /// Whether an animation currently drives `target`.
    pub fn is_running(&self, target: AnimationTarget) -> bool {
        self.by_target.contains_key(&target)
    }

    /// Id of the animation driving `target`.
    pub fn id_of(&self, target: AnimationTarget) -> Option<AnimationId> {
        self.by_target.get(&target).copied()
    }

    /// Last value produced for `target`.
    pub fn current_value(&self, target: AnimationTarget) -> Option<f64> {
        let id = self.by_target.get(&target)?;
        self.animations.get(*id).map(|a| a.value)
    }

    /// Destination of the animation driving `target`.
    pub fn destination(&self, target: AnimationTarget) -> Option<f64> {
        let id = self.by_target.get(&target)?;
        self.animations.get(*id).map(|a| a.timing.to)
    }

    /// Number of in-flight animations.
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    /// Whether nothing is animating.
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Advance every animation by `dt`.
    ///
    /// Each animation yields one frame; animations that reach their duration
    /// also yield a finished [`AnimationEnd`] and are removed.
    pub fn tick(&mut self, dt: Duration) -> TickOutput {
        let mut out = TickOutput::default();
        let entries: Vec<(AnimationTarget, AnimationId)> =
            self.by_target.iter().map(|(t, id)| (*t, *id)).collect();

        for (target, id) in entries {
            let Some(anim) = self.animations.get_mut(id) else {
                continue;
            };
            anim.elapsed += dt;
            anim.value = anim.timing.value_at(anim.elapsed);
            out.frames.push(AnimationFrame {
                id,
                target,
                value: anim.value,
            });
            if is_complete(anim.elapsed, anim.timing.duration) {
                let value = anim.timing.to;
                self.animations.remove(id);
                self.by_target.remove(&target);
                out.ends.push(AnimationEnd {
                    id,
                    target,
                    value,
                    finished: true,
                });
            }
        }
        out
    }
}

// ===========================================================================
// Tests
// ===========================================================================
