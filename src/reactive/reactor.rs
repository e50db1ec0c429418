//! Ordered notification queue.
//!
//! State changes that other components must react to are pushed into the
//! [`Reactor`] as [`Notification`]s. The owning tab view drains the queue in
//! FIFO order; notifications raised while draining are appended and handled
//! in the same flush. [`Reactor::begin_batch`] / [`Reactor::end_batch`] defer
//! flushing until the outermost batch closes.

use std::collections::VecDeque;

use crate::animation::AnimationEnd;

/// Upper bound on notifications handled by a single flush.
pub const MAX_FLUSH_ROUNDS: usize = 1024;

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// A state change that triggers reactions.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// The interactive tab changed.
    ActiveTabChanged { previous: usize, current: usize },
    /// A tab transition started or ended.
    TabsWorkingChanged(bool),
    /// The user started or stopped touching the tabs area.
    TouchingTabsChanged(bool),
    /// The user started or stopped sliding the header.
    SlidingHeaderChanged(bool),
    /// A scene's refresh or drag flags changed.
    SceneStateChanged(usize),
    /// An animation finished or was cancelled.
    AnimationEnded(AnimationEnd),
}

impl Notification {
    /// Notifications that carry no payload beyond their identity can be
    /// coalesced while still pending.
    fn coalesces(&self) -> bool {
        matches!(self, Notification::SceneStateChanged(_))
    }
}

// ---------------------------------------------------------------------------
// Reactor
// ---------------------------------------------------------------------------

/// FIFO queue of pending notifications with batching.
#[derive(Debug, Default)]
pub struct Reactor {
    queue: VecDeque<Notification>,
    batch_depth: usize,
    flushing: bool,
}

impl Reactor {
    /// Create an empty reactor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a notification. Pending duplicates of coalescing kinds are
    /// dropped.
    pub fn notify(&mut self, notification: Notification) {
        if notification.coalesces() && self.queue.contains(&notification) {
            return;
        }
        self.queue.push_back(notification);
    }

    /// Next pending notification.
    pub fn pop(&mut self) -> Option<Notification> {
        self.queue.pop_front()
    }

    /// Drain all pending notifications.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }

    /// Number of pending notifications.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Enter a batch.
    pub fn begin_batch(&mut self) {
        self.batch_depth += 1;
    }

    /// Leave a batch. Returns `true` when the outermost batch closed.
    pub fn end_batch(&mut self) -> bool {
        self.batch_depth = self.batch_depth.saturating_sub(1);
        self.batch_depth == 0
    }

    /// Whether flushing should be deferred.
    pub fn is_batching(&self) -> bool {
        self.batch_depth > 0
    }

    /// Mark the start of a flush. Returns `false` if one is already running,
    /// in which case the caller must not flush re-entrantly.
    pub fn enter_flush(&mut self) -> bool {
        if self.flushing {
            return false;
        }
        self.flushing = true;
        true
    }

    /// Mark the end of a flush.
    pub fn exit_flush(&mut self) {
        self.flushing = false;
    }
}

// ===========================================================================
// Tests
// ===========================================================================
