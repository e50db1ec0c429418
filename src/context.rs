//! Shared scroll context for one tab view.
//!
//! [`SharedContext`] is the single place all scene controllers read
//! configuration from and write shared state to: the collapse value, the
//! active tab, and the gating flags set by the tab chrome. Flag changes that
//! other components react to are queued on the context's [`Reactor`].

use tokio::sync::watch;
use tracing::{debug, trace};

use crate::config::CollapseConfig;
use crate::reactive::{Notification, Reactor, SharedValue};

// ---------------------------------------------------------------------------
// HeaderLayout
// ---------------------------------------------------------------------------

/// Header and tab bar placement derived from the collapse value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderLayout {
    /// Vertical translation of the header (`<= 0` while collapsing).
    pub header_translate: f64,
    /// Top edge of the tab bar inside the container.
    pub tabbar_top: f64,
    /// Collapse progress in `[0, 1]`.
    pub progress: f64,
}

// ---------------------------------------------------------------------------
// SharedContext
// ---------------------------------------------------------------------------

/// Per tab-view shared state.
#[derive(Debug)]
pub struct SharedContext {
    config: CollapseConfig,
    shared: SharedValue<f64>,
    active_index: SharedValue<usize>,
    tabs_working: SharedValue<bool>,
    touching_tabs: SharedValue<bool>,
    sliding_header: SharedValue<bool>,
    container_height: f64,
    reactor: Reactor,
}

impl SharedContext {
    /// Create a context with the given config and initially active tab.
    pub fn new(config: CollapseConfig, initial_index: usize) -> Self {
        Self {
            config,
            shared: SharedValue::new(0.0),
            active_index: SharedValue::new(initial_index),
            tabs_working: SharedValue::new(false),
            touching_tabs: SharedValue::new(false),
            sliding_header: SharedValue::new(false),
            container_height: 0.0,
            reactor: Reactor::new(),
        }
    }

    /// The configuration this context was built with.
    pub fn config(&self) -> &CollapseConfig {
        &self.config
    }

    /// The notification queue.
    pub fn reactor(&mut self) -> &mut Reactor {
        &mut self.reactor
    }

    /// Number of queued notifications.
    pub fn pending_notifications(&self) -> usize {
        self.reactor.pending_count()
    }

    // ── Shared collapse value ────────────────────────────────────────

    /// Raw shared scroll value, unclamped.
    pub fn shared_offset(&self) -> f64 {
        self.shared.get()
    }

    /// How far the header has collapsed, clamped to `[0, header_height]`.
    pub fn collapse(&self) -> f64 {
        let header = self.config.header_height;
        self.shared.with(|value| value.clamp(0.0, header))
    }

    /// Write the raw shared value. Only scene controllers that passed the
    /// activation gate call this.
    pub(crate) fn write_shared(&mut self, value: f64) -> bool {
        let changed = self.shared.set(value);
        if changed {
            trace!(value, "shared collapse value updated");
        }
        changed
    }

    /// Observe the raw shared value.
    pub fn subscribe_shared(&self) -> watch::Receiver<f64> {
        self.shared.subscribe()
    }

    /// Header placement for the current collapse value.
    pub fn header_layout(&self) -> HeaderLayout {
        let collapse = self.collapse().min(self.config.collapse_limit());
        let limit = self.config.collapse_limit();
        HeaderLayout {
            header_translate: -collapse,
            tabbar_top: self.config.header_height - collapse,
            progress: if limit > 0.0 { collapse / limit } else { 0.0 },
        }
    }

    // ── Tab activation ───────────────────────────────────────────────

    /// The interactive tab.
    pub fn active_index(&self) -> usize {
        self.active_index.get()
    }

    /// Change the interactive tab.
    pub fn set_active_index(&mut self, index: usize) {
        let previous = self.active_index.get();
        if self.active_index.set(index) {
            debug!(previous, current = index, "active tab changed");
            self.reactor.notify(Notification::ActiveTabChanged {
                previous,
                current: index,
            });
        }
    }

    /// Observe the active tab.
    pub fn subscribe_active_index(&self) -> watch::Receiver<usize> {
        self.active_index.subscribe()
    }

    // ── Gating flags ─────────────────────────────────────────────────

    /// Whether a tab transition is in progress.
    pub fn tabs_working(&self) -> bool {
        self.tabs_working.get()
    }

    /// Mark a tab transition as started or finished.
    pub fn set_tabs_working(&mut self, working: bool) {
        if self.tabs_working.set(working) {
            debug!(working, "tabs working changed");
            self.reactor.notify(Notification::TabsWorkingChanged(working));
        }
    }

    /// Whether the user is touching the tabs area.
    pub fn touching_tabs(&self) -> bool {
        self.touching_tabs.get()
    }

    /// Record a touch start/end on the tabs area.
    pub fn set_touching_tabs(&mut self, touching: bool) {
        if self.touching_tabs.set(touching) {
            self.reactor
                .notify(Notification::TouchingTabsChanged(touching));
        }
    }

    /// Whether the user is sliding the header.
    pub fn sliding_header(&self) -> bool {
        self.sliding_header.get()
    }

    /// Record a header slide start/end.
    pub fn set_sliding_header(&mut self, sliding: bool) {
        if self.sliding_header.set(sliding) {
            self.reactor
                .notify(Notification::SlidingHeaderChanged(sliding));
        }
    }

    // ── Measurements ─────────────────────────────────────────────────

    /// Record the measured container height.
    pub fn set_container_height(&mut self, height: f64) {
        if height > 0.0 {
            self.container_height = height;
        }
    }

    /// Measured container height (0 until laid out).
    pub fn container_height(&self) -> f64 {
        self.container_height
    }

    /// Minimum content height a scene needs so the header can fully collapse.
    pub fn expect_height(&self) -> f64 {
        self.container_height + self.config.collapse_limit()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> SharedContext {
        SharedContext::new(
            CollapseConfig::new()
                .with_header_height(100.0)
                .with_tabbar_height(40.0),
            0,
        )
    }

    #[test]
    fn collapse_is_clamped() {
        let mut ctx = ctx();
        ctx.write_shared(250.0);
        assert_eq!(ctx.shared_offset(), 250.0);
        assert_eq!(ctx.collapse(), 100.0);
        ctx.write_shared(-20.0);
        assert_eq!(ctx.collapse(), 0.0);
    }

    #[test]
    fn header_layout_tracks_collapse() {
        let mut ctx = ctx();
        ctx.write_shared(40.0);
        let layout = ctx.header_layout();
        assert_eq!(layout.header_translate, -40.0);
        assert_eq!(layout.tabbar_top, 60.0);
        assert!((layout.progress - 0.4).abs() < 1e-12);
    }

    #[test]
    fn header_layout_stops_at_froze_top() {
        let mut ctx = SharedContext::new(
            CollapseConfig::new()
                .with_header_height(100.0)
                .with_froze_top(20.0),
            0,
        );
        ctx.write_shared(100.0);
        let layout = ctx.header_layout();
        assert_eq!(layout.header_translate, -80.0);
        assert_eq!(layout.progress, 1.0);
    }

    #[test]
    fn active_index_change_notifies_once() {
        let mut ctx = ctx();
        ctx.set_active_index(2);
        ctx.set_active_index(2);
        assert_eq!(
            ctx.reactor().drain(),
            vec![Notification::ActiveTabChanged {
                previous: 0,
                current: 2
            }]
        );
    }

    #[test]
    fn flags_notify_on_change_only() {
        let mut ctx = ctx();
        ctx.set_tabs_working(false);
        ctx.set_touching_tabs(true);
        ctx.set_touching_tabs(true);
        ctx.set_sliding_header(true);
        ctx.set_sliding_header(false);
        assert_eq!(
            ctx.reactor().drain(),
            vec![
                Notification::TouchingTabsChanged(true),
                Notification::SlidingHeaderChanged(true),
                Notification::SlidingHeaderChanged(false),
            ]
        );
    }

    #[test]
    fn shared_subscriber_observes_writes() {
        let mut ctx = ctx();
        let mut rx = ctx.subscribe_shared();
        ctx.write_shared(12.0);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 12.0);
    }

    #[test]
    fn expect_height_adds_collapse_limit() {
        let mut ctx = ctx();
        assert_eq!(ctx.expect_height(), 100.0);
        ctx.set_container_height(600.0);
        ctx.set_container_height(0.0);
        assert_eq!(ctx.container_height(), 600.0);
        assert_eq!(ctx.expect_height(), 700.0);
    }
}
